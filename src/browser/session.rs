//! chromiumoxide 会话实现

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use super::BrowserSession;
use crate::error::BrowserError;

/// 轮询等待元素的间隔
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 持有浏览器、页面和事件处理任务的会话
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    /// 自己启动的浏览器在释放时整体关闭；连接的浏览器只关闭页面
    owns_browser: bool,
    closed: bool,
}

impl ChromeSession {
    /// 自己启动的浏览器
    pub fn owned(browser: Browser, page: Page, handler: JoinHandle<()>) -> Self {
        Self {
            browser,
            page,
            handler,
            owns_browser: true,
            closed: false,
        }
    }

    /// 连接到的外部浏览器
    pub fn attached(browser: Browser, page: Page, handler: JoinHandle<()>) -> Self {
        Self {
            browser,
            page,
            handler,
            owns_browser: false,
            closed: false,
        }
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        debug!("导航到: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::navigation_failed(url, e))?;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, limit: Duration) -> Result<(), BrowserError> {
        let poll = async {
            loop {
                if self.page.find_element(selector).await.is_ok() {
                    return;
                }
                sleep(WAIT_POLL_INTERVAL).await;
            }
        };

        timeout(limit, poll)
            .await
            .map_err(|_| BrowserError::WaitTimeout {
                selector: selector.to_string(),
                timeout_ms: limit.as_millis() as u64,
            })
    }

    async fn attribute_values(
        &self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<String>, BrowserError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(BrowserError::query_failed)?;
        debug!("选择器 '{}' 匹配到 {} 个元素", selector, elements.len());

        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(value) = element
                .attribute(attribute)
                .await
                .map_err(BrowserError::query_failed)?
            {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn content(&self) -> Result<String, BrowserError> {
        self.page.content().await.map_err(BrowserError::query_failed)
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let result = if self.owns_browser {
            let closed = self
                .browser
                .close()
                .await
                .map(|_| ())
                .map_err(BrowserError::close_failed);
            match &closed {
                Ok(()) => {
                    if let Err(e) = self.browser.wait().await {
                        warn!("等待浏览器进程退出失败: {}", e);
                    }
                }
                // 连接已断开时进程可能仍在运行，直接结束进程
                Err(_) => {
                    if let Some(Err(e)) = self.browser.kill().await {
                        warn!("结束浏览器进程失败: {}", e);
                    }
                }
            }
            closed
        } else {
            self.page
                .clone()
                .close()
                .await
                .map_err(BrowserError::close_failed)
        };

        self.handler.abort();
        result
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
