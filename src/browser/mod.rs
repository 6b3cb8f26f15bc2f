//! 浏览器基础设施
//!
//! 持有稀缺资源（浏览器进程与页面），只向上层暴露"导航、等待、读取"能力。
//! 上层通过 [`BrowserSession`] / [`SessionLauncher`] 两个 trait 使用浏览器，
//! 测试中可以替换为不访问网络的假实现。

pub mod connection;
pub mod headless;
pub mod session;

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Handler;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::BrowserSettings;
use crate::error::BrowserError;

pub use connection::connect_to_browser_and_page;
pub use headless::launch_headless_browser;
pub use session::ChromeSession;

/// 一次运行独占的浏览器会话
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// 导航到指定 URL
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    /// 等待选择器匹配的元素出现，超过 `timeout` 返回 [`BrowserError::WaitTimeout`]
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// 按 DOM 顺序读取所有匹配元素的属性值（缺失该属性的元素被跳过）
    async fn attribute_values(
        &self,
        selector: &str,
        attribute: &str,
    ) -> Result<Vec<String>, BrowserError>;

    /// 当前页面渲染后的 HTML
    async fn content(&self) -> Result<String, BrowserError>;

    /// 释放会话
    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// 会话工厂，由编排层在每次运行开始时调用一次
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn open(&self) -> Result<Box<dyn BrowserSession>, BrowserError>;
}

/// 基于 chromiumoxide 的会话工厂
///
/// 配置了调试端口时连接已启动的浏览器，否则启动新的无头浏览器
#[derive(Debug, Clone, Default)]
pub struct ChromeLauncher {
    settings: BrowserSettings,
}

impl ChromeLauncher {
    pub fn new(settings: BrowserSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SessionLauncher for ChromeLauncher {
    async fn open(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        let session = match self.settings.debug_port {
            Some(port) => {
                let (browser, page, handler) = connect_to_browser_and_page(port).await?;
                ChromeSession::attached(browser, page, handler)
            }
            None => {
                let (browser, page, handler) = launch_headless_browser(&self.settings).await?;
                ChromeSession::owned(browser, page, handler)
            }
        };
        info!("✓ 浏览器会话已就绪");
        Ok(Box::new(session))
    }
}

/// 在后台处理浏览器事件
pub(crate) fn spawn_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        // 单条 CDP 消息解析失败不影响连接，连接关闭时流自然结束
        while let Some(h) = handler.next().await {
            if let Err(e) = h {
                debug!("浏览器事件处理错误: {}", e);
            }
        }
    })
}
