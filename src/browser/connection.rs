use chromiumoxide::{Browser, Page};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use super::spawn_handler;
use crate::error::BrowserError;

/// 连接到已开启调试端口的浏览器，并为本次运行新建一个页面
///
/// 新页面在会话释放时关闭，浏览器本身保持运行
pub async fn connect_to_browser_and_page(
    port: u16,
) -> Result<(Browser, Page, JoinHandle<()>), BrowserError> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        BrowserError::ConnectionFailed {
            port,
            source: Box::new(e),
        }
    })?;
    debug!("浏览器连接成功");

    let handler = spawn_handler(handler);

    // 等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            error!("创建新页面失败: {}", e);
            handler.abort();
            return Err(BrowserError::PageCreationFailed { source: Box::new(e) });
        }
    };
    debug!("已创建空白页面");

    Ok((browser, page, handler))
}
