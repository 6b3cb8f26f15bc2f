use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig, Page};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info};

use super::spawn_handler;
use crate::config::BrowserSettings;
use crate::error::BrowserError;

/// 启动无头浏览器并打开一个空白页
///
/// # 返回
/// 返回 (浏览器, 页面, 事件处理任务)
pub async fn launch_headless_browser(
    settings: &BrowserSettings,
) -> Result<(Browser, Page, JoinHandle<()>), BrowserError> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
    ]);
    if let Some(executable) = &settings.chrome_executable {
        debug!("浏览器路径: {}", executable);
        builder = builder.chrome_executable(Path::new(executable));
    }

    let config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        BrowserError::launch_failed(e)
    })?;

    let (browser, handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        BrowserError::launch_failed(e)
    })?;
    debug!("无头浏览器启动成功");

    let handler = spawn_handler(handler);

    // 等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = match browser.new_page("about:blank").await {
        Ok(page) => page,
        Err(e) => {
            error!("创建页面失败: {}", e);
            handler.abort();
            return Err(BrowserError::PageCreationFailed { source: Box::new(e) });
        }
    };

    Ok((browser, page, handler))
}
