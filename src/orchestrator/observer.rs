//! 进度回调
//!
//! 让调用方（CLI、UI）在不依赖任何界面框架的前提下展示进度

use tracing::{info, warn};

use crate::models::{Diagnostic, Progress};

/// 进度观察者
pub trait ProgressObserver: Send + Sync {
    /// 链接收集完成
    fn on_links_collected(&self, _total: usize) {}

    /// 开始处理第 `progress.index` 个链接
    fn on_progress(&self, progress: &Progress);

    /// 某个阶段失败（每个失败链接一次）
    fn on_diagnostic(&self, _diagnostic: &Diagnostic) {}
}

/// 什么都不做的观察者
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_progress(&self, _progress: &Progress) {}
}

/// 把进度写入日志的观察者
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl ProgressObserver for LoggingObserver {
    fn on_links_collected(&self, total: usize) {
        info!("📋 共 {} 个链接待处理", total);
    }

    fn on_progress(&self, progress: &Progress) {
        info!("\n{}", "─".repeat(30));
        info!("处理第 {}/{} 个链接", progress.index, progress.total);
    }

    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        warn!("{}", diagnostic);
    }
}
