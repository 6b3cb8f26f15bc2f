//! 搜索 → 提取 → 摘要 流水线 - 编排层
//!
//! ## 职责
//!
//! 1. **资源管理**：每次运行获取一个浏览器会话，并在所有退出路径上释放一次
//! 2. **流程调度**：收集链接后逐个交给 `LinkFlow`
//! 3. **限速**：每次调用模型后固定停顿
//! 4. **结果组装**：按链接收集顺序组装 `ResultSet`

use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::browser::{BrowserSession, SessionLauncher};
use crate::config::Config;
use crate::error::{AppResult, InputError};
use crate::models::{Diagnostic, ResultSet, SearchQuery, Stage};
use crate::orchestrator::observer::{NoopObserver, ProgressObserver};
use crate::services::{PageExtractor, ResultLinkCollector, SearchProvider, Summarizer};
use crate::workflow::{LinkCtx, LinkFlow, LinkOutcome};

/// 流水线参数
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub provider: SearchProvider,
    pub search_wait: Duration,
    pub page_wait: Duration,
    pub max_words: usize,
    pub rate_limit_pause: Duration,
    pub digest: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            provider: SearchProvider::for_engine(config.search_engine),
            search_wait: config.search_wait(),
            page_wait: config.page_wait(),
            max_words: config.max_words,
            rate_limit_pause: config.rate_limit_pause(),
            digest: config.digest,
        }
    }
}

/// 流水线
///
/// 浏览器会话工厂和摘要服务都由外部注入
pub struct Pipeline<L, S> {
    launcher: L,
    collector: ResultLinkCollector,
    flow: LinkFlow<S>,
    rate_limit_pause: Duration,
    digest: bool,
}

impl<L: SessionLauncher, S: Summarizer> Pipeline<L, S> {
    pub fn new(launcher: L, summarizer: S, settings: PipelineSettings) -> Self {
        Self {
            launcher,
            collector: ResultLinkCollector::new(settings.provider, settings.search_wait),
            flow: LinkFlow::new(
                PageExtractor::new(settings.page_wait, settings.max_words),
                summarizer,
            ),
            rate_limit_pause: settings.rate_limit_pause,
            digest: settings.digest,
        }
    }

    /// 运行一次查询
    pub async fn run(&self, query: &str, max_results: usize) -> AppResult<ResultSet> {
        self.run_with_observer(query, max_results, &NoopObserver).await
    }

    /// 运行一次查询，并通过 `observer` 报告进度
    ///
    /// # 返回
    /// - 输入非法或无法获取浏览器会话时返回错误
    /// - 其余失败都被吸收为诊断信息；空的 `ResultSet` 表示"没有可用结果"
    pub async fn run_with_observer(
        &self,
        query: &str,
        max_results: usize,
        observer: &dyn ProgressObserver,
    ) -> AppResult<ResultSet> {
        let query = SearchQuery::new(query)?;
        if max_results == 0 {
            return Err(InputError::InvalidLimit(max_results).into());
        }

        let mut session = self.launcher.open().await.map_err(|e| {
            error!("获取浏览器会话失败: {}", e);
            e
        })?;

        let mut result = self
            .run_in_session(session.as_ref(), &query, max_results, observer)
            .await;

        // 无论前面发生什么，会话都在这里释放且只释放一次
        if let Err(e) = session.close().await {
            warn!("⚠️ 浏览器会话释放失败: {}", e);
            let diagnostic = Diagnostic::new(Stage::Release, None, e.to_string());
            observer.on_diagnostic(&diagnostic);
            result.record(diagnostic);
        }

        if self.digest && !result.is_empty() {
            self.attach_digest(&mut result, observer).await;
        }

        Ok(result)
    }

    async fn run_in_session(
        &self,
        session: &dyn BrowserSession,
        query: &SearchQuery,
        max_results: usize,
        observer: &dyn ProgressObserver,
    ) -> ResultSet {
        let mut result = ResultSet::new(query);

        let links = match self.collector.collect(session, query, max_results).await {
            Ok(links) => links,
            Err(e) => {
                warn!("⚠️ 搜索不可用: {}", e);
                let diagnostic = Diagnostic::new(Stage::Search, None, e.to_string());
                observer.on_diagnostic(&diagnostic);
                result.record(diagnostic);
                return result;
            }
        };

        let total = links.len();
        result.links_collected = total;
        observer.on_links_collected(total);

        if total == 0 {
            warn!("⚠️ 没有找到任何搜索结果");
            return result;
        }

        for (index, link) in links.into_iter().enumerate() {
            let ctx = LinkCtx::new(index + 1, total, link);
            observer.on_progress(&ctx.progress());

            let outcome = self.flow.run(session, &ctx).await;
            let called_model = outcome.called_model();

            match outcome {
                LinkOutcome::Summarized(entry) => result.push(entry),
                LinkOutcome::NoContent(diagnostic) | LinkOutcome::SummaryFailed(diagnostic) => {
                    observer.on_diagnostic(&diagnostic);
                    result.record(diagnostic);
                }
            }

            // 限速：调用过模型且还有后续链接时停顿
            if called_model && ctx.has_next() && !self.rate_limit_pause.is_zero() {
                sleep(self.rate_limit_pause).await;
            }
        }

        info!(
            "✓ 处理完成: 成功 {}/{}",
            result.len(),
            result.links_collected
        );
        result
    }

    async fn attach_digest(&self, result: &mut ResultSet, observer: &dyn ProgressObserver) {
        info!("🤖 正在生成综述...");
        match self.flow.summarizer().digest(&result.entries).await {
            Ok(digest) if !digest.trim().is_empty() => result.digest = Some(digest),
            Ok(_) => {
                let diagnostic = Diagnostic::new(Stage::Summarization, None, "综述为空");
                observer.on_diagnostic(&diagnostic);
                result.record(diagnostic);
            }
            Err(e) => {
                warn!("⚠️ 综述生成失败: {}", e);
                let diagnostic =
                    Diagnostic::new(Stage::Summarization, None, format!("综述生成失败: {}", e));
                observer.on_diagnostic(&diagnostic);
                result.record(diagnostic);
            }
        }
    }
}
