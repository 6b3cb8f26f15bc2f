//! 单个链接的处理流程 - 流程层
//!
//! 流程顺序：
//! 1. 提取正文（失败或为空 → 跳过）
//! 2. 生成摘要（失败或为空 → 跳过）
//! 3. 组装 (摘要, 链接)

use tracing::{debug, info, warn};

use crate::browser::BrowserSession;
use crate::models::{Diagnostic, Stage, SummaryEntry};
use crate::services::{PageExtractor, Summarizer};
use crate::utils::logging::truncate_text;
use crate::workflow::LinkCtx;

/// 单个链接的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// 成功得到摘要
    Summarized(SummaryEntry),
    /// 没有可用正文，未调用模型
    NoContent(Diagnostic),
    /// 调用了模型但没有得到摘要
    SummaryFailed(Diagnostic),
}

impl LinkOutcome {
    /// 本次处理是否调用了模型（决定是否需要限速停顿）
    pub fn called_model(&self) -> bool {
        !matches!(self, LinkOutcome::NoContent(_))
    }
}

/// 单个链接的处理流程
///
/// - 编排 提取 → 摘要
/// - 不持有浏览器会话，由编排层传入
/// - 所有失败都转换为 [`LinkOutcome`]，不向上传播
pub struct LinkFlow<S> {
    extractor: PageExtractor,
    summarizer: S,
}

impl<S: Summarizer> LinkFlow<S> {
    pub fn new(extractor: PageExtractor, summarizer: S) -> Self {
        Self {
            extractor,
            summarizer,
        }
    }

    pub fn summarizer(&self) -> &S {
        &self.summarizer
    }

    pub async fn run(&self, session: &dyn BrowserSession, ctx: &LinkCtx) -> LinkOutcome {
        info!("{} 📄 正在提取: {}", ctx, ctx.link);

        let content = match self.extractor.try_extract(session, &ctx.link).await {
            Ok(content) if content.is_empty() => {
                warn!("{} ⚠️ 页面没有可读文本，跳过", ctx);
                return LinkOutcome::NoContent(Diagnostic::new(
                    Stage::Extraction,
                    Some(&ctx.link),
                    "页面没有可读文本",
                ));
            }
            Ok(content) => content,
            Err(e) => {
                warn!("{} ⚠️ 提取失败，跳过: {}", ctx, e);
                return LinkOutcome::NoContent(Diagnostic::new(
                    Stage::Extraction,
                    Some(&ctx.link),
                    e.to_string(),
                ));
            }
        };
        debug!("{} 正文 {} 词", ctx, content.word_count());

        info!("{} 🤖 正在生成摘要...", ctx);
        match self.summarizer.summarize(content.text()).await {
            Ok(summary) if summary.trim().is_empty() => {
                warn!("{} ⚠️ 模型返回空摘要，跳过", ctx);
                LinkOutcome::SummaryFailed(Diagnostic::new(
                    Stage::Summarization,
                    Some(&ctx.link),
                    "模型返回空摘要",
                ))
            }
            Ok(summary) => {
                info!("{} ✓ 摘要: {}", ctx, truncate_text(&summary, 80));
                LinkOutcome::Summarized(SummaryEntry::new(summary, &ctx.link))
            }
            Err(e) => {
                warn!("{} ⚠️ 摘要失败，跳过: {}", ctx, e);
                LinkOutcome::SummaryFailed(Diagnostic::new(
                    Stage::Summarization,
                    Some(&ctx.link),
                    e.to_string(),
                ))
            }
        }
    }
}
