//! # Search Digest
//!
//! 搜索一个查询，逐个打开结果页面提取正文，再用 LLM 为每个页面生成简短摘要，
//! 最终返回 (摘要, 来源链接) 列表。
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Browser）
//! - `browser/` - 持有稀缺资源（浏览器与页面），只暴露能力
//! - `BrowserSession` / `SessionLauncher` - 可替换的会话接口
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个查询或单个链接
//! - `ResultLinkCollector` - 结果链接收集
//! - `PageExtractor` - 正文提取（`normalize` 负责文本规范化）
//! - `Summarizer` - LLM 摘要
//! - `ReportWriter` - 写报告文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个链接"的完整处理流程（提取 → 摘要）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 会话生命周期、链接遍历、限速、结果组装

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use browser::{BrowserSession, ChromeLauncher, SessionLauncher};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{Diagnostic, Progress, ResultLink, ResultSet, SearchQuery, Stage, SummaryEntry};
pub use orchestrator::{Pipeline, PipelineSettings, ProgressObserver};
pub use services::{normalize, OpenAiSummarizer, Summarizer};
pub use workflow::{LinkCtx, LinkFlow, LinkOutcome};
