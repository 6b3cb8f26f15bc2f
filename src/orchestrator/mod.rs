//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次查询的完整调度，是整个系统的"指挥中心"。
//!
//! ### `pipeline` - 流水线
//! - 获取并释放浏览器会话（每次运行一次）
//! - 收集链接（Vec<ResultLink>）
//! - 逐个链接调用 `LinkFlow`，并在调用模型后停顿
//! - 组装 `ResultSet`
//!
//! ### `observer` - 进度回调
//! - 调用方通过 `ProgressObserver` 获得进度和诊断信息
//!
//! ## 层次关系
//!
//! ```text
//! pipeline (处理 Vec<ResultLink>)
//!     ↓
//! workflow::LinkFlow (处理单个链接)
//!     ↓
//! services (能力层：collect / extract / summarize)
//!     ↓
//! browser (基础设施：BrowserSession)
//! ```

pub mod observer;
pub mod pipeline;

pub use observer::{LoggingObserver, NoopObserver, ProgressObserver};
pub use pipeline::{Pipeline, PipelineSettings};
