pub mod link_ctx;
pub mod link_flow;

pub use link_ctx::LinkCtx;
pub use link_flow::{LinkFlow, LinkOutcome};
