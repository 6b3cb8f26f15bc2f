//! 链接处理上下文
//!
//! 封装"我正在处理第几个链接"这一信息

use std::fmt::Display;

use crate::models::{Progress, ResultLink};

/// 链接处理上下文
#[derive(Debug, Clone)]
pub struct LinkCtx {
    /// 链接序号（从1开始）
    pub index: usize,

    /// 本次运行收集到的链接总数
    pub total: usize,

    pub link: ResultLink,
}

impl LinkCtx {
    pub fn new(index: usize, total: usize, link: ResultLink) -> Self {
        Self { index, total, link }
    }

    /// 是否还有后续链接
    pub fn has_next(&self) -> bool {
        self.index < self.total
    }

    pub fn progress(&self) -> Progress {
        Progress {
            index: self.index,
            total: self.total,
            url: self.link.as_str().to_string(),
        }
    }
}

impl Display for LinkCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[链接 {}/{}]", self.index, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_progress() {
        let ctx = LinkCtx::new(2, 5, ResultLink::from("https://example.com"));
        assert_eq!(ctx.to_string(), "[链接 2/5]");
        assert!(ctx.has_next());
        assert_eq!(ctx.progress().url, "https://example.com");
        assert!(!LinkCtx::new(5, 5, ResultLink::from("x")).has_next());
    }
}
