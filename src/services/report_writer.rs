//! 报告写入服务 - 业务能力层
//!
//! 只负责把一次运行的结果追加到报告文件

use std::fs::OpenOptions;
use std::io::Write;

use tracing::debug;

use crate::error::AppError;
use crate::models::ResultSet;

/// 报告写入服务
pub struct ReportWriter {
    report_file_path: String,
}

impl ReportWriter {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            report_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.report_file_path
    }

    /// 追加一次运行的结果
    pub fn write(&self, result: &ResultSet) -> Result<(), AppError> {
        debug!(
            "写入报告: {} | 条目 {} | 诊断 {}",
            self.report_file_path,
            result.len(),
            result.diagnostics.len()
        );

        let report = render_report(result, chrono::Local::now());

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.report_file_path)
            .and_then(|mut file| file.write_all(report.as_bytes()))
            .map_err(|source| AppError::Report {
                path: self.report_file_path.clone(),
                source,
            })
    }
}

/// 渲染纯文本报告
pub fn render_report<Tz>(result: &ResultSet, at: chrono::DateTime<Tz>) -> String
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = format!(
        "{}\n查询: {} | {}\n{}\n",
        "=".repeat(60),
        result.query,
        at.format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );

    if result.is_empty() {
        out.push_str("没有可用的结果\n");
    }
    for (i, (summary, url)) in result.pairs().enumerate() {
        out.push_str(&format!("{}. {}\n   来源: {}\n", i + 1, summary, url));
    }

    if let Some(digest) = &result.digest {
        out.push_str(&format!("\n综述: {}\n", digest));
    }

    if !result.diagnostics.is_empty() {
        out.push_str("\n诊断:\n");
        for diagnostic in &result.diagnostics {
            out.push_str(&format!("  - {}\n", diagnostic));
        }
    }

    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Diagnostic, ResultLink, SearchQuery, Stage, SummaryEntry};
    use chrono::TimeZone;

    fn sample_result() -> ResultSet {
        let mut result = ResultSet::new(&SearchQuery::new("rust ownership").unwrap());
        result.links_collected = 2;
        result.push(SummaryEntry::new("S_a", &ResultLink::from("https://a.example")));
        result.record(Diagnostic::new(
            Stage::Extraction,
            Some(&ResultLink::from("https://b.example")),
            "页面没有可读文本",
        ));
        result
    }

    #[test]
    fn test_render_report() {
        let at = chrono::Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let report = render_report(&sample_result(), at);

        assert!(report.contains("查询: rust ownership | 2026-01-02 03:04:05"));
        assert!(report.contains("1. S_a\n   来源: https://a.example"));
        assert!(report.contains("[提取] https://b.example: 页面没有可读文本"));
    }

    #[test]
    fn test_render_empty_report() {
        let result = ResultSet::new(&SearchQuery::new("nothing").unwrap());
        let at = chrono::Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert!(render_report(&result, at).contains("没有可用的结果"));
    }

    #[test]
    fn test_write_appends() {
        let path = std::env::temp_dir().join(format!(
            "search_digest_report_{}.txt",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let writer = ReportWriter::with_path(path.to_string_lossy());
        writer.write(&sample_result()).unwrap();
        writer.write(&sample_result()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("查询: rust ownership").count(), 2);
        let _ = std::fs::remove_file(&path);
    }
}
