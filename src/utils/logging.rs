/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::{info, warn};

use crate::models::ResultSet;

/// 记录程序启动信息
///
/// # 参数
/// - `query`: 查询内容
/// - `engine`: 搜索引擎名称
/// - `max_results`: 最多处理的链接数
pub fn log_startup(query: &str, engine: &str, max_results: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 搜索摘要模式");
    info!("🔍 查询: {}", query);
    info!("🌐 搜索引擎: {} | 最多 {} 个链接", engine, max_results);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(result: &ResultSet) {
    info!("\n{}", "=".repeat(60));
    info!("📊 处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", result.len(), result.links_collected);
    info!("❌ 跳过: {}", result.skipped());
    if result.is_empty() {
        warn!("⚠️ 没有可用的结果");
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 4), "abcd...");
        assert_eq!(truncate_text("所有权规则", 2), "所有...");
    }
}
