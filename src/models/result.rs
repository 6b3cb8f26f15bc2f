//! 流水线数据模型
//!
//! 所有实体只在一次运行内存在，没有持久化身份

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// 搜索查询（非空，已去除首尾空白）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(text: impl AsRef<str>) -> Result<Self, InputError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 搜索结果链接，排名由其在序列中的位置隐含
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultLink(String);

impl ResultLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ResultLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResultLink {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// 规范化后的页面正文，可能为空
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    text: String,
}

impl PageContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// 一条结果：摘要 + 引用链接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub summary: String,
    pub url: String,
}

impl SummaryEntry {
    pub fn new(summary: impl Into<String>, link: &ResultLink) -> Self {
        Self {
            summary: summary.into(),
            url: link.as_str().to_string(),
        }
    }
}

/// 诊断信息所属阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Search,
    Extraction,
    Summarization,
    Release,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Search => "搜索",
            Stage::Extraction => "提取",
            Stage::Summarization => "摘要",
            Stage::Release => "释放",
        };
        f.write_str(name)
    }
}

/// 面向调用方的诊断信息（每个失败链接一条）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub stage: Stage,
    pub url: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(stage: Stage, url: Option<&ResultLink>, message: impl Into<String>) -> Self {
        Self {
            stage,
            url: url.map(|link| link.as_str().to_string()),
            message: message.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.url {
            Some(url) => write!(f, "[{}] {}: {}", self.stage, url, self.message),
            None => write!(f, "[{}] {}", self.stage, self.message),
        }
    }
}

/// 进度信息（index 从 1 开始）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub index: usize,
    pub total: usize,
    pub url: String,
}

/// 一次运行的最终结果
///
/// `entries` 按链接收集顺序排列；失败的链接直接丢弃，不做占位
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub query: String,
    pub links_collected: usize,
    pub entries: Vec<SummaryEntry>,
    pub diagnostics: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ResultSet {
    pub fn new(query: &SearchQuery) -> Self {
        Self {
            query: query.as_str().to_string(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, entry: SummaryEntry) {
        self.entries.push(entry);
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 被跳过的链接数（只统计带链接的诊断）
    pub fn skipped(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.url.is_some()).count()
    }

    /// 以 (摘要, 链接) 元组形式迭代
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.summary.as_str(), entry.url.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_is_trimmed_and_non_empty() {
        assert_eq!(SearchQuery::new("  rust ownership ").unwrap().as_str(), "rust ownership");
        assert_eq!(SearchQuery::new("   \n\t"), Err(InputError::EmptyQuery));
    }

    #[test]
    fn test_entry_keeps_exact_url() {
        let link = ResultLink::new("https://example.com/a?x=1#frag");
        let entry = SummaryEntry::new("S", &link);
        assert_eq!(entry.url, link.as_str());
    }

    #[test]
    fn test_diagnostic_display() {
        let link = ResultLink::from("https://example.com");
        let diag = Diagnostic::new(Stage::Extraction, Some(&link), "超时");
        assert_eq!(diag.to_string(), "[提取] https://example.com: 超时");

        let diag = Diagnostic::new(Stage::Search, None, "搜索不可用");
        assert_eq!(diag.to_string(), "[搜索] 搜索不可用");
    }

    #[test]
    fn test_skipped_counts_only_link_diagnostics() {
        let mut set = ResultSet::new(&SearchQuery::new("rust").unwrap());
        let link = ResultLink::from("https://example.com");
        set.record(Diagnostic::new(Stage::Extraction, Some(&link), "超时"));
        set.record(Diagnostic::new(Stage::Summarization, Some(&link), "429"));
        set.record(Diagnostic::new(Stage::Release, None, "关闭失败"));
        set.record(Diagnostic::new(Stage::Summarization, None, "综述为空"));
        assert_eq!(set.skipped(), 2);
    }

    #[test]
    fn test_result_set_json_shape() {
        let query = SearchQuery::new("rust").unwrap();
        let mut set = ResultSet::new(&query);
        set.push(SummaryEntry::new("S_a", &ResultLink::from("a")));
        set.links_collected = 1;

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["query"], "rust");
        assert_eq!(json["entries"][0]["summary"], "S_a");
        assert_eq!(json["entries"][0]["url"], "a");
        assert!(json.get("digest").is_none());
    }
}
