//! 页面正文提取 - 业务能力层
//!
//! 只负责"把一个 URL 变成干净的正文"，失败时由调用方决定是否跳过

use std::time::Duration;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, warn};

use crate::browser::BrowserSession;
use crate::error::ExtractionError;
use crate::models::{PageContent, ResultLink};
use crate::services::normalize;

/// 提取时整体跳过的元素
static STRIPPED_TAGS: phf::Set<&'static str> = phf::phf_set! {
    "script",
    "style",
    "nav",
    "header",
    "footer",
    "aside",
    "noscript",
};

/// 正文根节点的候选，按优先级排列
const CONTENT_ROOTS: [&str; 3] = ["main, [role='main']", "article", "body"];

/// 页面正文提取器
pub struct PageExtractor {
    wait_timeout: Duration,
    max_words: usize,
}

impl PageExtractor {
    pub fn new(wait_timeout: Duration, max_words: usize) -> Self {
        Self {
            wait_timeout,
            max_words,
        }
    }

    /// 提取正文，失败时返回空内容
    pub async fn extract(&self, session: &dyn BrowserSession, link: &ResultLink) -> PageContent {
        match self.try_extract(session, link).await {
            Ok(content) => content,
            Err(e) => {
                warn!("⚠️ 提取失败，按空内容处理: {}", e);
                PageContent::empty()
            }
        }
    }

    /// 提取正文
    ///
    /// 导航、等待或读取页面失败时返回对应的 [`ExtractionError`]；
    /// 页面没有可读文本时返回空内容而不是错误
    pub async fn try_extract(
        &self,
        session: &dyn BrowserSession,
        link: &ResultLink,
    ) -> Result<PageContent, ExtractionError> {
        let url = link.as_str();

        session
            .goto(url)
            .await
            .map_err(|source| ExtractionError::Navigation {
                url: url.to_string(),
                source,
            })?;

        session
            .wait_for("body", self.wait_timeout)
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractionError::Timeout {
                        url: url.to_string(),
                        timeout_ms: self.wait_timeout.as_millis() as u64,
                    }
                } else {
                    ExtractionError::Content {
                        url: url.to_string(),
                        source: e,
                    }
                }
            })?;

        let html = session
            .content()
            .await
            .map_err(|source| ExtractionError::Content {
                url: url.to_string(),
                source,
            })?;
        debug!("页面 HTML 长度: {} 字符", html.len());

        let content = PageContent::new(extract_readable_text(&html, self.max_words));
        debug!("正文词数: {}", content.word_count());
        Ok(content)
    }
}

/// 从 HTML 中提取规范化的正文
pub fn extract_readable_text(html: &str, max_words: usize) -> String {
    let document = Html::parse_document(html);
    let root = content_root(&document);

    let mut raw = String::new();
    collect_text(root, &mut raw);

    normalize(&raw, max_words)
}

/// 依次尝试 main / article / body，都不存在时退回文档根节点
fn content_root(document: &Html) -> ElementRef<'_> {
    for candidate in CONTENT_ROOTS {
        if let Ok(selector) = Selector::parse(candidate) {
            if let Some(element) = document
                .select(&selector)
                .find(|element| !is_stripped_subtree(element))
            {
                return element;
            }
        }
    }
    document.root_element()
}

/// 候选根节点本身位于被剔除的子树中（例如 header 里的 main）时不采用
fn is_stripped_subtree(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(|node| node.value().as_element())
        .any(|el| STRIPPED_TAGS.contains(el.name()))
}

/// 按文档顺序拼接文本节点，跳过被剔除的元素
///
/// 显式栈遍历，栈深度不随 DOM 嵌套增长
fn collect_text(root: ElementRef<'_>, out: &mut String) {
    let mut stack: Vec<_> = root.children().rev().collect();
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if STRIPPED_TAGS.contains(el.name()) => {}
            Node::Element(_) => stack.extend(node.children().rev()),
            _ => {}
        }
    }
}
