//! 搜索引擎结果页描述
//!
//! 结果页没有稳定契约，所有与页面结构相关的选择器都集中在这里，
//! 换引擎或跟进改版时只需要改动本模块

use reqwest::Url;

use crate::config::SearchEngineKind;
use crate::error::SearchError;

/// 一个搜索引擎结果页的抓取方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProvider {
    /// 引擎名称（仅用于日志）
    pub name: &'static str,
    /// 结果页基础 URL
    pub base_url: String,
    /// 查询参数名
    pub query_param: &'static str,
    /// 结果容器选择器，出现即认为结果页渲染完成
    pub container_selector: &'static str,
    /// 结果标题链接选择器
    pub link_selector: &'static str,
}

impl SearchProvider {
    pub fn bing() -> Self {
        Self {
            name: "Bing",
            base_url: "https://www.bing.com/search".to_string(),
            query_param: "q",
            container_selector: "#b_results",
            link_selector: "li.b_algo h2 a",
        }
    }

    pub fn duckduckgo() -> Self {
        Self {
            name: "DuckDuckGo",
            base_url: "https://html.duckduckgo.com/html/".to_string(),
            query_param: "q",
            container_selector: "#links",
            link_selector: "a.result__a",
        }
    }

    pub fn for_engine(kind: SearchEngineKind) -> Self {
        match kind {
            SearchEngineKind::Bing => Self::bing(),
            SearchEngineKind::DuckDuckGo => Self::duckduckgo(),
        }
    }

    /// 构造结果页 URL，查询内容会被 URL 编码
    pub fn search_url(&self, query: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(&self.base_url, &[(self.query_param, query)]).map_err(|e| {
            SearchError::InvalidUrl {
                base: self.base_url.clone(),
                reason: e.to_string(),
            }
        })
    }

    /// 将结果页上的 href 解析为绝对地址
    ///
    /// 绝对地址原样保留；相对地址和 `//host/path` 形式按结果页地址补全；
    /// DuckDuckGo 的 `/l/?uddg=` 跳转链接还原为目标地址；
    /// 无法解析或非 http(s) 的返回 None
    pub fn resolve_href(&self, search_url: &Url, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        let (url, resolved) = match Url::parse(href) {
            Ok(absolute) => (absolute, href.to_string()),
            Err(_) => {
                let joined = search_url.join(href).ok()?;
                let resolved = joined.to_string();
                (joined, resolved)
            }
        };

        if let Some(target) = redirect_target(&url) {
            let target_url = Url::parse(&target).ok()?;
            return is_web_scheme(&target_url).then_some(target);
        }
        is_web_scheme(&url).then_some(resolved)
    }
}

/// DuckDuckGo 跳转链接中的目标地址（`uddg` 参数，已解码）
fn redirect_target(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let is_ddg = host == "duckduckgo.com" || host.ends_with(".duckduckgo.com");
    if !is_ddg || !url.path().starts_with("/l/") {
        return None;
    }
    url.query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.trim().to_string())
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

impl Default for SearchProvider {
    fn default() -> Self {
        Self::bing()
    }
}
