//! 结果链接收集 - 业务能力层
//!
//! 只负责"从结果页拿到前 N 个链接"，不关心后续流程

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::BrowserSession;
use crate::error::SearchError;
use crate::models::{ResultLink, SearchQuery};
use crate::services::SearchProvider;

/// 结果链接收集器
pub struct ResultLinkCollector {
    provider: SearchProvider,
    wait_timeout: Duration,
}

impl ResultLinkCollector {
    pub fn new(provider: SearchProvider, wait_timeout: Duration) -> Self {
        Self {
            provider,
            wait_timeout,
        }
    }

    /// 收集前 `limit` 个结果链接
    ///
    /// # 参数
    /// - `session`: 浏览器会话（会被导航到结果页）
    /// - `query`: 查询内容
    /// - `limit`: 最多返回的链接数，必须 ≥ 1
    ///
    /// # 返回
    /// 按结果页 DOM 顺序排列的链接；结果页没有链接时返回空列表
    pub async fn collect(
        &self,
        session: &dyn BrowserSession,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<ResultLink>, SearchError> {
        if limit == 0 {
            return Err(SearchError::InvalidLimit);
        }

        let search_url = self.provider.search_url(query.as_str())?;
        info!("🔍 正在 {} 搜索: {}", self.provider.name, query);
        debug!("搜索 URL: {}", search_url);

        session
            .goto(search_url.as_str())
            .await
            .map_err(|source| SearchError::Navigation {
                url: search_url.to_string(),
                source,
            })?;

        if let Err(e) = session
            .wait_for(self.provider.container_selector, self.wait_timeout)
            .await
        {
            warn!("搜索结果容器未出现: {}", e);
            return Err(if e.is_timeout() {
                SearchError::Unavailable {
                    url: search_url.to_string(),
                    timeout_ms: self.wait_timeout.as_millis() as u64,
                }
            } else {
                SearchError::Browser(e)
            });
        }

        let hrefs = session
            .attribute_values(self.provider.link_selector, "href")
            .await
            .map_err(SearchError::Browser)?;
        debug!("结果页共有 {} 个候选链接", hrefs.len());

        let links: Vec<ResultLink> = hrefs
            .iter()
            .filter_map(|href| self.provider.resolve_href(&search_url, href))
            .take(limit)
            .map(ResultLink::new)
            .collect();

        info!("✓ 收集到 {} 个链接", links.len());
        Ok(links)
    }
}
