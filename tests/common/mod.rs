//! 测试用的假浏览器会话与假摘要服务，不访问网络
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use search_digest::error::{BrowserError, SummarizeError};
use search_digest::models::Progress;
use search_digest::orchestrator::ProgressObserver;
use search_digest::services::SearchProvider;
use search_digest::{BrowserSession, Diagnostic, PipelineSettings, SessionLauncher, Summarizer};

pub const SEARCH_PREFIX: &str = "https://www.bing.com/search";

/// 假页面
#[derive(Debug, Clone)]
pub enum FakePage {
    /// 正常加载的 HTML
    Html(String),
    /// 导航失败
    GotoFails,
    /// 导航成功但 body 一直不出现
    NeverLoads,
}

impl FakePage {
    /// 正文为 `text` 的简单页面
    pub fn text(text: &str) -> Self {
        FakePage::Html(format!(
            "<html><body><nav>menu</nav><main><p>{}</p></main></body></html>",
            text
        ))
    }

    /// 没有可读文本的页面
    pub fn blank() -> Self {
        FakePage::Html("<html><body><script>var x = 1;</script></body></html>".to_string())
    }
}

/// 假会话的剧本
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub container_present: bool,
    pub hrefs: Vec<String>,
    pub pages: HashMap<String, FakePage>,
    pub close_fails: bool,
}

impl Script {
    pub fn with_results(hrefs: &[&str]) -> Self {
        Self {
            container_present: true,
            hrefs: hrefs.iter().map(|h| h.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }
}

/// 会话获取与释放计数
#[derive(Debug, Default)]
pub struct SessionCounters {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub visited: Mutex<Vec<String>>,
}

impl SessionCounters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

pub struct FakeSession {
    script: Script,
    counters: Arc<SessionCounters>,
    current: Mutex<String>,
}

impl FakeSession {
    pub fn new(script: Script, counters: Arc<SessionCounters>) -> Self {
        Self {
            script,
            counters,
            current: Mutex::new(String::new()),
        }
    }

    fn current(&self) -> String {
        self.current.lock().unwrap().clone()
    }

    fn on_search_page(&self) -> bool {
        self.current().starts_with(SEARCH_PREFIX)
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn goto(&self, url: &str) -> Result<(), BrowserError> {
        self.counters.visited.lock().unwrap().push(url.to_string());
        if let Some(FakePage::GotoFails) = self.script.pages.get(url) {
            return Err(BrowserError::navigation_failed(url, "net::ERR_NAME_NOT_RESOLVED"));
        }
        *self.current.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError> {
        let present = if self.on_search_page() {
            self.script.container_present
        } else {
            !matches!(
                self.script.pages.get(&self.current()),
                Some(FakePage::NeverLoads)
            )
        };
        if present {
            Ok(())
        } else {
            Err(BrowserError::WaitTimeout {
                selector: selector.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }

    async fn attribute_values(
        &self,
        _selector: &str,
        _attribute: &str,
    ) -> Result<Vec<String>, BrowserError> {
        if self.on_search_page() {
            Ok(self.script.hrefs.clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn content(&self) -> Result<String, BrowserError> {
        match self.script.pages.get(&self.current()) {
            Some(FakePage::Html(html)) => Ok(html.clone()),
            _ => Ok("<html><body></body></html>".to_string()),
        }
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        if self.script.close_fails {
            return Err(BrowserError::close_failed("browser already gone"));
        }
        Ok(())
    }
}

/// 每次打开都按同一剧本创建假会话
pub struct FakeLauncher {
    script: Script,
    open_fails: bool,
    pub counters: Arc<SessionCounters>,
}

impl FakeLauncher {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            open_fails: false,
            counters: Arc::new(SessionCounters::default()),
        }
    }

    pub fn failing() -> Self {
        Self {
            open_fails: true,
            ..Self::new(Script::default())
        }
    }
}

#[async_trait]
impl SessionLauncher for FakeLauncher {
    async fn open(&self) -> Result<Box<dyn BrowserSession>, BrowserError> {
        if self.open_fails {
            return Err(BrowserError::launch_failed("chrome not found"));
        }
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeSession::new(
            self.script.clone(),
            Arc::clone(&self.counters),
        )))
    }
}

/// 假摘要服务：摘要为 `S[正文首词]`
#[derive(Default)]
pub struct FakeSummarizer {
    always_fail: bool,
    empty_for: Option<String>,
    pub calls: Arc<AtomicUsize>,
    pub inputs: Arc<Mutex<Vec<String>>>,
}

impl FakeSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn always_failing() -> Self {
        Self {
            always_fail: true,
            ..Self::default()
        }
    }

    /// 正文首词为 `word` 时返回空白摘要
    pub fn empty_for(word: &str) -> Self {
        Self {
            empty_for: Some(word.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn inputs(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.inputs)
    }
}

#[async_trait]
impl Summarizer for FakeSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(text.to_string());
        if self.always_fail {
            return Err(SummarizeError::request_failed("fake-model", "429 Too Many Requests"));
        }
        let first = text.split_whitespace().next().unwrap_or_default();
        if self.empty_for.as_deref() == Some(first) {
            return Ok("   ".to_string());
        }
        Ok(format!("S[{}]", first))
    }
}

/// 记录所有回调的观察者
#[derive(Default)]
pub struct RecordingObserver {
    pub collected: Mutex<Option<usize>>,
    pub progress: Mutex<Vec<Progress>>,
    pub diagnostics: Mutex<Vec<Diagnostic>>,
}

impl ProgressObserver for RecordingObserver {
    fn on_links_collected(&self, total: usize) {
        *self.collected.lock().unwrap() = Some(total);
    }

    fn on_progress(&self, progress: &Progress) {
        self.progress.lock().unwrap().push(progress.clone());
    }

    fn on_diagnostic(&self, diagnostic: &Diagnostic) {
        self.diagnostics.lock().unwrap().push(diagnostic.clone());
    }
}

/// 无停顿、短超时的流水线参数
pub fn fast_settings() -> PipelineSettings {
    PipelineSettings {
        provider: SearchProvider::bing(),
        search_wait: Duration::from_millis(50),
        page_wait: Duration::from_millis(50),
        max_words: 1500,
        rate_limit_pause: Duration::ZERO,
        digest: false,
    }
}
