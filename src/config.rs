use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 默认的摘要提示词，`{content}` 会被替换为页面正文
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Summarize the following web page content in two or three concise sentences. \
Respond with the summary only.\n\n{content}";

/// 默认的汇总提示词，`{content}` 会被替换为逐条摘要
pub const DEFAULT_DIGEST_TEMPLATE: &str = "The following are short summaries of several web pages returned for one search query. \
Write a single overview paragraph that combines their key points.\n\n{content}";

/// 搜索引擎类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngineKind {
    #[default]
    Bing,
    #[serde(alias = "ddg")]
    DuckDuckGo,
}

impl FromStr for SearchEngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bing" => Ok(Self::Bing),
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            other => Err(format!("未知的搜索引擎: {}", other)),
        }
    }
}

/// 浏览器配置
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// 已启动浏览器的调试端口；设置后连接现有浏览器而不是启动新的
    pub debug_port: Option<u16>,
    /// 浏览器可执行文件路径（为空时由 chromiumoxide 自动探测）
    pub chrome_executable: Option<String>,
}

/// LLM 配置
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub prompt_template: String,
    pub digest_template: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: "https://api.groq.com/openai/v1".to_string(),
            model_name: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.3,
            max_tokens: 200,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
            digest_template: DEFAULT_DIGEST_TEMPLATE.to_string(),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 使用的搜索引擎
    pub search_engine: SearchEngineKind,
    /// 每次查询最多处理的链接数
    pub max_results: usize,
    /// 等待搜索结果出现的最长时间（毫秒）
    pub search_wait_ms: u64,
    /// 等待页面主体出现的最长时间（毫秒）
    pub page_wait_ms: u64,
    /// 每个页面保留的最大词数
    pub max_words: usize,
    /// 每次摘要调用后的停顿（毫秒）
    pub rate_limit_pause_ms: u64,
    /// 是否在逐条摘要之后生成汇总
    pub digest: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 结果报告文件（为空时不写入）
    pub report_file: Option<String>,
    pub browser: BrowserSettings,
    pub llm: LlmSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_engine: SearchEngineKind::Bing,
            max_results: 10,
            search_wait_ms: 10_000,
            page_wait_ms: 10_000,
            max_words: 1500,
            rate_limit_pause_ms: 1000,
            digest: false,
            verbose_logging: false,
            report_file: None,
            browser: BrowserSettings::default(),
            llm: LlmSettings::default(),
        }
    }
}

impl Config {
    /// 加载配置：TOML 文件（可选）→ 环境变量覆盖
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// 仅从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: display.clone(),
                source,
            })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: display,
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用给定的查找函数应用环境变量覆盖
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // GROQ_API_KEY 优先，兼容通用的 LLM_API_KEY
        if let Some(key) = lookup("GROQ_API_KEY").or_else(|| lookup("LLM_API_KEY")) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup("LLM_API_BASE_URL") {
            self.llm.api_base_url = url;
        }
        if let Some(model) = lookup("LLM_MODEL_NAME") {
            self.llm.model_name = model;
        }
        if let Some(path) = lookup("CHROME_EXECUTABLE") {
            self.browser.chrome_executable = Some(path);
        }
        if let Some(path) = lookup("REPORT_FILE") {
            self.report_file = Some(path);
        }

        override_parsed(&lookup, "LLM_TEMPERATURE", "f32", &mut self.llm.temperature)?;
        override_parsed(&lookup, "LLM_MAX_TOKENS", "u32", &mut self.llm.max_tokens)?;
        override_parsed(&lookup, "SEARCH_ENGINE", "bing|duckduckgo", &mut self.search_engine)?;
        override_parsed(&lookup, "MAX_RESULTS", "usize", &mut self.max_results)?;
        override_parsed(&lookup, "SEARCH_WAIT_MS", "u64", &mut self.search_wait_ms)?;
        override_parsed(&lookup, "PAGE_WAIT_MS", "u64", &mut self.page_wait_ms)?;
        override_parsed(&lookup, "MAX_WORDS", "usize", &mut self.max_words)?;
        override_parsed(&lookup, "RATE_LIMIT_PAUSE_MS", "u64", &mut self.rate_limit_pause_ms)?;
        override_parsed(&lookup, "VERBOSE_LOGGING", "bool", &mut self.verbose_logging)?;

        if let Some(raw) = lookup("BROWSER_DEBUG_PORT") {
            let port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::env_parse_failed("BROWSER_DEBUG_PORT", &raw, "u16"))?;
            self.browser.debug_port = Some(port);
        }

        Ok(())
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_results == 0 {
            return Err(ConfigError::invalid("max_results", "必须大于 0"));
        }
        if self.max_words == 0 {
            return Err(ConfigError::invalid("max_words", "必须大于 0"));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::invalid("llm.temperature", "必须在 0.0 到 2.0 之间"));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::invalid("llm.max_tokens", "必须大于 0"));
        }
        if !self.llm.prompt_template.contains("{content}") {
            return Err(ConfigError::invalid("llm.prompt_template", "缺少 {content} 占位符"));
        }
        Ok(())
    }

    pub fn search_wait(&self) -> Duration {
        Duration::from_millis(self.search_wait_ms)
    }

    pub fn page_wait(&self) -> Duration {
        Duration::from_millis(self.page_wait_ms)
    }

    pub fn rate_limit_pause(&self) -> Duration {
        Duration::from_millis(self.rate_limit_pause_ms)
    }
}

fn override_parsed<F, T>(
    lookup: &F,
    var_name: &str,
    expected_type: &str,
    target: &mut T,
) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(var_name) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::env_parse_failed(var_name, &raw, expected_type))?;
    }
    Ok(())
}
