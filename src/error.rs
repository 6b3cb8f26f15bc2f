use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 输入参数错误
    #[error("输入错误: {0}")]
    Input(#[from] InputError),
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 搜索错误
    #[error("搜索错误: {0}")]
    Search(#[from] SearchError),
    /// 正文提取错误
    #[error("提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 摘要服务错误
    #[error("摘要错误: {0}")]
    Summarize(#[from] SummarizeError),
    /// 报告文件错误
    #[error("报告写入失败 ({path}): {source}")]
    Report {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少 LLM 凭据
    #[error("缺少 LLM API 凭据，请设置环境变量 {var_name}")]
    MissingCredential { var_name: String },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置项取值非法
    #[error("配置项 {field} 取值非法: {reason}")]
    InvalidValue { field: String, reason: String },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 输入参数错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// 查询为空
    #[error("查询内容不能为空")]
    EmptyQuery,
    /// 结果数量非法
    #[error("结果数量必须大于 0 (当前: {0})")]
    InvalidLimit(usize),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: BoxError,
    },
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: BoxError,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: BoxError,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: BoxError,
    },
    /// 等待元素超时
    #[error("等待元素 '{selector}' 超时 ({timeout_ms}ms)")]
    WaitTimeout { selector: String, timeout_ms: u64 },
    /// 查询元素或读取页面失败
    #[error("读取页面失败: {source}")]
    QueryFailed {
        #[source]
        source: BoxError,
    },
    /// 关闭浏览器失败
    #[error("关闭浏览器失败: {source}")]
    CloseFailed {
        #[source]
        source: BoxError,
    },
}

/// 搜索错误
#[derive(Debug, Error)]
pub enum SearchError {
    /// 结果数量非法
    #[error("结果数量必须大于 0")]
    InvalidLimit,
    /// 无法构造搜索 URL
    #[error("无法构造搜索 URL ({base}): {reason}")]
    InvalidUrl { base: String, reason: String },
    /// 搜索页导航失败
    #[error("打开搜索页失败 ({url}): {source}")]
    Navigation {
        url: String,
        #[source]
        source: BrowserError,
    },
    /// 结果容器未在限定时间内出现
    #[error("搜索结果未在 {timeout_ms}ms 内出现 ({url})")]
    Unavailable { url: String, timeout_ms: u64 },
    /// 读取结果链接失败
    #[error("读取搜索结果失败: {0}")]
    Browser(#[source] BrowserError),
}

/// 正文提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 导航失败
    #[error("导航失败 ({url}): {source}")]
    Navigation {
        url: String,
        #[source]
        source: BrowserError,
    },
    /// 页面主体未在限定时间内出现
    #[error("页面主体未在 {timeout_ms}ms 内出现 ({url})")]
    Timeout { url: String, timeout_ms: u64 },
    /// 读取页面内容失败
    #[error("读取页面内容失败 ({url}): {source}")]
    Content {
        url: String,
        #[source]
        source: BrowserError,
    },
}

/// 摘要服务错误
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// 输入文本为空
    #[error("输入文本为空")]
    EmptyInput,
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    Request {
        model: String,
        #[source]
        source: BoxError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },
}

// ========== 便捷构造函数 ==========

impl BrowserError {
    /// 创建浏览器启动错误
    pub fn launch_failed(source: impl Into<BoxError>) -> Self {
        BrowserError::LaunchFailed {
            source: source.into(),
        }
    }

    /// 创建导航错误
    pub fn navigation_failed(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        BrowserError::NavigationFailed {
            url: url.into(),
            source: source.into(),
        }
    }

    /// 创建页面读取错误
    pub fn query_failed(source: impl Into<BoxError>) -> Self {
        BrowserError::QueryFailed {
            source: source.into(),
        }
    }

    /// 创建关闭错误
    pub fn close_failed(source: impl Into<BoxError>) -> Self {
        BrowserError::CloseFailed {
            source: source.into(),
        }
    }

    /// 是否为等待超时
    pub fn is_timeout(&self) -> bool {
        matches!(self, BrowserError::WaitTimeout { .. })
    }
}

impl SummarizeError {
    /// 创建 LLM API 调用错误
    pub fn request_failed(model: impl Into<String>, source: impl Into<BoxError>) -> Self {
        SummarizeError::Request {
            model: model.into(),
            source: source.into(),
        }
    }
}

impl ConfigError {
    /// 创建环境变量解析错误
    pub fn env_parse_failed(
        var_name: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        }
    }

    /// 创建配置项非法错误
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_message_names_variable() {
        let err = AppError::from(ConfigError::MissingCredential {
            var_name: "GROQ_API_KEY".to_string(),
        });
        assert!(err.to_string().contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_browser_timeout_detection() {
        let timeout = BrowserError::WaitTimeout {
            selector: "#b_results".to_string(),
            timeout_ms: 100,
        };
        assert!(timeout.is_timeout());
        assert!(!BrowserError::query_failed("boom").is_timeout());
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = ExtractionError::Navigation {
            url: "https://example.com".to_string(),
            source: BrowserError::navigation_failed("https://example.com", "dns"),
        };
        let source = err.source().expect("应该包含底层错误");
        assert!(source.to_string().contains("dns"));
    }
}
