//! 摘要服务 - 业务能力层
//!
//! 只负责"把一段正文变成几句话"，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Groq 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::LlmSettings;
use crate::error::{ConfigError, SummarizeError};
use crate::models::SummaryEntry;

/// 提示词中正文的占位符
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// 摘要能力
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// 为一段正文生成摘要
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;

    /// 把多条摘要合并成一段综述
    ///
    /// 默认实现把编号后的摘要拼接起来再调用一次 [`Summarizer::summarize`]
    async fn digest(&self, entries: &[SummaryEntry]) -> Result<String, SummarizeError> {
        self.summarize(&numbered_summaries(entries)).await
    }
}

/// 把摘要编号拼接，供综述使用
pub fn numbered_summaries(entries: &[SummaryEntry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {} (source: {})", i + 1, entry.summary, entry.url))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 用正文替换模板中的占位符
pub fn render_prompt(template: &str, content: &str) -> String {
    template.replace(CONTENT_PLACEHOLDER, content)
}

/// 基于 OpenAI 兼容接口的摘要服务
pub struct OpenAiSummarizer {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
    prompt_template: String,
    digest_template: String,
}

impl OpenAiSummarizer {
    /// 创建新的摘要服务
    ///
    /// 没有配置 API 凭据时返回 [`ConfigError::MissingCredential`]
    pub fn new(settings: &LlmSettings) -> Result<Self, ConfigError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                var_name: "GROQ_API_KEY".to_string(),
            })?;

        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&settings.api_base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: settings.model_name.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            prompt_template: settings.prompt_template.clone(),
            digest_template: settings.digest_template.clone(),
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 发送一次只包含单条用户消息的聊天请求
    async fn complete(&self, user_message: &str) -> Result<String, SummarizeError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| SummarizeError::request_failed(&self.model_name, e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| SummarizeError::request_failed(&self.model_name, e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            SummarizeError::request_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        reply_content(content, &self.model_name)
    }
}

/// 原样返回模型回复；没有回复内容时返回 [`SummarizeError::EmptyResponse`]
///
/// 空白回复不在这里判定，由调用方决定如何处理
fn reply_content(content: Option<String>, model: &str) -> Result<String, SummarizeError> {
    content.ok_or_else(|| SummarizeError::EmptyResponse {
        model: model.to_string(),
    })
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        if text.trim().is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        self.complete(&render_prompt(&self.prompt_template, text)).await
    }

    async fn digest(&self, entries: &[SummaryEntry]) -> Result<String, SummarizeError> {
        if entries.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let prompt = render_prompt(&self.digest_template, &numbered_summaries(entries));
        self.complete(&prompt).await
    }
}
