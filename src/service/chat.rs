//! # OpenAI 兼容清洗客户端
//!
//! 通过阻塞式 `reqwest` 调用 `POST {api_base}/chat/completions`。
//!
//! ## 依赖关系
//! - 实现 `service::TextService`
//! - 使用 `reqwest` (blocking), `serde`, `serde_json`, `tracing`

use super::TextService;
use crate::error::ServiceError;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// 默认服务地址
pub const DEFAULT_API_BASE: &str = "https://api.deepseek.com";
/// 默认模型
pub const DEFAULT_MODEL: &str = "deepseek-reasoner";

/// 服务连接配置
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_base: String,
    /// 不透明凭据，原样作为 Bearer token 发送
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

/// 对话消息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ChatMessage {
    role: String,
    content: String,
}

/// 请求体
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    stream: bool,
}

/// 响应体（仅解析需要的字段）
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ChatReplyMessage {
    content: Option<String>,
}

/// 错误响应体
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// OpenAI 兼容的清洗客户端
pub struct ChatClient {
    api_base: String,
    api_key: String,
    model: String,
    http_client: Client,
}

impl ChatClient {
    /// 创建客户端
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServiceError::ClientBuild(e.to_string()))?;

        Ok(ChatClient {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
            http_client,
        })
    }

    /// 使用的模型
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl TextService for ChatClient {
    fn complete(
        &self,
        instruction: &str,
        payload: &str,
        temperature: f64,
    ) -> Result<String, ServiceError> {
        let body = build_request(&self.model, instruction, payload, temperature);
        let url = self.endpoint();

        tracing::debug!(
            url = %url,
            model = %self.model,
            payload_bytes = payload.len(),
            "Sending cleaning request"
        );
        let started = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        tracing::debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            response_bytes = text.len(),
            "Received cleaning response"
        );

        if !status.is_success() {
            return Err(ServiceError::ApiError {
                code: status.as_u16(),
                message: parse_error_message(&text),
            });
        }

        parse_completion(&text)
    }
}

fn build_request<'a>(
    model: &'a str,
    instruction: &str,
    payload: &str,
    temperature: f64,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system".to_string(),
                content: instruction.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: payload.to_string(),
            },
        ],
        temperature,
        stream: false,
    }
}

/// 提取第一个 choice 的内容
fn parse_completion(body: &str) -> Result<String, ServiceError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| ServiceError::ParseError(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ServiceError::EmptyResponse)
}

/// 错误体解析失败时退回原始文本
fn parse_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty error body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}
