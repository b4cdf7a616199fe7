//! Groq Provider - Implementation of ChatModel for Groq's API.
//!
//! Groq exposes an OpenAI-compatible chat completions endpoint, so the
//! wire format below is the standard `messages` array with a bearer key.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GroqConfig::new(api_key)
//!     .with_model("llama3-8b-8192")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let model = GroqModel::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiConfig;
use crate::ports::{
    ChatModel, CompletionRequest, CompletionResponse, FinishReason, MessageRole, ModelError,
    ModelInfo, TokenUsage,
};

/// Configuration for the Groq provider.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "llama3-8b-8192").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Default sampling temperature for requests that set none.
    pub temperature: f32,
    /// Default max tokens for requests that set none.
    pub max_tokens: u32,
}

impl GroqConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "llama3-8b-8192".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            timeout: Duration::from_secs(30),
            temperature: 0.7,
            max_tokens: 300,
        }
    }

    /// Builds provider configuration from the application AI config.
    ///
    /// The API key must already be validated as present.
    pub fn from_app_config(config: &AiConfig) -> Self {
        Self::new(config.groq_api_key.clone().unwrap_or_default())
            .with_model(&config.model)
            .with_base_url(&config.base_url)
            .with_timeout(config.timeout())
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens)
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the default temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the default max tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Groq API provider implementation.
pub struct GroqModel {
    config: GroqConfig,
    client: Client,
}

impl GroqModel {
    /// Creates a new Groq provider with the given configuration.
    pub fn new(config: GroqConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> WireRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = request.system_prompt {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(WireMessage {
                role: match msg.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        WireRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            temperature: request.temperature.unwrap_or(self.config.temperature),
        }
    }

    /// Sends the request, mapping transport failures to model errors.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, ModelError> {
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    ModelError::network(format!("Connection failed: {}", e))
                } else {
                    ModelError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ModelError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(ModelError::AuthenticationFailed),
            429 => Err(ModelError::rate_limited(parse_retry_after(&error_body))),
            500..=599 => Err(ModelError::unavailable(format!(
                "Groq returned {status}: {error_body}"
            ))),
            _ => Err(ModelError::InvalidRequest(format!(
                "Groq returned {status}: {error_body}"
            ))),
        }
    }
}

#[async_trait]
impl ChatModel for GroqModel {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ModelError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| ModelError::parse(e.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ModelError::parse("response contained no choices"))?;

        Ok(CompletionResponse {
            content: choice.message.content,
            model: body.model,
            usage: body
                .usage
                .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
                .unwrap_or_default(),
            finish_reason: match choice.finish_reason.as_deref() {
                Some("length") => FinishReason::Length,
                Some("content_filter") => FinishReason::ContentFilter,
                Some("stop") | None => FinishReason::Stop,
                Some(_) => FinishReason::Error,
            },
        })
    }

    fn model_info(&self) -> ModelInfo {
        ModelInfo::new("groq", &self.config.model)
    }
}

/// Extracts a retry hint from a 429 body; defaults to 30 seconds.
fn parse_retry_after(error_body: &str) -> u32 {
    // Groq error messages embed "try again in 12.34s" style hints.
    error_body
        .split("try again in ")
        .nth(1)
        .and_then(|rest| rest.split(['s', '.']).next())
        .and_then(|secs| secs.trim().parse::<u32>().ok())
        .unwrap_or(30)
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RequestMetadata;

    fn request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new("s1", "trace"))
            .with_system_prompt("Be charming")
            .with_message(MessageRole::User, "Hello")
    }

    #[test]
    fn wire_request_puts_system_prompt_first() {
        let model = GroqModel::new(GroqConfig::new("gsk_test"));
        let wire = model.to_wire_request(&request());

        assert_eq!(wire.model, "llama3-8b-8192");
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[0].content, "Be charming");
        assert_eq!(wire.messages[1].role, "user");
    }

    #[test]
    fn wire_request_uses_config_defaults() {
        let config = GroqConfig::new("gsk_test")
            .with_temperature(0.3)
            .with_max_tokens(128);
        let model = GroqModel::new(config);
        let wire = model.to_wire_request(&request());

        assert_eq!(wire.max_tokens, 128);
        assert!((wire.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn request_overrides_beat_config_defaults() {
        let model = GroqModel::new(GroqConfig::new("gsk_test"));
        let wire = model.to_wire_request(&request().with_max_tokens(42).with_temperature(1.1));

        assert_eq!(wire.max_tokens, 42);
        assert!((wire.temperature - 1.1).abs() < f32::EPSILON);
    }

    #[test]
    fn wire_request_serializes_expected_shape() {
        let model = GroqModel::new(GroqConfig::new("gsk_test"));
        let json = serde_json::to_value(model.to_wire_request(&request())).unwrap();

        assert_eq!(json["model"], "llama3-8b-8192");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["max_tokens"], 300);
    }

    #[test]
    fn wire_response_parses() {
        let body = r#"{
            "model": "llama3-8b-8192",
            "choices": [
                {
                    "message": {"role": "assistant", "content": "Hi! 🐾"},
                    "finish_reason": "stop"
                }
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 40, "total_tokens": 160}
        }"#;

        let parsed: WireResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Hi! 🐾");
        assert_eq!(parsed.usage.as_ref().unwrap().prompt_tokens, 120);
    }

    #[test]
    fn retry_after_parses_groq_hint() {
        assert_eq!(parse_retry_after("Rate limit reached, try again in 7s"), 7);
        assert_eq!(
            parse_retry_after("Rate limit reached, try again in 12.34s"),
            12
        );
        assert_eq!(parse_retry_after("no hint here"), 30);
    }

    #[test]
    fn from_app_config_carries_settings() {
        let app = AiConfig {
            groq_api_key: Some("gsk_test".to_string()),
            model: "llama3-70b-8192".to_string(),
            timeout_secs: 10,
            ..AiConfig::default()
        };
        let config = GroqConfig::from_app_config(&app);
        assert_eq!(config.model, "llama3-70b-8192");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn model_info_names_provider() {
        let model = GroqModel::new(GroqConfig::new("gsk_test"));
        let info = model.model_info();
        assert_eq!(info.provider, "groq");
        assert_eq!(info.model, "llama3-8b-8192");
    }
}
