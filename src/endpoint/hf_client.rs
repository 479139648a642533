//! Hosted inference endpoint HTTP client
//!
//! Provides an HTTP client for a Hugging Face style inference endpoint with:
//! - Bearer token authentication (token read once, checked at call time)
//! - Request serialization from conversation messages
//! - Error handling with network vs API error distinction
//!
//! One call sends exactly one request; there is no retry loop.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use super::{GenerationRequest, TextGeneration};
use crate::config::ExpanderConfig;

// =============================================================================
// Error Types
// =============================================================================

/// Endpoint errors
#[derive(Debug, Error)]
pub enum EndpointError {
    /// No credential was found in the environment
    #[error("{0} is not set")]
    MissingToken(&'static str),

    /// Network error (connection failed, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// Credential rejected
    #[error("Invalid API token")]
    Unauthorized,

    /// API error (4xx/5xx responses)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not JSON
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for EndpointError {
    fn from(err: reqwest::Error) -> Self {
        EndpointError::Network(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorField,
}

/// Hugging Face returns `{"error": "..."}`, OpenAI-compatible routes return
/// `{"error": {"message": "..."}}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiErrorField {
    Plain(String),
    Detailed { message: String },
}

impl ApiErrorField {
    fn into_message(self) -> String {
        match self {
            ApiErrorField::Plain(message) => message,
            ApiErrorField::Detailed { message } => message,
        }
    }
}

// =============================================================================
// Endpoint Client
// =============================================================================

/// Hosted text-generation endpoint
pub struct HuggingFaceEndpoint {
    client: reqwest::Client,
    api_token: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_new_tokens: u32,
    timeout: Duration,
}

impl HuggingFaceEndpoint {
    /// Default endpoint base URL
    pub const DEFAULT_BASE_URL: &'static str = "https://api-inference.huggingface.co/models";

    /// Create an endpoint from config, reading the token from the environment.
    ///
    /// A missing token is not an error here; the first call reports it.
    pub fn from_config(config: &ExpanderConfig) -> Self {
        let api_token = std::env::var(ExpanderConfig::TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty());
        if api_token.is_none() {
            tracing::debug!("{} not set, requests will fail", ExpanderConfig::TOKEN_ENV);
        }
        Self::with_token(config, api_token)
    }

    /// Create an endpoint with an explicit token
    pub fn with_token(config: &ExpanderConfig, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_token,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            temperature: config.temperature(),
            max_new_tokens: config.max_new_tokens(),
            timeout: Duration::from_secs(config.timeout_secs()),
        }
    }

    /// URL the chat request is posted to
    pub fn endpoint_url(&self) -> String {
        format!("{}/{}/v1/chat/completions", self.base_url, self.model)
    }

    /// Build request body for a generation request
    pub fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.wire_name(), "content": m.content }))
            .collect();

        let mut body = json!({
            "model": self.model,
            "messages": messages,
            "temperature": self.temperature,
            "max_tokens": self.max_new_tokens,
            "stream": false,
        });

        if !request.tools.is_empty() {
            let tools: Vec<serde_json::Value> = request
                .tools
                .iter()
                .map(|tool| json!({ "type": "function", "function": tool }))
                .collect();
            body["tools"] = json!(tools);
            body["tool_choice"] = json!("auto");
        }

        body
    }

    /// Get model
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }
}

#[async_trait]
impl TextGeneration for HuggingFaceEndpoint {
    async fn generate(&self, request: &GenerationRequest) -> Result<serde_json::Value, EndpointError> {
        let api_token = self
            .api_token
            .as_deref()
            .ok_or(EndpointError::MissingToken(ExpanderConfig::TOKEN_ENV))?;

        let url = self.endpoint_url();
        let body = self.build_request_body(request);
        tracing::debug!("POST {} ({} messages)", url, request.messages.len());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_token))
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 401 {
            return Err(EndpointError::Unauthorized);
        }

        let response_text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&response_text)
                .map(|b| b.error.into_message())
                .unwrap_or(response_text);
            return Err(EndpointError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&response_text)
            .map_err(|e| EndpointError::Parse(format!("{}: {}", e, response_text)))
    }
}
