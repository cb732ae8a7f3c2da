//! OpenAI Provider Implementation
//!
//! Sends chat messages to the OpenAI Responses API (`POST /v1/responses`).
//! Text blocks become `input_text` parts and images become `input_image`
//! parts carrying their data URL.
//!
//! # Features
//!
//! - Async HTTP communication with a blocking `LlmProvider` wrapper
//! - Configurable endpoint, model and output token cap
//! - Retry with exponential backoff on transport errors, 429 and 5xx
//!
//! # Examples
//!
//! ```no_run
//! use saliency_llm::{OpenAiConfig, OpenAiProvider};
//!
//! let config = OpenAiConfig::default().with_api_key("sk-...");
//! let provider = OpenAiProvider::new(config).unwrap();
//! ```

use crate::LlmError;
use saliency_domain::traits::LlmProvider as LlmProviderTrait;
use saliency_domain::{ChatMessage, ContentBlock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

/// Default OpenAI API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default model
pub const DEFAULT_MODEL: &str = "o3-2025-04-16";

/// Default timeout for LLM requests (reasoning models answer slowly)
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Settings for the OpenAI provider
///
/// The API key is never read from or written to config files.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API root, without the `/v1` suffix
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Bearer token
    #[serde(skip)]
    pub api_key: String,

    /// Optional cap on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// Attempts per request, including the first
    pub max_retries: u32,
}

impl OpenAiConfig {
    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("api_key must be set (OPENAI_API_KEY)".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be greater than 0".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
            max_output_tokens: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Request body for the Responses API
#[derive(Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: Vec<InputMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'a str,
    content: Vec<InputContent<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum InputContent<'a> {
    InputText { text: &'a str },
    InputImage { image_url: &'a str },
}

/// Response from the Responses API
#[derive(Deserialize)]
struct ResponsesResponse {
    id: String,
    model: String,
    #[serde(default)]
    output: Vec<OutputItem>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Deserialize)]
struct OutputContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
    total_tokens: u64,
}

impl ResponsesResponse {
    /// Concatenated `output_text` parts of all message items
    fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.kind == "output_text")
            .map(|part| part.text.as_str())
            .collect()
    }
}

/// OpenAI Responses API provider
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
    runtime: OnceLock<Runtime>,
}

impl OpenAiProvider {
    /// Create a provider from a validated config
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        config.validate().map_err(LlmError::Other)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Communication(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            runtime: OnceLock::new(),
        })
    }

    /// Send one message and return the response text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API key is rejected (`Authentication`)
    /// - The model does not exist (`ModelNotAvailable`)
    /// - The request is malformed (`InvalidRequest`)
    /// - All attempts fail on transport, 429 or 5xx (`Communication`, `RateLimitExceeded`)
    /// - The body cannot be parsed (`InvalidResponse`)
    pub async fn complete(&self, message: &ChatMessage) -> Result<String, LlmError> {
        let url = format!("{}/v1/responses", self.config.base_url.trim_end_matches('/'));
        let request_body = self.request_body(message);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.config.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(&request_body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response.json::<ResponsesResponse>().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        self.log_response(&parsed);
                        return Ok(parsed.output_text());
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());

                    match status {
                        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                            return Err(LlmError::Authentication(error_text));
                        }
                        reqwest::StatusCode::NOT_FOUND => {
                            return Err(LlmError::ModelNotAvailable(self.config.model.clone()));
                        }
                        reqwest::StatusCode::TOO_MANY_REQUESTS => {
                            last_error = Some(LlmError::RateLimitExceeded);
                        }
                        s if s.is_client_error() => {
                            return Err(LlmError::InvalidRequest(format!(
                                "HTTP {}: {}",
                                s, error_text
                            )));
                        }
                        s => {
                            last_error = Some(LlmError::Communication(format!(
                                "HTTP {}: {}",
                                s, error_text
                            )));
                        }
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.config.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!("LLM request failed, retrying in {}s", delay.as_secs());
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }

    fn request_body<'a>(&'a self, message: &'a ChatMessage) -> ResponsesRequest<'a> {
        let content = message
            .content
            .iter()
            .map(|block| match block {
                ContentBlock::Text(text) => InputContent::InputText { text },
                ContentBlock::Image { data_url } => InputContent::InputImage {
                    image_url: data_url,
                },
            })
            .collect();

        ResponsesRequest {
            model: &self.config.model,
            input: vec![InputMessage {
                role: message.role.as_str(),
                content,
            }],
            max_output_tokens: self.config.max_output_tokens,
        }
    }

    fn log_response(&self, response: &ResponsesResponse) {
        match &response.usage {
            Some(usage) => debug!(
                "LLM response {} from {}: {} input + {} output = {} tokens",
                response.id,
                response.model,
                usage.input_tokens,
                usage.output_tokens,
                usage.total_tokens
            ),
            None => debug!("LLM response {} from {}", response.id, response.model),
        }
    }

    fn block_on<F: Future>(&self, future: F) -> Result<F::Output, LlmError> {
        let runtime = match self.runtime.get() {
            Some(runtime) => runtime,
            None => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| LlmError::Other(format!("Failed to create runtime: {}", e)))?;
                self.runtime.get_or_init(|| runtime)
            }
        };
        Ok(runtime.block_on(future))
    }
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn complete(&self, message: &ChatMessage) -> Result<String, Self::Error> {
        self.block_on(OpenAiProvider::complete(self, message))?
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
