//! Saliency KD LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `saliency-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI Responses API, text and image input
//!
//! # Examples
//!
//! ```
//! use saliency_domain::traits::LlmProvider;
//! use saliency_domain::ChatMessage;
//! use saliency_llm::MockProvider;
//!
//! let provider = MockProvider::new("signal looks flat\nclass_1");
//! let result = provider.complete(&ChatMessage::user_text("test prompt")).unwrap();
//! assert!(result.ends_with("class_1"));
//! ```

#![warn(missing_docs)]

pub mod openai;

use saliency_domain::traits::LlmProvider as LlmProviderTrait;
use saliency_domain::ChatMessage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use openai::{OpenAiConfig, OpenAiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request rejected by the API (4xx other than auth, 404 and 429)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API key missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Specific responses are keyed by the text of the message.
///
/// # Examples
///
/// ```
/// use saliency_domain::traits::LlmProvider;
/// use saliency_domain::ChatMessage;
/// use saliency_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "class_1");
/// assert_eq!(provider.complete(&ChatMessage::user_text("prompt1")).unwrap(), "class_1");
/// assert_eq!(provider.call_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    responses: Arc<Mutex<HashMap<String, Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
    last_message: Arc<Mutex<Option<ChatMessage>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all messages
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_message: Arc::new(Mutex::new(None)),
        }
    }

    /// Report a different model name
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a specific response for messages with the given text
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Ok(response.into()));
    }

    /// Configure to return an error for messages with the given text
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        lock(&self.responses).insert(prompt.into(), Err("Mock error".to_string()));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent message received
    pub fn last_message(&self) -> Option<ChatMessage> {
        lock(&self.last_message).clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn complete(&self, message: &ChatMessage) -> Result<String, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_message) = Some(message.clone());

        match lock(&self.responses).get(&message.text()) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(e)) => Err(LlmError::Other(e.clone())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// A poisoned mutex only means another test thread panicked mid-update.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
