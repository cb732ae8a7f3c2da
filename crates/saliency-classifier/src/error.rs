//! Error types for the Classifier

use saliency_llm::LlmError;
use saliency_store::StoreError;
use thiserror::Error;

/// Errors that can occur while building prompts or classifying signals
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Fact store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Image or array file could not be used
    #[error("Payload error: {0}")]
    Payload(String),

    /// Taxonomy file is malformed or inconsistent
    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    /// The LLM returned nothing but whitespace
    #[error("LLM response is empty")]
    EmptyResponse,

    /// The last line of the response does not carry the answer sentinel
    #[error("Response does not end with '{sentinel}' line (last line: '{last_line}')")]
    MissingSentinel {
        /// Expected line prefix
        sentinel: String,
        /// What the model wrote instead
        last_line: String,
    },

    /// The answer line names no class
    #[error("Answer line contains no class name: '{0}'")]
    EmptyAnswer(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
