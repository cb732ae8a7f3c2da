//! Request and response types for classification

use crate::payload::SignalPayload;
use saliency_domain::AnomalyClass;

/// Request to classify one batch of signals
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    /// Images or numeric samples to classify
    pub payload: SignalPayload,
}

impl ClassificationRequest {
    /// Create a request for a payload
    pub fn new(payload: SignalPayload) -> Self {
        Self { payload }
    }
}

/// The parsed answer of the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// The answer line with any sentinel removed
    pub answer_line: String,

    /// Comma-separated parts of the answer line, trimmed, non-empty
    pub class_names: Vec<String>,
}

/// Full result of a classification run
#[derive(Debug, Clone)]
pub struct ClassificationOutcome {
    /// Parsed answer
    pub result: ClassificationResult,

    /// Stored classes matching the predicted names
    pub matches: Vec<AnomalyClass>,

    /// Predicted names with no stored class
    pub unmatched: Vec<String>,

    /// Complete response text
    pub raw_response: String,

    /// Metadata about the run
    pub metadata: ClassificationMetadata,
}

/// Metadata about a classification run
#[derive(Debug, Clone)]
pub struct ClassificationMetadata {
    /// Name of the LLM model used
    pub model_name: String,

    /// Number of classes offered in the prompt
    pub class_count: usize,

    /// Number of signals in the payload
    pub signal_count: usize,

    /// Characters of prompt text
    pub prompt_chars: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}
