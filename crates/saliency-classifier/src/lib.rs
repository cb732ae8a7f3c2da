//! Saliency KD Classifier
//!
//! Labels unlabeled time-series signals with anomaly classes from the fact
//! store, using an LLM.
//!
//! # Architecture
//!
//! ```text
//! FactStore → class table ─┐
//!                          ├→ PromptBuilder → LlmProvider → parser → FactStore lookup
//! images / .npy signals ───┘
//! ```
//!
//! # Example Usage
//!
//! ```
//! use saliency_classifier::{
//!     ClassificationRequest, Classifier, ClassifierConfig, Signals, SignalPayload, Taxonomy,
//! };
//! use saliency_llm::MockProvider;
//! use saliency_store::{ClassWriter, MemoryStore, Ontology};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut writer = ClassWriter::new(MemoryStore::new(), Ontology::default());
//! writer.write_all(Taxonomy::builtin()?.classes())?;
//!
//! let llm = MockProvider::new("a bath tub shape\nCLASSIFICATION: class_7");
//! let classifier = Classifier::new(
//!     llm,
//!     writer.into_inner(),
//!     Ontology::default(),
//!     ClassifierConfig::default(),
//! );
//!
//! let request = ClassificationRequest::new(SignalPayload::Numeric(Signals::from_rows(vec![
//!     vec![0.0, -3.5, -3.4, 0.1],
//! ])));
//! let outcome = classifier.classify(&request)?;
//!
//! assert_eq!(outcome.result.class_names, vec!["class_7".to_string()]);
//! assert_eq!(outcome.matches.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod payload;
mod prompt;
mod render;
mod taxonomy;
mod types;

#[cfg(test)]
mod tests;

pub use classifier::Classifier;
pub use config::{AnswerFormat, ClassifierConfig, DEFAULT_SENTINEL};
pub use error::ClassifierError;
pub use parser::{parse_classification, parse_last_line};
pub use payload::{ImagePayload, SignalPayload, Signals, DEFAULT_SIGNALS_FILE};
pub use prompt::PromptBuilder;
pub use render::{render_class_table, render_signal, render_signals, render_value};
pub use taxonomy::Taxonomy;
pub use types::{ClassificationMetadata, ClassificationOutcome, ClassificationRequest, ClassificationResult};
