//! Saliency KD Domain Layer
//!
//! Core model and trait seams for labeling time-series anomaly clusters with a
//! semantic fact store and a large language model.
//!
//! ## Key Concepts
//!
//! - **AnomalyClass**: a named, described category of time-series shape anomaly
//! - **Fact**: one RDF statement written to the external fact store
//! - **SelectQuery**: a structured SPARQL SELECT (patterns plus equality filters)
//! - **ChatMessage**: the prompt handed to the LLM, as ordered content blocks
//!
//! ## Architecture
//!
//! This crate carries no infrastructure. The fact store and the LLM are
//! reached only through the [`traits::FactStore`] and [`traits::LlmProvider`]
//! traits, implemented in `saliency-store` and `saliency-llm`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod anomaly_class;
pub mod fact;
pub mod message;
pub mod query;
pub mod traits;

// Re-exports for convenience
pub use anomaly_class::{AnomalyClass, ClassDescription, RecordId, PLACEHOLDER_SEVERITY};
pub use fact::{Fact, Term, RDF_TYPE};
pub use message::{ChatMessage, ContentBlock, Role};
pub use query::{EqualsFilter, PatternTerm, Row, SelectQuery, TriplePattern};
