//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ChatMessage, Fact, Row, SelectQuery};

/// Trait for reading and writing RDF statements
///
/// Implemented by the infrastructure layer (saliency-store)
pub trait FactStore {
    /// Error type for store operations
    type Error;

    /// Run a SELECT query and return its rows in store order
    fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, Self::Error>;

    /// Insert the statements as one atomic update
    fn insert(&mut self, facts: &[Fact]) -> Result<(), Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (saliency-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Send one message and return the full response text
    fn complete(&self, message: &ChatMessage) -> Result<String, Self::Error>;

    /// Model identifier used for the completion
    fn model_name(&self) -> &str;
}
