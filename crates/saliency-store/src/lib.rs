//! Saliency KD Storage Layer
//!
//! Implements the `FactStore` trait against an Apache Jena Fuseki server
//! (SPARQL 1.1 protocol over HTTP) and in memory, and provides the two
//! taxonomy-facing components on top of it:
//!
//! - [`ClassWriter`]: stores each anomaly class as four statements
//! - [`ClassReader`]: list-all and lookup-by-name queries
//!
//! # Examples
//!
//! ```
//! use saliency_domain::AnomalyClass;
//! use saliency_store::{ClassReader, ClassWriter, MemoryStore, Ontology};
//!
//! let ontology = Ontology::default();
//! let mut writer = ClassWriter::new(MemoryStore::new(), ontology.clone());
//! writer.write_class(&AnomalyClass::new("class_9", "desc text")).unwrap();
//!
//! let reader = ClassReader::new(writer.into_inner(), ontology);
//! let found = reader.find_by_name("class_9").unwrap();
//! assert_eq!(found[0].description, "desc text");
//! ```

#![warn(missing_docs)]

pub mod fuseki;
pub mod memory;
pub mod reader;
pub mod sparql;
pub mod writer;

use thiserror::Error;

pub use fuseki::{FusekiStore, StoreConfig};
pub use memory::MemoryStore;
pub use reader::{ClassReader, NameLookup};
pub use sparql::Ontology;
pub use writer::ClassWriter;

/// Errors that can occur during fact store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store unreachable or request timed out
    #[error("Connection error: {0}")]
    Connection(String),

    /// Store answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Store answered with something that is not a SPARQL result
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// An IRI, local name or variable that cannot be spliced into SPARQL
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Blocking runtime could not be created
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            StoreError::Connection(e.to_string())
        } else if e.is_decode() {
            StoreError::InvalidResponse(e.to_string())
        } else {
            StoreError::Connection(format!("Request failed: {}", e))
        }
    }
}
