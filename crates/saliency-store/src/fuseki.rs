//! Fuseki Store Implementation
//!
//! Talks to an Apache Jena Fuseki dataset through the SPARQL 1.1 protocol:
//! SELECT queries are POSTed to the query endpoint and answered in the
//! SPARQL JSON results format, updates are POSTed to the update endpoint.
//!
//! # Examples
//!
//! ```no_run
//! use saliency_store::{FusekiStore, StoreConfig};
//!
//! let store = FusekiStore::new(&StoreConfig::default()).unwrap();
//! // `select` and `insert` are async here; the `FactStore` trait offers
//! // blocking versions of both.
//! ```

use crate::sparql::{render_insert_data, render_select, Ontology, DEFAULT_ONTOLOGY_PREFIX};
use crate::StoreError;
use reqwest::header::ACCEPT;
use saliency_domain::traits::FactStore;
use saliency_domain::{Fact, Row, SelectQuery};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::debug;

/// Default Fuseki server URL
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3030";

/// Default dataset name
pub const DEFAULT_DATASET: &str = "saliency_kd";

/// Default timeout for store requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Connection settings for a Fuseki dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Server URL, e.g. `http://127.0.0.1:3030`
    pub base_url: String,

    /// Dataset name on the server
    pub dataset: String,

    /// Query service path below the dataset
    pub query_path: String,

    /// Update service path below the dataset
    pub update_path: String,

    /// Ontology namespace for classes and properties
    pub ontology_prefix: String,

    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Full URL of the query service
    pub fn query_url(&self) -> String {
        self.service_url(&self.query_path)
    }

    /// Full URL of the update service
    pub fn update_url(&self) -> String {
        self.service_url(&self.update_path)
    }

    /// Ontology namespace described by this config
    pub fn ontology(&self) -> Ontology {
        Ontology::new(self.ontology_prefix.clone())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!("base_url '{}' must be an http(s) URL", self.base_url));
        }
        if self.dataset.trim_matches('/').is_empty() {
            return Err("dataset must not be empty".to_string());
        }
        if self.ontology_prefix.is_empty() {
            return Err("ontology_prefix must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    fn service_url(&self, service: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.dataset.trim_matches('/'),
            service.trim_start_matches('/')
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            query_path: "sparql".to_string(),
            update_path: "update".to_string(),
            ontology_prefix: DEFAULT_ONTOLOGY_PREFIX.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// SPARQL JSON results document
#[derive(Deserialize)]
struct SparqlResults {
    results: SparqlBindings,
}

#[derive(Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Deserialize)]
struct SparqlValue {
    value: String,
}

/// Fact store backed by a Fuseki dataset
pub struct FusekiStore {
    query_url: String,
    update_url: String,
    client: reqwest::Client,
    runtime: OnceLock<Runtime>,
}

impl FusekiStore {
    /// Create a store client for the configured dataset
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::Connection(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            query_url: config.query_url(),
            update_url: config.update_url(),
            client,
            runtime: OnceLock::new(),
        })
    }

    /// URL SELECT queries are sent to
    pub fn query_url(&self) -> &str {
        &self.query_url
    }

    /// URL updates are sent to
    pub fn update_url(&self) -> &str {
        &self.update_url
    }

    /// Run a structured SELECT query
    pub async fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, StoreError> {
        let sparql = render_select(query)?;
        self.query_sparql(&sparql).await
    }

    /// Insert statements as one `INSERT DATA` update
    pub async fn insert(&self, facts: &[Fact]) -> Result<(), StoreError> {
        let update = render_insert_data(facts)?;
        self.update_sparql(&update).await
    }

    /// Run raw SELECT text and map the bindings to rows
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Fuseki is not running (`Connection`)
    /// - The query is rejected (`Http`, typically 400)
    /// - The body is not SPARQL JSON results (`InvalidResponse`)
    pub async fn query_sparql(&self, sparql: &str) -> Result<Vec<Row>, StoreError> {
        debug!("SPARQL query:\n{}", sparql);

        let response = self
            .client
            .post(&self.query_url)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", sparql)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let results: SparqlResults = serde_json::from_str(&body)
            .map_err(|e| StoreError::InvalidResponse(format!("Failed to parse results: {}", e)))?;

        let rows: Vec<Row> = results
            .results
            .bindings
            .into_iter()
            .map(|binding| {
                binding
                    .into_iter()
                    .map(|(variable, value)| (variable, value.value))
                    .collect()
            })
            .collect();

        debug!("SPARQL query returned {} rows", rows.len());
        Ok(rows)
    }

    /// Run raw update text
    pub async fn update_sparql(&self, update: &str) -> Result<(), StoreError> {
        debug!("SPARQL update:\n{}", update);

        let response = self
            .client
            .post(&self.update_url)
            .form(&[("update", update)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    fn block_on<F: Future>(&self, future: F) -> Result<F::Output, StoreError> {
        let runtime = match self.runtime.get() {
            Some(runtime) => runtime,
            None => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| StoreError::Runtime(e.to_string()))?;
                self.runtime.get_or_init(|| runtime)
            }
        };
        Ok(runtime.block_on(future))
    }
}

impl FactStore for FusekiStore {
    type Error = StoreError;

    fn select(&self, query: &SelectQuery) -> Result<Vec<Row>, Self::Error> {
        self.block_on(FusekiStore::select(self, query))?
    }

    fn insert(&mut self, facts: &[Fact]) -> Result<(), Self::Error> {
        self.block_on(FusekiStore::insert(self, facts))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls() {
        let config = StoreConfig::default();
        assert_eq!(config.query_url(), "http://127.0.0.1:3030/saliency_kd/sparql");
        assert_eq!(config.update_url(), "http://127.0.0.1:3030/saliency_kd/update");
    }

    #[test]
    fn test_urls_tolerate_slashes() {
        let config = StoreConfig {
            base_url: "http://fuseki:3030/".to_string(),
            dataset: "/faults/".to_string(),
            query_path: "/query".to_string(),
            ..StoreConfig::default()
        };
        assert_eq!(config.query_url(), "http://fuseki:3030/faults/query");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(StoreConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = StoreConfig::default();
        config.base_url = "fuseki:3030".to_string();
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.dataset = "/".to_string();
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: StoreConfig = toml::from_str("dataset = \"faults\"").unwrap();
        assert_eq!(config.dataset, "faults");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.ontology().prefix(), DEFAULT_ONTOLOGY_PREFIX);
    }

    #[test]
    fn test_blocking_select_against_closed_port() {
        let config = StoreConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
            ..StoreConfig::default()
        };
        let store = FusekiStore::new(&config).unwrap();
        let query = crate::sparql::list_all_query(&config.ontology()).unwrap();

        let result = FactStore::select(&store, &query);
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }
}
