//! Fact store selection: Fuseki, or an in-memory copy of a taxonomy.

use crate::cli::SourceArgs;
use crate::error::Result;
use saliency_classifier::Taxonomy;
use saliency_domain::traits::FactStore;
use saliency_domain::{Fact, RecordId, Row, SelectQuery};
use saliency_store::writer::class_facts;
use saliency_store::{FusekiStore, MemoryStore, Ontology, StoreConfig, StoreError};
use std::path::Path;
use tracing::debug;

/// The fact store a command runs against
pub enum Backend {
    /// Remote SPARQL endpoint
    Fuseki(FusekiStore),
    /// In-process store seeded from a taxonomy
    Memory(MemoryStore),
}

impl Backend {
    /// Open the store named by the profile, or an offline copy of the taxonomy
    pub fn open(config: &StoreConfig, source: &SourceArgs) -> Result<Self> {
        if source.offline {
            let taxonomy = load_taxonomy(source.taxonomy.as_deref())?;
            return Self::seeded(&config.ontology(), &taxonomy);
        }

        config.validate().map_err(crate::error::CliError::Config)?;
        debug!("Using fact store at {}", config.query_url());
        Ok(Backend::Fuseki(FusekiStore::new(config)?))
    }

    /// In-memory store holding every class of `taxonomy`
    pub fn seeded(ontology: &Ontology, taxonomy: &Taxonomy) -> Result<Self> {
        let mut store = MemoryStore::new();
        for class in taxonomy.classes() {
            store.insert(&class_facts(ontology, RecordId::new(), class)?)?;
        }
        debug!("Seeded offline store with {} classes", taxonomy.len());
        Ok(Backend::Memory(store))
    }
}

impl FactStore for Backend {
    type Error = StoreError;

    fn select(&self, query: &SelectQuery) -> std::result::Result<Vec<Row>, StoreError> {
        match self {
            Backend::Fuseki(store) => FactStore::select(store, query),
            Backend::Memory(store) => store.select(query),
        }
    }

    fn insert(&mut self, facts: &[Fact]) -> std::result::Result<(), StoreError> {
        match self {
            Backend::Fuseki(store) => FactStore::insert(store, facts),
            Backend::Memory(store) => store.insert(facts),
        }
    }
}

/// The taxonomy in `path`, or the built-in one
pub fn load_taxonomy(path: Option<&Path>) -> Result<Taxonomy> {
    let taxonomy = match path {
        Some(path) => Taxonomy::load(path)?,
        None => Taxonomy::builtin()?,
    };
    Ok(taxonomy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saliency_store::ClassReader;

    #[test]
    fn test_offline_backend_serves_builtin_taxonomy() {
        let source = SourceArgs {
            offline: true,
            taxonomy: None,
        };
        let backend = Backend::open(&StoreConfig::default(), &source).unwrap();
        assert!(matches!(backend, Backend::Memory(_)));

        let reader = ClassReader::new(backend, Ontology::default());
        assert_eq!(reader.list_all().unwrap().len(), 12);
        assert_eq!(reader.find_by_name("class_12").unwrap().len(), 1);
    }

    #[test]
    fn test_online_backend_validates_config() {
        let config = StoreConfig {
            base_url: "ftp://nowhere".to_string(),
            ..StoreConfig::default()
        };
        let result = Backend::open(&config, &SourceArgs::default());
        assert!(matches!(result, Err(crate::error::CliError::Config(_))));
    }

    #[test]
    fn test_online_backend_is_fuseki() {
        let backend = Backend::open(&StoreConfig::default(), &SourceArgs::default()).unwrap();
        assert!(matches!(backend, Backend::Fuseki(_)));
    }
}
