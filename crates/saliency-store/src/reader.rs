//! Fact Store Reader: queries stored anomaly classes

use crate::sparql::{
    descriptions_query, find_by_name_query, list_all_query, Ontology, VAR_DESC, VAR_NAME,
    VAR_SEVERITY,
};
use crate::StoreError;
use saliency_domain::traits::FactStore;
use saliency_domain::{AnomalyClass, ClassDescription, Row};
use tracing::{debug, warn};

/// Result of looking up several class names at once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameLookup {
    /// Stored classes matching one of the names, in name order
    pub matches: Vec<AnomalyClass>,
    /// Names with no stored class
    pub unmatched: Vec<String>,
}

/// Reads anomaly classes back out of a fact store
pub struct ClassReader<S> {
    store: S,
    ontology: Ontology,
}

impl<S> ClassReader<S>
where
    S: FactStore<Error = StoreError>,
{
    /// Create a reader over a store
    pub fn new(store: S, ontology: Ontology) -> Self {
        Self { store, ontology }
    }

    /// All stored classes as (name, description), in store order
    pub fn list_all(&self) -> Result<Vec<ClassDescription>, StoreError> {
        let rows = self.store.select(&list_all_query(&self.ontology)?)?;
        rows.iter()
            .map(|row| {
                Ok(ClassDescription {
                    name: binding(row, VAR_NAME)?,
                    description: binding(row, VAR_DESC)?,
                })
            })
            .collect()
    }

    /// Stored classes whose name equals `name` exactly
    ///
    /// Usually zero or one row; uniqueness of names is not enforced.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<AnomalyClass>, StoreError> {
        let rows = self.store.select(&find_by_name_query(&self.ontology, name)?)?;
        debug!("Lookup of '{}' returned {} rows", name, rows.len());
        rows.iter()
            .map(|row| {
                Ok(AnomalyClass {
                    name: binding(row, VAR_NAME)?,
                    description: binding(row, VAR_DESC)?,
                    severity: binding(row, VAR_SEVERITY)?,
                })
            })
            .collect()
    }

    /// Descriptions of all stored classes
    pub fn list_descriptions(&self) -> Result<Vec<String>, StoreError> {
        let rows = self.store.select(&descriptions_query(&self.ontology)?)?;
        rows.iter().map(|row| binding(row, VAR_DESC)).collect()
    }

    /// Look up each name, splitting the result into matches and misses
    pub fn find_all_by_names(&self, names: &[String]) -> Result<NameLookup, StoreError> {
        let mut lookup = NameLookup::default();
        for name in names {
            let found = self.find_by_name(name)?;
            if found.is_empty() {
                warn!("No stored anomaly class named '{}'", name);
                lookup.unmatched.push(name.clone());
            } else {
                lookup.matches.extend(found);
            }
        }
        Ok(lookup)
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ontology namespace used for queries
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }
}

fn binding(row: &Row, variable: &str) -> Result<String, StoreError> {
    row.get(variable).cloned().ok_or_else(|| {
        StoreError::InvalidResponse(format!("row without binding for ?{}", variable))
    })
}
