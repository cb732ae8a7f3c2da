//! Fact Store Writer: persists anomaly classes

use crate::sparql::{Ontology, FAULT_DESC, NAME, SENSOR_FAULT, SEVERITY};
use crate::StoreError;
use saliency_domain::traits::FactStore;
use saliency_domain::{AnomalyClass, Fact, RecordId, Term};
use tracing::info;

/// Writes anomaly classes to a fact store, one insertion per class
///
/// There is no duplicate detection and no transaction spanning several
/// classes: if `write_all` fails halfway, the classes before the failure stay
/// stored.
pub struct ClassWriter<S> {
    store: S,
    ontology: Ontology,
}

impl<S> ClassWriter<S>
where
    S: FactStore<Error = StoreError>,
{
    /// Create a writer over a store
    pub fn new(store: S, ontology: Ontology) -> Self {
        Self { store, ontology }
    }

    /// Store one class under a fresh record id
    pub fn write_class(&mut self, class: &AnomalyClass) -> Result<RecordId, StoreError> {
        let id = RecordId::new();
        let facts = class_facts(&self.ontology, id, class)?;
        self.store.insert(&facts)?;
        info!("Stored anomaly class '{}' as {}", class.name, id);
        Ok(id)
    }

    /// Store every class in order, stopping at the first failure
    pub fn write_all(&mut self, classes: &[AnomalyClass]) -> Result<Vec<RecordId>, StoreError> {
        let mut ids = Vec::with_capacity(classes.len());
        for class in classes {
            ids.push(self.write_class(class)?);
        }
        info!("Stored {} anomaly classes", ids.len());
        Ok(ids)
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back
    pub fn into_inner(self) -> S {
        self.store
    }
}

/// The four statements describing one class: type, name, severity, description
pub fn class_facts(
    ontology: &Ontology,
    id: RecordId,
    class: &AnomalyClass,
) -> Result<Vec<Fact>, StoreError> {
    let subject = Term::iri(ontology.iri(&id.to_string())?);
    Ok(vec![
        Fact::type_assertion(subject.clone(), ontology.iri(SENSOR_FAULT)?),
        Fact::new(
            subject.clone(),
            Term::iri(ontology.iri(NAME)?),
            Term::literal(class.name.clone()),
        ),
        Fact::new(
            subject.clone(),
            Term::iri(ontology.iri(SEVERITY)?),
            Term::literal(class.severity.clone()),
        ),
        Fact::new(
            subject,
            Term::iri(ontology.iri(FAULT_DESC)?),
            Term::literal(class.description.clone()),
        ),
    ])
}
