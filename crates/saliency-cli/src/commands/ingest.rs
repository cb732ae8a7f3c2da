//! Ingest command implementation.

use crate::backend::{load_taxonomy, Backend};
use crate::cli::{IngestArgs, SourceArgs};
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use saliency_classifier::Taxonomy;
use saliency_domain::traits::FactStore;
use saliency_domain::RecordId;
use saliency_store::sparql::render_insert_data;
use saliency_store::writer::class_facts;
use saliency_store::{ClassWriter, Ontology, StoreError};
use tracing::info;

/// Execute the ingest command.
pub fn execute_ingest(args: IngestArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let taxonomy = load_taxonomy(args.taxonomy.as_deref())?;
    let ontology = profile.store.ontology();

    if args.dry_run {
        for update in dry_run_updates(&ontology, &taxonomy)? {
            println!("{}\n", update);
        }
        return Ok(());
    }

    let backend = Backend::open(&profile.store, &SourceArgs::default())?;
    let mut writer = ClassWriter::new(backend, ontology);
    let records = ingest_into(&mut writer, &taxonomy)?;
    println!("{}", formatter.format_ingest(&records)?);
    Ok(())
}

/// Write every taxonomy class through `writer`, returning the assigned records.
pub fn ingest_into<S>(
    writer: &mut ClassWriter<S>,
    taxonomy: &Taxonomy,
) -> Result<Vec<(String, RecordId)>>
where
    S: FactStore<Error = StoreError>,
{
    let ids = writer.write_all(taxonomy.classes())?;
    info!("Ingested taxonomy version {}", taxonomy.version());
    Ok(taxonomy
        .classes()
        .iter()
        .map(|class| class.name.clone())
        .zip(ids)
        .collect())
}

/// The INSERT DATA updates an ingest would send, one per class.
fn dry_run_updates(ontology: &Ontology, taxonomy: &Taxonomy) -> Result<Vec<String>> {
    let mut updates = Vec::with_capacity(taxonomy.len());
    for class in taxonomy.classes() {
        let facts = class_facts(ontology, RecordId::new(), class)?;
        updates.push(render_insert_data(&facts)?);
    }
    Ok(updates)
}
