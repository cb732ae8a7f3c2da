//! Describe command implementation.

use crate::cli::DescribeArgs;
use crate::commands::open_llm;
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use saliency_classifier::{Classifier, Signals, DEFAULT_SIGNALS_FILE};
use saliency_domain::traits::LlmProvider;
use saliency_llm::LlmError;
use saliency_store::MemoryStore;
use std::path::PathBuf;

/// Execute the describe command.
pub fn execute_describe(args: DescribeArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let path = args
        .signals
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SIGNALS_FILE));
    let signals = Signals::from_npy(&path)?;
    let llm = open_llm(&profile.llm, &args.llm)?;

    println!("{}", describe_with(llm, profile, &signals)?);
    println!(
        "{}",
        formatter.info(&format!("Described {} signal(s) from {}", signals.len(), path.display()))
    );
    Ok(())
}

/// Ask `llm` for shape descriptions of `signals`.
pub fn describe_with<L>(llm: L, profile: &Profile, signals: &Signals) -> Result<String>
where
    L: LlmProvider<Error = LlmError>,
{
    // Descriptions never consult the class table.
    let classifier = Classifier::new(
        llm,
        MemoryStore::new(),
        profile.store.ontology(),
        profile.classifier.clone(),
    );
    Ok(classifier.describe(signals)?)
}
