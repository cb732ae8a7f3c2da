//! Classify command implementation.

use crate::backend::Backend;
use crate::cli::ClassifyArgs;
use crate::commands::{classifier_config, load_payload, open_llm};
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use saliency_classifier::{ClassificationRequest, Classifier};
use saliency_domain::traits::{FactStore, LlmProvider};
use saliency_llm::LlmError;
use saliency_store::StoreError;

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let payload = load_payload(&args.payload)?;
    let backend = Backend::open(&profile.store, &args.source)?;
    let llm = open_llm(&profile.llm, &args.llm)?;

    let classifier = Classifier::new(
        llm,
        backend,
        profile.store.ontology(),
        classifier_config(&profile.classifier, args.answer_format),
    );

    let output = run_classification(
        &classifier,
        &ClassificationRequest::new(payload),
        args.show_response,
        formatter,
    )?;
    println!("{}", output);
    Ok(())
}

/// Classify `request` and format the outcome, optionally preceded by the raw response.
pub fn run_classification<L, S>(
    classifier: &Classifier<L, S>,
    request: &ClassificationRequest,
    show_response: bool,
    formatter: &Formatter,
) -> Result<String>
where
    L: LlmProvider<Error = LlmError>,
    S: FactStore<Error = StoreError>,
{
    let outcome = classifier.classify(request)?;
    let formatted = formatter.format_outcome(&outcome)?;

    if show_response {
        Ok(format!("{}\n\n{}", outcome.raw_response.trim_end(), formatted))
    } else {
        Ok(formatted)
    }
}
