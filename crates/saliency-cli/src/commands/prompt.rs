//! Prompt command implementation.

use crate::backend::Backend;
use crate::cli::PromptArgs;
use crate::commands::{classifier_config, load_payload};
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use saliency_classifier::{PromptBuilder, Signals};
use saliency_store::ClassReader;

/// Execute the prompt command.
pub fn execute_prompt(args: PromptArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let config = classifier_config(&profile.classifier, args.answer_format);
    config.validate().map_err(CliError::Config)?;
    let builder = PromptBuilder::new(&config);

    let message = if args.describe {
        if !args.payload.images.is_empty() {
            return Err(CliError::InvalidInput(
                "--describe works on --signals only".to_string(),
            ));
        }
        let signals = Signals::from_npy(args.payload.signals_path())?;
        builder.description(&signals)
    } else {
        let payload = load_payload(&args.payload)?;
        let backend = Backend::open(&profile.store, &args.source)?;
        let classes = ClassReader::new(backend, profile.store.ontology()).list_all()?;
        builder.classification(&classes, &payload)
    };

    println!("{}", formatter.format_prompt(&message)?);
    Ok(())
}
