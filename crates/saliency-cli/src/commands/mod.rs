//! Command implementations.

pub mod classify;
pub mod describe;
pub mod ingest;
pub mod list;
pub mod lookup;
pub mod profile;
pub mod prompt;

pub use self::classify::execute_classify;
pub use self::describe::execute_describe;
pub use self::ingest::execute_ingest;
pub use self::list::execute_list;
pub use self::lookup::execute_lookup;
pub use self::profile::execute_profile;
pub use self::prompt::execute_prompt;

use crate::cli::{AnswerFormatArg, LlmArgs, PayloadArgs};
use crate::error::{CliError, Result};
use saliency_classifier::{ClassifierConfig, ImagePayload, SignalPayload, Signals};
use saliency_llm::{OpenAiConfig, OpenAiProvider};
use tracing::debug;

/// Read the images or the signal array named on the command line.
pub(crate) fn load_payload(args: &PayloadArgs) -> Result<SignalPayload> {
    if !args.images.is_empty() {
        let images = args
            .images
            .iter()
            .map(ImagePayload::from_path)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("Loaded {} images", images.len());
        return Ok(SignalPayload::Images(images));
    }

    let path = args.signals_path();
    let signals = Signals::from_npy(&path)?;
    debug!("Loaded {} signals from {}", signals.len(), path.display());
    Ok(SignalPayload::Numeric(signals))
}

/// Profile classifier settings with the command's answer format applied.
pub(crate) fn classifier_config(
    base: &ClassifierConfig,
    answer_format: Option<AnswerFormatArg>,
) -> ClassifierConfig {
    let mut config = base.clone();
    if let Some(format) = answer_format {
        config.answer_format = format.into();
    }
    config
}

/// Build the OpenAI provider from the profile plus command line overrides.
pub(crate) fn open_llm(base: &OpenAiConfig, args: &LlmArgs) -> Result<OpenAiProvider> {
    let api_key = args
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| CliError::Config("OPENAI_API_KEY is not set".to_string()))?;

    let mut config = base.clone().with_api_key(api_key);
    if let Some(model) = &args.model {
        config.model = model.clone();
    }

    Ok(OpenAiProvider::new(config)?)
}
