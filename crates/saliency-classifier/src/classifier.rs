//! Core Classifier implementation

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::parser::parse_classification;
use crate::payload::Signals;
use crate::prompt::PromptBuilder;
use crate::types::{ClassificationMetadata, ClassificationOutcome, ClassificationRequest};
use saliency_domain::traits::{FactStore, LlmProvider};
use saliency_domain::ChatMessage;
use saliency_llm::LlmError;
use saliency_store::{ClassReader, Ontology, StoreError};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Labels signals with stored anomaly classes using an LLM
///
/// Every call reads the class table fresh from the store; nothing is cached.
pub struct Classifier<L, S> {
    llm_provider: L,
    reader: ClassReader<S>,
    config: ClassifierConfig,
}

impl<L, S> Classifier<L, S>
where
    L: LlmProvider<Error = LlmError>,
    S: FactStore<Error = StoreError>,
{
    /// Create a new Classifier
    pub fn new(llm_provider: L, store: S, ontology: Ontology, config: ClassifierConfig) -> Self {
        Self {
            llm_provider,
            reader: ClassReader::new(store, ontology),
            config,
        }
    }

    /// Build the classification message without calling the LLM
    pub fn build_classification_prompt(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ChatMessage, ClassifierError> {
        self.prompt_for(request).map(|(message, _)| message)
    }

    /// Classify the signals in `request`
    ///
    /// Reads the class table, prompts the model, parses its answer and looks
    /// the predicted names up again in the store.
    pub fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> Result<ClassificationOutcome, ClassifierError> {
        let start_time = Instant::now();

        let (message, class_count) = self.prompt_for(request)?;
        let prompt_chars = message.text().chars().count();
        debug!(
            "Prompt length: {} chars, {} images",
            prompt_chars,
            message.image_count()
        );

        let raw_response = self.llm_provider.complete(&message)?;
        debug!("LLM response length: {} chars", raw_response.len());

        let result = parse_classification(
            &raw_response,
            self.config.answer_format,
            &self.config.sentinel,
        )?;

        let lookup = self.reader.find_all_by_names(&result.class_names)?;

        info!(
            "Classified {} signals as [{}]: {} matched, {} unmatched",
            request.payload.signal_count(),
            result.class_names.join(", "),
            lookup.matches.len(),
            lookup.unmatched.len()
        );

        let metadata = ClassificationMetadata {
            model_name: self.llm_provider.model_name().to_string(),
            class_count,
            signal_count: request.payload.signal_count(),
            prompt_chars,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(ClassificationOutcome {
            result,
            matches: lookup.matches,
            unmatched: lookup.unmatched,
            raw_response,
            metadata,
        })
    }

    /// Ask the model for a shape description of each signal
    ///
    /// Returns the complete response text.
    pub fn describe(&self, signals: &Signals) -> Result<String, ClassifierError> {
        if signals.is_empty() {
            return Err(ClassifierError::Payload("no signals to describe".to_string()));
        }

        let message = PromptBuilder::new(&self.config).description(signals);
        debug!("Description prompt length: {} chars", message.text().len());

        let response = self.llm_provider.complete(&message)?;
        if response.trim().is_empty() {
            return Err(ClassifierError::EmptyResponse);
        }

        info!("Described {} signals", signals.len());
        Ok(response)
    }

    /// Classification message and the number of classes it offers
    fn prompt_for(
        &self,
        request: &ClassificationRequest,
    ) -> Result<(ChatMessage, usize), ClassifierError> {
        self.config.validate().map_err(ClassifierError::Config)?;

        let classes = self.reader.list_all()?;
        if classes.is_empty() {
            warn!("Fact store holds no anomaly classes; the prompt offers none");
        }
        let message = PromptBuilder::new(&self.config).classification(&classes, &request.payload);
        Ok((message, classes.len()))
    }

    /// The reader used for class lookups
    pub fn reader(&self) -> &ClassReader<S> {
        &self.reader
    }

    /// The LLM provider
    pub fn llm_provider(&self) -> &L {
        &self.llm_provider
    }

    /// Active configuration
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }
}
