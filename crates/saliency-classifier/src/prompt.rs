//! Prompt assembly for classifying and describing signals

use crate::config::{AnswerFormat, ClassifierConfig};
use crate::payload::{SignalPayload, Signals};
use crate::render::{render_class_table, render_signals};
use saliency_domain::{ChatMessage, ClassDescription, ContentBlock};

/// Builds the chat messages sent to the LLM
///
/// Output depends only on the inputs; identical inputs give identical messages.
pub struct PromptBuilder {
    answer_format: AnswerFormat,
    sentinel: String,
    decimals: u32,
}

impl PromptBuilder {
    /// Create a builder for the given answer convention and precision
    pub fn new(config: &ClassifierConfig) -> Self {
        Self {
            answer_format: config.answer_format,
            sentinel: config.sentinel.clone(),
            decimals: config.decimals,
        }
    }

    /// Classification prompt: class table, signals, answer instruction
    pub fn classification(
        &self,
        classes: &[ClassDescription],
        payload: &SignalPayload,
    ) -> ChatMessage {
        let mut intro = String::new();

        // 1. Taxonomy
        intro.push_str(CLASSIFY_PREAMBLE);
        intro.push_str("\n\n");
        intro.push_str(&render_class_table(classes));

        // 2. Mode instructions and payload
        match payload {
            SignalPayload::Images(images) => {
                intro.push_str(MODE_PROMPT_IMAGES);

                let mut content = Vec::with_capacity(images.len() + 2);
                content.push(ContentBlock::Text(intro));
                content.extend(images.iter().map(|image| ContentBlock::Image {
                    data_url: image.data_url().to_string(),
                }));
                content.push(ContentBlock::Text(self.closing_instruction()));
                ChatMessage::user(content)
            }
            SignalPayload::Numeric(signals) => {
                intro.push_str(MODE_PROMPT_NUMERIC);
                intro.push_str("\n\n");
                intro.push_str(&render_signals(signals.rows(), self.decimals));

                // 3. Answer instruction
                intro.push_str("\n\n");
                intro.push_str(&self.closing_instruction());
                ChatMessage::user_text(intro)
            }
        }
    }

    /// Description prompt: asks for a shape narrative of each signal in the
    /// style of the taxonomy
    pub fn description(&self, signals: &Signals) -> ChatMessage {
        let mut prompt = String::new();
        prompt.push_str(DESCRIBE_INIT);
        prompt.push_str(DESCRIBE_MODE_NUMERIC);
        prompt.push_str(DESCRIBE_EXAMPLE);
        prompt.push_str(DESCRIBE_APPENDIX);
        prompt.push_str("\n\n");
        prompt.push_str(&render_signals(signals.rows(), self.decimals));
        ChatMessage::user_text(prompt)
    }

    fn closing_instruction(&self) -> String {
        match self.answer_format {
            AnswerFormat::LastLine => CLOSING_LAST_LINE.to_string(),
            AnswerFormat::Sentinel => format!(
                "{} \"{} <class names>\", e.g. \"{} class_3, class_7\". Nothing may follow that line.",
                CLOSING_SENTINEL, self.sentinel, self.sentinel
            ),
        }
    }
}

const CLASSIFY_PREAMBLE: &str =
    "The following anomaly classes describe typical shapes of sensor signals (name: description):";

const MODE_PROMPT_IMAGES: &str = "\n\nThe attached images are plots of signals, one signal per \
image. Describe the broad shape of each signal and decide which of the classes above it belongs to.";

const MODE_PROMPT_NUMERIC: &str = "\n\nIn the following separated lists of values, each list is \
a signal. Describe the broad shape of each signal and decide which of the classes above it belongs to.";

const CLOSING_LAST_LINE: &str = "The very last line of your answer must be exactly the predicted \
class name(s), comma-separated in signal order, e.g. \"class_3, class_7\", with nothing else on it.";

const CLOSING_SENTINEL: &str = "End your answer with one line of the form";

const DESCRIBE_INIT: &str = "There is a number of signals:";

const DESCRIBE_MODE_NUMERIC: &str = "\n\nIn the following separated lists of values, describe each \
list, i.e., signal, in a similar fashion to the following symbolic description example.";

const DESCRIBE_EXAMPLE: &str = "\n\nexample_class: starting low, slowly but steadily going up to \
a positive peak or plateau, afterwards it goes down again, very flat plateau, then going upwards to a \
noisy peak";

const DESCRIBE_APPENDIX: &str = "\n\nDescribe them at roughly the same granularity as the example \
above (as a sentence, not bullet points) - focus on the broad shape, not minor details, but mention \
the index of relevant peaks. However, avoid using absolute values in the descriptions (except indices).";
