//! Configuration for the Classifier

use serde::{Deserialize, Serialize};

/// Default answer sentinel
pub const DEFAULT_SENTINEL: &str = "CLASSIFICATION:";

/// Largest supported rounding precision
const MAX_DECIMALS: u32 = 10;

/// How the model is asked to mark its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerFormat {
    /// The last non-empty line is the answer, unmarked
    LastLine,
    /// The last non-empty line must start with the sentinel
    #[default]
    Sentinel,
}

/// Configuration for the Classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Answer convention requested in the prompt and enforced by the parser
    pub answer_format: AnswerFormat,

    /// Prefix of the answer line in `Sentinel` mode
    pub sentinel: String,

    /// Decimal places kept when rendering numeric signals
    pub decimals: u32,
}

impl ClassifierConfig {
    /// Configuration using the legacy last-line convention
    pub fn last_line() -> Self {
        Self {
            answer_format: AnswerFormat::LastLine,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.decimals > MAX_DECIMALS {
            return Err(format!("decimals must be at most {}", MAX_DECIMALS));
        }
        if self.answer_format == AnswerFormat::Sentinel {
            if self.sentinel.trim().is_empty() {
                return Err("sentinel must not be empty".to_string());
            }
            if self.sentinel.contains('\n') || self.sentinel.contains('\r') {
                return Err("sentinel must be a single line".to_string());
            }
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            answer_format: AnswerFormat::Sentinel,
            sentinel: DEFAULT_SENTINEL.to_string(),
            decimals: 2,
        }
    }
}
