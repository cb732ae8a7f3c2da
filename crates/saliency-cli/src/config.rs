//! Configuration management for the CLI.
//!
//! The config file holds named profiles, each bundling fact store, LLM and
//! classifier settings. The OpenAI API key is never stored here; it comes
//! from `OPENAI_API_KEY` or `--api-key`.

use crate::error::{CliError, Result};
use saliency_classifier::ClassifierConfig;
use saliency_llm::OpenAiConfig;
use saliency_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File this config was loaded from and is saved to
    #[serde(skip)]
    path: PathBuf,
}

/// Settings for one environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Fact store endpoint
    pub store: StoreConfig,

    /// LLM endpoint and model
    pub llm: OpenAiConfig,

    /// Answer convention and rendering precision
    pub classifier: ClassifierConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".saliency-kd").join("config.toml"))
    }

    /// Load configuration from `path` (or the default path), falling back
    /// to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };
        config.path = path;
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Path this configuration is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            path: PathBuf::from("config.toml"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use saliency_classifier::AnswerFormat;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);

        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.store.base_url, "http://127.0.0.1:3030");
        assert_eq!(profile.llm.model, "o3-2025-04-16");
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let mut profile = Profile::default();
        profile.store.dataset = "lab".to_string();

        config.set_profile("lab".to_string(), profile);
        assert!(config.profiles.contains_key("lab"));

        config.switch_profile("lab".to_string()).unwrap();
        assert_eq!(config.get_active_profile().unwrap().store.dataset, "lab");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.active_profile, "default");
        assert_eq!(config.path(), path.as_path());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load(Some(path.as_path())).unwrap();
        let mut profile = Profile::default();
        profile.llm.model = "gpt-4o".to_string();
        profile.llm.api_key = "sk-never-written".to_string();
        profile.classifier.answer_format = AnswerFormat::LastLine;
        config.set_profile("vision".to_string(), profile);
        config.switch_profile("vision".to_string()).unwrap();
        config.save().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("sk-never-written"));

        let reloaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(reloaded.active_profile, "vision");
        let profile = reloaded.get_active_profile().unwrap();
        assert_eq!(profile.llm.model, "gpt-4o");
        assert!(profile.llm.api_key.is_empty());
        assert_eq!(profile.classifier.answer_format, AnswerFormat::LastLine);
    }

    #[test]
    fn test_partial_profile_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
active_profile = "remote"

[profiles.remote.store]
base_url = "http://fuseki.example:3030"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.store.base_url, "http://fuseki.example:3030");
        assert_eq!(profile.store.dataset, "saliency_kd");
        assert_eq!(profile.classifier.decimals, 2);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }
}
