//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use saliency_classifier::{AnswerFormat, DEFAULT_SIGNALS_FILE};
use std::path::PathBuf;

/// Saliency KD - Label time-series anomaly clusters with a fact store and an LLM.
#[derive(Debug, Parser)]
#[command(name = "saliency-kd")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.saliency-kd/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the anomaly class taxonomy in the fact store
    Ingest(IngestArgs),

    /// List stored anomaly classes
    List(ListArgs),

    /// Look up stored classes by name
    Lookup(LookupArgs),

    /// Print the prompt that would be sent to the LLM
    Prompt(PromptArgs),

    /// Classify signals with the LLM
    Classify(ClassifyArgs),

    /// Ask the LLM for shape descriptions of signals
    Describe(DescribeArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Where class data is read from.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Serve classes from the taxonomy in memory instead of the fact store
    #[arg(long)]
    pub offline: bool,

    /// Taxonomy file for --offline (default: built-in taxonomy)
    #[arg(long, value_name = "FILE", requires = "offline")]
    pub taxonomy: Option<PathBuf>,
}

/// Signals to classify.
#[derive(Debug, Clone, Default, Args)]
pub struct PayloadArgs {
    /// PNG plot of a signal (repeatable)
    #[arg(long = "image", value_name = "PNG", conflicts_with = "signals")]
    pub images: Vec<PathBuf>,

    /// NumPy array with one signal per row
    #[arg(long, value_name = "NPY")]
    pub signals: Option<PathBuf>,
}

impl PayloadArgs {
    /// The array file, falling back to the default name in the working directory
    pub fn signals_path(&self) -> PathBuf {
        self.signals
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SIGNALS_FILE))
    }
}

/// LLM connection overrides.
#[derive(Debug, Clone, Default, Args)]
pub struct LlmArgs {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model override
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Taxonomy file (default: built-in taxonomy)
    #[arg(short, long, value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Print the SPARQL updates instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Print descriptions only
    #[arg(short, long)]
    pub descriptions: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the lookup command.
#[derive(Debug, Parser)]
pub struct LookupArgs {
    /// Class names, e.g. class_7
    #[arg(required = true)]
    pub names: Vec<String>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Build the description prompt instead of the classification prompt
    #[arg(long)]
    pub describe: bool,

    /// Answer convention override
    #[arg(long, value_enum)]
    pub answer_format: Option<AnswerFormatArg>,

    #[command(flatten)]
    pub payload: PayloadArgs,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Answer convention override
    #[arg(long, value_enum)]
    pub answer_format: Option<AnswerFormatArg>,

    /// Print the complete LLM response
    #[arg(long)]
    pub show_response: bool,

    #[command(flatten)]
    pub payload: PayloadArgs,

    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

/// Arguments for the describe command.
#[derive(Debug, Parser)]
pub struct DescribeArgs {
    /// NumPy array with one signal per row
    #[arg(long, value_name = "NPY")]
    pub signals: Option<PathBuf>,

    #[command(flatten)]
    pub llm: LlmArgs,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set(ProfileSetArgs),

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Fields of a profile to create or change.
#[derive(Debug, Clone, Parser)]
pub struct ProfileSetArgs {
    /// Profile name
    pub name: String,

    /// Fuseki server URL
    #[arg(long)]
    pub store_url: Option<String>,

    /// Fuseki dataset
    #[arg(long)]
    pub dataset: Option<String>,

    /// Ontology namespace
    #[arg(long)]
    pub ontology_prefix: Option<String>,

    /// OpenAI API root
    #[arg(long)]
    pub llm_url: Option<String>,

    /// LLM model
    #[arg(long)]
    pub model: Option<String>,

    /// Answer convention
    #[arg(long, value_enum)]
    pub answer_format: Option<AnswerFormatArg>,
}

/// Answer convention argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AnswerFormatArg {
    /// Last line holds the class names
    LastLine,
    /// Last line starts with the sentinel
    Sentinel,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<AnswerFormatArg> for AnswerFormat {
    fn from(format: AnswerFormatArg) -> Self {
        match format {
            AnswerFormatArg::LastLine => AnswerFormat::LastLine,
            AnswerFormatArg::Sentinel => AnswerFormat::Sentinel,
        }
    }
}
