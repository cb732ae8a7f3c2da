//! Saliency KD CLI library.
//!
//! This library provides the core functionality for the `saliency-kd`
//! command-line interface, including configuration profiles, store and LLM
//! setup, command execution, and output formatting.

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use backend::Backend;
pub use cli::{Cli, Command};
pub use config::{Config, Profile};
pub use error::{CliError, Result};
pub use output::Formatter;
