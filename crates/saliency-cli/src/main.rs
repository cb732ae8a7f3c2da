//! Saliency KD CLI - label anomaly clusters with a fact store and an LLM.

use clap::Parser;
use saliency_cli::commands;
use saliency_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str =
    "info,saliency_store=debug,saliency_llm=debug,saliency_classifier=debug,saliency_cli=debug";

// Stores and providers drive their own runtime, so main stays synchronous.
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> saliency_cli::Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Profile(args) => commands::execute_profile(args, &mut config, &formatter),
        cmd => {
            let profile = config.get_active_profile()?;
            match cmd {
                Command::Ingest(args) => commands::execute_ingest(args, profile, &formatter),
                Command::List(args) => commands::execute_list(args, profile, &formatter),
                Command::Lookup(args) => commands::execute_lookup(args, profile, &formatter),
                Command::Prompt(args) => commands::execute_prompt(args, profile, &formatter),
                Command::Classify(args) => commands::execute_classify(args, profile, &formatter),
                Command::Describe(args) => commands::execute_describe(args, profile, &formatter),
                Command::Profile(_) => unreachable!(),
            }
        }
    }
}
