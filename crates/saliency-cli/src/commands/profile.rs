//! Profile command implementation.

use crate::cli::{ProfileAction, ProfileArgs, ProfileSetArgs};
use crate::config::{Config, Profile};
use crate::error::{CliError, Result};
use crate::output::Formatter;

/// Execute the profile command.
pub fn execute_profile(args: ProfileArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    match args.action {
        ProfileAction::List => list_profiles(config, formatter),
        ProfileAction::Show => show_active_profile(config, formatter),
        ProfileAction::Switch { name } => switch_profile(config, name, formatter),
        ProfileAction::Set(set) => set_profile(config, set, formatter),
        ProfileAction::Delete { name } => delete_profile(config, name, formatter),
    }
}

/// List all profiles.
fn list_profiles(config: &Config, formatter: &Formatter) -> Result<()> {
    if config.profiles.is_empty() {
        println!("{}", formatter.info("No profiles configured"));
        return Ok(());
    }

    println!("Available profiles:");
    for (name, profile) in &config.profiles {
        if name == &config.active_profile {
            println!("* {}", formatter.success(name));
        } else {
            println!("  {}", name);
        }
        println!("    Store: {}", profile.store.query_url());
        println!("    Model: {}", profile.llm.model);
    }

    Ok(())
}

/// Show the active profile.
fn show_active_profile(config: &Config, formatter: &Formatter) -> Result<()> {
    let profile = config.get_active_profile()?;

    println!("Active profile: {}", formatter.success(&config.active_profile));
    println!("  Query endpoint: {}", profile.store.query_url());
    println!("  Update endpoint: {}", profile.store.update_url());
    println!("  Ontology: {}", profile.store.ontology_prefix);
    println!("  LLM: {} ({})", profile.llm.model, profile.llm.base_url);
    println!("  Answer format: {:?}", profile.classifier.answer_format);
    println!("  Sentinel: {}", profile.classifier.sentinel);
    println!("  Decimals: {}", profile.classifier.decimals);
    println!("  Config file: {}", config.path().display());

    Ok(())
}

/// Switch to a different profile.
fn switch_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    config.switch_profile(name.clone())?;
    config.save()?;
    println!(
        "{}",
        formatter.success(&format!("Switched to profile '{}'", name))
    );
    Ok(())
}

/// Create or update a profile. Fields not given keep their current value.
fn set_profile(config: &mut Config, args: ProfileSetArgs, formatter: &Formatter) -> Result<()> {
    let existing = config.profiles.get(&args.name).cloned();
    let action = if existing.is_some() { "Updated" } else { "Created" };

    let profile = merge_profile(existing.unwrap_or_default(), &args);
    profile.store.validate().map_err(CliError::Config)?;
    profile.classifier.validate().map_err(CliError::Config)?;

    config.set_profile(args.name.clone(), profile);
    config.save()?;

    println!(
        "{}",
        formatter.success(&format!("{} profile '{}'", action, args.name))
    );

    Ok(())
}

fn merge_profile(mut profile: Profile, args: &ProfileSetArgs) -> Profile {
    if let Some(url) = &args.store_url {
        profile.store.base_url = url.clone();
    }
    if let Some(dataset) = &args.dataset {
        profile.store.dataset = dataset.clone();
    }
    if let Some(prefix) = &args.ontology_prefix {
        profile.store.ontology_prefix = prefix.clone();
    }
    if let Some(url) = &args.llm_url {
        profile.llm.base_url = url.clone();
    }
    if let Some(model) = &args.model {
        profile.llm.model = model.clone();
    }
    if let Some(format) = args.answer_format {
        profile.classifier.answer_format = format.into();
    }
    profile
}

/// Delete a profile.
fn delete_profile(config: &mut Config, name: String, formatter: &Formatter) -> Result<()> {
    if name == config.active_profile {
        return Err(CliError::NotPermitted(
            "Cannot delete the active profile".to_string(),
        ));
    }

    if config.profiles.remove(&name).is_some() {
        config.save()?;
        println!(
            "{}",
            formatter.success(&format!("Deleted profile '{}'", name))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("Profile '{}' does not exist", name))
        );
    }

    Ok(())
}
