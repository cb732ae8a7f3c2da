//! Lookup command implementation.

use crate::backend::Backend;
use crate::cli::LookupArgs;
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use saliency_store::ClassReader;

/// Execute the lookup command.
pub fn execute_lookup(args: LookupArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let names: Vec<String> = args
        .names
        .iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        return Err(CliError::InvalidInput("no class names given".to_string()));
    }

    let backend = Backend::open(&profile.store, &args.source)?;
    let reader = ClassReader::new(backend, profile.store.ontology());
    let lookup = reader.find_all_by_names(&names)?;

    println!("{}", formatter.format_lookup(&lookup)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SourceArgs;
    use crate::config::OutputFormat;

    fn args(names: &[&str]) -> LookupArgs {
        LookupArgs {
            names: names.iter().map(|n| n.to_string()).collect(),
            source: SourceArgs {
                offline: true,
                taxonomy: None,
            },
        }
    }

    #[test]
    fn test_lookup_offline() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        execute_lookup(args(&["class_7", "class_99"]), &Profile::default(), &formatter).unwrap();
    }

    #[test]
    fn test_blank_names_rejected() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = execute_lookup(args(&["  "]), &Profile::default(), &formatter);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
