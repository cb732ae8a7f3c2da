//! List command implementation.

use crate::backend::Backend;
use crate::cli::ListArgs;
use crate::config::Profile;
use crate::error::Result;
use crate::output::Formatter;
use saliency_store::ClassReader;

/// Execute the list command.
pub fn execute_list(args: ListArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let backend = Backend::open(&profile.store, &args.source)?;
    let reader = ClassReader::new(backend, profile.store.ontology());

    let output = if args.descriptions {
        formatter.format_descriptions(&reader.list_descriptions()?)?
    } else {
        formatter.format_classes(&reader.list_all()?)?
    };
    println!("{}", output);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SourceArgs;
    use crate::config::OutputFormat;

    fn offline() -> SourceArgs {
        SourceArgs {
            offline: true,
            taxonomy: None,
        }
    }

    #[test]
    fn test_list_offline() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let args = ListArgs {
            descriptions: false,
            source: offline(),
        };
        execute_list(args, &Profile::default(), &formatter).unwrap();
    }

    #[test]
    fn test_list_descriptions_offline() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let args = ListArgs {
            descriptions: true,
            source: offline(),
        };
        execute_list(args, &Profile::default(), &formatter).unwrap();
    }
}
