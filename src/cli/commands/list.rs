//! The `list` command: show the attack catalog.

use crate::cli::args::{ListArgs, OutputFormat};
use crate::error::SpawnjackError;
use crate::scenario::{self, loader};

/// Prints the scenario catalog.
///
/// # Errors
///
/// Returns an error if the scenario file fails to load or the catalog
/// cannot be serialized.
pub fn run(args: &ListArgs) -> Result<(), SpawnjackError> {
    let scenarios = match &args.scenarios {
        Some(path) => loader::load_scenarios(path)?,
        None => scenario::builtin(),
    };

    match args.format {
        OutputFormat::Human => {
            for scenario in &scenarios {
                println!("{:<20} {:<14} {}", scenario.name, scenario.vector, scenario.summary);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&scenarios)?);
        }
    }

    Ok(())
}
