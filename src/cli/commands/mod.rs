//! CLI command dispatch and handlers.
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod list;
pub mod probe;
pub mod run;
pub mod version;

use crate::cli::args::{Cli, Commands};
use crate::error::SpawnjackError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli) -> Result<(), SpawnjackError> {
    match cli.command {
        Commands::Run(args) => run::run(&args).await,
        Commands::Probe(args) => probe::run(&args).await,
        Commands::List(args) => list::run(&args),
        Commands::Version(args) => {
            version::run(&args);
            Ok(())
        }
    }
}
