//! The `probe` command: run a single ad-hoc payload.
//!
//! Quick-start mode for payloads not worth a scenario file. The command
//! line is split shell-style, `{marker}` is substituted, and the result
//! goes through the same runner and verification path as `run`.

use crate::cli::args::{OutputFormat, ProbeArgs};
use crate::connector::StdioConnector;
use crate::error::{ConfigError, SpawnjackError};
use crate::report;
use crate::runner::ExploitRunner;
use crate::scenario::{AttackScenario, InjectionVector, loader};

/// Runs the probe payload and prints the report.
///
/// # Errors
///
/// Returns an error if the payload string cannot be split, or the resulting
/// scenario fails validation (e.g. no `{marker}` reference).
pub async fn run(args: &ProbeArgs) -> Result<(), SpawnjackError> {
    let tokens = shlex::split(&args.spawn).ok_or_else(|| ConfigError::InvalidCommandLine {
        input: args.spawn.clone(),
    })?;
    let Some((command, rest)) = tokens.split_first() else {
        return Err(ConfigError::InvalidCommandLine {
            input: args.spawn.clone(),
        }
        .into());
    };

    let scenario = AttackScenario {
        name: "probe".to_string(),
        summary: "ad-hoc operator payload".to_string(),
        vector: InjectionVector::Custom,
        capture_content: args.capture,
        command: command.clone(),
        args: rest.to_vec(),
        env: args.env.iter().cloned().collect(),
    };
    loader::validate(std::slice::from_ref(&scenario))?;

    let connector = StdioConnector::new(args.handshake_timeout);
    let runner = ExploitRunner::new(Box::new(connector));
    let summary = runner.run(std::slice::from_ref(&scenario)).await;

    match args.format {
        OutputFormat::Human => print!("{}", report::render_human(&summary)),
        OutputFormat::Json => println!("{}", report::render_json(&summary)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn probe_args(spawn: &str) -> ProbeArgs {
        ProbeArgs {
            spawn: spawn.to_string(),
            capture: false,
            env: vec![],
            handshake_timeout: Duration::from_secs(2),
            format: OutputFormat::Json,
        }
    }

    #[tokio::test]
    async fn test_probe_rejects_empty_payload() {
        let err = run(&probe_args("")).await.unwrap_err();
        assert!(matches!(
            err,
            SpawnjackError::Config(ConfigError::InvalidCommandLine { .. })
        ));
    }

    #[tokio::test]
    async fn test_probe_rejects_payload_without_marker() {
        let err = run(&probe_args("touch /tmp/fixed")).await.unwrap_err();
        assert!(matches!(
            err,
            SpawnjackError::Config(ConfigError::InvalidScenario { .. })
        ));
    }

    #[tokio::test]
    async fn test_probe_rejects_unbalanced_quotes() {
        let err = run(&probe_args("sh -c 'touch {marker}")).await.unwrap_err();
        assert!(matches!(
            err,
            SpawnjackError::Config(ConfigError::InvalidCommandLine { .. })
        ));
    }

    #[tokio::test]
    async fn test_probe_executes_payload() {
        let result = run(&probe_args("touch {marker}")).await;
        assert!(result.is_ok());
    }
}
