//! The `run` command: execute the attack catalog.

use tracing::info;

use crate::cli::args::{OutputFormat, RunArgs};
use crate::connector::StdioConnector;
use crate::error::{ConfigError, SpawnjackError};
use crate::report;
use crate::runner::ExploitRunner;
use crate::scenario::{self, AttackScenario, loader};

/// Runs all (or `--only`-selected) scenarios and prints the report.
///
/// # Errors
///
/// Returns an error if the scenario file fails to load, a filter matches
/// nothing, or - with `--fail-on-proof` - injection was proven.
pub async fn run(args: &RunArgs) -> Result<(), SpawnjackError> {
    let scenarios = match &args.scenarios {
        Some(path) => loader::load_scenarios(path)?,
        None => scenario::builtin(),
    };
    let selected = select(scenarios, &args.only)?;

    info!(
        scenarios = selected.len(),
        timeout = %humantime::format_duration(args.handshake_timeout),
        "starting exploit run"
    );

    let connector = StdioConnector::new(args.handshake_timeout);
    let runner = ExploitRunner::new(Box::new(connector));
    let summary = runner.run(&selected).await;

    match args.format {
        OutputFormat::Human => print!("{}", report::render_human(&summary)),
        OutputFormat::Json => println!("{}", report::render_json(&summary)?),
    }

    if args.fail_on_proof && summary.is_vulnerable() {
        return Err(SpawnjackError::InjectionProven {
            scenarios: summary.proven(),
        });
    }

    Ok(())
}

/// Applies the `--only` filter, preserving catalog order.
fn select(
    scenarios: Vec<AttackScenario>,
    only: &[String],
) -> Result<Vec<AttackScenario>, ConfigError> {
    if only.is_empty() {
        return Ok(scenarios);
    }
    for name in only {
        if !scenarios.iter().any(|s| &s.name == name) {
            return Err(ConfigError::NoMatch {
                filter: name.clone(),
            });
        }
    }
    Ok(scenarios
        .into_iter()
        .filter(|s| only.contains(&s.name))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::builtin;

    #[test]
    fn test_select_empty_filter_keeps_all() {
        let selected = select(builtin(), &[]).unwrap();
        assert_eq!(selected.len(), 3);
    }

    #[test]
    fn test_select_preserves_order() {
        let only = vec![
            "shell-exfiltration".to_string(),
            "direct-command".to_string(),
        ];
        let selected = select(builtin(), &only).unwrap();
        let names: Vec<&str> = selected.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["direct-command", "shell-exfiltration"]);
    }

    #[test]
    fn test_select_unknown_name_errors() {
        let only = vec!["no-such-scenario".to_string()];
        let err = select(builtin(), &only).unwrap_err();
        assert!(matches!(err, ConfigError::NoMatch { filter } if filter == "no-such-scenario"));
    }
}
