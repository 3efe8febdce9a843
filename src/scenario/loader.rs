//! YAML scenario file loading and validation.
//!
//! Operators can supply their own attack catalog instead of the builtin
//! one. The file shape is a single `scenarios` list of [`AttackScenario`]
//! records:
//!
//! ```yaml
//! scenarios:
//!   - name: my-payload
//!     summary: what it shows
//!     vector: args-field
//!     command: sh
//!     args: ["-c", "touch {marker}"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::scenario::{AttackScenario, MARKER_PLACEHOLDER};

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    scenarios: Vec<AttackScenario>,
}

/// Loads and validates a scenario file.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable, fails to parse,
/// defines no scenarios, or any scenario fails [`validate`].
pub fn load_scenarios(path: &Path) -> Result<Vec<AttackScenario>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let file: ScenarioFile = serde_yaml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if file.scenarios.is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }

    validate(&file.scenarios)?;
    Ok(file.scenarios)
}

/// Validates a scenario list: unique non-empty names, non-empty commands,
/// and a `{marker}` reference in every payload.
///
/// # Errors
///
/// Returns the first violation found, in list order.
pub fn validate(scenarios: &[AttackScenario]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for scenario in scenarios {
        if scenario.name.trim().is_empty() {
            return Err(ConfigError::InvalidScenario {
                name: "<unnamed>".to_string(),
                reason: "empty name".to_string(),
            });
        }
        if !seen.insert(scenario.name.as_str()) {
            return Err(ConfigError::DuplicateName {
                name: scenario.name.clone(),
            });
        }
        if scenario.command.trim().is_empty() {
            return Err(ConfigError::InvalidScenario {
                name: scenario.name.clone(),
                reason: "empty command".to_string(),
            });
        }
        if !scenario.has_marker_placeholder() {
            return Err(ConfigError::InvalidScenario {
                name: scenario.name.clone(),
                reason: format!(
                    "payload never references {MARKER_PLACEHOLDER}, so execution cannot be proven"
                ),
            });
        }
    }

    Ok(())
}
