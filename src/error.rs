//! Error types for `spawnjack`.
//!
//! Scenario-local failures never surface here: connector results are values
//! (`ConnectorOutcome`) and marker I/O problems are recorded on the scenario
//! outcome. This module covers the fatal tier only, with Unix-style exit
//! code mapping.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `spawnjack` CLI operations.
///
/// These codes follow Unix conventions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Scenario file error (invalid YAML, validation failure)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Command injection was proven and `--fail-on-proof` was set
    pub const VULNERABLE: i32 = 7;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;

    /// Terminated by SIGTERM
    pub const TERMINATED: i32 = 143;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `spawnjack` operations.
///
/// Aggregates all domain-specific errors and provides a unified interface
/// for error handling and exit code mapping.
#[derive(Debug, Error)]
pub enum SpawnjackError {
    /// Scenario file loading or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Injection was proven and the caller asked for a failing exit code
    #[error("command injection proven in {scenarios} scenario(s)")]
    InjectionProven {
        /// Number of scenarios whose marker artifact was observed
        scenarios: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SpawnjackError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Json(_) | Self::Yaml(_) => ExitCode::CONFIG_ERROR,
            Self::InjectionProven { .. } => ExitCode::VULNERABLE,
            Self::Io(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Scenario File Errors
// ============================================================================

/// Scenario file loading and validation errors.
///
/// Cover all failure modes between "path given on the command line" and
/// "validated attack catalog in memory".
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Referenced scenario file not found
    #[error("scenario file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Scenario file could not be read or parsed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the scenario file
        path: PathBuf,
        /// Error message from the reader or parser
        message: String,
    },

    /// Scenario file contains no scenarios
    #[error("scenario file {path} defines no scenarios")]
    Empty {
        /// Path to the empty file
        path: PathBuf,
    },

    /// Two scenarios share a name
    #[error("duplicate scenario name '{name}'")]
    DuplicateName {
        /// The duplicated name
        name: String,
    },

    /// A scenario fails structural validation
    #[error("invalid scenario '{name}': {reason}")]
    InvalidScenario {
        /// Name of the offending scenario
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// A `--only` filter matched nothing
    #[error("no scenario named '{filter}'")]
    NoMatch {
        /// The filter that matched nothing
        filter: String,
    },

    /// An ad-hoc probe command line could not be split
    #[error("invalid command line '{input}'")]
    InvalidCommandLine {
        /// The command line as given
        input: String,
    },
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Result type alias for `spawnjack` operations.
pub type Result<T> = std::result::Result<T, SpawnjackError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::SUCCESS, 0);
        assert_eq!(ExitCode::ERROR, 1);
        assert_eq!(ExitCode::CONFIG_ERROR, 2);
        assert_eq!(ExitCode::IO_ERROR, 3);
        assert_eq!(ExitCode::VULNERABLE, 7);
        assert_eq!(ExitCode::USAGE_ERROR, 64);
        assert_eq!(ExitCode::INTERRUPTED, 130);
        assert_eq!(ExitCode::TERMINATED, 143);
    }

    #[test]
    fn test_config_error_exit_code() {
        let err: SpawnjackError = ConfigError::MissingFile {
            path: PathBuf::from("/test"),
        }
        .into();
        assert_eq!(err.exit_code(), ExitCode::CONFIG_ERROR);
    }

    #[test]
    fn test_injection_proven_exit_code() {
        let err = SpawnjackError::InjectionProven { scenarios: 3 };
        assert_eq!(err.exit_code(), ExitCode::VULNERABLE);
        assert!(err.to_string().contains("3 scenario(s)"));
    }

    #[test]
    fn test_io_error_exit_code() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: SpawnjackError = io_err.into();
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);
    }

    #[test]
    fn test_duplicate_name_display() {
        let err = ConfigError::DuplicateName {
            name: "direct-command".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate scenario name 'direct-command'");
    }

    #[test]
    fn test_invalid_scenario_display() {
        let err = ConfigError::InvalidScenario {
            name: "probe".to_string(),
            reason: "empty command".to_string(),
        };
        assert!(err.to_string().contains("probe"));
        assert!(err.to_string().contains("empty command"));
    }
}
