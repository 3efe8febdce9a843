//! The attack catalog.
//!
//! An [`AttackScenario`] pairs a stdio server config template with the
//! observable side effect that proves execution: a marker artifact the
//! payload writes. The `{marker}` placeholder in the template binds the
//! payload to a path generated fresh for every run of the scenario.

pub mod loader;
pub mod marker;

pub use marker::MarkerArtifact;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::connector::StdioServerConfig;

/// Placeholder replaced with the marker artifact path when a scenario is
/// rendered to a concrete config.
pub const MARKER_PLACEHOLDER: &str = "{marker}";

// ============================================================================
// InjectionVector
// ============================================================================

/// Which part of the server config carries the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectionVector {
    /// The `command` field itself is the malicious executable.
    CommandField,
    /// A legitimate-looking command with malicious `args`.
    ArgsField,
    /// A shell invoked with an inline script, including expansions.
    ShellCommand,
    /// Operator-supplied payload with no fixed shape.
    Custom,
}

impl std::fmt::Display for InjectionVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::CommandField => "command field",
            Self::ArgsField => "args field",
            Self::ShellCommand => "shell command",
            Self::Custom => "custom payload",
        };
        f.pad(label)
    }
}

// ============================================================================
// AttackScenario
// ============================================================================

/// A named attack case: a config template plus its expected side effect.
///
/// Immutable once built; rendering substitutes the marker path without
/// touching the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackScenario {
    /// Unique scenario name, used in reports and `--only` filters.
    pub name: String,

    /// One-line description of what the scenario demonstrates.
    pub summary: String,

    /// Which config field carries the payload.
    pub vector: InjectionVector,

    /// Whether to read and report the marker's content (exfiltration cases).
    #[serde(default)]
    pub capture_content: bool,

    /// Executable template; may contain `{marker}`.
    pub command: String,

    /// Argument templates; each may contain `{marker}`.
    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment for the spawned process.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl AttackScenario {
    /// Renders the template to a concrete server config bound to `marker`.
    #[must_use]
    pub fn render(&self, marker: &Path) -> StdioServerConfig {
        let marker = marker.display().to_string();
        StdioServerConfig {
            server_name: self.name.clone(),
            server_type: crate::connector::ServerType::Stdio,
            command: self.command.replace(MARKER_PLACEHOLDER, &marker),
            args: self
                .args
                .iter()
                .map(|arg| arg.replace(MARKER_PLACEHOLDER, &marker))
                .collect(),
            env: self.env.clone(),
        }
    }

    /// Whether the payload references the marker at all.
    ///
    /// A scenario without the placeholder can spawn a process but its side
    /// effect can never be attributed, so the loader rejects it.
    #[must_use]
    pub fn has_marker_placeholder(&self) -> bool {
        self.command.contains(MARKER_PLACEHOLDER)
            || self.args.iter().any(|arg| arg.contains(MARKER_PLACEHOLDER))
    }
}

// ============================================================================
// Builtin catalog
// ============================================================================

/// The three fixed demonstration cases, in run order.
#[must_use]
pub fn builtin() -> Vec<AttackScenario> {
    vec![
        AttackScenario {
            name: "direct-command".to_string(),
            summary: "malicious executable passed directly in the command field".to_string(),
            vector: InjectionVector::CommandField,
            capture_content: false,
            command: "touch".to_string(),
            args: vec![MARKER_PLACEHOLDER.to_string()],
            env: HashMap::new(),
        },
        AttackScenario {
            name: "interpreter-args".to_string(),
            summary: "legitimate-looking interpreter with malicious inline code in args"
                .to_string(),
            vector: InjectionVector::ArgsField,
            capture_content: false,
            command: "python3".to_string(),
            args: vec![
                "-c".to_string(),
                "open('{marker}', 'w').write('injected via args')".to_string(),
            ],
            env: HashMap::new(),
        },
        AttackScenario {
            name: "shell-exfiltration".to_string(),
            summary: "shell script exfiltrating host and user identifiers".to_string(),
            vector: InjectionVector::ShellCommand,
            capture_content: true,
            command: "bash".to_string(),
            args: vec![
                "-c".to_string(),
                "echo \"Sensitive data: $(whoami)@$(hostname)\" > {marker}".to_string(),
            ],
            env: HashMap::new(),
        },
    ]
}

// ============================================================================
// Tests
// ============================================================================
