//! The connector seam: the external capability under test.
//!
//! A [`Connector`] takes a [`StdioServerConfig`] and tries to establish an
//! MCP connection to the process it describes. The harness treats the
//! connector as a black box; every failure mode is a value
//! ([`ConnectorOutcome`]), never an `Err`, so the caller's side-effect
//! verification can never be short-circuited by the call's own result.

pub mod jsonrpc;
pub mod stdio;

pub use stdio::StdioConnector;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// StdioServerConfig
// ============================================================================

/// Server transport type. Only stdio exists in this harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServerType {
    /// Local subprocess speaking MCP over stdin/stdout.
    #[default]
    #[serde(rename = "stdio")]
    Stdio,
}

/// An attacker-supplied stdio server configuration.
///
/// Mirrors the record shape that agent frameworks accept for MCP stdio
/// servers. `command` and `args` are used verbatim for process creation;
/// the absence of any validation here is the weakness under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdioServerConfig {
    /// Arbitrary display name for the server.
    pub server_name: String,

    /// Transport type, fixed to `stdio`.
    #[serde(rename = "type", default)]
    pub server_type: ServerType,

    /// Executable path or name. Attacker-controlled.
    pub command: String,

    /// Process arguments, in order. Attacker-controlled.
    #[serde(default)]
    pub args: Vec<String>,

    /// Additional process environment.
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl StdioServerConfig {
    /// Creates a config with empty args and env.
    #[must_use]
    pub fn new(server_name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            server_name: server_name.into(),
            server_type: ServerType::Stdio,
            command: command.into(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }
}

// ============================================================================
// ConnectorOutcome
// ============================================================================

/// Identity a server reports during the `initialize` handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerIdentity {
    /// Server name from `serverInfo.name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Server version from `serverInfo.version`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ServerIdentity {
    /// Extracts the server identity from an `initialize` result value.
    ///
    /// Returns `None` when the result carries no `serverInfo` object.
    #[must_use]
    pub fn from_initialize_result(result: &Value) -> Option<Self> {
        let info = result.get("serverInfo")?.as_object()?;
        Some(Self {
            name: info.get("name").and_then(Value::as_str).map(str::to_string),
            version: info
                .get("version")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Tagged result of a connection attempt.
///
/// `SpawnFailed` means no process was ever created. `HandshakeFailed` means
/// a process WAS spawned but never completed the protocol handshake - the
/// case that still proves arbitrary execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectorOutcome {
    /// Handshake completed; the process speaks MCP.
    Connected {
        /// Identity the server reported, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        server: Option<ServerIdentity>,
    },

    /// Process spawned, but the handshake did not complete.
    HandshakeFailed {
        /// Why the handshake failed.
        reason: String,
    },

    /// Process creation itself failed.
    SpawnFailed {
        /// Why the spawn failed.
        reason: String,
    },
}

impl ConnectorOutcome {
    /// Whether an operating-system process was created for this attempt.
    #[must_use]
    pub const fn spawned(&self) -> bool {
        !matches!(self, Self::SpawnFailed { .. })
    }
}

impl std::fmt::Display for ConnectorOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connected { server } => match server {
                Some(identity) => write!(
                    f,
                    "connected to '{}' {}",
                    identity.name.as_deref().unwrap_or("?"),
                    identity.version.as_deref().unwrap_or("?"),
                ),
                None => write!(f, "connected (no server identity)"),
            },
            Self::HandshakeFailed { reason } => write!(f, "handshake failed: {reason}"),
            Self::SpawnFailed { reason } => write!(f, "spawn failed: {reason}"),
        }
    }
}

// ============================================================================
// Connector trait
// ============================================================================

/// The external "establish connection to configured process" capability.
///
/// Implementations must not let a failed spawn or handshake escape as an
/// error; all paths return an outcome value.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    /// Attempts to connect to the server the config describes.
    async fn connect(&self, config: &StdioServerConfig) -> ConnectorOutcome;

    /// Human-readable name for logging and reports.
    fn name(&self) -> &'static str;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_round_trip() {
        let yaml = "server_name: evil\ntype: stdio\ncommand: touch\nargs: [/tmp/x]\n";
        let config: StdioServerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server_name, "evil");
        assert_eq!(config.server_type, ServerType::Stdio);
        assert_eq!(config.command, "touch");
        assert_eq!(config.args, vec!["/tmp/x".to_string()]);
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_config_defaults() {
        let json = r#"{"server_name":"s","command":"true"}"#;
        let config: StdioServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server_type, ServerType::Stdio);
        assert!(config.args.is_empty());
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_spawned_flag() {
        let connected = ConnectorOutcome::Connected { server: None };
        let handshake = ConnectorOutcome::HandshakeFailed {
            reason: "eof".to_string(),
        };
        let spawn = ConnectorOutcome::SpawnFailed {
            reason: "not found".to_string(),
        };
        assert!(connected.spawned());
        assert!(handshake.spawned());
        assert!(!spawn.spawned());
    }

    #[test]
    fn test_outcome_serialization_tag() {
        let outcome = ConnectorOutcome::SpawnFailed {
            reason: "no such file".to_string(),
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["status"], "spawn_failed");
        assert_eq!(value["reason"], "no such file");
    }

    #[test]
    fn test_identity_from_initialize_result() {
        let result = json!({
            "protocolVersion": "2024-11-05",
            "serverInfo": {"name": "fake", "version": "0.1.0"}
        });
        let identity = ServerIdentity::from_initialize_result(&result).unwrap();
        assert_eq!(identity.name.as_deref(), Some("fake"));
        assert_eq!(identity.version.as_deref(), Some("0.1.0"));
    }

    #[test]
    fn test_identity_absent() {
        assert!(ServerIdentity::from_initialize_result(&json!({})).is_none());
    }

    #[test]
    fn test_outcome_display() {
        let outcome = ConnectorOutcome::HandshakeFailed {
            reason: "connection closed".to_string(),
        };
        assert_eq!(outcome.to_string(), "handshake failed: connection closed");
    }
}
