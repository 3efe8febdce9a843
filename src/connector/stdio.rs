//! The stdio connector under test.
//!
//! Reproduces the vulnerable integration pattern found in agent frameworks:
//! the configured `command`/`args`/`env` are handed to process creation
//! verbatim, with no sanitization or allow-listing, and only afterwards does
//! the connector discover whether the process actually speaks MCP. The
//! spawn happens unconditionally - that ordering is what the harness proves.

use std::process::Stdio;
use std::time::Duration;

use futures_util::StreamExt;
use serde_json::json;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::{ChildStdin, ChildStdout, Command};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, trace};

use crate::connector::jsonrpc::{JsonRpcMessage, JsonRpcNotification, JsonRpcRequest};
use crate::connector::{Connector, ConnectorOutcome, ServerIdentity, StdioServerConfig};

/// MCP protocol revision sent in the `initialize` request.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// ID of the single `initialize` request each connection attempt sends.
const INITIALIZE_ID: i64 = 1;

/// Upper bound on a single line read from the server, in bytes.
const MAX_FRAME_BYTES: usize = 1024 * 1024;

/// Default deadline for the whole handshake.
pub const DEFAULT_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// HandshakeError
// ============================================================================

/// Failure modes of the post-spawn handshake.
///
/// Every variant maps to `ConnectorOutcome::HandshakeFailed`; process
/// creation errors are handled separately and never reach this type.
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// Child process pipes could not be taken.
    #[error("child stdio unavailable")]
    StdioUnavailable,

    /// I/O error writing the request or reading frames.
    #[error("handshake I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The deadline elapsed before an initialize response arrived.
    #[error("no initialize response within {}", humantime::format_duration(*.0))]
    Timeout(Duration),

    /// The server closed its stdout before responding.
    #[error("connection closed before initialize response")]
    Closed,

    /// A frame was not valid JSON-RPC.
    #[error("malformed frame from server: {0}")]
    Protocol(String),

    /// A single line exceeded the frame size bound.
    #[error("oversized frame from server")]
    FrameTooLong,

    /// The server answered initialize with a JSON-RPC error.
    #[error("initialize rejected: {message} (code {code})")]
    Rejected {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },
}

// ============================================================================
// StdioConnector
// ============================================================================

/// Connector that spawns the configured process and attempts an MCP
/// `initialize` handshake over line-delimited JSON-RPC on its stdio.
#[derive(Debug, Clone)]
pub struct StdioConnector {
    handshake_timeout: Duration,
}

impl Default for StdioConnector {
    fn default() -> Self {
        Self::new(DEFAULT_HANDSHAKE_TIMEOUT)
    }
}

impl StdioConnector {
    /// Creates a connector with the given handshake deadline.
    #[must_use]
    pub const fn new(handshake_timeout: Duration) -> Self {
        Self { handshake_timeout }
    }
}

#[async_trait::async_trait]
impl Connector for StdioConnector {
    async fn connect(&self, config: &StdioServerConfig) -> ConnectorOutcome {
        let mut command = Command::new(&config.command);
        command
            .args(&config.args)
            .envs(&config.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        debug!(
            server = %config.server_name,
            command = %config.command,
            args = ?config.args,
            "spawning configured server process"
        );

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                debug!(server = %config.server_name, error = %e, "spawn failed");
                return ConnectorOutcome::SpawnFailed {
                    reason: e.to_string(),
                };
            }
        };

        let outcome = match (child.stdin.take(), child.stdout.take()) {
            (Some(mut stdin), Some(stdout)) => {
                match tokio::time::timeout(self.handshake_timeout, initialize(&mut stdin, stdout))
                    .await
                {
                    Ok(Ok(server)) => ConnectorOutcome::Connected { server },
                    Ok(Err(e)) => ConnectorOutcome::HandshakeFailed {
                        reason: e.to_string(),
                    },
                    Err(_) => ConnectorOutcome::HandshakeFailed {
                        reason: HandshakeError::Timeout(self.handshake_timeout).to_string(),
                    },
                }
            }
            _ => ConnectorOutcome::HandshakeFailed {
                reason: HandshakeError::StdioUnavailable.to_string(),
            },
        };

        // The child is of no use past the handshake attempt; reap it so no
        // spawned process outlives its scenario.
        let _ = child.start_kill();
        let _ = child.wait().await;

        outcome
    }

    fn name(&self) -> &'static str {
        "stdio"
    }
}

/// Performs the `initialize` exchange on an already-spawned child.
///
/// Notifications and server-initiated requests arriving before the response
/// are skipped; only a response carrying the initialize ID settles the
/// handshake.
async fn initialize(
    stdin: &mut ChildStdin,
    stdout: ChildStdout,
) -> Result<Option<ServerIdentity>, HandshakeError> {
    let request = JsonRpcRequest::new(
        "initialize",
        Some(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        json!(INITIALIZE_ID),
    );

    let mut frame =
        serde_json::to_vec(&request).map_err(|e| HandshakeError::Protocol(e.to_string()))?;
    frame.push(b'\n');
    stdin.write_all(&frame).await?;
    stdin.flush().await?;

    let mut lines = FramedRead::new(stdout, LinesCodec::new_with_max_length(MAX_FRAME_BYTES));
    while let Some(item) = lines.next().await {
        let line = match item {
            Ok(line) => line,
            Err(LinesCodecError::MaxLineLengthExceeded) => {
                return Err(HandshakeError::FrameTooLong);
            }
            Err(LinesCodecError::Io(e)) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }

        let message: JsonRpcMessage =
            serde_json::from_str(&line).map_err(|e| HandshakeError::Protocol(e.to_string()))?;

        match message {
            JsonRpcMessage::Notification(n) => {
                trace!(method = %n.method, "ignoring notification during handshake");
            }
            JsonRpcMessage::Request(r) => {
                trace!(method = %r.method, "ignoring server request during handshake");
            }
            JsonRpcMessage::Response(response) => {
                if response.id != json!(INITIALIZE_ID) {
                    trace!(id = ?response.id, "ignoring response to unknown request");
                    continue;
                }
                if let Some(error) = response.error {
                    return Err(HandshakeError::Rejected {
                        code: error.code,
                        message: error.message,
                    });
                }
                let server = response
                    .result
                    .as_ref()
                    .and_then(ServerIdentity::from_initialize_result);

                // Completes the MCP handshake. The server may already have
                // exited; a failed write changes nothing about the outcome.
                let notification = JsonRpcNotification::new("notifications/initialized", None);
                if let Ok(mut bytes) = serde_json::to_vec(&notification) {
                    bytes.push(b'\n');
                    let _ = stdin.write_all(&bytes).await;
                    let _ = stdin.flush().await;
                }
                return Ok(server);
            }
        }
    }

    Err(HandshakeError::Closed)
}

// ============================================================================
// Tests
// ============================================================================
