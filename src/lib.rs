//! `spawnjack` - Command-injection exploit harness for MCP stdio connectors
//!
//! This library provides the components of a proof-of-concept harness that
//! demonstrates how attacker-controlled `command`/`args` fields in an MCP
//! stdio server configuration are executed as arbitrary operating-system
//! processes when the connector performs no sanitization.

pub mod cli;
pub mod connector;
pub mod error;
pub mod observability;
pub mod report;
pub mod runner;
pub mod scenario;
