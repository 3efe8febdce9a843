//! CLI argument definitions.
//!
//! All Clap derive structs for `spawnjack` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Command-injection exploit harness for MCP stdio connectors.
#[derive(Parser, Debug)]
#[command(name = "spawnjack", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "SPAWNJACK_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the attack scenarios against the stdio connector.
    Run(RunArgs),

    /// Run a single ad-hoc payload through the same verification path.
    Probe(ProbeArgs),

    /// List available attack scenarios.
    List(ListArgs),

    /// Display version information.
    Version(VersionArgs),
}

/// Arguments for `run`.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a YAML scenario file (defaults to the builtin catalog).
    #[arg(short, long, env = "SPAWNJACK_SCENARIOS")]
    pub scenarios: Option<PathBuf>,

    /// Run only the named scenario (repeatable).
    #[arg(long = "only")]
    pub only: Vec<String>,

    /// Deadline for each connection handshake (e.g. "5s", "500ms").
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub handshake_timeout: Duration,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Exit non-zero when any scenario proves command execution.
    #[arg(long)]
    pub fail_on_proof: bool,
}

/// Arguments for `probe`.
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Payload as a single shell-style string; "{marker}" is replaced by
    /// the proof path.
    #[arg(long)]
    pub spawn: String,

    /// Read and report the marker content after the attempt.
    #[arg(long)]
    pub capture: bool,

    /// Extra environment for the spawned process, KEY=VALUE (repeatable).
    #[arg(long = "env", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Deadline for the connection handshake (e.g. "5s", "500ms").
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub handshake_timeout: Duration,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Path to a YAML scenario file (defaults to the builtin catalog).
    #[arg(short, long, env = "SPAWNJACK_SCENARIOS")]
    pub scenarios: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

fn parse_env_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

// ============================================================================
// Tests
// ============================================================================
