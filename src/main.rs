//! `spawnjack` - Command-injection exploit harness for MCP stdio connectors

use clap::Parser;

use spawnjack::cli::args::Cli;
use spawnjack::cli::commands;
use spawnjack::error::ExitCode;
use spawnjack::observability::{LogFormat, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        init_logging(LogFormat::Human, cli.verbose, cli.color);
    }

    // A single signal aborts the remaining scenarios; in-flight markers get
    // no cleanup guarantee.
    tokio::spawn(async {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to register SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\ninterrupted; aborting remaining scenarios");
                std::process::exit(ExitCode::INTERRUPTED);
            }
            _ = sigterm.recv() => {
                eprintln!("\nterminated; aborting remaining scenarios");
                std::process::exit(ExitCode::TERMINATED);
            }
        }
    });

    match commands::dispatch(cli).await {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
