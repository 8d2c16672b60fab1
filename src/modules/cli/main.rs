//! Doclink CLI
//!
//! Command-line interface for the Doclink document-database connector.

use clap::Parser;
use doclink_cli::{report, Cli, Commands};
use doclink_core::DocLinkError;
use tracing::{debug, error, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        if e.is_error() {
            error!(status = e.status_code(), "command failed");
        }
        debug!(error = %e, "command failed");

        let (message, code) = report(&e);
        eprintln!("Error: {}", message);
        std::process::exit(code);
    }
}

async fn run() -> Result<(), DocLinkError> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Check(cmd) => {
            cmd.execute(&cli.config)?;
        }
        Commands::Query(cmd) => {
            cmd.execute()?;
        }
        Commands::Init(cmd) => {
            cmd.execute().await?;
        }
        Commands::Completion(cmd) => {
            cmd.execute();
        }
    }

    Ok(())
}
