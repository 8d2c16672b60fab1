//! CLI commands

mod check;
mod completion;
mod init;
mod query;

pub use check::CheckCommand;
pub use completion::CompletionCommand;
pub use init::InitCommand;
pub use query::QueryCommand;

use clap::{Parser, Subcommand};

/// Doclink - document-database connector
#[derive(Parser, Debug)]
#[command(name = "doclink")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Data source file path
    ///
    /// This is a *global* option so it can be specified after subcommands,
    /// e.g. `doclink check -f datasource.yaml`.
    #[arg(
        short = 'f',
        long = "file",
        global = true,
        default_value = "datasource.yaml"
    )]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and validate a data source file
    Check(CheckCommand),

    /// Print the parameterized query a filter builds
    Query(QueryCommand),

    /// Write a starter data source file
    Init(InitCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completion(CompletionCommand),
}
