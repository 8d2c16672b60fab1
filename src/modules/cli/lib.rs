//! Doclink CLI
//!
//! This crate provides the command-line interface for Doclink including:
//! - check: Validate a data source file
//! - query: Print the query a filter builds
//! - init: Write a starter data source file

pub mod commands;

pub use commands::{Cli, Commands};

use doclink_core::DocLinkError;

/// Exit code for failures caused by the caller's input
pub const EXIT_USAGE: i32 = 2;

/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

/// Message and exit code shown for a failed command.
///
/// The message never carries store or configuration detail; that is
/// only logged at debug level.
pub fn report(err: &DocLinkError) -> (String, i32) {
    let code = if err.is_client_error() {
        EXIT_USAGE
    } else {
        EXIT_FAILURE
    };

    let message = err.sanitized_message();
    if message == err.to_string() {
        (message, code)
    } else {
        (format!("{} (run with -v for details)", message), code)
    }
}
