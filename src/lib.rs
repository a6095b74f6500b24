//! Core library for the `mitra` assistant: the dispatch and resilience
//! layer between a student-facing UI and a generative-model backend.
//!
//! The crate follows a ports-and-adapters layout: every external boundary
//! (the model backend, the backoff timer, document extraction, session
//! persistence) is a trait in [`ports`], with live and scripted
//! implementations in [`adapters`]. The dispatch core ([`dispatch`],
//! [`retry`], [`schema`], [`prompt`], [`suggest`]) only ever sees the
//! traits.

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod ports;
pub mod prompt;
pub mod retry;
pub mod schema;
pub mod suggest;

use clap::Parser;

/// Run the CLI with the provided arguments against live adapters.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or the selected
/// command fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli).await
}

#[cfg(test)]
mod tests {
    use super::run;

    #[tokio::test]
    async fn run_errors_on_unknown_subcommand() {
        let result = run(["mitra", "unknown"]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn run_errors_on_out_of_range_grade() {
        let result = run(["mitra", "chat", "--grade", "12", "hello"]).await;
        assert_eq!(result.unwrap_err(), "Grade must be between 1 and 10, got 12.");
    }
}
