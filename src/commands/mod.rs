//! Command dispatch and handlers.

pub mod respond;
pub mod suggest;

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::dispatch::Grade;
use crate::error::DispatchError;

/// Dispatch a parsed CLI invocation to its handler against live adapters.
///
/// # Errors
///
/// Returns the user-facing error string if validation or the selected
/// handler fails.
pub async fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = AppConfig::from_env();
    let ctx = ServiceContext::live(&config);
    let grade: Grade =
        cli.grade.parse().map_err(|e: DispatchError| e.user_message())?;

    match &cli.command {
        Command::Suggest { text } => {
            suggest::run(&ctx, &config, text, grade).await;
            Ok(())
        }
        other => respond::run(&ctx, &config, other, grade).await,
    }
}
