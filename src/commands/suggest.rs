//! Handler for the `suggest` subcommand.

use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::dispatch::Grade;
use crate::suggest;

/// Prints autocomplete candidates for a partial input, one per line.
///
/// This path never fails: short input and backend problems both print
/// nothing beyond a placeholder note.
pub async fn run(ctx: &ServiceContext, config: &AppConfig, text: &str, grade: Grade) {
    let suggestions = suggest::suggest(ctx, config, text, grade).await;
    if suggestions.is_empty() {
        println!("(no suggestions)");
        return;
    }
    for suggestion in suggestions {
        println!("{suggestion}");
    }
}
