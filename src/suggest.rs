//! Autocomplete advisor: a secondary, best-effort dispatch path.
//!
//! Unlike the task dispatcher, every failure here degrades silently to an
//! empty suggestion list: a typing aid must never put an error in front
//! of the student. No retry either, since a completed backoff would
//! outlive the partial input.

use tracing::debug;

use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::dispatch::Grade;
use crate::ports::model::GenerationRequest;
use crate::prompt;
use crate::schema;

/// Inputs at or below this many characters never trigger a backend call.
pub const MIN_PREFIX_CHARS: usize = 2;

const SUGGEST_MAX_TOKENS: u32 = 512;

/// Returns ordered completion candidates for a partial input.
///
/// The order is the backend's own ranking, not re-sorted locally. Returns
/// an empty list for short input (no call made) and on any backend or
/// contract failure.
pub async fn suggest(
    ctx: &ServiceContext,
    config: &AppConfig,
    text: &str,
    grade: Grade,
) -> Vec<String> {
    let text = text.trim();
    if text.chars().count() <= MIN_PREFIX_CHARS {
        return Vec::new();
    }

    let request = GenerationRequest {
        model: config.text_model.clone(),
        prompt: prompt::suggestions(text, grade),
        max_tokens: SUGGEST_MAX_TOKENS,
    };

    let response = match ctx.model.generate(&request).await {
        Ok(response) => response,
        Err(err) => {
            debug!(error = %err, "autocomplete backend call failed, degrading to empty list");
            return Vec::new();
        }
    };

    match schema::validate(&schema::SUGGESTIONS, &response.text) {
        Ok(out) => out.text_list("suggestions").map(<[String]>::to_vec).unwrap_or_default(),
        Err(err) => {
            debug!(error = %err, "autocomplete response failed its contract, degrading");
            Vec::new()
        }
    }
}
