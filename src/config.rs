//! Application configuration from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default text-generation model.
pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash";

/// Default image-synthesis model.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Default summary word ceiling.
pub const DEFAULT_SUMMARY_WORDS: u32 = 300;

/// Tunable knobs for the dispatch core.
///
/// Read once at startup via [`AppConfig::from_env`] (after `dotenvy` has
/// loaded any `.env` file). Unparseable values fall back to defaults
/// rather than aborting.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Model used for every text task.
    pub text_model: String,
    /// Model used for image synthesis.
    pub image_model: String,
    /// Retry policy applied to every retried backend call.
    pub retry: RetryPolicy,
    /// Maximum word count requested from the summarization template.
    pub summary_word_limit: u32,
    /// Session-store file; sessions are not persisted when unset.
    pub sessions_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            retry: RetryPolicy::default(),
            summary_word_limit: DEFAULT_SUMMARY_WORDS,
            sessions_path: None,
        }
    }
}

impl AppConfig {
    /// Builds a config from `MITRA_*` environment variables, defaulting
    /// every value that is absent or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: env_parse("MITRA_MAX_ATTEMPTS").unwrap_or(defaults.max_attempts),
            base_delay: env_parse("MITRA_RETRY_BASE_MS")
                .map_or(defaults.base_delay, Duration::from_millis),
        };

        Self {
            text_model: env::var("MITRA_TEXT_MODEL")
                .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string()),
            image_model: env::var("MITRA_IMAGE_MODEL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string()),
            retry,
            summary_word_limit: env_parse("MITRA_SUMMARY_WORDS").unwrap_or(DEFAULT_SUMMARY_WORDS),
            sessions_path: env::var("MITRA_SESSIONS").ok().map(PathBuf::from),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|raw| raw.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_three_attempts_from_one_second() {
        let config = AppConfig::default();
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.base_delay, Duration::from_secs(1));
        assert_eq!(config.summary_word_limit, 300);
        assert!(config.sessions_path.is_none());
    }

    #[test]
    fn env_overrides_apply_and_garbage_falls_back() {
        env::set_var("MITRA_MAX_ATTEMPTS", "5");
        env::set_var("MITRA_RETRY_BASE_MS", "250");
        env::set_var("MITRA_SUMMARY_WORDS", "not a number");

        let config = AppConfig::from_env();
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay, Duration::from_millis(250));
        assert_eq!(config.summary_word_limit, DEFAULT_SUMMARY_WORDS);

        env::remove_var("MITRA_MAX_ATTEMPTS");
        env::remove_var("MITRA_RETRY_BASE_MS");
        env::remove_var("MITRA_SUMMARY_WORDS");
    }
}
