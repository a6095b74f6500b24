//! Service context bundling all port trait objects.

use crate::adapters::live::{JsonFileStore, LiveModelClient, PlainTextExtractor, TokioSleeper};
use crate::config::AppConfig;
use crate::ports::extract::TextExtractor;
use crate::ports::model::ModelClient;
use crate::ports::sleeper::Sleeper;
use crate::ports::store::{Session, SessionStore, StoreError};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire
/// up different adapter implementations (live for the CLI, scripted for
/// tests).
pub struct ServiceContext {
    /// Generative backend for text and image calls.
    pub model: Box<dyn ModelClient>,
    /// Delay source for retry backoff.
    pub sleeper: Box<dyn Sleeper>,
    /// Document text extraction for uploads.
    pub extractor: Box<dyn TextExtractor>,
    /// Chat session persistence.
    pub sessions: Box<dyn SessionStore>,
}

impl ServiceContext {
    /// Creates a live context: Gemini over HTTP, the tokio timer, the
    /// plain-text extractor, and file-backed sessions when a path is
    /// configured.
    #[must_use]
    pub fn live(config: &AppConfig) -> Self {
        let sessions: Box<dyn SessionStore> = match &config.sessions_path {
            Some(path) => Box::new(JsonFileStore::new(path.clone())),
            None => Box::new(NullSessionStore),
        };
        Self {
            model: Box::new(LiveModelClient::new()),
            sleeper: Box::new(TokioSleeper),
            extractor: Box::new(PlainTextExtractor),
            sessions,
        }
    }

    /// Creates a context from caller-supplied model and sleeper adapters,
    /// with no-op persistence. Tests pass `Arc`-wrapped scripted adapters
    /// here and keep a handle for call-count assertions.
    #[must_use]
    pub fn scripted(model: Box<dyn ModelClient>, sleeper: Box<dyn Sleeper>) -> Self {
        Self { model, sleeper, extractor: Box::new(PlainTextExtractor), sessions: Box::new(NullSessionStore) }
    }
}

/// Session store that persists nothing; used when no path is configured.
struct NullSessionStore;

impl SessionStore for NullSessionStore {
    fn load_sessions(&self) -> Result<Vec<Session>, StoreError> {
        Ok(Vec::new())
    }

    fn save_sessions(&self, _sessions: &[Session]) -> Result<(), StoreError> {
        Ok(())
    }
}
