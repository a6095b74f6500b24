//! Chat session persistence port.
//!
//! The surrounding conversation is owned by the caller; the core never
//! persists anything itself. This port mirrors the storage collaborator's
//! contract: whole-list load and save, with an implementation-defined size
//! ceiling that evicts the oldest sessions when exceeded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One message in a stored conversation.
///
/// Assistant entries carry exactly the dispatcher's task result fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredMessage {
    /// Who produced the message (`"user"` or `"assistant"`).
    pub role: String,
    /// Message text, absent for image-only responses.
    pub content: Option<String>,
    /// Generated image as a `data:` URI, when present.
    pub image_url: Option<String>,
    /// Inferred student emotion, when the inference sub-call succeeded.
    pub emotion: Option<String>,
}

/// A stored chat session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Display title, derived from the first user message.
    pub title: String,
    /// Ordered conversation transcript.
    pub messages: Vec<StoredMessage>,
    /// Creation time, used for recency-based eviction.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates an empty session titled from the first user input.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Error returned by a [`SessionStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying storage I/O failed.
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// Stored data could not be serialized or parsed.
    #[error("session data is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Loads and saves chat sessions.
pub trait SessionStore: Send + Sync {
    /// Loads all stored sessions, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if stored data cannot be read or parsed.
    fn load_sessions(&self) -> Result<Vec<Session>, StoreError>;

    /// Saves the full session list, applying the store's retention policy.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if serialization or the write fails.
    fn save_sessions(&self, sessions: &[Session]) -> Result<(), StoreError>;
}
