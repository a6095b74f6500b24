//! Live adapter for the `SessionStore` port.
//!
//! Persists the full session list as one JSON file, the desktop analog of
//! the web client's local-storage transcript. When the serialized payload
//! exceeds the size ceiling, only the most-recent sessions are retained.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ports::store::{Session, SessionStore, StoreError};

/// Default serialized-size ceiling: 4 MiB.
pub const DEFAULT_MAX_BYTES: usize = 4 * 1024 * 1024;

/// Number of most-recent sessions kept when the ceiling is exceeded.
pub const DEFAULT_RETAINED_SESSIONS: usize = 8;

/// JSON-file session store with size-ceiling eviction.
pub struct JsonFileStore {
    path: PathBuf,
    max_bytes: usize,
    retained: usize,
}

impl JsonFileStore {
    /// Creates a store writing to `path` with the default ceiling.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), max_bytes: DEFAULT_MAX_BYTES, retained: DEFAULT_RETAINED_SESSIONS }
    }

    /// Overrides the size ceiling and retained-session count.
    #[must_use]
    pub fn with_limits(mut self, max_bytes: usize, retained: usize) -> Self {
        self.max_bytes = max_bytes;
        self.retained = retained;
        self
    }

    /// The file this store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonFileStore {
    fn load_sessions(&self) -> Result<Vec<Session>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let mut sessions: Vec<Session> = serde_json::from_str(&contents)?;
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }

    fn save_sessions(&self, sessions: &[Session]) -> Result<(), StoreError> {
        let mut sessions = sessions.to_vec();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut serialized = serde_json::to_string(&sessions)?;
        if serialized.len() > self.max_bytes && sessions.len() > self.retained {
            debug!(
                size = serialized.len(),
                ceiling = self.max_bytes,
                retained = self.retained,
                "session payload over ceiling, evicting oldest sessions"
            );
            sessions.truncate(self.retained);
            serialized = serde_json::to_string(&sessions)?;
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}
