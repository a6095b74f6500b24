//! Error taxonomy for the dispatch core.

use crate::ports::model::BackendError;
use crate::schema::SchemaError;

/// Message shown to the user when a backend or contract failure is not
/// actionable on their side.
const PROCESSING_FAILURE: &str = "An error occurred while processing your request.";

/// A failed dispatch.
///
/// The dispatcher never swallows a primary-task failure: callers always
/// receive either a complete task result or one of these variants.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Empty input, invalid grade, unknown feature or language key.
    /// Never retried; no backend call is made.
    #[error("{0}")]
    Validation(String),
    /// The backend responded but the output violated its contract.
    /// Never retried.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// The backend call itself failed, after retries if it was transient.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl DispatchError {
    /// The message suitable for end users.
    ///
    /// Validation problems are the user's to fix and shown verbatim;
    /// contract and backend failures collapse to a generic processing
    /// message, with the underlying cause left to the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Schema(_) | Self::Backend(_) => PROCESSING_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_shown_verbatim() {
        let err = DispatchError::Validation("Prompt cannot be empty.".into());
        assert_eq!(err.user_message(), "Prompt cannot be empty.");
    }

    #[test]
    fn schema_and_backend_failures_collapse_to_generic_message() {
        let schema = DispatchError::from(SchemaError::MissingField("summary"));
        let backend = DispatchError::from(BackendError::new("503 overloaded"));
        assert_eq!(schema.user_message(), PROCESSING_FAILURE);
        assert_eq!(backend.user_message(), PROCESSING_FAILURE);
        // The diagnostic cause is still reachable through Display.
        assert!(schema.to_string().contains("summary"));
        assert!(backend.to_string().contains("503"));
    }
}
