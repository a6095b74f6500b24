//! Document text extraction port.
//!
//! Uploaded files reach the dispatcher as plain strings; turning bytes into
//! text is an external collaborator's job. The declared mime families are
//! plain text (direct decode), PDF (text-layer extraction) and
//! word-processor documents (raw text extraction). Unsupported types yield
//! a typed rejection, never a crash.

/// Error returned by a [`TextExtractor`].
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The mime type is not handled by this extractor.
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    /// The bytes could not be decoded as a document of the claimed type.
    #[error("Failed to process file: {0}")]
    Malformed(String),
}

/// Extracts readable text from uploaded document bytes.
pub trait TextExtractor: Send + Sync {
    /// Converts `bytes` of the given `mime_type` into a text string.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnsupportedType`] for mime types this
    /// extractor does not handle, or [`ExtractError::Malformed`] when the
    /// bytes do not decode as claimed.
    fn extract_text(&self, bytes: &[u8], mime_type: &str) -> Result<String, ExtractError>;
}
