//! Live adapter for the `TextExtractor` port.
//!
//! Handles the plain-text mime family directly. PDF and word-processor
//! extraction belong to an external collaborator behind the same port;
//! this adapter rejects those types with the port's typed error instead of
//! guessing at their contents.

use crate::ports::extract::{ExtractError, TextExtractor};

/// Extracts text from `text/*` uploads by UTF-8 decoding.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8], mime_type: &str) -> Result<String, ExtractError> {
        if mime_type == "text/plain" || mime_type.starts_with("text/") {
            return String::from_utf8(bytes.to_vec())
                .map_err(|e| ExtractError::Malformed(format!("not valid UTF-8 text: {e}")));
        }
        Err(ExtractError::UnsupportedType(mime_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plain_text() {
        let text = PlainTextExtractor.extract_text("నమస్తే".as_bytes(), "text/plain").unwrap();
        assert_eq!(text, "నమస్తే");
    }

    #[test]
    fn rejects_unsupported_types_with_typed_error() {
        let err = PlainTextExtractor.extract_text(b"%PDF-1.4", "application/pdf").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType(ref t) if t == "application/pdf"));
    }

    #[test]
    fn rejects_invalid_utf8_as_malformed() {
        let err = PlainTextExtractor.extract_text(&[0xff, 0xfe, 0x00], "text/plain").unwrap_err();
        assert!(matches!(err, ExtractError::Malformed(_)));
    }
}
