//! Generative-model client port.
//!
//! The backend that actually performs language and image generation is an
//! opaque remote service. This port declares the two calls the core makes
//! against it: structured text generation and image synthesis.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`ModelClient`] text generation to keep
/// the trait dyn-compatible.
pub type GenerationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerationResponse, BackendError>> + Send + 'a>>;

/// Boxed future type alias used by [`ModelClient`] image synthesis.
pub type ImageFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ImageResponse, BackendError>> + Send + 'a>>;

/// A request to generate structured text from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The model identifier (e.g. `"gemini-1.5-flash"`).
    pub model: String,
    /// The full template-rendered instruction to send.
    pub prompt: String,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

/// The raw response from a text generation call.
///
/// `text` is whatever the backend produced; the schema contract layer is
/// responsible for deciding whether it satisfies the feature's output shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text, expected (but not guaranteed) to be JSON.
    pub text: String,
}

/// A request to synthesize an image from a text prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRequest {
    /// The image model identifier.
    pub model: String,
    /// The styled prompt describing the illustration.
    pub prompt: String,
}

/// The response from an image synthesis call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    /// The generated image as a self-contained `data:` URI.
    pub data_uri: String,
}

/// Error returned by the generative backend.
///
/// Carries the raw transport or API message. Transience is judged by a
/// fixed substring marker set rather than exhaustive error-code
/// enumeration, because the backend's failure vocabulary is not stable.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    /// Raw message from the transport or the backend API.
    pub message: String,
}

/// Substrings that mark a backend failure as likely to succeed on retry.
const TRANSIENCE_MARKERS: [&str; 8] = [
    "503",
    "429",
    "overloaded",
    "unavailable",
    "timeout",
    "timed out",
    "connection reset",
    "network",
];

impl BackendError {
    /// Creates a backend error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Returns `true` when the message carries a transience marker
    /// (service overload, network blip) and a retry is worthwhile.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        let lower = self.message.to_lowercase();
        TRANSIENCE_MARKERS.iter().any(|marker| lower.contains(marker))
    }
}

/// Sends generation requests to the backend model service.
pub trait ModelClient: Send + Sync {
    /// Generates structured text for the given request.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the call fails (network, auth,
    /// rate-limit, overload, etc.).
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_>;

    /// Synthesizes an image for the given request.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] if the call fails or no image is produced.
    fn generate_image(&self, request: &ImageRequest) -> ImageFuture<'_>;
}

impl<T: ModelClient + ?Sized> ModelClient for Arc<T> {
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_> {
        (**self).generate(request)
    }

    fn generate_image(&self, request: &ImageRequest) -> ImageFuture<'_> {
        (**self).generate_image(request)
    }
}
