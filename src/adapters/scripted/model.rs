//! Scripted adapter for the `ModelClient` port.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::ports::model::{
    BackendError, GenerationFuture, GenerationRequest, GenerationResponse, ImageFuture,
    ImageRequest, ImageResponse, ModelClient,
};

/// Serves queued generation outcomes in order and counts every call.
///
/// Outcomes are consumed front to back, one per call. An exhausted queue
/// yields a fatal [`BackendError`] so a test that under-scripts fails
/// loudly. Call counters and captured prompts let tests assert exactly how
/// many backend calls a code path made, including zero.
#[derive(Debug, Default)]
pub struct ScriptedModelClient {
    generate_outcomes: Mutex<VecDeque<Result<GenerationResponse, BackendError>>>,
    image_outcomes: Mutex<VecDeque<Result<ImageResponse, BackendError>>>,
    generate_calls: AtomicUsize,
    image_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModelClient {
    /// Creates a client with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful text generation whose raw text is `text`.
    pub fn push_text(&self, text: impl Into<String>) {
        self.generate_outcomes
            .lock()
            .expect("script lock poisoned")
            .push_back(Ok(GenerationResponse { text: text.into() }));
    }

    /// Queues a failed text generation.
    pub fn push_generate_error(&self, message: impl Into<String>) {
        self.generate_outcomes
            .lock()
            .expect("script lock poisoned")
            .push_back(Err(BackendError::new(message)));
    }

    /// Queues a successful image synthesis returning `data_uri`.
    pub fn push_image(&self, data_uri: impl Into<String>) {
        self.image_outcomes
            .lock()
            .expect("script lock poisoned")
            .push_back(Ok(ImageResponse { data_uri: data_uri.into() }));
    }

    /// Queues a failed image synthesis.
    pub fn push_image_error(&self, message: impl Into<String>) {
        self.image_outcomes
            .lock()
            .expect("script lock poisoned")
            .push_back(Err(BackendError::new(message)));
    }

    /// Number of `generate` calls made so far.
    #[must_use]
    pub fn generate_call_count(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    /// Number of `generate_image` calls made so far.
    #[must_use]
    pub fn image_call_count(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    /// Total backend calls across both operations.
    #[must_use]
    pub fn total_call_count(&self) -> usize {
        self.generate_call_count() + self.image_call_count()
    }

    /// Every prompt sent through either operation, in call order.
    #[must_use]
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("script lock poisoned").clone()
    }
}

impl ModelClient for ScriptedModelClient {
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().expect("script lock poisoned").push(request.prompt.clone());
        let outcome = self
            .generate_outcomes
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(BackendError::new("scripted model client: no queued generate outcome"))
            });
        Box::pin(async move { outcome })
    }

    fn generate_image(&self, request: &ImageRequest) -> ImageFuture<'_> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().expect("script lock poisoned").push(request.prompt.clone());
        let outcome = self
            .image_outcomes
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(BackendError::new("scripted model client: no queued image outcome"))
            });
        Box::pin(async move { outcome })
    }
}
