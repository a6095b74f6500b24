//! Live adapter for the `ModelClient` port using the Gemini REST API.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::model::{
    BackendError, GenerationFuture, GenerationRequest, GenerationResponse, ImageFuture,
    ImageRequest, ImageResponse, ModelClient,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live model client that calls the Gemini `generateContent` API.
pub struct LiveModelClient {
    client: Client,
}

impl LiveModelClient {
    /// Creates a new live model client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: Client::new() }
    }
}

impl Default for LiveModelClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body sent to the Gemini API.
#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

/// A content entry in the Gemini request.
#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

/// A single text part in the request.
#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Generation configuration for the Gemini request.
#[derive(Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(rename = "responseModalities", skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<&'static str>>,
}

/// Top-level response from the Gemini API.
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// One candidate completion.
#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

/// Content of a candidate.
#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// A part of a candidate's content: text or inline image data.
#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(rename = "inlineData", default)]
    inline_data: Option<InlineData>,
}

/// Base64-encoded inline media in a response part.
#[derive(Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

/// Error response from the Gemini API.
#[derive(Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

/// Detail inside a Gemini error response.
#[derive(Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

impl LiveModelClient {
    /// Sends one `generateContent` call and returns the parsed response.
    ///
    /// The status code is embedded in the error message on failure so the
    /// retry wrapper's transience markers (503, 429) can see it.
    async fn call(
        &self,
        model: &str,
        prompt: &str,
        config: GenerationConfig,
    ) -> Result<GeminiResponse, BackendError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| BackendError::new("GEMINI_API_KEY environment variable not set"))?;

        let body = GeminiRequest {
            contents: vec![Content { parts: vec![RequestPart { text: prompt }] }],
            generation_config: config,
        };
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent?key={api_key}");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BackendError::new(format!("Gemini API request failed: {e}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| BackendError::new(format!("Failed to read Gemini API response: {e}")))?;

        if !status.is_success() {
            let msg = serde_json::from_str::<GeminiError>(&response_text)
                .map(|e| e.error.message)
                .unwrap_or(response_text);
            return Err(BackendError::new(format!(
                "Gemini API error ({}): {msg}",
                status.as_u16()
            )));
        }

        serde_json::from_str(&response_text)
            .map_err(|e| BackendError::new(format!("Failed to parse Gemini API response: {e}")))
    }
}

impl ModelClient for LiveModelClient {
    fn generate(&self, request: &GenerationRequest) -> GenerationFuture<'_> {
        let model = request.model.clone();
        let prompt = request.prompt.clone();
        let max_tokens = request.max_tokens;

        Box::pin(async move {
            let config = GenerationConfig {
                max_output_tokens: Some(max_tokens),
                response_mime_type: Some("application/json"),
                response_modalities: None,
            };
            let response = self.call(&model, &prompt, config).await?;

            let text: String = response
                .candidates
                .into_iter()
                .flat_map(|c| c.content.parts)
                .filter_map(|part| part.text)
                .collect();
            if text.is_empty() {
                return Err(BackendError::new("Gemini API returned no text candidates"));
            }
            Ok(GenerationResponse { text })
        })
    }

    fn generate_image(&self, request: &ImageRequest) -> ImageFuture<'_> {
        let model = request.model.clone();
        let prompt = request.prompt.clone();

        Box::pin(async move {
            let config = GenerationConfig {
                max_output_tokens: None,
                response_mime_type: None,
                response_modalities: Some(vec!["TEXT", "IMAGE"]),
            };
            let response = self.call(&model, &prompt, config).await?;

            let inline = response
                .candidates
                .into_iter()
                .flat_map(|c| c.content.parts)
                .find_map(|part| part.inline_data)
                .ok_or_else(|| BackendError::new("No image was generated."))?;

            // The API already base64-encodes inline media.
            Ok(ImageResponse {
                data_uri: format!("data:{};base64,{}", inline.mime_type, inline.data),
            })
        })
    }
}
