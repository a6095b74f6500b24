//! Task dispatcher: routes one user submission to the right template and
//! contract, runs the primary call and emotion inference concurrently, and
//! merges both into a single task result.
//!
//! Failure policy is deliberately asymmetric: the primary task fails loud
//! (an error, never a partial result), emotion inference fails quiet (the
//! merged result simply omits the label).

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::error::DispatchError;
use crate::ports::model::{GenerationRequest, ImageRequest};
use crate::retry::with_retry;
use crate::schema::{self, OutputContract, SchemaError, ValidatedOutput};
use crate::prompt;

const CHAT_MAX_TOKENS: u32 = 1024;
const SUMMARY_MAX_TOKENS: u32 = 2048;
const DESCRIPTION_MAX_TOKENS: u32 = 512;
const EMOTION_MAX_TOKENS: u32 = 128;

/// The task category selected by the user.
///
/// A closed enum: unknown keys are rejected at parse time with a
/// validation error, before any backend call is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Casual supportive conversation.
    Chat,
    /// Question answering.
    Ask,
    /// Textbook content summarization.
    Summarize,
    /// Illustration generation from Telugu text.
    Image,
    /// Telugu/English translation.
    Translate,
}

impl FromStr for Feature {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chat" => Ok(Self::Chat),
            "ask" => Ok(Self::Ask),
            "summarize" => Ok(Self::Summarize),
            "image" => Ok(Self::Image),
            "translate" => Ok(Self::Translate),
            _ => Err(DispatchError::Validation("Invalid feature selected.".to_string())),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Chat => "chat",
            Self::Ask => "ask",
            Self::Summarize => "summarize",
            Self::Image => "image",
            Self::Translate => "translate",
        };
        f.write_str(name)
    }
}

/// A validated school grade in the 1–10 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade(u8);

impl Grade {
    /// Creates a grade, rejecting values outside 1–10.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range grades.
    pub fn new(value: u8) -> Result<Self, DispatchError> {
        if (1..=10).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DispatchError::Validation(format!(
                "Grade must be between 1 and 10, got {value}."
            )))
        }
    }

    /// The numeric grade.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for Grade {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| DispatchError::Validation(format!("Grade must be a number, got {s:?}.")))?;
        Self::new(value)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The two languages the translation feature moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Telugu, the operating language of the assistant.
    Telugu,
    /// English.
    English,
}

impl Language {
    /// The other language of the pair.
    #[must_use]
    pub fn complement(self) -> Self {
        match self {
            Self::Telugu => Self::English,
            Self::English => Self::Telugu,
        }
    }
}

impl FromStr for Language {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "telugu" | "te" => Ok(Self::Telugu),
            "english" | "en" => Ok(Self::English),
            _ => Err(DispatchError::Validation(format!("Unknown language {s:?}."))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Telugu => f.write_str("Telugu"),
            Self::English => f.write_str("English"),
        }
    }
}

/// An explicit source/target language pair for translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguagePair {
    /// Language of the input text.
    pub source: Language,
    /// Language the output must be in.
    pub target: Language,
}

/// One dispatch: feature, input text, grade, and (for translation) an
/// optional explicit language pair. Consumed once; never persisted.
#[derive(Debug, Clone)]
pub struct TaskRequest {
    /// Which template/contract pair to use.
    pub feature: Feature,
    /// Raw user text.
    pub text: String,
    /// Student grade, calibrates response complexity.
    pub grade: Grade,
    /// Explicit translation pair; inferred from script when absent.
    pub language_pair: Option<LanguagePair>,
}

/// Merged outcome of one dispatch.
///
/// Exactly one of `response_text`/`image_url` carries the primary content
/// per feature (the image feature populates both: the URI plus a derived
/// caption). `emotion` is best-effort and absent when its sub-call failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskResult {
    /// Primary text response or image caption.
    pub response_text: Option<String>,
    /// Generated image as a `data:` URI.
    pub image_url: Option<String>,
    /// Single-word emotion label from the concurrent inference call.
    pub emotion: Option<String>,
}

/// Dispatches one task request.
///
/// The primary call and emotion inference run concurrently and settle
/// independently; the merged result is emitted only once both have. Total
/// latency is the max of the two, not their sum.
///
/// # Errors
///
/// Returns [`DispatchError::Validation`] for empty input without making
/// any backend call, and propagates the primary branch's schema or backend
/// failure after retries. Emotion failure alone never fails the dispatch.
pub async fn dispatch(
    ctx: &ServiceContext,
    config: &AppConfig,
    request: &TaskRequest,
) -> Result<TaskResult, DispatchError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(DispatchError::Validation("Prompt cannot be empty.".to_string()));
    }

    let primary = run_primary(ctx, config, request, text);
    let emotion = infer_emotion(ctx, config, text);
    let (primary, emotion) = tokio::join!(primary, emotion);

    let mut result = primary?;
    match emotion {
        Ok(label) => result.emotion = Some(label),
        Err(err) => {
            warn!(error = %err, "emotion inference failed, continuing without it");
        }
    }
    Ok(result)
}

/// Resolves the translation pair: an explicit pair wins, otherwise the
/// script decides: any Latin letter means the source is English, else
/// Telugu; the target is always the complement.
#[must_use]
pub fn resolve_language_pair(text: &str, explicit: Option<LanguagePair>) -> LanguagePair {
    explicit.unwrap_or_else(|| {
        let source = if text.chars().any(|c| c.is_ascii_alphabetic()) {
            Language::English
        } else {
            Language::Telugu
        };
        LanguagePair { source, target: source.complement() }
    })
}

async fn run_primary(
    ctx: &ServiceContext,
    config: &AppConfig,
    request: &TaskRequest,
    text: &str,
) -> Result<TaskResult, DispatchError> {
    match request.feature {
        Feature::Chat => {
            let out = generate_validated(
                ctx,
                config,
                schema::contract_for(Feature::Chat),
                prompt::chat(text, request.grade),
                CHAT_MAX_TOKENS,
            )
            .await?;
            Ok(text_result(required_text(&out, "response")?))
        }
        Feature::Ask => {
            let out = generate_validated(
                ctx,
                config,
                schema::contract_for(Feature::Ask),
                prompt::answer(text, request.grade),
                CHAT_MAX_TOKENS,
            )
            .await?;
            Ok(text_result(required_text(&out, "answer")?))
        }
        Feature::Summarize => {
            let out = generate_validated(
                ctx,
                config,
                schema::contract_for(Feature::Summarize),
                prompt::summary(text, config.summary_word_limit),
                SUMMARY_MAX_TOKENS,
            )
            .await?;
            if let Some(progress) = out.text("progress") {
                debug!(progress, "summarization progress note");
            }
            Ok(text_result(required_text(&out, "summary")?))
        }
        Feature::Translate => {
            let pair = resolve_language_pair(text, request.language_pair);
            let out = generate_validated(
                ctx,
                config,
                schema::contract_for(Feature::Translate),
                prompt::translate(text, pair.source, pair.target, request.grade),
                CHAT_MAX_TOKENS,
            )
            .await?;
            Ok(text_result(required_text(&out, "translatedText")?))
        }
        Feature::Image => run_image(ctx, config, text).await,
    }
}

/// Image pipeline: render the Telugu text as an English scene description,
/// apply the fixed style prefix, then call the image model. Both backend
/// calls are retried independently.
async fn run_image(
    ctx: &ServiceContext,
    config: &AppConfig,
    text: &str,
) -> Result<TaskResult, DispatchError> {
    let description = generate_validated(
        ctx,
        config,
        &schema::TRANSLATION,
        prompt::image_description(text),
        DESCRIPTION_MAX_TOKENS,
    )
    .await?;
    let english = required_text(&description, "translatedText")?;

    let image_request =
        ImageRequest { model: config.image_model.clone(), prompt: prompt::image_prompt(&english) };
    let image = with_retry(&config.retry, ctx.sleeper.as_ref(), || {
        ctx.model.generate_image(&image_request)
    })
    .await?;
    schema::validate_data_uri(&image.data_uri)?;

    Ok(TaskResult {
        response_text: Some(format!("Here is the image you requested for: \"{text}\"")),
        image_url: Some(image.data_uri),
        emotion: None,
    })
}

/// Emotion inference runs alongside every feature's primary call, retried
/// on its own budget; callers decide what a failure means.
async fn infer_emotion(
    ctx: &ServiceContext,
    config: &AppConfig,
    text: &str,
) -> Result<String, DispatchError> {
    let out = generate_validated(
        ctx,
        config,
        &schema::EMOTION,
        prompt::emotion(text),
        EMOTION_MAX_TOKENS,
    )
    .await?;
    required_text(&out, "emotion")
}

/// One retried backend call plus contract validation. Schema checks sit
/// outside the retry wrapper: a malformed-but-successful response is not
/// retriable.
async fn generate_validated(
    ctx: &ServiceContext,
    config: &AppConfig,
    contract: &OutputContract,
    prompt: String,
    max_tokens: u32,
) -> Result<ValidatedOutput, DispatchError> {
    let request = GenerationRequest { model: config.text_model.clone(), prompt, max_tokens };
    let response =
        with_retry(&config.retry, ctx.sleeper.as_ref(), || ctx.model.generate(&request)).await?;
    Ok(schema::validate(contract, &response.text)?)
}

fn required_text(out: &ValidatedOutput, name: &'static str) -> Result<String, DispatchError> {
    out.text(name)
        .map(str::to_string)
        .ok_or_else(|| DispatchError::from(SchemaError::MissingField(name)))
}

fn text_result(text: String) -> TaskResult {
    TaskResult { response_text: Some(text), image_url: None, emotion: None }
}
