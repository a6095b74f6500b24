//! Handler for the response-producing subcommands (everything except
//! autocomplete): builds a task request, dispatches it, prints the merged
//! result, and appends the turn to the session store when configured.

use tracing::warn;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::context::ServiceContext;
use crate::dispatch::{self, Feature, Grade, Language, LanguagePair, TaskRequest, TaskResult};
use crate::ports::store::{Session, StoredMessage};

/// Runs one response-producing subcommand.
///
/// # Errors
///
/// Returns the user-facing message when the request is invalid or the
/// dispatch fails; the diagnostic cause goes to the log instead.
pub async fn run(
    ctx: &ServiceContext,
    config: &AppConfig,
    command: &Command,
    grade: Grade,
) -> Result<(), String> {
    let request = build_request(ctx, command, grade)?;

    let result = match dispatch::dispatch(ctx, config, &request).await {
        Ok(result) => result,
        Err(err) => {
            warn!(feature = %request.feature, error = %err, "dispatch failed");
            return Err(err.user_message());
        }
    };

    present(&result);
    record_turn(ctx, &request.text, &result);
    Ok(())
}

fn build_request(
    ctx: &ServiceContext,
    command: &Command,
    grade: Grade,
) -> Result<TaskRequest, String> {
    let (feature, text, language_pair) = match command {
        Command::Chat { message } => (Feature::Chat, message.clone(), None),
        Command::Ask { question } => (Feature::Ask, question.clone(), None),
        Command::Summarize { text, file } => {
            let content = match (text, file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => {
                    let bytes = std::fs::read(path)
                        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
                    ctx.extractor
                        .extract_text(&bytes, mime_for_path(path))
                        .map_err(|e| e.to_string())?
                }
                (None, None) => return Err("Nothing to summarize.".to_string()),
            };
            (Feature::Summarize, content, None)
        }
        Command::Translate { text, from, to } => {
            (Feature::Translate, text.clone(), parse_pair(from.as_deref(), to.as_deref())?)
        }
        Command::Image { text } => (Feature::Image, text.clone(), None),
        Command::Suggest { .. } => {
            return Err("Autocomplete is handled by the suggest command.".to_string());
        }
    };
    Ok(TaskRequest { feature, text, grade, language_pair })
}

/// Builds an explicit language pair from CLI flags. A single flag fixes
/// one side; the other defaults to its complement. No flags means the
/// dispatcher detects the pair from the script.
fn parse_pair(from: Option<&str>, to: Option<&str>) -> Result<Option<LanguagePair>, String> {
    let parse = |s: &str| s.parse::<Language>().map_err(|e| e.user_message());
    match (from, to) {
        (None, None) => Ok(None),
        (Some(from), Some(to)) => {
            Ok(Some(LanguagePair { source: parse(from)?, target: parse(to)? }))
        }
        (Some(from), None) => {
            let source = parse(from)?;
            Ok(Some(LanguagePair { source, target: source.complement() }))
        }
        (None, Some(to)) => {
            let target = parse(to)?;
            Ok(Some(LanguagePair { source: target.complement(), target }))
        }
    }
}

fn mime_for_path(path: &std::path::Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("pdf") => "application/pdf",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

fn present(result: &TaskResult) {
    if let Some(text) = &result.response_text {
        println!("{text}");
    }
    if let Some(uri) = &result.image_url {
        println!("(image generated: data URI, {} characters)", uri.len());
    }
    if let Some(emotion) = &result.emotion {
        println!("(detected emotion: {emotion})");
    }
}

/// Appends the turn to the session store. Persistence problems are logged
/// and never fail a dispatch that already succeeded.
fn record_turn(ctx: &ServiceContext, user_text: &str, result: &TaskResult) {
    let mut sessions = match ctx.sessions.load_sessions() {
        Ok(sessions) => sessions,
        Err(err) => {
            warn!(error = %err, "could not load sessions, skipping transcript save");
            return;
        }
    };

    let title: String = user_text.chars().take(30).collect();
    let mut session = Session::new(title);
    session.messages.push(StoredMessage {
        role: "user".to_string(),
        content: Some(user_text.to_string()),
        image_url: None,
        emotion: None,
    });
    session.messages.push(StoredMessage {
        role: "assistant".to_string(),
        content: result.response_text.clone(),
        image_url: result.image_url.clone(),
        emotion: result.emotion.clone(),
    });
    sessions.insert(0, session);

    if let Err(err) = ctx.sessions.save_sessions(&sessions) {
        warn!(error = %err, "could not save sessions");
    }
}
