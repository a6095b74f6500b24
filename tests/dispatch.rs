//! End-to-end dispatch tests against scripted adapters.
//!
//! Every backend interaction is served from a queued script, and call
//! counters prove exactly how many calls each path made, including zero.
//! Within one dispatch the scripted futures resolve immediately, so the
//! primary branch consumes its queued generate outcomes before the emotion
//! branch consumes its own.

use std::sync::Arc;
use std::time::Duration;

use mitra::adapters::scripted::{RecordingSleeper, ScriptedModelClient};
use mitra::config::AppConfig;
use mitra::context::ServiceContext;
use mitra::dispatch::{dispatch, Feature, Grade, Language, LanguagePair, TaskRequest};
use mitra::error::DispatchError;
use mitra::suggest::suggest;

fn scripted_context() -> (Arc<ScriptedModelClient>, Arc<RecordingSleeper>, ServiceContext) {
    let model = Arc::new(ScriptedModelClient::new());
    let sleeper = Arc::new(RecordingSleeper::new());
    let ctx = ServiceContext::scripted(Box::new(Arc::clone(&model)), Box::new(Arc::clone(&sleeper)));
    (model, sleeper, ctx)
}

fn request(feature: Feature, text: &str) -> TaskRequest {
    TaskRequest {
        feature,
        text: text.to_string(),
        grade: Grade::new(6).unwrap(),
        language_pair: None,
    }
}

#[tokio::test]
async fn summarize_returns_summary_and_emotion_with_progress_backfilled() {
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"summary": "short text", "progress": ""}"#);
    model.push_text(r#"{"emotion": "curious"}"#);

    let result = dispatch(&ctx, &AppConfig::default(), &request(Feature::Summarize, "పాఠం"))
        .await
        .unwrap();

    assert_eq!(result.response_text.as_deref(), Some("short text"));
    assert_eq!(result.emotion.as_deref(), Some("curious"));
    assert!(result.image_url.is_none());
    assert_eq!(model.generate_call_count(), 2);
}

#[tokio::test]
async fn empty_text_is_rejected_with_zero_backend_calls() {
    let (model, _, ctx) = scripted_context();

    for feature in
        [Feature::Chat, Feature::Ask, Feature::Summarize, Feature::Image, Feature::Translate]
    {
        let err = dispatch(&ctx, &AppConfig::default(), &request(feature, "   "))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Prompt cannot be empty.");
    }
    assert_eq!(model.total_call_count(), 0);
}

#[tokio::test]
async fn emotion_failure_never_fails_the_primary_task() {
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"response": "బాగున్నాను!"}"#);
    model.push_generate_error("bad request"); // emotion branch, fatal

    let result =
        dispatch(&ctx, &AppConfig::default(), &request(Feature::Chat, "ఎలా ఉన్నావ్?"))
            .await
            .unwrap();

    assert_eq!(result.response_text.as_deref(), Some("బాగున్నాను!"));
    assert!(result.emotion.is_none());
    assert_eq!(model.generate_call_count(), 2);
}

#[tokio::test]
async fn primary_transient_failure_is_retried_then_succeeds() {
    let (model, sleeper, ctx) = scripted_context();
    model.push_generate_error("Gemini API error (503): overloaded");
    model.push_generate_error("Gemini API error (503): overloaded");
    model.push_text(r#"{"answer": "సూర్యుడు"}"#);
    model.push_text(r#"{"emotion": "curious"}"#);

    let result = dispatch(&ctx, &AppConfig::default(), &request(Feature::Ask, "ఏమిటి?"))
        .await
        .unwrap();

    assert_eq!(result.response_text.as_deref(), Some("సూర్యుడు"));
    // Two failed attempts backed off at 1x then 2x the base delay.
    assert_eq!(sleeper.delays(), vec![Duration::from_secs(1), Duration::from_secs(2)]);
    assert_eq!(model.generate_call_count(), 4);
}

#[tokio::test]
async fn primary_failure_after_exhausted_retries_fails_the_dispatch() {
    let (model, sleeper, ctx) = scripted_context();
    model.push_generate_error("503 overloaded");
    model.push_generate_error("503 overloaded");
    model.push_generate_error("503 overloaded");
    model.push_text(r#"{"emotion": "patient"}"#); // emotion still succeeds

    let err = dispatch(&ctx, &AppConfig::default(), &request(Feature::Chat, "హలో"))
        .await
        .unwrap_err();

    // The final backend error propagates unchanged; no partial result with
    // only the emotion is ever returned.
    match err {
        DispatchError::Backend(backend) => assert_eq!(backend.message, "503 overloaded"),
        other => panic!("expected backend error, got {other:?}"),
    }
    assert_eq!(model.generate_call_count(), 4);
    assert_eq!(sleeper.delays(), vec![Duration::from_secs(1), Duration::from_secs(2)]);
}

#[tokio::test]
async fn fatal_primary_error_is_not_retried() {
    let (model, sleeper, ctx) = scripted_context();
    model.push_generate_error("Gemini API error (401): bad key");
    model.push_text(r#"{"emotion": "calm"}"#);

    let err = dispatch(&ctx, &AppConfig::default(), &request(Feature::Chat, "హలో"))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Backend(_)));
    assert_eq!(model.generate_call_count(), 2); // one primary, one emotion
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn missing_primary_field_is_a_schema_violation_not_an_empty_result() {
    let (model, sleeper, ctx) = scripted_context();
    model.push_text(r#"{"progress": "done"}"#); // summary missing
    model.push_text(r#"{"emotion": "confused"}"#);

    let err = dispatch(&ctx, &AppConfig::default(), &request(Feature::Summarize, "పాఠం"))
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::Schema(_)));
    assert!(err.to_string().contains("summary"));
    // A contract violation is never retried.
    assert_eq!(model.generate_call_count(), 2);
    assert!(sleeper.delays().is_empty());
}

#[tokio::test]
async fn image_dispatch_yields_data_uri_and_caption_quoting_the_prompt() {
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"translatedText": "a village"}"#);
    model.push_image("data:image/png;base64,iVBORw0KGgo=");
    model.push_text(r#"{"emotion": "excited"}"#);

    let result = dispatch(&ctx, &AppConfig::default(), &request(Feature::Image, "ఒక గ్రామం"))
        .await
        .unwrap();

    let uri = result.image_url.unwrap();
    assert!(uri.starts_with("data:"));
    let caption = result.response_text.unwrap();
    assert!(caption.contains("\"ఒక గ్రామం\""));
    assert_eq!(result.emotion.as_deref(), Some("excited"));
    assert_eq!(model.image_call_count(), 1);

    // The synthesis prompt carries the fixed style prefix around the
    // English description, not the raw Telugu text.
    let prompts = model.recorded_prompts();
    let image_prompt = &prompts[1];
    assert!(image_prompt.starts_with("vibrant, friendly, educational illustration depicting"));
    assert!(image_prompt.contains("a village"));
}

#[tokio::test]
async fn non_data_uri_image_result_violates_the_contract() {
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"translatedText": "a village"}"#);
    model.push_image("https://example.com/cat.png");
    model.push_text(r#"{"emotion": "excited"}"#);

    let err = dispatch(&ctx, &AppConfig::default(), &request(Feature::Image, "ఒక గ్రామం"))
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Schema(_)));
}

#[tokio::test]
async fn explicit_language_pair_is_preserved_through_both_directions() {
    let config = AppConfig::default();

    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"translatedText": "నమస్తే"}"#);
    model.push_text(r#"{"emotion": "neutral"}"#);
    let mut forward = request(Feature::Translate, "hello");
    forward.language_pair =
        Some(LanguagePair { source: Language::English, target: Language::Telugu });
    let out = dispatch(&ctx, &config, &forward).await.unwrap();
    assert_eq!(out.response_text.as_deref(), Some("నమస్తే"));
    assert!(model.recorded_prompts()[0].contains("from English to Telugu"));

    // Feed the output back with the inverse explicit pair; the dispatcher
    // must not swap it.
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"translatedText": "hello"}"#);
    model.push_text(r#"{"emotion": "neutral"}"#);
    let mut back = request(Feature::Translate, "నమస్తే");
    back.language_pair =
        Some(LanguagePair { source: Language::Telugu, target: Language::English });
    dispatch(&ctx, &config, &back).await.unwrap();
    assert!(model.recorded_prompts()[0].contains("from Telugu to English"));
}

#[tokio::test]
async fn detected_language_pair_follows_the_script() {
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"translatedText": "school"}"#);
    model.push_text(r#"{"emotion": "neutral"}"#);

    dispatch(&ctx, &AppConfig::default(), &request(Feature::Translate, "బడి"))
        .await
        .unwrap();
    assert!(model.recorded_prompts()[0].contains("from Telugu to English"));
}

#[tokio::test]
async fn chat_dispatch_is_total_content_or_error() {
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"response": "నమస్తే!"}"#);
    model.push_text(r#"{"emotion": "happy"}"#);

    let result = dispatch(&ctx, &AppConfig::default(), &request(Feature::Chat, "హాయ్"))
        .await
        .unwrap();
    assert!(result.response_text.is_some());
}

// --- autocomplete advisor ---

#[tokio::test]
async fn short_input_never_triggers_a_backend_call() {
    let (model, _, ctx) = scripted_context();
    let grade = Grade::new(6).unwrap();

    assert!(suggest(&ctx, &AppConfig::default(), "", grade).await.is_empty());
    assert!(suggest(&ctx, &AppConfig::default(), "అ", grade).await.is_empty());
    assert!(suggest(&ctx, &AppConfig::default(), "అమ", grade).await.is_empty());
    assert_eq!(model.total_call_count(), 0);
}

#[tokio::test]
async fn suggestions_keep_backend_ranking_order() {
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"suggestions": ["అమ్మమ్మ", "అమ్మాయి", "అమ్మకం"]}"#);

    let grade = Grade::new(4).unwrap();
    let suggestions = suggest(&ctx, &AppConfig::default(), "అమ్మ", grade).await;
    assert_eq!(suggestions, vec!["అమ్మమ్మ", "అమ్మాయి", "అమ్మకం"]);
    assert_eq!(model.generate_call_count(), 1);
}

#[tokio::test]
async fn autocomplete_failures_degrade_to_an_empty_list_without_retry() {
    let grade = Grade::new(6).unwrap();

    // A backend error, even a transient one, is not retried here.
    let (model, sleeper, ctx) = scripted_context();
    model.push_generate_error("503 overloaded");
    assert!(suggest(&ctx, &AppConfig::default(), "తెలుగు", grade).await.is_empty());
    assert_eq!(model.generate_call_count(), 1);
    assert!(sleeper.delays().is_empty());

    // Contract violation degrades the same way.
    let (model, _, ctx) = scripted_context();
    model.push_text(r#"{"ideas": ["wrong field"]}"#);
    assert!(suggest(&ctx, &AppConfig::default(), "తెలుగు", grade).await.is_empty());
    assert_eq!(model.generate_call_count(), 1);
}
