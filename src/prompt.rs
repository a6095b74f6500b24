//! Prompt template set.
//!
//! One template per task, each a pure function from validated input fields
//! to the final instruction string. Student-facing templates carry the app
//! personas: "Telugu Thodu" for casual chat, "Vidyarthi Mitra" for the
//! tutoring tasks. Both speak simple, age-appropriate, supportive Telugu.
//! Every template ends with the JSON shape the schema contract layer will
//! check, so a template and its contract always travel as a pair.

use std::fmt::Write as _;

use crate::dispatch::{Grade, Language};

/// Fixed stylistic prefix applied to every image-synthesis prompt.
pub const IMAGE_STYLE_PREFIX: &str = "vibrant, friendly, educational illustration depicting";

/// Casual chat template: supportive peer conversation in simple Telugu.
#[must_use]
pub fn chat(message: &str, grade: Grade) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are Telugu Thodu, a friendly and helpful AI assistant for students in \
         Telangana, India. Your goal is to have a casual, encouraging, and supportive \
         conversation in simple Telugu. The student is in grade {grade}.\n"
    );
    let _ = writeln!(prompt, "User: {message}\n");
    prompt.push_str(
        "Respond with JSON (no markdown fences): {\"response\": \"your reply in simple Telugu\"}",
    );
    prompt
}

/// Question-answering template, calibrated to the student's grade.
#[must_use]
pub fn answer(question: &str, grade: Grade) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are Vidyarthi Mitra, an expert tutor for Telugu-medium students. Answer the \
         following question for a student in grade {grade}. Use simple, easily \
         understandable Telugu appropriate for their level. Avoid complex words and \
         sentence structures. Maintain a supportive and positive tone.\n"
    );
    prompt.push_str("IMPORTANT: You must respond ONLY in Telugu.\n\n");
    let _ = writeln!(prompt, "Question: {question}\n");
    prompt.push_str("Respond with JSON (no markdown fences): {\"answer\": \"your answer\"}");
    prompt
}

/// Summarization template with a configurable word ceiling.
#[must_use]
pub fn summary(content: &str, word_limit: u32) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are Vidyarthi Mitra, an expert in Telugu language and literature, \
         specializing in creating summaries for students.\n"
    );
    let _ = writeln!(
        prompt,
        "Summarize the following content from a Telugu textbook in a way that is easy \
         for students to understand. The summary should be no more than {word_limit} \
         words and use simple, easily understandable Telugu appropriate for students in \
         grades 1-10. Avoid complex words and sentence structures. Maintain a supportive \
         and positive tone.\n"
    );
    prompt.push_str("IMPORTANT: You must respond ONLY in Telugu.\n\n");
    let _ = writeln!(prompt, "Content to summarize: {content}\n");
    prompt.push_str(
        "Make sure the summary contains all the key points from the original content.\n\
         Respond with JSON (no markdown fences): {\"summary\": \"the summary\", \
         \"progress\": \"a one-sentence note on the summarization process\"}",
    );
    prompt
}

/// Translation template. Embeds both language names; when the target is
/// Telugu the backend is told to answer exclusively in Telugu.
#[must_use]
pub fn translate(text: &str, source: Language, target: Language, grade: Grade) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are Vidyarthi Mitra, a helpful AI assistant. Translate the following text \
         from {source} to {target} for a student in grade {grade}. Keep the translation \
         simple, clear, and appropriate for their level. Avoid complex words and sentence \
         structures. Maintain a supportive and positive tone.\n"
    );
    if target == Language::Telugu {
        prompt.push_str("IMPORTANT: You must respond ONLY in Telugu.\n\n");
    }
    let _ = writeln!(prompt, "Text to translate: {text}\n");
    prompt.push_str(
        "Respond with JSON (no markdown fences): {\"translatedText\": \"the translation\"}",
    );
    prompt
}

/// Internal Telugu-to-English rendering step of the image pipeline.
///
/// The image model works best with an English scene description, so the
/// student's Telugu text is translated before the stylistic prefix is
/// applied.
#[must_use]
pub fn image_description(telugu_text: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Translate the following Telugu text into a short English scene description \
         suitable for an illustrator. Keep every concrete detail from the original.\n\n",
    );
    let _ = writeln!(prompt, "Telugu text: {telugu_text}\n");
    prompt.push_str(
        "Respond with JSON (no markdown fences): {\"translatedText\": \"the English \
         description\"}",
    );
    prompt
}

/// Final prompt sent to the image-synthesis model.
#[must_use]
pub fn image_prompt(english_description: &str) -> String {
    format!("{IMAGE_STYLE_PREFIX}: {english_description}")
}

/// Emotion inference template: a single-word label for the student's state.
#[must_use]
pub fn emotion(student_input: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are an AI assistant designed to understand the emotions of students based \
         on their text input.\n\n\
         Analyze the following student input and determine their emotional state. The \
         emotion should be a single word (e.g., confused, frustrated, curious).\n\n",
    );
    let _ = writeln!(prompt, "Student input: {student_input}\n");
    prompt.push_str("Respond with JSON (no markdown fences): {\"emotion\": \"one word\"}");
    prompt
}

/// Autocomplete suggestion template for partial Telugu input.
#[must_use]
pub fn suggestions(input_text: &str, grade: Grade) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are an AI assistant designed to provide autocomplete suggestions for Telugu \
         text.\n\nThe user is typing the following text:\n\"\"\"\n",
    );
    prompt.push_str(input_text);
    prompt.push_str("\n\"\"\"\n\n");
    let _ = writeln!(
        prompt,
        "Generate a list of autocomplete suggestions that the user might be trying to \
         type. The student is in grade {grade}; tailor the suggestions accordingly. Use \
         common Telugu words, phrases, and content from Telangana state textbooks for \
         grades 1-10.\n\
         The suggestions should be in simple Telugu and must not repeat the input text.\n"
    );
    prompt.push_str(
        "Respond with JSON (no markdown fences): {\"suggestions\": [\"first suggestion\", \
         \"second suggestion\"]}",
    );
    prompt
}
