//! Schema contract layer for backend output.
//!
//! The backend is an unstructured producer; every response crosses this
//! boundary before the dispatcher touches it. One output contract exists
//! per feature (plus the emotion and suggestion tasks), declared once as
//! static tables and looked up by feature key. A violated contract is a
//! hard, non-retriable failure; retrying a malformed-but-successful
//! response wastes quota without fixing the mismatch. Missing *optional*
//! fields are backfilled with deterministic defaults instead.

use std::collections::BTreeMap;

use crate::dispatch::Feature;

/// Primitive shape of a declared output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A non-empty string.
    Text,
    /// An array of strings.
    TextList,
}

/// Whether a declared field must be produced by the backend.
#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    /// The field carries the task's actual content. Missing or empty is a
    /// contract violation; the layer never fabricates it.
    Primary,
    /// The field is decoration (status lines etc.). Missing or empty is
    /// backfilled with the declared default.
    Optional {
        /// Deterministic substitute used when the backend omits the field.
        default: &'static str,
    },
}

/// One declared output field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key the backend must produce.
    pub name: &'static str,
    /// Expected primitive shape.
    pub kind: FieldKind,
    /// Whether the field is primary content or backfillable decoration.
    pub requirement: Requirement,
}

/// The output shape expected from the backend for one task.
#[derive(Debug, Clone, Copy)]
pub struct OutputContract {
    /// Declared fields, all of which are checked on every response.
    pub fields: &'static [FieldSpec],
}

/// Casual chat: a single reply field.
pub static CHAT: OutputContract = OutputContract {
    fields: &[FieldSpec { name: "response", kind: FieldKind::Text, requirement: Requirement::Primary }],
};

/// Question answering: a single answer field.
pub static ANSWER: OutputContract = OutputContract {
    fields: &[FieldSpec { name: "answer", kind: FieldKind::Text, requirement: Requirement::Primary }],
};

/// Summarization: the summary plus a backfillable one-line progress note.
pub static SUMMARY: OutputContract = OutputContract {
    fields: &[
        FieldSpec { name: "summary", kind: FieldKind::Text, requirement: Requirement::Primary },
        FieldSpec {
            name: "progress",
            kind: FieldKind::Text,
            requirement: Requirement::Optional { default: "Summarization completed." },
        },
    ],
};

/// Translation: the translated text.
pub static TRANSLATION: OutputContract = OutputContract {
    fields: &[FieldSpec {
        name: "translatedText",
        kind: FieldKind::Text,
        requirement: Requirement::Primary,
    }],
};

/// Image generation: a self-contained data-URI image.
///
/// The image model does not answer in JSON, so this contract is enforced
/// through [`validate_data_uri`] rather than [`validate`]; the field name
/// keeps diagnostics consistent with the other features.
pub static IMAGE: OutputContract = OutputContract {
    fields: &[FieldSpec {
        name: "imageDataUri",
        kind: FieldKind::Text,
        requirement: Requirement::Primary,
    }],
};

/// Emotion inference: a single-word emotion label.
pub static EMOTION: OutputContract = OutputContract {
    fields: &[FieldSpec { name: "emotion", kind: FieldKind::Text, requirement: Requirement::Primary }],
};

/// Autocomplete: an ordered list of candidate completions.
pub static SUGGESTIONS: OutputContract = OutputContract {
    fields: &[FieldSpec {
        name: "suggestions",
        kind: FieldKind::TextList,
        requirement: Requirement::Primary,
    }],
};

/// Looks up the output contract for a feature's primary call.
#[must_use]
pub fn contract_for(feature: Feature) -> &'static OutputContract {
    match feature {
        Feature::Chat => &CHAT,
        Feature::Ask => &ANSWER,
        Feature::Summarize => &SUMMARY,
        Feature::Translate => &TRANSLATION,
        Feature::Image => &IMAGE,
    }
}

/// A contract violation in a backend response.
///
/// Distinct from a backend transport error: the call succeeded, the shape
/// did not. Never retried. The field-level cause is logged for diagnostics
/// and not shown to the end user.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The response text was not parseable JSON.
    #[error("backend response is not valid JSON: {0}")]
    NotJson(String),
    /// A primary field is absent or empty.
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
    /// A declared field is present with the wrong primitive type.
    #[error("field `{field}` has the wrong type, expected {expected}")]
    WrongType {
        /// The offending field name.
        field: &'static str,
        /// Human-readable expected shape.
        expected: &'static str,
    },
}

/// A backend response that passed its contract, with optional fields
/// backfilled.
#[derive(Debug, Clone)]
pub struct ValidatedOutput {
    fields: BTreeMap<&'static str, FieldValue>,
}

#[derive(Debug, Clone)]
enum FieldValue {
    Text(String),
    TextList(Vec<String>),
}

impl ValidatedOutput {
    /// Returns the validated text field with the given name.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the validated string-list field with the given name.
    #[must_use]
    pub fn text_list(&self, name: &str) -> Option<&[String]> {
        match self.fields.get(name) {
            Some(FieldValue::TextList(items)) => Some(items),
            _ => None,
        }
    }
}

/// Validates raw backend text against an output contract.
///
/// Markdown code fences around the JSON body are tolerated, since
/// generative backends add them even when told not to.
///
/// # Errors
///
/// Returns a [`SchemaError`] when the text is not a JSON object, a primary
/// field is missing/empty, or any declared field has the wrong type.
pub fn validate(contract: &OutputContract, raw: &str) -> Result<ValidatedOutput, SchemaError> {
    let body = strip_code_fences(raw);
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| SchemaError::NotJson(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| SchemaError::NotJson("expected a JSON object".to_string()))?;

    let mut fields = BTreeMap::new();
    for spec in contract.fields {
        let field = validate_field(spec, object.get(spec.name))?;
        fields.insert(spec.name, field);
    }
    Ok(ValidatedOutput { fields })
}

fn validate_field(
    spec: &FieldSpec,
    value: Option<&serde_json::Value>,
) -> Result<FieldValue, SchemaError> {
    match (spec.kind, value) {
        (FieldKind::Text, Some(serde_json::Value::String(s))) if !s.trim().is_empty() => {
            Ok(FieldValue::Text(s.clone()))
        }
        // Present but empty counts as absent: backfill or reject below.
        (FieldKind::Text, None | Some(serde_json::Value::String(_) | serde_json::Value::Null)) => {
            match spec.requirement {
                Requirement::Primary => Err(SchemaError::MissingField(spec.name)),
                Requirement::Optional { default } => Ok(FieldValue::Text(default.to_string())),
            }
        }
        (FieldKind::Text, Some(_)) => {
            Err(SchemaError::WrongType { field: spec.name, expected: "string" })
        }
        (FieldKind::TextList, Some(serde_json::Value::Array(items))) => {
            let mut list = Vec::with_capacity(items.len());
            for item in items {
                match item.as_str() {
                    Some(s) => list.push(s.to_string()),
                    None => {
                        return Err(SchemaError::WrongType {
                            field: spec.name,
                            expected: "array of strings",
                        });
                    }
                }
            }
            Ok(FieldValue::TextList(list))
        }
        (FieldKind::TextList, None | Some(serde_json::Value::Null)) => match spec.requirement {
            Requirement::Primary => Err(SchemaError::MissingField(spec.name)),
            Requirement::Optional { .. } => Ok(FieldValue::TextList(Vec::new())),
        },
        (FieldKind::TextList, Some(_)) => {
            Err(SchemaError::WrongType { field: spec.name, expected: "array of strings" })
        }
    }
}

/// Checks that an image result is a self-contained `data:` URI.
///
/// # Errors
///
/// Returns [`SchemaError::MissingField`] when the URI is empty and
/// [`SchemaError::WrongType`] when it does not use the `data:` scheme.
pub fn validate_data_uri(uri: &str) -> Result<(), SchemaError> {
    if uri.trim().is_empty() {
        return Err(SchemaError::MissingField("imageDataUri"));
    }
    if !uri.starts_with("data:") {
        return Err(SchemaError::WrongType { field: "imageDataUri", expected: "data: URI" });
    }
    Ok(())
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
