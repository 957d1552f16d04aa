//! Parsing of the model's structured categorization output.
//!
//! The model is asked to reply with a bare JSON object, but replies often
//! arrive wrapped in markdown fences or surrounded by prose. Parsing is
//! best-effort: strip fence markers and parse strictly, then fall back to
//! the first-`{`-to-last-`}` substring. Anything else is unparsable and the
//! caller stores a null classification.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::models::demographics::Demographics;

static FENCE_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json|```").expect("fence marker regex is valid"));

static BRACED_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("braced object regex is valid"));

/// Result of parsing one categorization reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationOutcome {
    Parsed(Demographics),
    Unparsable { reason: String },
}

impl ClassificationOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ClassificationOutcome::Parsed(_))
    }

    pub fn into_demographics(self) -> Option<Demographics> {
        match self {
            ClassificationOutcome::Parsed(d) => Some(d),
            ClassificationOutcome::Unparsable { .. } => None,
        }
    }
}

/// Parse the raw text of a categorization reply.
pub fn parse_classification(raw: &str) -> ClassificationOutcome {
    let cleaned = FENCE_MARKERS.replace_all(raw, "");
    let cleaned = cleaned.trim();

    let strict_err = match decode_object(cleaned) {
        Ok(demographics) => return ClassificationOutcome::Parsed(demographics),
        Err(e) => e,
    };

    let Some(found) = BRACED_OBJECT.find(cleaned) else {
        return ClassificationOutcome::Unparsable {
            reason: format!("no JSON object in model output ({strict_err})"),
        };
    };

    match decode_object(found.as_str()) {
        Ok(demographics) => ClassificationOutcome::Parsed(demographics),
        Err(e) => ClassificationOutcome::Unparsable { reason: e },
    }
}

/// Decode a stored `demographics` field.
///
/// Objects decode directly. Older records hold the raw model reply as a
/// string, which goes through [`parse_classification`]. Anything else,
/// including null, yields `None`.
pub fn decode_stored(value: &Value) -> Option<Demographics> {
    match value {
        Value::Object(map) => Some(Demographics::from_map(map)),
        Value::String(raw) => parse_classification(raw).into_demographics(),
        _ => None,
    }
}

fn decode_object(text: &str) -> Result<Demographics, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    match value {
        Value::Object(map) => Ok(Demographics::from_map(&map)),
        other => Err(format!("expected a JSON object, found {}", json_type_name(&other))),
    }
}

/// Human-readable JSON type name, as reported by the debug endpoint.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
