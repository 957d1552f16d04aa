//! Bill context builder for assistant conversations.
//!
//! Assembles the bills a user attached to their question into a structured
//! block that is appended to the system prompt. Each bill contributes its
//! full text when it could be fetched, otherwise its short description.

use serde::{Deserialize, Serialize};

/// Character budget for one bill's full text.
pub const FULL_TEXT_BUDGET: usize = 12_000;

/// One attached bill and the text the model should see for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBill {
    pub title: String,
    pub body: ContextBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "text", rename_all = "snake_case")]
pub enum ContextBody {
    FullText(String),
    Description(String),
}

impl ContextBill {
    /// Attach fetched full text, cut to [`FULL_TEXT_BUDGET`] characters.
    pub fn full_text(title: impl Into<String>, text: &str) -> Self {
        Self {
            title: title.into(),
            body: ContextBody::FullText(truncate_chars(text, FULL_TEXT_BUDGET)),
        }
    }

    pub fn description(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: ContextBody::Description(description.into()),
        }
    }
}

/// Keep at most `budget` characters, never splitting a character.
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}

/// Build a structured context block from attached bills.
///
/// Returns an XML-style block that can be appended to the system prompt.
/// If `bills` is empty, returns an empty string (no context to inject).
pub fn build_context_block(bills: &[ContextBill]) -> String {
    if bills.is_empty() {
        return String::new();
    }

    let mut block = String::from("<bill_context>\n");

    for bill in bills {
        let (source, text) = match &bill.body {
            ContextBody::FullText(text) => ("full_text", text),
            ContextBody::Description(text) => ("description", text),
        };
        block.push_str(&format!(
            "<bill title=\"{}\" source=\"{source}\">\n",
            bill.title.replace('"', "'")
        ));
        block.push_str(text);
        if !text.ends_with('\n') {
            block.push('\n');
        }
        block.push_str("</bill>\n");
    }

    block.push_str("</bill_context>");
    block
}
