//! The Bill Finder conversational assistant.
//!
//! One completion per user message: a system prompt carrying the persona,
//! the user's demographics and any attached bills, followed by the replayed
//! transcript and the new user turn.

use tracing::info;

use billfinder_core::models::chat_history::ChatHistoryMessage;
use billfinder_core::models::demographics::Demographics;

use crate::context::{ContextBill, build_context_block};
use crate::error::LlmError;
use crate::model::{ChatMessage, CompletionModel};

const PERSONA: &str = "\
You are Bill Finder Assistant, helping people understand legislation that \
affects them. Explain bills in plain language a high-school student could \
follow. Keep answers short, avoid legal jargon, and say so when the bill \
text you were given does not answer the question. Do not give legal advice \
or tell people how to vote.";

/// Everything the assistant needs to answer one message.
#[derive(Debug, Clone, Copy)]
pub struct AssistantTurn<'a> {
    pub message: &'a str,
    pub transcript: &'a [ChatHistoryMessage],
    pub demographics: Option<&'a Demographics>,
    pub context: &'a [ContextBill],
}

/// Assemble the system prompt for a turn.
pub fn build_system_prompt(demographics: Option<&Demographics>, context: &[ContextBill]) -> String {
    let mut prompt = String::from(PERSONA);

    if let Some(demographics) = demographics.filter(|d| !d.is_blank()) {
        let described = demographics
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(category, values)| format!("- {category}: {}", values.join(", ")))
            .collect::<Vec<_>>()
            .join("\n");
        prompt.push_str("\n\nThe user describes themselves as:\n");
        prompt.push_str(&described);
        prompt.push_str("\nRelate your answers to these groups where the bill does.");
    }

    let block = build_context_block(context);
    if !block.is_empty() {
        prompt.push_str("\n\nThe user is asking about these bills:\n");
        prompt.push_str(&block);
    }

    prompt
}

/// Replay the transcript and append the new user turn.
///
/// Messages from `user` stay user turns; everything else is the assistant.
pub fn build_messages(transcript: &[ChatHistoryMessage], message: &str) -> Vec<ChatMessage> {
    transcript
        .iter()
        .map(|m| {
            if m.sender.is_user() {
                ChatMessage::user(&m.text)
            } else {
                ChatMessage::assistant(&m.text)
            }
        })
        .chain(std::iter::once(ChatMessage::user(message)))
        .collect()
}

/// Produce the assistant's reply to one message.
pub async fn reply(model: &dyn CompletionModel, turn: AssistantTurn<'_>) -> Result<String, LlmError> {
    let system_prompt = build_system_prompt(turn.demographics, turn.context);
    let messages = build_messages(turn.transcript, turn.message);

    info!(
        model = model.model_id(),
        transcript_len = turn.transcript.len(),
        context_bills = turn.context.len(),
        "answering assistant message"
    );

    model.complete(Some(&system_prompt), &messages).await
}
