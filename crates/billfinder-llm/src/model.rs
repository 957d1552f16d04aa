use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A hosted text-completion model: send a prompt, receive text.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Identifier of the underlying model, for logging.
    fn model_id(&self) -> &str;

    /// Send an optional system prompt and a conversation; return the reply.
    async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError>;
}

/// Send `prompt` as a single user turn with no system prompt.
pub async fn ask(model: &dyn CompletionModel, prompt: &str) -> Result<String, LlmError> {
    model.complete(None, &[ChatMessage::user(prompt)]).await
}

/// Reshape a transcript into strictly alternating turns that start with
/// the user.
///
/// Leading assistant turns are dropped and consecutive turns from the same
/// role are joined with a blank line.
pub fn normalize_turns(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut turns: Vec<ChatMessage> = Vec::with_capacity(messages.len());

    for msg in messages {
        if turns.is_empty() && msg.role == ChatRole::Assistant {
            continue;
        }
        match turns.last_mut() {
            Some(last) if last.role == msg.role => {
                last.content.push_str("\n\n");
                last.content.push_str(&msg.content);
            }
            _ => turns.push(msg.clone()),
        }
    }

    turns
}
