//! Bedrock Converse API provider.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message, SystemContentBlock};
use tracing::info;

use crate::error::LlmError;
use crate::model::{ChatMessage, ChatRole, CompletionModel, normalize_turns};

/// Default inference profile when none is configured.
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// A Claude model reached through the Bedrock Converse API.
///
/// Converse rejects conversations that do not alternate roles starting with
/// the user, so transcripts are passed through [`normalize_turns`] first.
#[derive(Clone)]
pub struct BedrockModel {
    client: Client,
    model_id: String,
}

impl BedrockModel {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl CompletionModel for BedrockModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let mut converse_messages: Vec<Message> = Vec::new();

        for msg in normalize_turns(messages) {
            let role = match msg.role {
                ChatRole::User => ConversationRole::User,
                ChatRole::Assistant => ConversationRole::Assistant,
            };
            let message = Message::builder()
                .role(role)
                .content(ContentBlock::Text(msg.content))
                .build()
                .map_err(|e| LlmError::Invocation(e.to_string()))?;
            converse_messages.push(message);
        }

        if converse_messages.is_empty() {
            return Err(LlmError::Invocation("conversation has no user turn".to_string()));
        }

        let mut request = self
            .client
            .converse()
            .model_id(&self.model_id)
            .set_messages(Some(converse_messages));

        if let Some(system) = system_prompt {
            request = request.system(SystemContentBlock::Text(system.to_string()));
        }

        let response = request
            .send()
            .await
            .map_err(|e| LlmError::Invocation(e.into_service_error().to_string()))?;

        let output_message = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| LlmError::ResponseParse("no message in response".to_string()))?;

        let response_text = output_message
            .content()
            .iter()
            .filter_map(|block| {
                if let ContentBlock::Text(text) = block {
                    Some(text.as_str())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        if let Some(usage) = response.usage() {
            info!(
                model = %self.model_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "bedrock converse complete"
            );
        }

        Ok(response_text)
    }
}
