//! OpenAI-compatible chat-completions provider (Groq, OpenAI, local servers).

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LlmError;
use crate::model::{ChatMessage, ChatRole, CompletionModel};

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub const DEFAULT_MODEL_ID: &str = "llama-3.1-8b-instant";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// A model served behind a `/chat/completions` endpoint with bearer auth.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleModel {
    client: reqwest::Client,
    base_url: String,
    model_id: String,
}

impl OpenAiCompatibleModel {
    pub fn new(
        api_key: &str,
        base_url: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| LlmError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_id: model_id.into(),
        })
    }
}

#[async_trait]
impl CompletionModel for OpenAiCompatibleModel {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn complete(
        &self,
        system_prompt: Option<&str>,
        messages: &[ChatMessage],
    ) -> Result<String, LlmError> {
        let mut wire = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = system_prompt {
            wire.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        for msg in messages {
            wire.push(WireMessage {
                role: match msg.role {
                    ChatRole::User => "user",
                    ChatRole::Assistant => "assistant",
                },
                content: &msg.content,
            });
        }

        let request = CompletionRequest {
            model: &self.model_id,
            messages: wire,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Invocation(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        debug!(status = %status, model = %self.model_id, "completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Invocation(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(LlmError::Invocation(format!("API returned {status}: {body}")));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::ResponseParse(format!("unexpected completion payload: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::ResponseParse("completion has no message content".to_string()))
    }
}
