//! Choosing and building the configured completion model.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::bedrock::{self, BedrockModel};
use crate::client::build_client_with_region;
use crate::error::LlmError;
use crate::model::CompletionModel;
use crate::openai::{self, OpenAiCompatibleModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Bedrock,
    /// Any OpenAI-compatible chat-completions endpoint.
    OpenAi,
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bedrock" => Ok(Self::Bedrock),
            "openai" | "groq" => Ok(Self::OpenAi),
            other => Err(LlmError::Config(format!("unknown LLM provider: {other}"))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bedrock => f.write_str("bedrock"),
            Self::OpenAi => f.write_str("openai"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Falls back to the provider's default model.
    pub model_id: Option<String>,
    /// Required for [`ProviderKind::OpenAi`].
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// AWS region for Bedrock.
    pub region: String,
}

/// Build the model described by `config`.
pub async fn build_model(config: &ProviderConfig) -> Result<Arc<dyn CompletionModel>, LlmError> {
    let model: Arc<dyn CompletionModel> = match config.kind {
        ProviderKind::Bedrock => {
            let client = build_client_with_region(&config.region).await;
            let model_id = config.model_id.as_deref().unwrap_or(bedrock::DEFAULT_MODEL_ID);
            Arc::new(BedrockModel::new(client, model_id))
        }
        ProviderKind::OpenAi => {
            let api_key = config
                .api_key
                .as_deref()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| LlmError::Config("LLM_API_KEY is required for the openai provider".to_string()))?;
            let base_url = config.base_url.as_deref().unwrap_or(openai::DEFAULT_BASE_URL);
            let model_id = config.model_id.as_deref().unwrap_or(openai::DEFAULT_MODEL_ID);
            Arc::new(OpenAiCompatibleModel::new(api_key, base_url, model_id)?)
        }
    };

    info!(provider = %config.kind, model = model.model_id(), "completion model ready");
    Ok(model)
}
