use std::env;
use std::sync::Arc;

use billfinder_ingest::config::Settings;

use crate::state::AppState;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";

/// Set by the Lambda runtime; its presence selects the Lambda adapter.
pub const LAMBDA_RUNTIME_VAR: &str = "AWS_LAMBDA_RUNTIME_API";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub settings: Settings,
    pub bind_addr: String,
    pub on_lambda: bool,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            settings: Settings::from_env()?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            on_lambda: env::var(LAMBDA_RUNTIME_VAR).is_ok(),
        })
    }

    /// Build every client once and bundle them into handler state.
    pub async fn build_state(&self) -> eyre::Result<AppState> {
        let vocabulary = self.settings.load_vocabulary()?;
        tracing::info!(
            revision = %vocabulary.revision,
            bucket = %self.settings.bucket,
            "building application state"
        );

        Ok(AppState {
            store: self.settings.build_store().await,
            model: self.settings.build_model().await?,
            bills: self.settings.build_bill_source()?,
            vocabulary: Arc::new(vocabulary),
        })
    }
}
