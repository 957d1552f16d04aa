//! Settings read from the environment once at startup.

use std::env;
use std::sync::Arc;

use tracing::warn;

use billfinder_congress::client::DEFAULT_BASE_URL as CONGRESS_DEFAULT_BASE;
use billfinder_congress::{BillSource, CongressClient};
use billfinder_core::vocabulary::Vocabulary;
use billfinder_llm::model::CompletionModel;
use billfinder_llm::provider::{ProviderConfig, build_model};
use billfinder_storage::s3::S3DocumentStore;
use billfinder_storage::store::DocumentStore;

use crate::error::IngestError;

pub const DEFAULT_BUCKET: &str = "billfinder";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_VOCABULARY: &str = "detailed";

#[derive(Debug, Clone)]
pub struct Settings {
    pub bucket: String,
    pub region: String,
    pub congress_api_key: String,
    pub congress_api_base: String,
    pub provider: ProviderConfig,
    /// Vocabulary revision name or path to a JSON file.
    pub vocabulary: String,
}

fn var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Settings {
    pub fn from_env() -> Result<Self, IngestError> {
        let region = var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());

        let congress_api_key = var("CONGRESS_API_KEY").unwrap_or_default();
        if congress_api_key.is_empty() {
            warn!("CONGRESS_API_KEY is not set; Congress.gov requests will be rejected");
        }

        let kind = match var("LLM_PROVIDER") {
            Some(name) => name.parse()?,
            None => Default::default(),
        };

        Ok(Self {
            bucket: var("BILLFINDER_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            congress_api_key,
            congress_api_base: var("CONGRESS_API_BASE")
                .unwrap_or_else(|| CONGRESS_DEFAULT_BASE.to_string()),
            provider: ProviderConfig {
                kind,
                model_id: var("LLM_MODEL_ID"),
                api_key: var("LLM_API_KEY"),
                base_url: var("LLM_BASE_URL"),
                region: region.clone(),
            },
            vocabulary: var("VOCABULARY").unwrap_or_else(|| DEFAULT_VOCABULARY.to_string()),
            region,
        })
    }

    pub fn load_vocabulary(&self) -> Result<Vocabulary, IngestError> {
        Ok(Vocabulary::resolve(&self.vocabulary)?)
    }

    pub async fn build_store(&self) -> Arc<dyn DocumentStore> {
        let client = billfinder_storage::client::build_client_with_region(&self.region).await;
        Arc::new(S3DocumentStore::new(client, &self.bucket))
    }

    pub async fn build_model(&self) -> Result<Arc<dyn CompletionModel>, IngestError> {
        Ok(build_model(&self.provider).await?)
    }

    pub fn build_bill_source(&self) -> Result<Arc<dyn BillSource>, IngestError> {
        let client = CongressClient::new(&self.congress_api_key, &self.congress_api_base)?;
        Ok(Arc::new(client))
    }
}
