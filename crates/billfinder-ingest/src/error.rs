use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("bill source error: {0}")]
    Source(#[from] billfinder_congress::CongressError),

    /// The listing payload had no `bills` array.
    #[error("No bills found in API response")]
    NoBills { payload: Value },

    #[error("storage error: {0}")]
    Storage(#[from] billfinder_storage::error::StorageError),

    #[error("model error: {0}")]
    Llm(#[from] billfinder_llm::error::LlmError),

    #[error("core error: {0}")]
    Core(#[from] billfinder_core::error::CoreError),
}
