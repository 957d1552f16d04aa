use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid document id: {0:?}")]
    InvalidDocumentId(String),

    #[error("unknown vocabulary revision: {0}")]
    UnknownVocabulary(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
