use thiserror::Error;

#[derive(Debug, Error)]
pub enum CongressError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("Congress.gov returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response payload: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),
}
