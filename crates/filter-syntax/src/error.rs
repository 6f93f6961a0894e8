use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("Unknown function symbol: {0}")]
    UnknownFunction(String),

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Malformed expression JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SyntaxError>;
