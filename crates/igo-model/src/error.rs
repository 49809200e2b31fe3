use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("request json is not parseable: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed request: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
