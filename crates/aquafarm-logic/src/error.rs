use thiserror::Error;

#[derive(Error, Debug)]
pub enum AquaError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Batch contains no configurations")]
    EmptyBatch,
}

pub type AquaResult<T> = Result<T, AquaError>;
