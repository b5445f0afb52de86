use thiserror::Error;

pub type AdmitResult<T> = Result<T, AdmitError>;

#[derive(Error, Debug)]
pub enum AdmitError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
