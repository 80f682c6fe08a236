use thiserror::Error;

/// Failure kinds surfaced by the remittance core and its orchestration layer.
#[derive(Error, Debug)]
pub enum RemitError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),
    #[error("Unsupported transfer method: {0}")]
    UnsupportedMethod(String),
    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),
    #[error("Reference code space exhausted after {0} attempts")]
    CodeSpaceExhausted(usize),
    #[error("Duplicate reference code: {0}")]
    DuplicateReference(String),
    #[error("Already registered: {0}")]
    AlreadyRegistered(String),
    #[error("Monthly limit exceeded: {0}")]
    LimitExceeded(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RemitError>;
