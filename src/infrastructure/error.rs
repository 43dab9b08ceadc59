// src/infrastructure/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Storage quota exceeded: {size} bytes > {quota} bytes")]
    QuotaExceeded { size: usize, quota: usize },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Template error: {0}")]
    Template(String),
}

// Implement conversion from infrastructure errors to domain errors
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            err @ InfrastructureError::QuotaExceeded { .. } => {
                DomainError::StorageUnavailable(err.to_string())
            }
            InfrastructureError::FileSystem(msg) => DomainError::StorageUnavailable(msg),
            InfrastructureError::InvalidKey(msg) => DomainError::Other(msg),
            InfrastructureError::Serialization(msg) => DomainError::SerializationError(msg),
            InfrastructureError::Template(msg) => DomainError::Other(msg),
        }
    }
}

impl From<minijinja::Error> for InfrastructureError {
    fn from(error: minijinja::Error) -> Self {
        InfrastructureError::Template(error.to_string())
    }
}
