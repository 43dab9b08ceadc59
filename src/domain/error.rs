// src/domain/error.rs
use crate::domain::bookmark::BookmarkBuilderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid bookmark: {0}")]
    InvalidBookmark(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Failed to serialize bookmarks: {0}")]
    SerializationError(String),

    #[error("Failed to deserialize bookmarks: {0}")]
    DeserializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        let context = context.into();
        match self {
            DomainError::StorageUnavailable(msg) => {
                DomainError::StorageUnavailable(format!("{}: {}", context, msg))
            }
            DomainError::SerializationError(msg) => {
                DomainError::SerializationError(format!("{}: {}", context, msg))
            }
            DomainError::DeserializationError(msg) => {
                DomainError::DeserializationError(format!("{}: {}", context, msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context, msg)),
            err => DomainError::Other(format!("{}: {}", context, err)),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<BookmarkBuilderError> for DomainError {
    fn from(e: BookmarkBuilderError) -> Self {
        DomainError::InvalidBookmark(e.to_string())
    }
}
