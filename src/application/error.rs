// src/application/error.rs
use crate::domain::bookmark::BookmarkId;
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(DomainError),

    #[error("Bookmark not found with ID {0}")]
    BookmarkNotFound(BookmarkId),

    #[error("A bookmark named '{0}' already exists")]
    DuplicateName(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// The in-memory list changed but could not be persisted
    #[error("Storage unavailable, change not saved: {0}")]
    StorageUnavailable(String),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            ApplicationError::Validation(msg) => {
                ApplicationError::Validation(format!("{}: {}", context.into(), msg))
            }
            err => ApplicationError::Other(format!("{}: {}", context.into(), err)),
        }
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidBookmark(msg) => ApplicationError::Validation(msg),
            DomainError::InvalidUrl(msg) => ApplicationError::Validation(format!("invalid url {}", msg)),
            DomainError::StorageUnavailable(msg) => ApplicationError::StorageUnavailable(msg),
            err => ApplicationError::Domain(err),
        }
    }
}

impl From<std::io::Error> for ApplicationError {
    fn from(err: std::io::Error) -> Self {
        ApplicationError::Domain(DomainError::Io(err))
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
