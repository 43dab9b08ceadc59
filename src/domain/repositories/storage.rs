// src/domain/repositories/storage.rs
use crate::domain::error::DomainResult;
use std::fmt::Debug;

/// String slots addressed by key, the shape of browser local storage.
pub trait KeyValueStorage: Debug + Send + Sync {
    fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Fails with `DomainError::StorageUnavailable` when the value cannot be made durable.
    fn set(&self, key: &str, value: &str) -> DomainResult<()>;

    fn remove(&self, key: &str) -> DomainResult<()>;
}
