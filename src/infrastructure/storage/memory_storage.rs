// src/infrastructure/storage/memory_storage.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::storage::KeyValueStorage;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Process-local storage; nothing survives the process.
///
/// Writes can be made to fail to exercise the not-durable path.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::default();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn slots(&self) -> DomainResult<MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| DomainError::StorageUnavailable("memory storage lock poisoned".to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.slots()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StorageUnavailable(
                "writes disabled".to_string(),
            ));
        }
        self.slots()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> DomainResult<()> {
        self.slots()?.remove(key);
        Ok(())
    }
}
