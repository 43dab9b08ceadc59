// src/infrastructure/storage/file_storage.rs
use crate::domain::error::DomainResult;
use crate::domain::repositories::storage::KeyValueStorage;
use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, instrument, trace};

/// One file per key below `root`, written atomically.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>, quota_bytes: Option<usize>) -> Self {
        Self {
            root: root.into(),
            quota_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, InfrastructureError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(InfrastructureError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }

    fn write_slot(&self, path: &Path, value: &str) -> Result<(), InfrastructureError> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(InfrastructureError::QuotaExceeded {
                    size: value.len(),
                    quota,
                });
            }
        }

        fs::create_dir_all(&self.root).map_err(|e| {
            InfrastructureError::FileSystem(format!(
                "cannot create {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let fs_error =
            |e: std::io::Error| InfrastructureError::FileSystem(format!("{}: {}", path.display(), e));
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(fs_error)?;
        tmp.write_all(value.as_bytes()).map_err(fs_error)?;
        tmp.flush().map_err(fs_error)?;
        tmp.persist(path).map_err(|e| fs_error(e.error))?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    #[instrument(skip(self), level = "trace")]
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => {
                trace!(bytes = value.len(), "read {}", path.display());
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(InfrastructureError::FileSystem(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))
            .into()),
        }
    }

    #[instrument(skip(self, value), level = "debug", fields(bytes = value.len()))]
    fn set(&self, key: &str, value: &str) -> DomainResult<()> {
        let path = self.slot_path(key)?;
        self.write_slot(&path, value)?;
        debug!("wrote {}", path.display());
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    fn remove(&self, key: &str) -> DomainResult<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InfrastructureError::FileSystem(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))
            .into()),
        }
    }
}
