// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed key-value store: one `{key}.json` file per key.
//!
//! Writes go to a temporary file that is renamed over the target, so a
//! crash leaves either the old or the new value on disk.
//!
//! Calls do blocking `std::fs` I/O on the calling thread. Values are small
//! per-user JSON documents and the store backs a single local instance, so
//! handlers call it directly instead of hopping to `spawn_blocking`. A
//! deployment with many concurrent users needs a different backend.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::db::KeyValueStore;
use crate::error::AppError;

const MAX_KEY_LEN: usize = 128;

/// Durable store rooted at a data directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
    /// Serializes writers; readers never block.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, AppError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            AppError::Database(format!(
                "Failed to create data directory {}: {}",
                root.display(),
                e
            ))
        })?;

        tracing::info!(path = %root.display(), "Opened file store");

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

/// Keys become file names, so only a conservative alphabet is accepted.
fn validate_key(key: &str) -> Result<(), AppError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if valid {
        Ok(())
    } else {
        Err(AppError::Database(format!("Invalid store key: {:?}", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Database(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        let tmp_path = self.root.join(format!("{}.json.tmp", key));

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::Database("File store lock poisoned".to_string()))?;

        fs::write(&tmp_path, value).map_err(|e| {
            AppError::Database(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            AppError::Database(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        tracing::debug!(key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::Database("File store lock poisoned".to_string()))?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Database(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
