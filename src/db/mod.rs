// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer: a key-value store trait, its backends and a typed
//! repository on top.

pub mod file;
pub mod fitness;
pub mod memory;

use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;

pub use file::FileStore;
pub use fitness::FitnessDb;
pub use memory::MemoryStore;

/// Key names as constants. Values under every key are JSON.
pub mod keys {
    use uuid::Uuid;

    /// Registered accounts (array)
    pub const USERS: &str = "fitnessUsers";
    /// Current session user
    pub const CURRENT_USER: &str = "fitnessUser";

    pub fn profile(user_id: Uuid) -> String {
        format!("profile_{}", user_id)
    }

    pub fn workouts(user_id: Uuid) -> String {
        format!("workouts_{}", user_id)
    }

    pub fn foods(user_id: Uuid) -> String {
        format!("foods_{}", user_id)
    }

    pub fn steps(user_id: Uuid) -> String {
        format!("steps_{}", user_id)
    }
}

/// Raw string key-value storage.
///
/// Every value is read and rewritten whole; backends need no partial
/// update support. Methods are synchronous and meant for small, local
/// stores; see `file` for the blocking I/O caveat.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Open the backend selected by configuration.
pub fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, AppError> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::File => Ok(Arc::new(FileStore::open(&config.data_dir)?)),
    }
}
