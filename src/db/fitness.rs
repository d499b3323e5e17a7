// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed repository over a `KeyValueStore`.
//!
//! Provides high-level operations for:
//! - Accounts (`fitnessUsers`) and the current session user (`fitnessUser`)
//! - Profiles (`profile_{userId}`)
//! - Workout, food and step logs (`workouts_`, `foods_`, `steps_` per user)
//!
//! Collections are always read and written whole. A missing key reads as
//! an empty collection.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{keys, KeyValueStore, MemoryStore};
use crate::error::AppError;
use crate::models::{Account, FoodLog, StepLog, User, UserProfile, WorkoutLog};

/// Fitness data repository.
#[derive(Clone)]
pub struct FitnessDb {
    store: Arc<dyn KeyValueStore>,
}

impl FitnessDb {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Repository over a fresh in-memory store (tests, ephemeral runs).
    pub fn new_in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        match self.store.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AppError::Database(format!("Corrupt value at {}: {}", key, e))),
            None => Ok(None),
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| AppError::Database(format!("Failed to encode {}: {}", key, e)))?;
        self.store.set(key, &raw)
    }

    // ─── Account Operations ──────────────────────────────────────

    pub fn get_accounts(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.read_json(keys::USERS)?.unwrap_or_default())
    }

    pub fn set_accounts(&self, accounts: &[Account]) -> Result<(), AppError> {
        self.write_json(keys::USERS, accounts)
    }

    /// Find an account by normalized email.
    pub fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .get_accounts()?
            .into_iter()
            .find(|account| account.email == email))
    }

    pub fn get_current_user(&self) -> Result<Option<User>, AppError> {
        self.read_json(keys::CURRENT_USER)
    }

    pub fn set_current_user(&self, user: &User) -> Result<(), AppError> {
        self.write_json(keys::CURRENT_USER, user)
    }

    pub fn clear_current_user(&self) -> Result<(), AppError> {
        self.store.remove(keys::CURRENT_USER)
    }

    // ─── Profile Operations ──────────────────────────────────────

    pub fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        self.read_json(&keys::profile(user_id))
    }

    pub fn set_profile(&self, user_id: Uuid, profile: &UserProfile) -> Result<(), AppError> {
        self.write_json(&keys::profile(user_id), profile)
    }

    // ─── Log Operations ──────────────────────────────────────────

    pub fn get_workouts(&self, user_id: Uuid) -> Result<Vec<WorkoutLog>, AppError> {
        Ok(self.read_json(&keys::workouts(user_id))?.unwrap_or_default())
    }

    pub fn set_workouts(&self, user_id: Uuid, logs: &[WorkoutLog]) -> Result<(), AppError> {
        self.write_json(&keys::workouts(user_id), logs)
    }

    pub fn get_foods(&self, user_id: Uuid) -> Result<Vec<FoodLog>, AppError> {
        Ok(self.read_json(&keys::foods(user_id))?.unwrap_or_default())
    }

    pub fn set_foods(&self, user_id: Uuid, logs: &[FoodLog]) -> Result<(), AppError> {
        self.write_json(&keys::foods(user_id), logs)
    }

    pub fn get_steps(&self, user_id: Uuid) -> Result<Vec<StepLog>, AppError> {
        Ok(self.read_json(&keys::steps(user_id))?.unwrap_or_default())
    }

    pub fn set_steps(&self, user_id: Uuid, logs: &[StepLog]) -> Result<(), AppError> {
        self.write_json(&keys::steps(user_id), logs)
    }
}
