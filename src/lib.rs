// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitTrack: personal fitness tracking backend
//!
//! This crate stores per-user profiles, workout/food/step logs and derives
//! calorie targets, step goals, workout suggestions and login streaks from
//! them. A small JSON API exposes it to a frontend.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use db::{FitnessDb, KeyValueStore};
use services::{AccountService, Argon2Verifier, TrackerService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FitnessDb,
    pub accounts: AccountService,
    pub tracker: TrackerService,
}

impl AppState {
    /// Wire services over a store.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Self {
        let db = FitnessDb::new(store);
        let verifier = Arc::new(Argon2Verifier::new(config.password_hash_memory_kib));
        let accounts = AccountService::new(db.clone(), verifier);
        let tracker = TrackerService::new(db.clone());

        Self {
            config,
            db,
            accounts,
            tracker,
        }
    }
}
