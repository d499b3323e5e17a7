// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod auth;
pub mod catalog;
pub mod metrics;
pub mod tracker;

pub use auth::{AccountService, Argon2Verifier, PasswordVerifier};
pub use tracker::{TrackerService, UserData};
