// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local accounts: signup, login, logout and the current session user.
//!
//! Credentials are checked through the `PasswordVerifier` trait. The
//! bundled implementation stores Argon2id hashes as PHC strings; a
//! deployment with an external identity provider plugs in its own verifier.

use std::sync::Arc;

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::db::FitnessDb;
use crate::error::{AppError, Result};
use crate::models::{Account, User};

/// Credential hashing and verification boundary.
pub trait PasswordVerifier: Send + Sync {
    /// Produce the string stored alongside the account.
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Check `password` against a stored string. Malformed input is a
    /// mismatch, not an error.
    fn verify_password(&self, password: &str, stored: &str) -> bool;
}

/// Argon2id verifier.
///
/// Hashes are PHC strings (`$argon2id$v=19$m=...`), so each carries its own
/// parameters and stays verifiable after the configured cost changes.
pub struct Argon2Verifier {
    argon2: Argon2<'static>,
}

impl Argon2Verifier {
    /// Argon2id with `memory_kib` memory cost and the crate's default time
    /// and parallelism costs.
    pub fn new(memory_kib: u32) -> Self {
        let params = Params::new(
            memory_kib,
            Params::DEFAULT_T_COST,
            Params::DEFAULT_P_COST,
            None,
        )
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, memory_kib, "Invalid Argon2 parameters, using defaults");
            Params::default()
        });

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl PasswordVerifier for Argon2Verifier {
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Argon2 password hashing failed: {e}")))
    }

    fn verify_password(&self, password: &str, stored: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Trim and lowercase an email for storage and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Account operations over the `fitnessUsers` and `fitnessUser` keys.
#[derive(Clone)]
pub struct AccountService {
    db: FitnessDb,
    verifier: Arc<dyn PasswordVerifier>,
    /// Serializes read-modify-write of the account list.
    accounts_lock: Arc<Mutex<()>>,
}

impl AccountService {
    pub fn new(db: FitnessDb, verifier: Arc<dyn PasswordVerifier>) -> Self {
        Self {
            db,
            verifier,
            accounts_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Register a new account and make it the current session user.
    pub async fn signup(&self, email: &str, password: &str, full_name: &str) -> Result<User> {
        let email = normalize_email(email);

        let verifier = self.verifier.clone();
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || verifier.hash_password(&password))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Hash task failed: {}", e)))??;

        let _guard = self.accounts_lock.lock().await;

        let mut accounts = self.db.get_accounts()?;
        if accounts.iter().any(|account| account.email == email) {
            tracing::info!(email = %email, "Signup rejected: email already registered");
            return Err(AppError::DuplicateAccount);
        }

        let account = Account {
            id: Uuid::new_v4(),
            email,
            full_name: full_name.trim().to_string(),
            password_hash,
        };
        let user = User::from(&account);

        accounts.push(account);
        self.db.set_accounts(&accounts)?;
        self.db.set_current_user(&user)?;

        tracing::info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    /// Check credentials and make the account the current session user.
    ///
    /// Unknown email and wrong password are reported identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let email = normalize_email(email);

        let Some(account) = self.db.find_account_by_email(&email)? else {
            tracing::info!("Login rejected: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        let verifier = self.verifier.clone();
        let password = password.to_string();
        let stored = account.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verifier.verify_password(&password, &stored))
                .await
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Verify task failed: {}", e)))?;

        if !matches {
            tracing::info!(user_id = %account.id, "Login rejected: bad password");
            return Err(AppError::InvalidCredentials);
        }

        let user = User::from(&account);
        self.db.set_current_user(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// Clear the current session user if it is `user_id`.
    pub fn logout(&self, user_id: Uuid) -> Result<()> {
        match self.db.get_current_user()? {
            Some(current) if current.id == user_id => {
                self.db.clear_current_user()?;
                tracing::info!(user_id = %user_id, "User logged out");
            }
            _ => tracing::debug!(user_id = %user_id, "Logout for non-current user"),
        }
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        self.db.get_current_user()
    }

    /// Look up a registered account's public view by id.
    pub fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self
            .db
            .get_accounts()?
            .iter()
            .find(|account| account.id == user_id)
            .map(User::from))
    }
}
