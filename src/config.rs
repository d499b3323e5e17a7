// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use std::env;
use std::path::PathBuf;

/// Argon2id memory cost in KiB (the argon2 crate default).
const DEFAULT_PASSWORD_HASH_MEMORY_KIB: u32 = 19_456;
const MIN_PASSWORD_HASH_MEMORY_KIB: u32 = 8;

/// Which key-value backend holds user data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map, lost on exit.
    Memory,
    /// One JSON file per key under `data_dir`.
    File,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            _ => Err(ConfigError::Invalid("FITTRACK_STORE")),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Storage backend selection
    pub store_backend: StoreBackend,
    /// Directory for the file backend
    pub data_dir: PathBuf,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Argon2id memory cost (KiB) for stored credentials
    pub password_hash_memory_kib: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let store_backend = match env::var("FITTRACK_STORE") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreBackend::File,
        };

        let password_hash_memory_kib = match env::var("PASSWORD_HASH_MEMORY_KIB") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n >= MIN_PASSWORD_HASH_MEMORY_KIB)
                .ok_or(ConfigError::Invalid("PASSWORD_HASH_MEMORY_KIB"))?,
            Err(_) => DEFAULT_PASSWORD_HASH_MEMORY_KIB,
        };

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            store_backend,
            data_dir: env::var("FITTRACK_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            password_hash_memory_kib,
        })
    }

    /// In-memory config for tests. Uses a low hash cost so suites stay fast.
    pub fn test_default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            store_backend: StoreBackend::Memory,
            data_dir: PathBuf::from("data"),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            password_hash_memory_kib: 64,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
