//! Store location configuration.
//!
//! # Invariants
//! - An unset or blank location falls back to `DEFAULT_DB_FILE_NAME`.

use crate::db::DEFAULT_DB_FILE_NAME;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable that overrides the database location.
pub const DB_PATH_ENV: &str = "BROOCH_STORE_DB";

/// Settings needed to open a [`crate::CatalogStore`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file. Created on first open.
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
        }
    }
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Reads `BROOCH_STORE_DB`, falling back to the default file name.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DB_PATH_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(path) if !path.trim().is_empty() => Self::new(path.trim()),
            _ => Self::default(),
        }
    }
}
