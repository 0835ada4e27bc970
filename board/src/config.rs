//! Configuration management for the todo board.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::storage::is_valid_key;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Durable storage configuration
    pub storage: StorageConfig,
    /// Toast and overlay timers
    pub timings: TimingConfig,
    /// Log level used when `RUST_LOG` is not set (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Durable storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one file per key
    pub data_dir: PathBuf,
    /// Key the todo list is stored under
    pub key: String,
}

/// Timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Toast auto-close delay in milliseconds (default: 3000)
    pub toast_ms: u64,
    /// Overlay lifetime in milliseconds (default: 10000)
    pub overlay_ms: u64,
}

impl TimingConfig {
    /// Toast auto-close delay
    #[must_use]
    pub const fn toast(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    /// Overlay lifetime
    #[must_use]
    pub const fn overlay(&self) -> Duration {
        Duration::from_millis(self.overlay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            toast_ms: 3_000,
            overlay_ms: 10_000,
        }
    }
}

/// Invalid configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A timer was configured to zero
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// The storage key is empty
    #[error("storage key must not be empty")]
    EmptyStorageKey,

    /// The storage key cannot name a file
    #[error("storage key {0:?} may only use letters, digits, '-', '_' and '.', and must not start with '.'")]
    InvalidStorageKey(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: PathBuf::from(".todo-board"),
                key: "todos".to_string(),
            },
            timings: TimingConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TODO_BOARD_DATA_DIR` | `.todo-board` |
    /// | `TODO_BOARD_STORAGE_KEY` | `todos` |
    /// | `TODO_BOARD_TOAST_MS` | `3000` |
    /// | `TODO_BOARD_OVERLAY_MS` | `10000` |
    /// | `TODO_BOARD_LOG` | `info` |
    ///
    /// Values that fail to parse fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            storage: StorageConfig {
                data_dir: lookup("TODO_BOARD_DATA_DIR")
                    .map_or(defaults.storage.data_dir, PathBuf::from),
                key: lookup("TODO_BOARD_STORAGE_KEY").unwrap_or(defaults.storage.key),
            },
            timings: TimingConfig {
                toast_ms: lookup("TODO_BOARD_TOAST_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.timings.toast_ms),
                overlay_ms: lookup("TODO_BOARD_OVERLAY_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.timings.overlay_ms),
            },
            log_level: lookup("TODO_BOARD_LOG").unwrap_or(defaults.log_level),
        }
    }

    /// Reject configurations the board cannot run with
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for zero timers or a storage key that
    /// [`FileStorage`](crate::storage::FileStorage) would refuse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timings.toast_ms == 0 {
            return Err(ConfigError::ZeroDuration("TODO_BOARD_TOAST_MS"));
        }
        if self.timings.overlay_ms == 0 {
            return Err(ConfigError::ZeroDuration("TODO_BOARD_OVERLAY_MS"));
        }
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if !is_valid_key(&self.storage.key) {
            return Err(ConfigError::InvalidStorageKey(self.storage.key.clone()));
        }
        Ok(())
    }
}
