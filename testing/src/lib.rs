//! # Todo Board Testing
//!
//! Testing utilities and helpers for the todo board.
//!
//! This crate provides:
//! - Deterministic clocks (`FixedClock`, `ManualClock`)
//! - In-memory and always-failing `KeyValueStorage` implementations
//! - `ReducerTest`, a Given-When-Then harness for reducers
//! - proptest strategies for to-do text
//!
//! ## Example
//!
//! ```ignore
//! use todo_board_testing::{test_clock, MemoryStorage};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let repository = TodoRepository::new(storage.clone(), "todos");
//! let env = BoardEnvironment::new(Arc::new(test_clock()), repository, TimingConfig::default());
//! ```

use chrono::{DateTime, Utc};
use todo_board_core::environment::Clock;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex, PoisonError};
    use todo_board_core::environment::KeyValueStorage;
    use todo_board_core::error::StorageError;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_board_testing::mocks::FixedClock;
    /// use todo_board_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that only moves when told to
    ///
    /// Clones share the same time, so a test can keep one handle and give
    /// another to the environment.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a manual clock starting at `time`
        #[must_use]
        pub fn new(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: std::time::Duration) {
            let by = chrono::Duration::from_std(by).unwrap_or(chrono::Duration::MAX);
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(epoch())
    }

    /// 2025-01-01 00:00:00 UTC, the start time of every test clock
    #[must_use]
    pub fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default()
    }

    /// In-memory key-value storage
    ///
    /// Clones share the same map, so tests can inspect what the board wrote.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        entries: Arc<Mutex<HashMap<String, String>>>,
        writes: Arc<Mutex<usize>>,
    }

    impl MemoryStorage {
        /// Create an empty storage
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a storage pre-seeded with one entry
        #[must_use]
        pub fn with_entry(key: &str, value: &str) -> Self {
            let storage = Self::new();
            storage
                .entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key.to_string(), value.to_string());
            storage
        }

        /// Raw value under `key`
        #[must_use]
        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(key)
                .cloned()
        }

        /// Number of successful `set` calls so far
        #[must_use]
        pub fn write_count(&self) -> usize {
            *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl KeyValueStorage for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.raw(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.entries
                .lock()
                .map_err(|_| StorageError::Unavailable("memory storage poisoned".to_string()))?
                .insert(key.to_string(), value.to_string());
            *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries
                .lock()
                .map_err(|_| StorageError::Unavailable("memory storage poisoned".to_string()))?
                .remove(key);
            Ok(())
        }
    }

    /// Storage whose every operation fails
    #[derive(Debug, Clone, Copy, Default)]
    pub struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("read refused".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("write refused".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("write refused".to_string()))
        }
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness
    ///
    /// Safe to call from many tests; only the first call installs it.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing utilities
pub mod properties {
    use proptest::prelude::*;

    /// Text a user could type that is not blank
    pub fn todo_text() -> impl Strategy<Value = String> {
        "[ \t]{0,2}[a-zA-Z0-9][a-zA-Z0-9 .,!?-]{0,30}[ \t]{0,2}"
    }

    /// Text that is empty or whitespace only
    pub fn blank_text() -> impl Strategy<Value = String> {
        "[ \t\n]{0,6}"
    }
}

// Re-export commonly used items
pub use mocks::{FailingStorage, FixedClock, ManualClock, MemoryStorage, epoch, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use todo_board_core::environment::KeyValueStorage;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp_millis(), 1_735_689_600_000);
    }

    #[test]
    fn manual_clock_advances_all_clones() {
        let clock = ManualClock::new(epoch());
        let shared = clock.clone();
        clock.advance(Duration::from_millis(1500));
        assert_eq!(shared.now().timestamp_millis(), epoch().timestamp_millis() + 1500);
    }

    #[test]
    fn memory_storage_overwrites() {
        let storage = MemoryStorage::new();
        storage.set("todos", "[1]").unwrap();
        storage.set("todos", "[2]").unwrap();
        assert_eq!(storage.get("todos").unwrap().as_deref(), Some("[2]"));
        assert_eq!(storage.write_count(), 2);

        storage.remove("todos").unwrap();
        assert_eq!(storage.get("todos").unwrap(), None);
    }

    #[test]
    fn failing_storage_fails() {
        assert!(FailingStorage.get("todos").is_err());
        assert!(FailingStorage.set("todos", "[]").is_err());
    }
}
