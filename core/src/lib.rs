//! # Todo Board Core
//!
//! Core traits and types shared by the todo board crates.
//!
//! The board is built as a functional core with an imperative shell:
//!
//! - **State**: everything the board knows (items, input buffer, toasts, overlay)
//! - **Action**: every input, whether it comes from the user or from a timer
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of a side effect (storage write, delayed action)
//! - **Environment**: injected dependencies (clock, durable storage)
//!
//! Reducers never touch storage or sleep. They return effects and the runtime
//! executes them.
//!
//! ## Example
//!
//! ```
//! use todo_board_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Tally {
//!     done: u32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum TallyAction {
//!     Finish,
//! }
//!
//! struct TallyReducer;
//!
//! impl Reducer for TallyReducer {
//!     type State = Tally;
//!     type Action = TallyAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut Tally,
//!         action: TallyAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<TallyAction>; 4]> {
//!         match action {
//!             TallyAction::Finish => state.done += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//!
//! let mut state = Tally::default();
//! TallyReducer.reduce(&mut state, TallyAction::Finish, &());
//! assert_eq!(state.done, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold all business logic and are deterministic given their environment.
pub mod reducer {
    use super::{effect::Effect, SmallVec};

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// Updates `state` in place and returns the effects the runtime
        /// should execute. An empty result means nothing to do.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values returned from reducers. The runtime decides how and
/// when they run.
pub mod effect {
    use super::environment::KeyValueStorage;
    use std::sync::Arc;
    use std::time::Duration;

    /// Effect type - describes a side effect to be executed
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Dispatch `action` back into the reducer once `duration` has elapsed
        ///
        /// Delays are one-shot and cannot be cancelled. Reducers that need
        /// "only the latest timer counts" semantics tag the action with a
        /// generation and ignore stale ones.
        Delay {
            /// How long to wait
            duration: Duration,
            /// Action to dispatch after delay
            action: Box<Action>,
        },

        /// Synchronous write to durable key-value storage
        ///
        /// Executed inline by the runtime before `send` returns. Failures are
        /// logged and dropped.
        Storage(StorageOperation),
    }

    impl<Action> Effect<Action> {
        /// Build a [`Effect::Delay`] for `action`
        #[must_use]
        pub fn delay(duration: Duration, action: Action) -> Self {
            Self::Delay {
                duration,
                action: Box::new(action),
            }
        }

        /// Returns true for [`Effect::None`]
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Self::None)
        }
    }

    // Manual Debug implementation since the storage handle is a trait object
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::None => write!(f, "Effect::None"),
                Self::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Self::Storage(op) => f.debug_tuple("Effect::Storage").field(op).finish(),
            }
        }
    }

    /// Operations against a [`KeyValueStorage`]
    pub enum StorageOperation {
        /// Overwrite `key` with `value`
        Write {
            /// Target storage
            storage: Arc<dyn KeyValueStorage>,
            /// Storage key
            key: String,
            /// Serialized value
            value: String,
        },
    }

    impl StorageOperation {
        /// The key this operation touches
        #[must_use]
        pub fn key(&self) -> &str {
            match self {
                Self::Write { key, .. } => key,
            }
        }
    }

    impl std::fmt::Debug for StorageOperation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Self::Write { key, value, .. } => f
                    .debug_struct("StorageOperation::Write")
                    .field("key", key)
                    .field("bytes", &value.len())
                    .finish_non_exhaustive(),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// through the reducer's Environment parameter.
pub mod environment {
    use super::error::StorageError;
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Durable string-keyed storage
    ///
    /// Values are opaque strings (the board stores JSON). Implementations
    /// must make `set` a full overwrite of any previous value.
    pub trait KeyValueStorage: Send + Sync {
        /// Read the value stored under `key`
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the backend cannot be read.
        fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

        /// Overwrite the value stored under `key`
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the backend cannot be written.
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

        /// Delete `key`; deleting a missing key is not an error
        ///
        /// # Errors
        ///
        /// Returns [`StorageError`] if the backend cannot be written.
        fn remove(&self, key: &str) -> Result<(), StorageError>;
    }
}

/// Error types shared across crates
pub mod error {
    use thiserror::Error;

    /// Errors raised by [`KeyValueStorage`](crate::environment::KeyValueStorage)
    /// implementations and by (de)serialization of stored values
    #[derive(Error, Debug)]
    pub enum StorageError {
        /// Underlying I/O failed
        #[error("Storage I/O failed: {0}")]
        Io(#[from] std::io::Error),

        /// Stored value could not be encoded or decoded
        #[error("Stored value is not valid: {0}")]
        Serialization(#[from] serde_json::Error),

        /// Backend refused the operation
        #[error("Storage unavailable: {0}")]
        Unavailable(String),
    }
}
