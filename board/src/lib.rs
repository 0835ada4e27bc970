//! Todo board: a single ordered list of to-do items that survives restarts.
//!
//! The board is built from the same pieces as every store-driven app:
//!
//! - [`types`]: items, ids, toasts, overlay and the action enum
//! - [`reducer`]: all state transitions, returning storage writes and
//!   delayed actions as effects
//! - [`persistence`]: the whole list as one JSON value under one key
//! - [`storage`]: a file-backed key-value store
//! - [`view`]: a pure projection of state into something drawable
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use todo_board::{BoardAction, BoardEnvironment, BoardReducer, BoardState, FileStorage, TodoRepository};
//! use todo_board::config::TimingConfig;
//! use todo_board_core::environment::SystemClock;
//! use todo_board_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = Arc::new(FileStorage::open(".todo-board")?);
//! let repository = TodoRepository::new(storage, "todos");
//! let state = BoardState::with_todos(repository.load());
//!
//! let env = BoardEnvironment::new(Arc::new(SystemClock), repository, TimingConfig::default());
//! let store = Store::new(state, BoardReducer::new(), env);
//!
//! store.send(BoardAction::AddTodo { text: "Buy milk".to_string() }).await?;
//! let count = store.state(|s| s.count()).await;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod config;
pub mod persistence;
pub mod reducer;
pub mod render;
pub mod storage;
pub mod types;
pub mod view;

pub use command::{Command, CommandError};
pub use config::{Config, ConfigError};
pub use persistence::TodoRepository;
pub use reducer::{BoardEnvironment, BoardReducer, COMPLETION_MESSAGE};
pub use storage::FileStorage;
pub use types::{BoardAction, BoardState, Overlay, Toast, ToastId, ToastKind, TodoId, TodoItem};
pub use view::{BoardView, Theme, project};
