//! Domain types for the todo board.
//!
//! The persisted model is just an ordered list of [`TodoItem`]s. Everything
//! else in [`BoardState`] (input buffer, toasts, overlay) lives only for the
//! session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unique identifier for a todo item
///
/// Derived from the creation time in Unix milliseconds and bumped when that
/// would not be larger than the newest id on the board, so ids are unique
/// and strictly increasing in insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Allocates the id for an item created at `now`
    ///
    /// Returns `None` when `latest` is already `i64::MAX`, since no larger
    /// id exists.
    #[must_use]
    pub fn allocate(now: DateTime<Utc>, latest: Option<Self>) -> Option<Self> {
        let stamp = now.timestamp_millis();
        match latest {
            Some(latest) if latest.0 >= stamp => latest.0.checked_add(1).map(Self),
            _ => Some(Self(stamp)),
        }
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A single todo item
///
/// Serialized as `{"id": number, "text": string, "completed": boolean}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier
    pub id: TodoId,
    /// Text exactly as the user typed it
    pub text: String,
    /// Whether the todo is completed
    pub completed: bool,
}

impl TodoItem {
    /// Creates a new, incomplete todo item
    #[must_use]
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Identifier of a visible toast
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Toast style
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Green check, used for the completion message
    Success,
}

/// A transient notification
///
/// The auto-close timer is paused while the pointer rests on the toast.
/// Every (re)scheduling of the timer bumps `generation`; expiries carrying
/// an older generation are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Toast identifier
    pub id: ToastId,
    /// Style
    pub kind: ToastKind,
    /// Message body
    pub message: String,
    /// When the running timer fires (meaningless while paused)
    pub deadline: DateTime<Utc>,
    /// Whether the pointer is over the toast
    pub paused: bool,
    /// Time left on the timer when it was paused
    pub remaining: Duration,
    /// Generation of the timer that may close this toast
    pub generation: u64,
}

/// Celebration overlay state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overlay {
    /// Nothing shown
    #[default]
    Idle,
    /// Overlay visible until the timer of `generation` fires
    Active {
        /// Activation counter value at the time of the latest trigger
        generation: u64,
        /// When the latest trigger happened
        activated_at: DateTime<Utc>,
    },
}

impl Overlay {
    /// Whether the overlay is showing
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// Complete board state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardState {
    /// Items in display order
    pub todos: Vec<TodoItem>,
    /// Pending text in the input field
    pub draft: String,
    /// Visible toasts, oldest first
    pub toasts: Vec<Toast>,
    /// Celebration overlay
    pub overlay: Overlay,
    pub(crate) next_toast_id: u64,
    pub(crate) overlay_generation: u64,
}

impl BoardState {
    /// Creates an empty board
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board showing `todos`
    #[must_use]
    pub fn with_todos(todos: Vec<TodoItem>) -> Self {
        Self {
            todos,
            ..Self::default()
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Largest id on the board
    #[must_use]
    pub fn latest_id(&self) -> Option<TodoId> {
        self.todos.iter().map(|t| t.id).max()
    }

    /// Returns a visible toast by ID
    #[must_use]
    pub fn toast(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }
}

/// Every input the board reacts to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardAction {
    // ========== Commands ==========
    /// Append a todo; blank text is ignored
    AddTodo {
        /// Text as typed, stored untrimmed
        text: String,
    },

    /// Add the input buffer's contents as a todo
    SubmitDraft,

    /// Replace the input buffer
    DraftChanged {
        /// New buffer contents
        text: String,
    },

    /// Flip a todo's completion flag
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Remove every todo
    DeleteAll,

    /// Remove completed todos and celebrate if there were any
    DeleteCompleted,

    /// Close a toast (close button or click)
    DismissToast {
        /// Toast to close
        id: ToastId,
    },

    /// Pointer entered a toast; its timer pauses
    ToastHovered {
        /// Hovered toast
        id: ToastId,
    },

    /// Pointer left a toast; its timer resumes
    ToastUnhovered {
        /// Toast that was hovered
        id: ToastId,
    },

    // ========== Timers ==========
    /// A toast's auto-close timer fired
    ToastExpired {
        /// Toast the timer belongs to
        id: ToastId,
        /// Timer generation
        generation: u64,
    },

    /// The overlay timer fired
    OverlayExpired {
        /// Overlay activation the timer belongs to
        generation: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap()
    }

    #[test]
    fn todo_id_uses_timestamp() {
        let id = TodoId::allocate(at(1_700_000_000_123), None).unwrap();
        assert_eq!(id.get(), 1_700_000_000_123);
        assert_eq!(id.to_string(), "1700000000123");
    }

    #[test]
    fn ids_honor_width_and_alignment() {
        assert_eq!(format!("{:>5}", TodoId::new(42)), "   42");
        assert_eq!(format!("{:<4}|", ToastId::new(7)), "7   |");
    }

    #[test]
    fn todo_id_allocation_stops_at_max() {
        let latest = TodoId::new(i64::MAX);
        assert_eq!(TodoId::allocate(at(2_000), Some(latest)), None);
    }

    #[test]
    fn todo_id_never_goes_backwards() {
        let latest = TodoId::new(2_000);
        assert_eq!(TodoId::allocate(at(2_000), Some(latest)), Some(TodoId::new(2_001)));
        assert_eq!(TodoId::allocate(at(1_000), Some(latest)), Some(TodoId::new(2_001)));
        assert_eq!(TodoId::allocate(at(5_000), Some(latest)), Some(TodoId::new(5_000)));
    }

    #[test]
    fn todo_item_serializes_flat() {
        let item = TodoItem::new(TodoId::new(1), "a");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"id":1,"text":"a","completed":false}"#);
    }

    #[test]
    fn todo_item_toggle() {
        let mut item = TodoItem::new(TodoId::new(1), "a");
        item.toggle();
        assert!(item.completed);
        item.toggle();
        assert!(!item.completed);
    }

    #[test]
    fn board_state_counts() {
        let mut done = TodoItem::new(TodoId::new(1), "a");
        done.completed = true;
        let state = BoardState::with_todos(vec![done, TodoItem::new(TodoId::new(7), "b")]);

        assert_eq!(state.count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.latest_id(), Some(TodoId::new(7)));
        assert!(state.exists(TodoId::new(7)));
        assert!(!state.exists(TodoId::new(3)));
        assert!(!state.overlay.is_active());
    }
}
