//! Command handling for the todo board.
//!
//! Every mutation of the list ends with a storage write of the full list.
//! Deleting completed items also shows a toast and starts the overlay; both
//! close themselves through delayed actions.

use crate::config::TimingConfig;
use crate::persistence::TodoRepository;
use crate::types::{BoardAction, BoardState, Overlay, Toast, ToastId, ToastKind, TodoId, TodoItem};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use todo_board_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};

/// Message shown after completed items are cleared
pub const COMPLETION_MESSAGE: &str = "Congratulations on completing your tasks!";

/// Environment dependencies for the board reducer
#[derive(Clone)]
pub struct BoardEnvironment {
    /// Clock for ids and toast deadlines
    pub clock: Arc<dyn Clock>,
    /// Where the list is persisted
    pub repository: TodoRepository,
    /// Toast and overlay timers
    pub timings: TimingConfig,
}

impl BoardEnvironment {
    /// Creates a new `BoardEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, repository: TodoRepository, timings: TimingConfig) -> Self {
        Self {
            clock,
            repository,
            timings,
        }
    }
}

/// Reducer for the board
#[derive(Clone, Debug, Default)]
pub struct BoardReducer;

type Effects = SmallVec<[Effect<BoardAction>; 4]>;

impl BoardReducer {
    /// Creates a new `BoardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn persist(state: &BoardState, env: &BoardEnvironment) -> Effect<BoardAction> {
        env.repository.save_effect(&state.todos)
    }

    fn add_todo(state: &mut BoardState, text: String, env: &BoardEnvironment) -> Effects {
        // Only the emptiness check trims; the stored text is what was typed.
        if text.trim().is_empty() {
            tracing::debug!("Ignoring blank todo");
            return SmallVec::new();
        }

        let Some(id) = TodoId::allocate(env.clock.now(), state.latest_id()) else {
            tracing::warn!("No todo id left above the newest one, ignoring add");
            return SmallVec::new();
        };
        tracing::debug!(%id, "Adding todo");
        state.todos.push(TodoItem::new(id, text));
        state.draft.clear();

        smallvec![Self::persist(state, env)]
    }

    fn toggle_todo(state: &mut BoardState, id: TodoId, env: &BoardEnvironment) -> Effects {
        let Some(todo) = state.todos.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(%id, "Toggle for unknown todo ignored");
            return SmallVec::new();
        };

        todo.toggle();
        tracing::debug!(%id, completed = todo.completed, "Toggled todo");
        smallvec![Self::persist(state, env)]
    }

    fn delete_all(state: &mut BoardState, env: &BoardEnvironment) -> Effects {
        tracing::debug!(removed = state.todos.len(), "Deleting all todos");
        state.todos.clear();
        smallvec![Self::persist(state, env)]
    }

    fn delete_completed(state: &mut BoardState, env: &BoardEnvironment) -> Effects {
        let (completed, incomplete): (Vec<TodoItem>, Vec<TodoItem>) =
            state.todos.iter().cloned().partition(|t| t.completed);

        if completed.is_empty() {
            tracing::debug!("No completed todos to delete");
            return SmallVec::new();
        }

        tracing::debug!(removed = completed.len(), "Deleting completed todos");
        state.todos = incomplete;

        let now = env.clock.now();
        let toast_delay = env.timings.toast();
        let overlay_delay = env.timings.overlay();

        let toast_id = ToastId::new(state.next_toast_id);
        state.next_toast_id += 1;
        state.toasts.push(Toast {
            id: toast_id,
            kind: ToastKind::Success,
            message: COMPLETION_MESSAGE.to_string(),
            deadline: deadline_after(now, toast_delay),
            paused: false,
            remaining: toast_delay,
            generation: 0,
        });

        state.overlay_generation += 1;
        let generation = state.overlay_generation;
        state.overlay = Overlay::Active {
            generation,
            activated_at: now,
        };

        smallvec![
            Self::persist(state, env),
            Effect::delay(
                toast_delay,
                BoardAction::ToastExpired {
                    id: toast_id,
                    generation: 0,
                },
            ),
            Effect::delay(overlay_delay, BoardAction::OverlayExpired { generation }),
        ]
    }

    fn pause_toast(state: &mut BoardState, id: ToastId, env: &BoardEnvironment) -> Effects {
        let now = env.clock.now();
        if let Some(toast) = state.toasts.iter_mut().find(|t| t.id == id && !t.paused) {
            toast.remaining = (toast.deadline - now).to_std().unwrap_or(Duration::ZERO);
            toast.paused = true;
            tracing::debug!(%id, remaining = ?toast.remaining, "Paused toast");
        }
        SmallVec::new()
    }

    fn resume_toast(state: &mut BoardState, id: ToastId, env: &BoardEnvironment) -> Effects {
        let Some(toast) = state.toasts.iter_mut().find(|t| t.id == id && t.paused) else {
            return SmallVec::new();
        };

        toast.paused = false;
        toast.generation += 1;
        toast.deadline = deadline_after(env.clock.now(), toast.remaining);
        tracing::debug!(%id, remaining = ?toast.remaining, "Resumed toast");

        smallvec![Effect::delay(
            toast.remaining,
            BoardAction::ToastExpired {
                id,
                generation: toast.generation,
            },
        )]
    }

    fn expire_toast(state: &mut BoardState, id: ToastId, generation: u64) {
        let before = state.toasts.len();
        state
            .toasts
            .retain(|t| !(t.id == id && !t.paused && t.generation == generation));
        if state.toasts.len() != before {
            tracing::debug!(%id, "Toast closed by timer");
        }
    }

    fn expire_overlay(state: &mut BoardState, generation: u64) {
        match state.overlay {
            Overlay::Active { generation: current, .. } if current == generation => {
                tracing::debug!(generation, "Overlay finished");
                state.overlay = Overlay::Idle;
            },
            _ => tracing::trace!(generation, "Stale overlay timer ignored"),
        }
    }
}

fn deadline_after(now: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(duration)
        .ok()
        .and_then(|d| now.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl Reducer for BoardReducer {
    type State = BoardState;
    type Action = BoardAction;
    type Environment = BoardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            BoardAction::AddTodo { text } => Self::add_todo(state, text, env),
            BoardAction::SubmitDraft => {
                let text = state.draft.clone();
                Self::add_todo(state, text, env)
            },
            BoardAction::DraftChanged { text } => {
                state.draft = text;
                SmallVec::new()
            },
            BoardAction::ToggleTodo { id } => Self::toggle_todo(state, id, env),
            BoardAction::DeleteAll => Self::delete_all(state, env),
            BoardAction::DeleteCompleted => Self::delete_completed(state, env),
            BoardAction::DismissToast { id } => {
                state.toasts.retain(|t| t.id != id);
                SmallVec::new()
            },
            BoardAction::ToastHovered { id } => Self::pause_toast(state, id, env),
            BoardAction::ToastUnhovered { id } => Self::resume_toast(state, id, env),

            // ========== Timers ==========
            BoardAction::ToastExpired { id, generation } => {
                Self::expire_toast(state, id, generation);
                SmallVec::new()
            },
            BoardAction::OverlayExpired { generation } => {
                Self::expire_overlay(state, generation);
                SmallVec::new()
            },
        }
    }
}
