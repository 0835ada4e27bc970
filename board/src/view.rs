//! Pure projection of [`BoardState`] into what a front end draws.
//!
//! Nothing here decides anything. Controls carry the action they dispatch so
//! a front end only has to wire events to [`ControlView::action`] and
//! [`ItemView::toggle_action`].

use crate::types::{BoardAction, BoardState, ToastId, ToastKind, TodoId};

/// Board heading
pub const TITLE: &str = "To-do list";
/// Placeholder shown in the empty input field
pub const PLACEHOLDER: &str = "Add new item";

/// Presentation attributes for a named visual state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presentation {
    /// Foreground color
    pub color: &'static str,
    /// Background when hovered
    pub hover_background: &'static str,
    /// Foreground when hovered
    pub hover_color: &'static str,
    /// Draw text struck through
    pub strike_through: bool,
}

/// Named button styles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    /// The add control
    Add,
    /// Bulk delete controls
    Bulk,
}

/// How an item is drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemVisual {
    /// Not yet done
    Pending,
    /// Done
    Completed,
}

/// Maps visual states to presentation attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Accent for the add control
    pub secondary: &'static str,
    /// Accent for bulk controls
    pub deep_blue: &'static str,
    /// Text drawn on accent backgrounds
    pub contrast_text: &'static str,
    /// Regular text
    pub text: &'static str,
    /// Text of completed items
    pub muted_text: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            secondary: "#f50057",
            deep_blue: "#050038",
            contrast_text: "#ffffff",
            text: "#212121",
            muted_text: "#9e9e9e",
        }
    }
}

impl Theme {
    /// Outlined button that fills with its accent on hover
    #[must_use]
    pub const fn button(&self, style: ButtonStyle) -> Presentation {
        let accent = match style {
            ButtonStyle::Add => self.secondary,
            ButtonStyle::Bulk => self.deep_blue,
        };
        Presentation {
            color: accent,
            hover_background: accent,
            hover_color: self.contrast_text,
            strike_through: false,
        }
    }

    /// List row
    #[must_use]
    pub const fn item(&self, visual: ItemVisual) -> Presentation {
        match visual {
            ItemVisual::Pending => Presentation {
                color: self.text,
                hover_background: "transparent",
                hover_color: self.text,
                strike_through: false,
            },
            ItemVisual::Completed => Presentation {
                color: self.muted_text,
                hover_background: "transparent",
                hover_color: self.muted_text,
                strike_through: true,
            },
        }
    }
}

/// Input field bound to the draft
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    /// Current draft
    pub value: String,
    /// Placeholder text
    pub placeholder: &'static str,
}

/// Which command a control triggers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlIntent {
    /// Add the draft
    Add,
    /// Delete every item
    DeleteAll,
    /// Delete completed items
    DeleteCompleted,
}

/// A button
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlView {
    /// Caption
    pub label: &'static str,
    /// Named style
    pub style: ButtonStyle,
    /// Resolved presentation
    pub presentation: Presentation,
    /// What pressing it does
    pub intent: ControlIntent,
}

impl ControlView {
    fn new(label: &'static str, style: ButtonStyle, intent: ControlIntent, theme: &Theme) -> Self {
        Self {
            label,
            style,
            presentation: theme.button(style),
            intent,
        }
    }

    /// Action to dispatch when pressed
    #[must_use]
    pub const fn action(&self) -> BoardAction {
        match self.intent {
            ControlIntent::Add => BoardAction::SubmitDraft,
            ControlIntent::DeleteAll => BoardAction::DeleteAll,
            ControlIntent::DeleteCompleted => BoardAction::DeleteCompleted,
        }
    }
}

/// One row of the list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemView {
    /// Item id
    pub id: TodoId,
    /// Item text
    pub text: String,
    /// Checkbox state
    pub checked: bool,
    /// Visual state
    pub visual: ItemVisual,
    /// Resolved presentation
    pub presentation: Presentation,
}

impl ItemView {
    /// Action to dispatch when the checkbox changes
    #[must_use]
    pub const fn toggle_action(&self) -> BoardAction {
        BoardAction::ToggleTodo { id: self.id }
    }
}

/// Where toasts appear
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPosition {
    /// Centered at the top edge
    TopCenter,
}

/// A visible toast and its fixed behavior flags
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastView {
    /// Toast id
    pub id: ToastId,
    /// Style
    pub kind: ToastKind,
    /// Message body
    pub message: String,
    /// Placement
    pub position: ToastPosition,
    /// Whether to draw the countdown bar
    pub show_progress: bool,
    /// Clicking the toast closes it
    pub close_on_click: bool,
    /// Hovering pauses the countdown
    pub pause_on_hover: bool,
    /// The toast can be dragged away
    pub draggable: bool,
    /// Countdown currently paused
    pub paused: bool,
}

/// Confetti palette
pub const OVERLAY_COLORS: [&str; 4] = ["#050038", "#00FFD1", "#FF0081", "#FFD100"];

/// Parameters of the active celebration overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayView {
    /// Number of confetti pieces
    pub pieces: u32,
    /// Fall speed factor
    pub gravity: f32,
    /// Whether pieces respawn after falling out
    pub recycle: bool,
    /// Piece colors
    pub colors: [&'static str; 4],
    /// Covers the whole screen above everything else
    pub fullscreen: bool,
}

impl Default for OverlayView {
    fn default() -> Self {
        Self {
            pieces: 4000,
            gravity: 0.1,
            recycle: false,
            colors: OVERLAY_COLORS,
            fullscreen: true,
        }
    }
}

/// Everything a front end needs to draw the board
#[derive(Clone, Debug, PartialEq)]
pub struct BoardView {
    /// Heading
    pub title: &'static str,
    /// Input field
    pub input: InputView,
    /// Add control
    pub add: ControlView,
    /// Rows in display order
    pub items: Vec<ItemView>,
    /// Delete-all control
    pub delete_all: ControlView,
    /// Delete-completed control
    pub delete_completed: ControlView,
    /// Visible toasts
    pub toasts: Vec<ToastView>,
    /// Overlay, when active
    pub overlay: Option<OverlayView>,
}

/// Projects the current state into a view
#[must_use]
pub fn project(state: &BoardState, theme: &Theme) -> BoardView {
    let items = state
        .todos
        .iter()
        .map(|todo| {
            let visual = if todo.completed {
                ItemVisual::Completed
            } else {
                ItemVisual::Pending
            };
            ItemView {
                id: todo.id,
                text: todo.text.clone(),
                checked: todo.completed,
                visual,
                presentation: theme.item(visual),
            }
        })
        .collect();

    let toasts = state
        .toasts
        .iter()
        .map(|toast| ToastView {
            id: toast.id,
            kind: toast.kind,
            message: toast.message.clone(),
            position: ToastPosition::TopCenter,
            show_progress: false,
            close_on_click: true,
            pause_on_hover: true,
            draggable: true,
            paused: toast.paused,
        })
        .collect();

    BoardView {
        title: TITLE,
        input: InputView {
            value: state.draft.clone(),
            placeholder: PLACEHOLDER,
        },
        add: ControlView::new("Create", ButtonStyle::Add, ControlIntent::Add, theme),
        items,
        delete_all: ControlView::new(
            "Delete all",
            ButtonStyle::Bulk,
            ControlIntent::DeleteAll,
            theme,
        ),
        delete_completed: ControlView::new(
            "Delete completed",
            ButtonStyle::Bulk,
            ControlIntent::DeleteCompleted,
            theme,
        ),
        toasts,
        overlay: state.overlay.is_active().then(OverlayView::default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Overlay, Toast, TodoItem};
    use std::time::Duration;
    use todo_board_testing::epoch;

    fn state() -> BoardState {
        let mut done = TodoItem::new(TodoId::new(1), "a");
        done.completed = true;
        BoardState {
            draft: "half typed".to_string(),
            ..BoardState::with_todos(vec![done, TodoItem::new(TodoId::new(2), "b")])
        }
    }

    #[test]
    fn projects_items_in_order_with_visual_state() {
        let theme = Theme::default();
        let view = project(&state(), &theme);

        assert_eq!(view.title, TITLE);
        assert_eq!(view.input.value, "half typed");
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[0].visual, ItemVisual::Completed);
        assert!(view.items[0].checked);
        assert!(view.items[0].presentation.strike_through);
        assert_eq!(view.items[1].visual, ItemVisual::Pending);
        assert!(!view.items[1].presentation.strike_through);
        assert!(view.toasts.is_empty());
        assert!(view.overlay.is_none());
    }

    #[test]
    fn controls_bind_commands() {
        let view = project(&state(), &Theme::default());

        assert_eq!(view.add.action(), BoardAction::SubmitDraft);
        assert_eq!(view.delete_all.action(), BoardAction::DeleteAll);
        assert_eq!(view.delete_completed.action(), BoardAction::DeleteCompleted);
        assert_eq!(
            view.items[1].toggle_action(),
            BoardAction::ToggleTodo { id: TodoId::new(2) }
        );
    }

    #[test]
    fn buttons_use_named_styles() {
        let theme = Theme::default();
        let view = project(&state(), &theme);

        assert_eq!(view.add.presentation.color, theme.secondary);
        assert_eq!(view.delete_all.presentation.color, "#050038");
        assert_eq!(view.delete_completed.presentation.hover_color, theme.contrast_text);
    }

    #[test]
    fn shows_toast_and_overlay_when_active() {
        let mut state = state();
        state.toasts.push(Toast {
            id: ToastId::new(0),
            kind: ToastKind::Success,
            message: "done".to_string(),
            deadline: epoch(),
            paused: true,
            remaining: Duration::from_millis(1200),
            generation: 0,
        });
        state.overlay = Overlay::Active {
            generation: 1,
            activated_at: epoch(),
        };

        let view = project(&state, &Theme::default());

        assert_eq!(view.toasts.len(), 1);
        let toast = &view.toasts[0];
        assert_eq!(toast.position, ToastPosition::TopCenter);
        assert!(!toast.show_progress);
        assert!(toast.close_on_click && toast.pause_on_hover && toast.paused);

        let overlay = view.overlay.unwrap();
        assert_eq!(overlay.pieces, 4000);
        assert!(!overlay.recycle);
        assert_eq!(overlay.colors, OVERLAY_COLORS);
    }

    #[test]
    fn projection_does_not_touch_state() {
        let before = state();
        let after = before.clone();
        let _ = project(&after, &Theme::default());
        assert_eq!(before, after);
    }
}
