//! Plain-text rendering of a [`BoardView`] for the terminal front end.

use crate::view::{BoardView, ItemVisual};
use std::fmt;

/// Renders the board as lines of text
///
/// Item and toast ids are printed so they can be passed back to commands.
#[must_use]
pub fn render(view: &BoardView) -> String {
    view.to_string()
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;

        for toast in &self.toasts {
            let paused = if toast.paused { " (paused)" } else { "" };
            writeln!(f, "[toast {}] {}{}", toast.id, toast.message, paused)?;
        }

        if self.input.value.is_empty() {
            writeln!(f, "> ({})", self.input.placeholder)?;
        } else {
            writeln!(f, "> {}", self.input.value)?;
        }

        if self.items.is_empty() {
            writeln!(f, "  (no items)")?;
        }
        for item in &self.items {
            let mark = match item.visual {
                ItemVisual::Completed => 'x',
                ItemVisual::Pending => ' ',
            };
            writeln!(f, "  [{mark}] {:>13}  {}", item.id, item.text)?;
        }

        writeln!(
            f,
            "[{}] [{}] [{}]",
            self.add.label, self.delete_all.label, self.delete_completed.label
        )?;

        if let Some(overlay) = &self.overlay {
            writeln!(f, "*** {} pieces of confetti falling ***", overlay.pieces)?;
        }

        Ok(())
    }
}
