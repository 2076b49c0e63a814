//! Drag state machine.
//!
//! Two states: idle and dragging. A press or motion report moves into (or
//! stays in) dragging and takes the report's cell as the new position; a
//! release returns to idle and keeps the position.

use tomcs_common::types::Position;
use tomcs_core::input::{MouseEvent, MousePhase};

/// Position and phase of the dragged element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    position: Position,
    dragging: bool,
}

impl DragState {
    /// Starts idle at `position`.
    #[must_use]
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            dragging: false,
        }
    }

    /// Feeds one mouse report. Returns whether anything changed.
    pub fn apply(&mut self, event: &MouseEvent) -> bool {
        let before = *self;
        match event.phase {
            MousePhase::DownOrMove => {
                self.dragging = true;
                self.position = event.position();
            }
            MousePhase::Up => self.dragging = false,
        }
        *self != before
    }

    /// Current 1-based position.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether a button is held.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Zero-based cell where the element is drawn.
    #[must_use]
    pub const fn render_offset(&self) -> (u16, u16) {
        self.position.layout_offset()
    }
}
