//! Property-based invariant tests for the drag state machine.
//!
//! Verifies:
//! 1. The machine is dragging exactly when the last report was a press or move.
//! 2. The position is the last press/move cell; releases never move it.
//! 3. The render offset is the position minus one, floored at zero.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use tomcs_common::types::Position;
use tomcs_core::input::{MouseButton, MouseEvent, MousePhase};
use tomcs_tui::drag::DragState;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_event() -> impl Strategy<Value = MouseEvent> {
    (1u16..=400, 1u16..=200, any::<bool>()).prop_map(|(x, y, down)| MouseEvent {
        button: MouseButton::Left,
        x,
        y,
        phase: if down {
            MousePhase::DownOrMove
        } else {
            MousePhase::Up
        },
    })
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn dragging_iff_last_event_was_down_or_move(
        events in prop::collection::vec(arb_event(), 1..64),
    ) {
        let mut drag = DragState::new(Position::new(10, 5));
        for event in &events {
            let _ = drag.apply(event);
        }
        let last = events.last().unwrap();
        prop_assert_eq!(drag.is_dragging(), last.phase == MousePhase::DownOrMove);
    }

    #[test]
    fn position_is_last_press_or_move(
        events in prop::collection::vec(arb_event(), 0..64),
    ) {
        let start = Position::new(10, 5);
        let mut drag = DragState::new(start);
        for event in &events {
            let _ = drag.apply(event);
        }
        let expected = events
            .iter()
            .rev()
            .find(|e| e.phase == MousePhase::DownOrMove)
            .map_or(start, MouseEvent::position);
        prop_assert_eq!(drag.position(), expected);
    }

    #[test]
    fn render_offset_is_position_minus_one(
        events in prop::collection::vec(arb_event(), 0..32),
        x in 0u16..=400,
        y in 0u16..=200,
    ) {
        let mut drag = DragState::new(Position::new(x, y));
        for event in &events {
            let _ = drag.apply(event);
        }
        let position = drag.position();
        prop_assert_eq!(
            drag.render_offset(),
            (position.x.saturating_sub(1), position.y.saturating_sub(1))
        );
    }
}
