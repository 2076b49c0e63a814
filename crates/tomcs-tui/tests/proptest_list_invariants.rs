//! Property-based invariant tests for the windowed list controller.
//!
//! Verifies:
//! 1. After any navigation the selection is in range and inside the window.
//! 2. The window never scrolls past the last full page.
//! 3. `set_items` with a different length resets to the top.
//! 4. The visible rows are exactly the window slice.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use tomcs_tui::list::ListController;

// ── Strategy helpers ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Nav {
    Next,
    Prev,
}

fn arb_nav() -> impl Strategy<Value = Nav> {
    prop_oneof![Just(Nav::Next), Just(Nav::Prev)]
}

fn items(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("item-{i}")).collect()
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn selection_stays_inside_window(
        len in 1usize..40,
        window in 1usize..12,
        moves in prop::collection::vec(arb_nav(), 0..120),
    ) {
        let mut list = ListController::new(items(len), window);
        for nav in moves {
            match nav {
                Nav::Next => list.select_next(),
                Nav::Prev => list.select_prev(),
            }
            let s = list.state();
            prop_assert!(s.selected_index < s.len);
            prop_assert!(s.window_offset <= s.selected_index);
            prop_assert!(s.selected_index < s.window_offset + s.window_size);
            prop_assert!(s.window_offset <= s.len.saturating_sub(s.window_size));
        }
    }

    #[test]
    fn different_length_resets_to_top(
        len in 1usize..30,
        other in 0usize..30,
        window in 1usize..8,
        steps in 0usize..40,
    ) {
        prop_assume!(len != other);
        let mut list = ListController::new(items(len), window);
        for _ in 0..steps {
            list.select_next();
        }
        list.set_items(items(other));
        prop_assert_eq!(list.state().selected_index, 0);
        prop_assert_eq!(list.state().window_offset, 0);
    }

    #[test]
    fn visible_rows_match_window(
        len in 0usize..30,
        window in 1usize..8,
        steps in 0usize..40,
    ) {
        let mut list = ListController::new(items(len), window);
        for _ in 0..steps {
            list.select_next();
        }
        let s = list.state();
        let rows: Vec<usize> = list.visible().map(|(index, _, _)| index).collect();
        let expected: Vec<usize> = (s.window_offset..(s.window_offset + window).min(len)).collect();
        prop_assert_eq!(rows, expected);
        prop_assert_eq!(list.has_more_above(), s.window_offset > 0);
        prop_assert_eq!(list.has_more_below(), s.window_offset + window < len);
    }
}
