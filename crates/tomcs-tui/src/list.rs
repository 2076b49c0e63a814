//! Windowed list controller.
//!
//! Holds a list of labels, a selected index and a scroll window of fixed
//! size. Navigation keeps the selection inside the window; rendering only
//! ever looks at the visible slice.
//!
//! Invariants, for a non-empty list:
//! - `selected < len`
//! - `offset <= selected < offset + window`
//! - `offset <= len.saturating_sub(window)`

use std::fmt;
use std::ops::Range;

use tomcs_core::input::{KeyCode, KeyEvent};

/// Callback fired with the confirmed item.
pub type SelectListener = Box<dyn FnMut(&str) + Send>;

/// Read-only view of the controller's indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListState {
    /// Number of items.
    pub len: usize,
    /// Index of the highlighted item (0 when empty).
    pub selected_index: usize,
    /// Index of the first visible item.
    pub window_offset: usize,
    /// Maximum number of visible rows.
    pub window_size: usize,
}

/// A selectable list that shows a sliding window of its items.
pub struct ListController {
    items: Vec<String>,
    selected: usize,
    offset: usize,
    window: usize,
    active: bool,
    on_select: Option<SelectListener>,
}

impl ListController {
    /// Creates an active controller. A zero window is treated as one row.
    #[must_use]
    pub fn new(items: Vec<String>, window: usize) -> Self {
        Self {
            items,
            selected: 0,
            offset: 0,
            window: window.max(1),
            active: true,
            on_select: None,
        }
    }

    /// Registers the listener that [`confirm_selection`](Self::confirm_selection) calls.
    #[must_use]
    pub fn with_listener(mut self, listener: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(listener));
        self
    }

    /// Enables or disables keyboard handling.
    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether keyboard handling is enabled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Moves the highlight down one row, scrolling if it leaves the window.
    pub const fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
        if self.selected >= self.offset + self.window {
            self.offset = self.selected + 1 - self.window;
        }
    }

    /// Moves the highlight up one row, scrolling if it leaves the window.
    pub const fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    /// Hands the highlighted item to the listener.
    ///
    /// Returns `false` without doing anything when the list is empty or no
    /// listener is registered.
    pub fn confirm_selection(&mut self) -> bool {
        let Some(item) = self.items.get(self.selected) else {
            return false;
        };
        let Some(listener) = self.on_select.as_mut() else {
            return false;
        };
        tracing::debug!(item = %item, index = self.selected, "list item confirmed");
        listener(item);
        true
    }

    /// Replaces the items.
    ///
    /// Selection and scroll go back to the top unless the new items equal
    /// the current ones.
    pub fn set_items(&mut self, items: Vec<String>) {
        if items != self.items {
            self.selected = 0;
            self.offset = 0;
        }
        self.items = items;
    }

    /// Mutable access for in-place edits. Selection and scroll are kept.
    pub fn items_mut(&mut self) -> &mut [String] {
        &mut self.items
    }

    /// Applies a key press. Ignored while inactive.
    ///
    /// Up and Down navigate; Enter, Tab, Space, or a literal carriage return
    /// or newline confirm. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if !self.active {
            return false;
        }
        match key.code {
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Char(' ' | '\r' | '\n') => {
                let _ = self.confirm_selection();
            }
            _ => return false,
        }
        true
    }

    /// All items.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The highlighted item, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    /// Snapshot of the indices.
    #[must_use]
    pub const fn state(&self) -> ListState {
        ListState {
            len: self.items.len(),
            selected_index: self.selected,
            window_offset: self.offset,
            window_size: self.window,
        }
    }

    /// Index range of the rows to draw.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset.min(self.items.len());
        let end = (self.offset + self.window).min(self.items.len());
        start..end
    }

    /// Rows to draw, with their absolute index and whether they are highlighted.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &str, bool)> + '_ {
        let range = self.visible_range();
        self.items[range.clone()]
            .iter()
            .zip(range)
            .map(|(item, index)| (index, item.as_str(), index == self.selected))
    }

    /// Whether items are hidden above the window.
    #[must_use]
    pub const fn has_more_above(&self) -> bool {
        self.offset > 0
    }

    /// Whether items are hidden below the window.
    #[must_use]
    pub const fn has_more_below(&self) -> bool {
        self.offset + self.window < self.items.len()
    }
}

impl fmt::Debug for ListController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("offset", &self.offset)
            .field("window", &self.window)
            .field("active", &self.active)
            .field("has_listener", &self.on_select.is_some())
            .finish()
    }
}
