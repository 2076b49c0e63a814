//! Decoded input event types.

use std::borrow::Cow;

use bitflags::bitflags;
use tomcs_common::types::Position;

bitflags! {
    /// Keyboard modifiers held during a key press.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Alt / Meta.
        const ALT = 0b0010;
        /// Control.
        const CTRL = 0b0100;
    }
}

/// A key, independent of the byte sequence that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Return (carriage return).
    Enter,
    /// Tab.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Escape.
    Esc,
    /// A printable character, or a literal control character such as `\n`.
    Char(char),
}

impl KeyCode {
    /// Returns the textual name of the key.
    #[must_use]
    pub fn name(self) -> Cow<'static, str> {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Home => "home",
            Self::End => "end",
            Self::PageUp => "pageup",
            Self::PageDown => "pagedown",
            Self::Enter => "return",
            Self::Tab => "tab",
            Self::BackTab => "backtab",
            Self::Backspace => "backspace",
            Self::Delete => "delete",
            Self::Esc => "escape",
            Self::Char(' ') => "space",
            Self::Char(c) => return Cow::Owned(c.to_string()),
        };
        Cow::Borrowed(name)
    }
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,
    /// Modifiers held at the time.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a key event without modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns this event with the given modifiers added.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    /// Whether this is `Ctrl+<c>`.
    #[must_use]
    pub fn is_ctrl(&self, c: char) -> bool {
        self.code == KeyCode::Char(c) && self.modifiers.contains(Modifiers::CTRL)
    }
}

/// Which button a mouse report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button, pressed or held.
    Left,
    /// Any other button, the wheel, or motion with no button held.
    Other,
}

/// Action carried by a mouse report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MousePhase {
    /// Button pressed, or pointer moved (`M` terminator).
    DownOrMove,
    /// Button released (`m` terminator).
    Up,
}

/// A decoded SGR mouse report. Coordinates are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// Button the report refers to.
    pub button: MouseButton,
    /// Column, starting at 1.
    pub x: u16,
    /// Row, starting at 1.
    pub y: u16,
    /// Press/move or release.
    pub phase: MousePhase,
}

impl MouseEvent {
    /// Returns the report's cell as a [`Position`].
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// A decoded terminal input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// A key press.
    Key(KeyEvent),
    /// A mouse report.
    Mouse(MouseEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names() {
        assert_eq!(KeyCode::Enter.name(), "return");
        assert_eq!(KeyCode::Char(' ').name(), "space");
        assert_eq!(KeyCode::Char('a').name(), "a");
        assert_eq!(KeyCode::Esc.name(), "escape");
    }

    #[test]
    fn ctrl_detection() {
        let key = KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL);
        assert!(key.is_ctrl('c'));
        assert!(!KeyEvent::new(KeyCode::Char('c')).is_ctrl('c'));
    }
}
