//! Designer color themes.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use tomcs_common::types::{Rgb, ThemeName};

/// Colors and border style for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Which built-in theme this is.
    pub name: ThemeName,
    /// Accent for focus and selection.
    pub primary: Rgb,
    /// Accent for idle elements.
    pub secondary: Rgb,
    /// Canvas background.
    pub background: Rgb,
    /// Color of an element being dragged.
    pub success: Rgb,
    /// Color of error messages.
    pub error: Rgb,
    /// Border drawn around panes and components.
    pub border: BorderType,
}

impl Theme {
    /// Returns the palette for a built-in theme.
    #[must_use]
    pub const fn get(name: ThemeName) -> Self {
        match name {
            ThemeName::Cyberpunk => Self {
                name,
                primary: Rgb::new(0xff, 0x00, 0xff),
                secondary: Rgb::new(0x00, 0xff, 0xff),
                background: Rgb::new(0x00, 0x00, 0x00),
                success: Rgb::new(0x00, 0xff, 0x00),
                error: Rgb::new(0xff, 0x00, 0x00),
                border: BorderType::Double,
            },
            ThemeName::Matrix => Self {
                name,
                primary: Rgb::new(0x00, 0xff, 0x41),
                secondary: Rgb::new(0x00, 0x8f, 0x11),
                background: Rgb::new(0x00, 0x00, 0x00),
                success: Rgb::new(0x00, 0xff, 0x41),
                error: Rgb::new(0xff, 0x00, 0x00),
                border: BorderType::Thick,
            },
            ThemeName::Nord => Self {
                name,
                primary: Rgb::new(0x88, 0xc0, 0xd0),
                secondary: Rgb::new(0x81, 0xa1, 0xc1),
                background: Rgb::new(0x2e, 0x34, 0x40),
                success: Rgb::new(0xa3, 0xbe, 0x8c),
                error: Rgb::new(0xbf, 0x61, 0x6a),
                border: BorderType::Rounded,
            },
        }
    }

    /// Base style for pane contents.
    #[must_use]
    pub fn base(&self) -> Style {
        Style::default().bg(color(self.background))
    }

    /// Highlighted text.
    #[must_use]
    pub fn accent(&self) -> Style {
        self.base()
            .fg(color(self.primary))
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary text and idle borders.
    #[must_use]
    pub fn muted(&self) -> Style {
        self.base().fg(color(self.secondary))
    }

    /// Error text.
    #[must_use]
    pub fn error_style(&self) -> Style {
        self.base().fg(color(self.error))
    }

    /// Border of a canvas component.
    #[must_use]
    pub fn component_border(&self, selected: bool, dragging: bool) -> Style {
        match (selected, dragging) {
            (true, true) => self.base().fg(color(self.success)),
            (true, false) => self.base().fg(color(self.primary)),
            _ => self.muted(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::get(ThemeName::default())
    }
}

/// Converts a palette color to a terminal color.
#[must_use]
pub const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
