//! Domain primitive types used across the tomcs workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TomcsError;

/// A terminal cell coordinate.
///
/// Values coming from mouse reports are 1-based; [`Position::layout_offset`]
/// converts them to 0-based offsets for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
}

impl Position {
    /// Creates a position from a column and a row.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns the 0-based `(column, row)` offset of a 1-based position.
    #[must_use]
    pub const fn layout_offset(self) -> (u16, u16) {
        (self.x.saturating_sub(1), self.y.saturating_sub(1))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 24-bit color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure black, used for missing pixels.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` hex string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a 7-character `#rrggbb` string.
    pub fn from_hex(hex: &str) -> crate::error::Result<Self> {
        let invalid = || TomcsError::Config {
            message: format!("invalid hex color: {hex}"),
        };
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Built-in color themes for the designer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Neon pink and cyan on black.
    #[default]
    Cyberpunk,
    /// Green on black.
    Matrix,
    /// Frost blues on slate.
    Nord,
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cyberpunk => write!(f, "cyberpunk"),
            Self::Matrix => write!(f, "matrix"),
            Self::Nord => write!(f, "nord"),
        }
    }
}

impl FromStr for ThemeName {
    type Err = TomcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cyberpunk" => Ok(Self::Cyberpunk),
            "matrix" => Ok(Self::Matrix),
            "nord" => Ok(Self::Nord),
            other => Err(TomcsError::NotFound {
                kind: "theme",
                id: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offset_converts_one_based_coordinates() {
        assert_eq!(Position::new(12, 5).layout_offset(), (11, 4));
    }

    #[test]
    fn layout_offset_clamps_at_zero() {
        assert_eq!(Position::new(0, 0).layout_offset(), (0, 0));
        assert_eq!(Position::new(1, 0).layout_offset(), (0, 0));
    }

    #[test]
    fn rgb_parses_hex() {
        assert_eq!(Rgb::from_hex("#ff00ff").unwrap(), Rgb::new(255, 0, 255));
        assert_eq!(Rgb::from_hex("#2E3440").unwrap(), Rgb::new(0x2e, 0x34, 0x40));
    }

    #[test]
    fn rgb_rejects_malformed_hex() {
        assert!(Rgb::from_hex("ff00ff").is_err());
        assert!(Rgb::from_hex("#ff00f").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
    }

    #[test]
    fn rgb_display_roundtrips_through_hex() {
        let color = Rgb::new(0x88, 0xc0, 0xd0);
        assert_eq!(Rgb::from_hex(&color.to_string()).unwrap(), color);
    }

    #[test]
    fn theme_name_parses_case_insensitively() {
        assert_eq!("Nord".parse::<ThemeName>().unwrap(), ThemeName::Nord);
        assert!("solarized".parse::<ThemeName>().is_err());
    }
}
