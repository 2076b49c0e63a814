//! Half-block glyph cells.
//!
//! A cell prints `▄` (lower half block). Its background shows through the
//! upper half and its foreground fills the lower half, so one character
//! carries two vertically stacked pixels.

use std::fmt::Write as _;

use tomcs_common::types::Rgb;

/// The lower-half-block glyph every cell prints.
pub const HALF_BLOCK: char = '▄';

/// One printed character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphCell {
    /// Upper pixel.
    pub background: Rgb,
    /// Lower pixel.
    pub foreground: Rgb,
    /// Always [`HALF_BLOCK`].
    pub glyph: char,
}

impl GlyphCell {
    /// Creates a cell from its upper and lower pixel.
    #[must_use]
    pub const fn new(top: Rgb, bottom: Rgb) -> Self {
        Self {
            background: top,
            foreground: bottom,
            glyph: HALF_BLOCK,
        }
    }
}

/// A finished conversion: rows of cells, all of equal width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlyphGrid {
    width: u32,
    rows: Vec<Vec<GlyphCell>>,
}

impl GlyphGrid {
    pub(crate) const fn new(width: u32, rows: Vec<Vec<GlyphCell>>) -> Self {
        Self { width, rows }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The cells, row by row.
    #[must_use]
    pub fn rows(&self) -> &[Vec<GlyphCell>] {
        &self.rows
    }

    /// The cell at a column and row, if inside the grid.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<&GlyphCell> {
        self.rows.get(row)?.get(column)
    }

    /// Renders the grid with 24-bit color escape sequences.
    ///
    /// Each cell sets its background and foreground and prints the glyph;
    /// each row ends with an attribute reset and a newline.
    #[must_use]
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            for cell in row {
                let (bg, fg) = (cell.background, cell.foreground);
                let _ = write!(
                    out,
                    "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m{}",
                    bg.r, bg.g, bg.b, fg.r, fg.g, fg.b, cell.glyph
                );
            }
            out.push_str("\x1b[0m\n");
        }
        out
    }
}
