//! # tomcs-image
//!
//! Converts raster images into grids of colored terminal glyphs.
//!
//! Handles:
//! - **Sources**: image files on disk or encoded bytes in memory.
//! - **Glyphs**: the half-block cell model and its ANSI rendering.
//! - **Conversion**: aspect-preserving resize and two-pixels-per-cell packing,
//!   synchronously or on the blocking pool.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod convert;
pub mod error;
pub mod glyph;
pub mod source;

pub use convert::{convert, convert_async, convert_image};
pub use error::ConvertError;
pub use glyph::{GlyphCell, GlyphGrid, HALF_BLOCK};
pub use source::ImageSource;
