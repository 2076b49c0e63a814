//! Image to glyph grid conversion.
//!
//! The image is resized to the requested column count, keeping its aspect
//! ratio, and its alpha channel is dropped. Output row `r` packs source
//! rows `2r` (background) and `2r + 1` (foreground); an odd final row is
//! padded with black.

use std::borrow::Cow;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use tomcs_common::types::Rgb;

use crate::error::ConvertError;
use crate::glyph::{GlyphCell, GlyphGrid};
use crate::source::ImageSource;

/// Converts an image source into a grid `width` columns wide.
///
/// # Errors
///
/// Returns an error if `width` is zero or the image cannot be read or
/// decoded. No partial grid is ever produced.
pub fn convert(source: &ImageSource, width: u32) -> Result<GlyphGrid, ConvertError> {
    if width == 0 {
        return Err(ConvertError::InvalidWidth);
    }
    let image = source.decode()?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ConvertError::EmptyImage);
    }
    let grid = convert_image(&image, width);
    tracing::debug!(
        source = %source.describe(),
        columns = grid.width(),
        rows = grid.height(),
        "converted image"
    );
    Ok(grid)
}

/// Converts on the blocking thread pool so the event loop keeps running.
///
/// # Errors
///
/// Same as [`convert`], plus [`ConvertError::Task`] if the worker fails.
pub async fn convert_async(source: ImageSource, width: u32) -> Result<GlyphGrid, ConvertError> {
    tokio::task::spawn_blocking(move || convert(&source, width)).await?
}

/// Converts an already decoded, non-empty image.
#[must_use]
pub fn convert_image(image: &DynamicImage, width: u32) -> GlyphGrid {
    let resized = resize_to_width(image, width.max(1));
    let pixels = resized.to_rgb8();
    let (columns, height) = pixels.dimensions();

    let pixel = |x: u32, y: u32| {
        let [r, g, b] = pixels.get_pixel(x, y).0;
        Rgb::new(r, g, b)
    };

    let rows = (0..height.div_ceil(2))
        .map(|row| {
            let top = row * 2;
            let bottom = top + 1;
            (0..columns)
                .map(|column| {
                    let lower = if bottom < height {
                        pixel(column, bottom)
                    } else {
                        Rgb::BLACK
                    };
                    GlyphCell::new(pixel(column, top), lower)
                })
                .collect()
        })
        .collect();

    GlyphGrid::new(columns, rows)
}

fn resize_to_width(image: &DynamicImage, width: u32) -> Cow<'_, DynamicImage> {
    let (orig_w, orig_h) = image.dimensions();
    if orig_w == width {
        return Cow::Borrowed(image);
    }
    let height = scaled_height(orig_w, orig_h, width);
    Cow::Owned(image.resize_exact(width, height, FilterType::Triangle))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scaled_height(orig_w: u32, orig_h: u32, width: u32) -> u32 {
    let height = f64::from(orig_h) * f64::from(width) / f64::from(orig_w);
    (height.round() as u32).max(1)
}
