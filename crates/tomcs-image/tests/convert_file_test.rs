//! Integration tests converting image files from disk.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tomcs_image::{ConvertError, ImageSource, convert, convert_async};

fn write_gradient(path: &std::path::Path, width: u32, height: u32, format: ImageFormat) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            u8::try_from(x * 255 / width.max(1)).unwrap(),
            u8::try_from(y * 255 / height.max(1)).unwrap(),
            128,
        ])
    });
    DynamicImage::ImageRgb8(img)
        .save_with_format(path, format)
        .expect("write image");
}

#[test]
fn png_file_converts_to_expected_dimensions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gradient.png");
    write_gradient(&path, 80, 60, ImageFormat::Png);

    let grid = convert(&ImageSource::from(path.as_path()), 40).expect("convert");
    assert_eq!(grid.width(), 40);
    // 80x60 scaled to 40 columns is 30 pixel rows, packed two per line.
    assert_eq!(grid.height(), 15);
    assert!(grid.rows().iter().all(|row| row.len() == 40));
}

#[test]
fn ansi_output_has_one_line_per_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gradient.bmp");
    write_gradient(&path, 10, 7, ImageFormat::Bmp);

    let grid = convert(&ImageSource::from(path.as_path()), 10).expect("convert");
    let ansi = grid.to_ansi();
    assert_eq!(grid.height(), 4);
    assert_eq!(ansi.lines().count(), 4);
    assert_eq!(ansi.matches('▄').count(), 40);
    assert!(ansi.lines().all(|line| line.ends_with("\x1b[0m")));
}

#[test]
fn unreadable_file_reports_its_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.png");

    let err = convert(&ImageSource::from(path.as_path()), 10).expect_err("must fail");
    assert!(matches!(err, ConvertError::Io { .. }));
    assert!(err.to_string().contains("missing.png"));
}

#[test]
fn text_file_is_not_an_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("notes.png");
    std::fs::write(&path, "just some text").expect("write");

    let err = convert(&ImageSource::from(path.as_path()), 10).expect_err("must fail");
    assert!(matches!(err, ConvertError::Decode { .. }));
}

#[tokio::test]
async fn async_conversion_reads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gradient.png");
    write_gradient(&path, 20, 20, ImageFormat::Png);

    let grid = convert_async(ImageSource::from(path), 20)
        .await
        .expect("convert");
    assert_eq!((grid.width(), grid.height()), (20, 10));
}
