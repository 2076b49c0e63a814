//! `tomcs convert` — Print an image as colored half-block characters.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tomcs_image::ImageSource;

/// Arguments for the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Image file to convert (PNG, JPEG, GIF or BMP).
    pub image: PathBuf,

    /// Output width in character columns. Defaults to `image_width` from
    /// the configuration file.
    #[arg(short, long)]
    pub width: Option<u32>,
}

/// Executes the `convert` command.
///
/// # Errors
///
/// Returns an error if the image cannot be read or decoded, or the width is
/// zero.
pub fn execute(config_path: &Path, args: ConvertArgs) -> anyhow::Result<()> {
    let width = match args.width {
        Some(width) => width,
        None => super::load_config(config_path)?.image_width,
    };

    let source = ImageSource::Path(args.image);
    let grid = tomcs_image::convert(&source, width)
        .with_context(|| format!("cannot convert {}", source.describe()))?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(grid.to_ansi().as_bytes())?;
    stdout.flush()?;
    Ok(())
}
