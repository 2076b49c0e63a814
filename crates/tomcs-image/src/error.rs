//! Errors raised while converting an image.

use std::path::PathBuf;

use thiserror::Error;

/// Why a conversion produced no grid.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The image file could not be read.
    #[error("cannot read image at {path}: {source}")]
    Io {
        /// Path of the image.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The bytes are not a decodable image.
    #[error("cannot decode image: {source}")]
    Decode {
        /// Underlying decoder error.
        #[from]
        source: image::ImageError,
    },

    /// A zero output width was requested.
    #[error("output width must be at least 1 column")]
    InvalidWidth,

    /// The image decoded to zero pixels.
    #[error("image has no pixels")]
    EmptyImage,

    /// The background conversion task panicked or was cancelled.
    #[error("conversion task failed: {source}")]
    Task {
        /// Underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}
