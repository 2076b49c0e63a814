//! Where an image comes from.

use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::error::ConvertError;

/// An image file on disk or encoded image bytes.
///
/// The format is sniffed from the content, so any format the `image`
/// crate was built with is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file to read.
    Path(PathBuf),
    /// Encoded bytes (PNG, JPEG, GIF, BMP).
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// Reads and decodes the image.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::Io`] if the file cannot be read and
    /// [`ConvertError::Decode`] if the content is not a supported image.
    pub fn decode(&self) -> Result<DynamicImage, ConvertError> {
        match self {
            Self::Path(path) => {
                tracing::debug!(path = %path.display(), "reading image");
                let bytes = std::fs::read(path).map_err(|e| ConvertError::Io {
                    path: path.clone(),
                    source: e,
                })?;
                Ok(image::load_from_memory(&bytes)?)
            }
            Self::Bytes(bytes) => Ok(image::load_from_memory(bytes)?),
        }
    }

    /// Short description for logs and error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
