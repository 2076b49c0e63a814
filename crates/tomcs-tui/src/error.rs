//! Errors raised by the designer.

use thiserror::Error;

/// Why the designer stopped abnormally.
#[derive(Debug, Error)]
pub enum TuiError {
    /// The terminal backend could not be initialized.
    #[error("cannot initialize terminal: {source}")]
    Setup {
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Drawing a frame failed.
    #[error("cannot draw frame: {source}")]
    Draw {
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
