//! Terminal event handling.
//!
//! Everything the designer loop reacts to arrives as one of these events
//! and is applied to the application state one at a time.

use tomcs_image::{ConvertError, GlyphGrid};
use tomcs_runtime::poller::BindingSnapshot;

/// Events consumed by the designer loop.
#[derive(Debug)]
pub enum TerminalEvent {
    /// A chunk of raw bytes read from stdin.
    Input(Vec<u8>),
    /// Stdin reached end of file or failed.
    InputClosed,
    /// The binding snapshot changed.
    Bindings(BindingSnapshot),
    /// An image conversion finished.
    Image(Result<GlyphGrid, ConvertError>),
    /// A lone escape byte waited long enough to count as the Esc key.
    EscapeTimeout,
    /// A periodic tick for UI refresh.
    Tick,
}
