//! Raw terminal input.
//!
//! [`decoder::InputDecoder`] turns the byte chunks read from stdin into
//! [`event::InputEvent`]s. Nothing downstream of the decoder sees escape
//! sequences.

pub mod decoder;
pub mod event;

pub use decoder::InputDecoder;
pub use event::{InputEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MousePhase};
