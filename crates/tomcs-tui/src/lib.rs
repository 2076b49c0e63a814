//! # tomcs-tui
//!
//! Interactive canvas designer for tomcs.
//!
//! Built with `ratatui` on top of the raw input decoder, providing:
//! - The drag state machine and component selection.
//! - A windowed list controller used by the component library picker.
//! - Live command-binding output on bound components.
//! - Half-block image components.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod app;
pub mod component;
pub mod designer;
pub mod drag;
pub mod error;
pub mod event;
pub mod list;
pub mod theme;
pub mod ui;

pub use designer::run;
pub use error::TuiError;
