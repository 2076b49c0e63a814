//! # tomcs-core
//!
//! Terminal primitives for the tomcs canvas engine:
//! - **Input**: decoding raw stdin bytes into key and SGR mouse events.
//! - **Terminal**: scoped raw mode, alternate screen, and mouse tracking
//!   (modes 1003 and 1006), reverted on drop, panic, and termination signals.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod input;
pub mod terminal;
