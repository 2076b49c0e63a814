//! Background work for the tomcs canvas: shell execution and the
//! command-binding poller that keeps live component data fresh.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod exec;
pub mod poller;
