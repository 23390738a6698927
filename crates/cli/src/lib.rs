//! Library interface for the sirish CLI
//!
//! The binary in `main.rs` only parses flags and installs logging; the
//! pipeline and the banner live here so integration tests can drive them.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod banner;
pub mod pipeline;

pub use banner::Banner;
pub use pipeline::{run, Overrides, RunPlan, RunSummary};
