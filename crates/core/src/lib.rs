//! Core types for the sirish wrapper generator
//!
//! This crate provides the foundations shared by the parser, the generator
//! and the command-line tool:
//!
//! - **Model**: extracted interface, method, parameter and import descriptions
//! - **Targets**: requested declaration names and their merge rule
//! - **Configuration**: layered generation settings
//! - **Error handling**: the error taxonomy of a run

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod error;
pub mod model;
pub mod targets;

// Re-export main types for convenience
pub use config::{Config, GenerationConfig};
pub use error::{Error, Result, ResultExt};
pub use model::{InterfaceInfo, Method, ParamInfo, PkgImports, ResultInfo, TypeParamInfo};
pub use targets::Targets;

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
