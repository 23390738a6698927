//! Wrapper generation for the sirish tool
//!
//! Turns extracted interface descriptions into Go source files:
//!
//! - [`WrapperRenderer`]: produces the wrapper source for one interface
//! - [`ImportFormatter`]: post-processes the import block of generated files
//! - [`WrapperGenerator`]: drives rendering, formatting and writing

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod formatter;
pub mod generate;
pub mod renderer;

pub use formatter::{GoImports, ImportFormatter};
pub use generate::{
    output_path, GenerationFailure, GenerationOptions, GenerationReport, WrapperGenerator,
};
pub use renderer::{type_name, ApmRenderer, TemplateContext, WrapperRenderer};
