//! Go source analysis for the sirish wrapper generator
//!
//! Parses Go files with tree-sitter and extracts what the generator needs:
//!
//! - [`CommentScanner`]: target names requested through `// sirish:Name`
//! - [`DeclarationExtractor`]: interface descriptions and the import map
//! - [`TypePrinter`]: canonical text for type expressions
//! - [`NameGenerator`]: collision-free synthetic identifiers

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod constants;

pub mod comments;
pub mod extractor;
pub mod imports;
pub mod names;
pub mod source;
pub mod type_printer;

pub use comments::CommentScanner;
pub use extractor::{DeclarationExtractor, Extraction};
pub use imports::{
    default_alias, ensure_tracing_import, ImportTracker, TRACING_IMPORT_ALIAS, TRACING_IMPORT_PATH,
};
pub use names::{LetterSource, NameGenerator, OsLetterSource};
pub use source::GoSource;
pub use type_printer::TypePrinter;

use sirish_core::error::Result;
use sirish_core::Targets;
use std::path::Path;

/// Scan `path` for comment markers and merge them behind `configured`
///
/// Configured names keep their order; marker names are appended when new.
pub fn resolve_targets(path: &Path, configured: &Targets) -> Result<Targets> {
    let discovered = CommentScanner::new().scan_file(path)?;
    Ok(Targets::merge_unique(configured, &discovered))
}
