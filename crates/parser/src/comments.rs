//! In-source target markers
//!
//! A Go comment of the form `// sirish:Name` or `//sirish:Name` asks for
//! `Name` to be wrapped even when it is not passed on the command line.

use crate::constants::node_kinds;
use crate::source::{for_each_node, GoSource};
use sirish_core::error::Result;
use sirish_core::Targets;
use std::path::Path;
use tracing::debug;

/// Marker forms, in the order they are tried
pub const MARKERS: [&str; 2] = ["// sirish:", "//sirish:"];

/// Collects target names from comment markers
#[derive(Debug, Default, Clone, Copy)]
pub struct CommentScanner;

impl CommentScanner {
    pub fn new() -> Self {
        Self
    }

    /// Parse the file at `path` and collect its markers
    ///
    /// A file that does not parse yields an error rather than partial results.
    pub fn scan_file(&self, path: &Path) -> Result<Targets> {
        let source = GoSource::read(path)?;
        Ok(self.scan(&source))
    }

    /// Collect markers in file order, duplicates included
    pub fn scan(&self, source: &GoSource) -> Targets {
        let mut targets = Targets::new();
        for_each_node(source.root(), |node| {
            if node.kind() != node_kinds::COMMENT {
                return;
            }
            let Ok(text) = source.node_text(node) else {
                return;
            };
            match marker_name(text) {
                Some(name) if !name.is_empty() => {
                    debug!(target_name = name, "Found comment marker");
                    targets.push(name);
                }
                Some(_) => debug!(comment = text, "Ignoring marker without a name"),
                None => {}
            }
        });
        targets
    }
}

/// Name following the first marker in `comment`, trimmed
fn marker_name(comment: &str) -> Option<&str> {
    MARKERS
        .iter()
        .find_map(|marker| comment.split_once(marker))
        .map(|(_, rest)| rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(text: &str) -> Vec<String> {
        let source = GoSource::parse("/tmp/markers.go", text).expect("parse");
        CommentScanner::new()
            .scan(&source)
            .iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_marker_name_forms() {
        assert_eq!(marker_name("// sirish:Foo"), Some("Foo"));
        assert_eq!(marker_name("//sirish:Bar  "), Some("Bar"));
        assert_eq!(marker_name("// sirish:"), Some(""));
        assert_eq!(marker_name("// just a comment"), None);
        assert_eq!(marker_name("//go:generate sirish -t Foo"), None);
    }

    #[test]
    fn test_scan_collects_in_file_order_with_duplicates() {
        let targets = scan(
            r#"package store

// sirish:Repo
type Repo interface {
	Get() error
}

//sirish:Cache
type Cache interface {
	// sirish:Repo
	Put() error
}
"#,
        );
        assert_eq!(targets, vec!["Repo", "Cache", "Repo"]);
    }

    #[test]
    fn test_scan_skips_empty_markers() {
        let targets = scan("package a\n\n// sirish:   \n");
        assert!(targets.is_empty());
    }

    #[test]
    fn test_scan_file_propagates_parse_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.go");
        std::fs::write(&path, "package broken\n// sirish:Foo\nfunc (\n").expect("write");
        assert!(CommentScanner::new().scan_file(&path).is_err());
    }
}
