//! Parsed Go source files
//!
//! A [`GoSource`] owns the source text together with its tree-sitter syntax
//! tree. Trees containing syntax errors are rejected up front, so every
//! consumer can rely on a well-formed tree.

use crate::constants::node_kinds;
use sirish_core::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// A Go source file and its syntax tree
pub struct GoSource {
    path: PathBuf,
    text: String,
    tree: Tree,
}

impl std::fmt::Debug for GoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoSource")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .finish()
    }
}

impl GoSource {
    /// Read and parse the file at `path`
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;
        Self::parse(path, text)
    }

    /// Parse `text` as the contents of `path`
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let text = text.into();
        let file = path.display().to_string();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::parse(&file, format!("Failed to load Go grammar: {e}")))?;

        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| Error::parse(&file, "parser produced no syntax tree"))?;

        if tree.root_node().has_error() {
            let message = first_syntax_error(tree.root_node(), &text)
                .unwrap_or_else(|| "syntax error".to_string());
            return Err(Error::parse(file, message));
        }

        Ok(Self { path, text, tree })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Text covered by `node`
    pub fn node_text(&self, node: Node) -> Result<&str> {
        node_to_text(node, &self.text)
    }
}

/// Convert tree-sitter node to text
pub fn node_to_text<'s>(node: Node, source: &'s str) -> Result<&'s str> {
    node.utf8_text(source.as_bytes())
        .map_err(|e| Error::extraction(format!("Failed to convert node to text: {e}")))
}

/// Named children of `node`, without comments
pub(crate) fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != node_kinds::COMMENT)
        .collect()
}

/// All children of `node` carrying the field `field`
pub(crate) fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}

/// Visit every node of the tree in document order
pub(crate) fn for_each_node<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>)) {
    let mut cursor = root.walk();
    loop {
        visit(cursor.node());
        if cursor.goto_first_child() || cursor.goto_next_sibling() {
            continue;
        }
        loop {
            if !cursor.goto_parent() {
                return;
            }
            if cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

/// Describe the first ERROR or MISSING node of the tree
fn first_syntax_error(root: Node, source: &str) -> Option<String> {
    let mut found = None;
    for_each_node(root, |node| {
        if found.is_some() || !(node.is_error() || node.is_missing()) {
            return;
        }
        let pos = node.start_position();
        let (line, column) = (pos.row + 1, pos.column + 1);
        found = Some(if node.is_missing() {
            format!("missing `{}` at {line}:{column}", node.kind())
        } else {
            let snippet = node_to_text(node, source)
                .map(|text| text.lines().next().unwrap_or_default().trim().to_string())
                .unwrap_or_default();
            format!("syntax error at {line}:{column} near `{snippet}`")
        });
    });
    found
}
