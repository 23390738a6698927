//! Canonical text for Go type expressions
//!
//! The printer rebuilds a type from its syntax tree instead of slicing the
//! source, so spacing, line breaks and comments inside the declaration do not
//! leak into generated code.

use crate::constants::{field_names, node_kinds, punctuation};
use crate::source::{field_children, named_children, node_to_text};
use sirish_core::error::{Error, Result};
use tracing::debug;
use tree_sitter::Node;

/// Prints type nodes of one source file
#[derive(Debug, Clone, Copy)]
pub struct TypePrinter<'s> {
    source: &'s str,
}

impl<'s> TypePrinter<'s> {
    pub fn new(source: &'s str) -> Self {
        Self { source }
    }

    /// Canonical text of `node`, or an empty string when it cannot be printed
    pub fn print(&self, node: Node) -> String {
        let mut out = String::new();
        match self.render(node, &mut out) {
            Ok(()) => out,
            Err(e) => {
                debug!(kind = node.kind(), "Unprintable type expression: {e}");
                String::new()
            }
        }
    }

    fn render(&self, node: Node, out: &mut String) -> Result<()> {
        match node.kind() {
            node_kinds::TYPE_IDENTIFIER
            | node_kinds::IDENTIFIER
            | node_kinds::PACKAGE_IDENTIFIER
            | node_kinds::FIELD_IDENTIFIER => out.push_str(self.text(node)?),
            node_kinds::QUALIFIED_TYPE => {
                self.render(self.field(node, field_names::PACKAGE)?, out)?;
                out.push('.');
                self.render(self.field(node, field_names::NAME)?, out)?;
            }
            node_kinds::POINTER_TYPE => {
                out.push('*');
                self.render(self.only_child(node)?, out)?;
            }
            node_kinds::SLICE_TYPE => {
                out.push_str("[]");
                self.render(self.field(node, field_names::ELEMENT)?, out)?;
            }
            node_kinds::ARRAY_TYPE => {
                out.push('[');
                self.render_tokens(self.field(node, field_names::LENGTH)?, out)?;
                out.push(']');
                self.render(self.field(node, field_names::ELEMENT)?, out)?;
            }
            node_kinds::IMPLICIT_LENGTH_ARRAY_TYPE => {
                out.push_str("[...]");
                self.render(self.field(node, field_names::ELEMENT)?, out)?;
            }
            node_kinds::MAP_TYPE => {
                out.push_str("map[");
                self.render(self.field(node, field_names::KEY)?, out)?;
                out.push(']');
                self.render(self.field(node, field_names::VALUE)?, out)?;
            }
            node_kinds::CHANNEL_TYPE => self.render_channel(node, out)?,
            node_kinds::FUNCTION_TYPE => {
                out.push_str("func");
                self.render_signature(node, out)?;
            }
            node_kinds::PARAMETER_LIST => self.render_parameter_list(node, out)?,
            node_kinds::GENERIC_TYPE => {
                self.render(self.field(node, field_names::TYPE)?, out)?;
                self.render(self.field(node, field_names::TYPE_ARGUMENTS)?, out)?;
            }
            node_kinds::TYPE_ARGUMENTS => {
                out.push('[');
                self.render_separated(&named_children(node), ", ", out)?;
                out.push(']');
            }
            node_kinds::TYPE_ELEM | node_kinds::TYPE_CONSTRAINT => {
                self.render_separated(&named_children(node), " | ", out)?;
            }
            node_kinds::NEGATED_TYPE => {
                out.push('~');
                self.render(self.only_child(node)?, out)?;
            }
            node_kinds::PARENTHESIZED_TYPE => {
                out.push('(');
                self.render(self.only_child(node)?, out)?;
                out.push(')');
            }
            node_kinds::STRUCT_TYPE => self.render_struct(node, out)?,
            node_kinds::INTERFACE_TYPE => self.render_interface(node, out)?,
            node_kinds::METHOD_ELEM | node_kinds::METHOD_SPEC => {
                self.render(self.field(node, field_names::NAME)?, out)?;
                self.render_signature(node, out)?;
            }
            _ => self.render_tokens(node, out)?,
        }
        Ok(())
    }

    /// `(params) result` of a function type or method element
    fn render_signature(&self, node: Node, out: &mut String) -> Result<()> {
        self.render(self.field(node, field_names::PARAMETERS)?, out)?;
        if let Some(result) = node.child_by_field_name(field_names::RESULT) {
            out.push(' ');
            self.render(result, out)?;
        }
        Ok(())
    }

    fn render_parameter_list(&self, node: Node, out: &mut String) -> Result<()> {
        out.push('(');
        for (i, decl) in named_children(node).into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let names = field_children(decl, field_names::NAME);
            for (j, name) in names.iter().enumerate() {
                if j > 0 {
                    out.push_str(", ");
                }
                out.push_str(self.text(*name)?);
            }
            if !names.is_empty() {
                out.push(' ');
            }
            if decl.kind() == node_kinds::VARIADIC_PARAMETER_DECLARATION {
                out.push_str(punctuation::ELLIPSIS);
            }
            self.render(self.field(decl, field_names::TYPE)?, out)?;
        }
        out.push(')');
        Ok(())
    }

    fn render_channel(&self, node: Node, out: &mut String) -> Result<()> {
        let mut cursor = node.walk();
        let tokens: Vec<&str> = node
            .children(&mut cursor)
            .filter(|child| !child.is_named())
            .map(|child| child.kind())
            .collect();
        let prefix = match tokens.as_slice() {
            [punctuation::ARROW, ..] => "<-chan ",
            [_, punctuation::ARROW, ..] => "chan<- ",
            _ => "chan ",
        };
        out.push_str(prefix);
        self.render(self.field(node, field_names::VALUE)?, out)
    }

    fn render_struct(&self, node: Node, out: &mut String) -> Result<()> {
        let fields = named_children(node)
            .into_iter()
            .find(|child| child.kind() == node_kinds::FIELD_DECLARATION_LIST)
            .map(named_children)
            .unwrap_or_default();
        if fields.is_empty() {
            out.push_str("struct{}");
            return Ok(());
        }
        out.push_str("struct{ ");
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                out.push_str("; ");
            }
            self.render_struct_field(field, out)?;
        }
        out.push_str(" }");
        Ok(())
    }

    fn render_struct_field(&self, field: Node, out: &mut String) -> Result<()> {
        if field.kind() != node_kinds::FIELD_DECLARATION {
            return self.render_tokens(field, out);
        }
        let names = field_children(field, field_names::NAME);
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(self.text(*name)?);
        }
        if names.is_empty() {
            let mut cursor = field.walk();
            let embedded_pointer = field
                .children(&mut cursor)
                .any(|child| child.kind() == punctuation::STAR);
            if embedded_pointer {
                out.push('*');
            }
        } else {
            out.push(' ');
        }
        self.render(self.field(field, field_names::TYPE)?, out)?;
        if let Some(tag) = field.child_by_field_name(field_names::TAG) {
            out.push(' ');
            out.push_str(self.text(tag)?);
        }
        Ok(())
    }

    fn render_interface(&self, node: Node, out: &mut String) -> Result<()> {
        let elems = named_children(node);
        if elems.is_empty() {
            out.push_str("interface{}");
            return Ok(());
        }
        out.push_str("interface{ ");
        self.render_separated(&elems, "; ", out)?;
        out.push_str(" }");
        Ok(())
    }

    fn render_separated(&self, nodes: &[Node], separator: &str, out: &mut String) -> Result<()> {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.render(*node, out)?;
        }
        Ok(())
    }

    /// Fallback: join the leaf tokens of `node` with Go-like spacing
    fn render_tokens(&self, node: Node, out: &mut String) -> Result<()> {
        let mut leaves = Vec::new();
        collect_leaves(node, &mut leaves);
        let mut previous: Option<&str> = None;
        for leaf in leaves {
            let text = self.text(leaf)?;
            if let Some(prev) = previous {
                if needs_space(prev, text) {
                    out.push(' ');
                }
            }
            out.push_str(text);
            previous = Some(text);
        }
        Ok(())
    }

    fn field<'t>(&self, node: Node<'t>, name: &str) -> Result<Node<'t>> {
        node.child_by_field_name(name).ok_or_else(|| {
            Error::extraction(format!("`{}` node without `{name}` field", node.kind()))
        })
    }

    fn only_child<'t>(&self, node: Node<'t>) -> Result<Node<'t>> {
        named_children(node)
            .into_iter()
            .next()
            .ok_or_else(|| Error::extraction(format!("empty `{}` node", node.kind())))
    }

    fn text(&self, node: Node) -> Result<&'s str> {
        node_to_text(node, self.source)
    }
}

fn collect_leaves<'t>(node: Node<'t>, leaves: &mut Vec<Node<'t>>) {
    if node.kind() == node_kinds::COMMENT {
        return;
    }
    if node.child_count() == 0 {
        leaves.push(node);
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_leaves(child, leaves);
    }
}

fn needs_space(previous: &str, next: &str) -> bool {
    let word_end = previous
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '"' || c == '`');
    let word_start = next
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '"' || c == '`');
    previous == "," || previous == ";" || (word_end && word_start)
}
