//! Import tracking for generated code
//!
//! Every import spec of the source file is recorded as path -> local alias so
//! the generator can reproduce the qualifiers used by parameter and result
//! types.

use crate::constants::field_names;
use crate::source::GoSource;
use sirish_core::error::{Error, Result};
use sirish_core::PkgImports;
use tracing::debug;
use tree_sitter::Node;

/// Import path of the tracing library the wrappers call into
pub const TRACING_IMPORT_PATH: &str = "go.elastic.co/apm/v2";

/// Local alias wrappers use for the tracing library
pub const TRACING_IMPORT_ALIAS: &str = "apm";

/// Make sure the tracing library is imported, returning its alias
pub fn ensure_tracing_import(imports: &mut PkgImports) -> String {
    imports.ensure(TRACING_IMPORT_PATH, TRACING_IMPORT_ALIAS)
}

/// Records import specs while the syntax tree is walked
#[derive(Debug, Default)]
pub struct ImportTracker {
    imports: PkgImports,
}

impl ImportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `import_spec` node
    pub fn record(&mut self, spec: Node, source: &GoSource) -> Result<()> {
        let path_node = spec.child_by_field_name(field_names::PATH).ok_or_else(|| {
            Error::import_decode("", "import spec without a path literal")
        })?;
        let literal = source.node_text(path_node)?;
        let alias = spec
            .child_by_field_name(field_names::NAME)
            .map(|name| source.node_text(name))
            .transpose()?;
        self.record_literal(literal, alias)
    }

    /// Record an import given its quoted path literal and optional local name
    pub fn record_literal(&mut self, literal: &str, alias: Option<&str>) -> Result<()> {
        let path = unquote(literal).map_err(|message| Error::import_decode(literal, message))?;
        let alias = match alias {
            Some(alias) => alias.to_string(),
            None => default_alias(&path).to_string(),
        };
        debug!(path = %path, alias = %alias, "Recorded import");
        self.imports.insert(path, alias);
        Ok(())
    }

    pub fn imports(&self) -> &PkgImports {
        &self.imports
    }

    pub fn finish(self) -> PkgImports {
        self.imports
    }
}

/// Package name an import path is assumed to declare
///
/// The last path segment, skipping a trailing major-version segment (`/v2`),
/// without a `go-` prefix and cut at the first character that cannot appear
/// in an identifier (`yaml.v3` -> `yaml`).
pub fn default_alias(path: &str) -> &str {
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);
    let base = match segments.next() {
        Some(previous) if is_major_version(last) => previous,
        _ => last,
    };
    let base = base.strip_prefix("go-").unwrap_or(base);
    let end = base
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(base.len());
    if end == 0 {
        last
    } else {
        &base[..end]
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Decode a Go string literal, interpreted (`"..."`) or raw (`` `...` ``)
pub fn unquote(literal: &str) -> std::result::Result<String, String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        if raw.contains('`') {
            return Err("backquote inside raw string literal".to_string());
        }
        return Ok(raw.replace('\r', ""));
    }

    let body = literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .filter(|_| literal.len() >= 2)
        .ok_or_else(|| format!("not a quoted string literal: {literal}"))?;

    let mut bytes = Vec::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => return Err("unescaped quote in string literal".to_string()),
            '\n' => return Err("newline in string literal".to_string()),
            '\\' => decode_escape(&mut chars, &mut bytes)?,
            other => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    String::from_utf8(bytes).map_err(|_| "string literal is not valid UTF-8".to_string())
}

fn decode_escape(
    chars: &mut std::str::Chars<'_>,
    bytes: &mut Vec<u8>,
) -> std::result::Result<(), String> {
    let escape = chars
        .next()
        .ok_or_else(|| "unterminated escape sequence".to_string())?;
    let simple = match escape {
        'a' => Some(0x07),
        'b' => Some(0x08),
        'f' => Some(0x0c),
        'n' => Some(b'\n'),
        'r' => Some(b'\r'),
        't' => Some(b'\t'),
        'v' => Some(0x0b),
        '\\' => Some(b'\\'),
        '"' => Some(b'"'),
        _ => None,
    };
    if let Some(byte) = simple {
        bytes.push(byte);
        return Ok(());
    }

    match escape {
        'x' => {
            let value = read_digits(chars, 2, 16)?;
            bytes.push(value as u8);
        }
        '0'..='7' => {
            let rest = read_digits(chars, 2, 8)?;
            let value = (escape as u32 - '0' as u32) * 64 + rest;
            let byte = u8::try_from(value).map_err(|_| format!("octal escape out of range: {value}"))?;
            bytes.push(byte);
        }
        'u' | 'U' => {
            let width = if escape == 'u' { 4 } else { 8 };
            let value = read_digits(chars, width, 16)?;
            let c = char::from_u32(value)
                .ok_or_else(|| format!("invalid Unicode code point: {value:#x}"))?;
            let mut buf = [0u8; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
        other => return Err(format!("unknown escape sequence: \\{other}")),
    }
    Ok(())
}

fn read_digits(
    chars: &mut std::str::Chars<'_>,
    count: usize,
    radix: u32,
) -> std::result::Result<u32, String> {
    let mut value = 0u32;
    for _ in 0..count {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(radix))
            .ok_or_else(|| format!("escape sequence needs {count} base-{radix} digits"))?;
        value = value * radix + digit;
    }
    Ok(value)
}
