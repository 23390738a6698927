//! Extracted interface descriptions
//!
//! These values are built once per extraction run, own all of their text and
//! are handed to the wrapper generator unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Span variable name used when nothing in the method collides with it
pub const DEFAULT_SPAN_NAME: &str = "span";

/// A generic type parameter of an interface, e.g. `K comparable`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamInfo {
    pub name: String,
    pub constraint: String,
}

/// A method parameter with a resolved, non-empty name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A method result with a resolved, non-empty name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One method of a target interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    /// `Interface.Method`, used as the span label
    pub special_name: String,
    pub params: Vec<ParamInfo>,
    pub results: Vec<ResultInfo>,
    pub has_ctx: bool,
    pub ctx_name: String,
    pub has_error: bool,
    pub has_named_result: bool,
    pub is_variadic: bool,
    pub span_name: String,
    pub params_names: String,
    pub params_overall_names: String,
    pub result_names: String,
    pub result_types_names: String,
    pub result_overall_names: String,
}

impl Method {
    /// Create an empty method description belonging to `interface`
    pub fn new(interface: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            special_name: format!("{interface}.{name}"),
            name,
            params: Vec::new(),
            results: Vec::new(),
            has_ctx: false,
            ctx_name: String::new(),
            has_error: false,
            has_named_result: false,
            is_variadic: false,
            span_name: DEFAULT_SPAN_NAME.to_string(),
            params_names: String::new(),
            params_overall_names: String::new(),
            result_names: String::new(),
            result_types_names: String::new(),
            result_overall_names: String::new(),
        }
    }

    /// Store the parameters and rebuild the derived parameter strings
    pub fn set_params(&mut self, params: Vec<ParamInfo>) {
        self.params_names = join(params.iter().map(|p| p.name.clone()));
        self.params_overall_names =
            join(params.iter().map(|p| format!("{} {}", p.name, p.type_name)));
        self.is_variadic = params
            .last()
            .is_some_and(|p| p.type_name.starts_with("..."));
        self.params = params;
    }

    /// Store the results and rebuild the derived result strings
    pub fn set_results(&mut self, results: Vec<ResultInfo>) {
        self.result_names = join(results.iter().map(|r| r.name.clone()));
        self.result_types_names = join(results.iter().map(|r| r.type_name.clone()));
        self.result_overall_names =
            join(results.iter().map(|r| format!("{} {}", r.name, r.type_name)));
        self.results = results;
    }

    /// Names of the results whose type is exactly `error`
    pub fn error_results(&self) -> impl Iterator<Item = &ResultInfo> {
        self.results.iter().filter(|r| r.type_name == ERROR_TYPE)
    }

    /// Every identifier the method signature binds, plus the span variable
    pub fn bound_names(&self) -> impl Iterator<Item = &str> {
        self.params
            .iter()
            .map(|p| p.name.as_str())
            .chain(self.results.iter().map(|r| r.name.as_str()))
            .chain(std::iter::once(self.span_name.as_str()))
    }
}

/// The error-signaling result type
pub const ERROR_TYPE: &str = "error";

/// The context-carrying parameter type
pub const CONTEXT_TYPE: &str = "context.Context";

/// A target interface found in the source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub type_params: Vec<TypeParamInfo>,
    pub methods: Vec<Method>,
    /// Output file name derived from the source file name
    pub file_name: String,
    pub file_path: String,
    pub package: String,
    pub directory: String,
}

impl InterfaceInfo {
    /// `[K comparable, V any]`, or an empty string for non-generic interfaces
    pub fn type_params_decl(&self) -> String {
        if self.type_params.is_empty() {
            return String::new();
        }
        let params = join(
            self.type_params
                .iter()
                .map(|tp| format!("{} {}", tp.name, tp.constraint)),
        );
        format!("[{params}]")
    }

    /// `[K, V]`, or an empty string for non-generic interfaces
    pub fn type_params_use(&self) -> String {
        if self.type_params.is_empty() {
            return String::new();
        }
        format!("[{}]", join(self.type_params.iter().map(|tp| tp.name.clone())))
    }
}

/// Import path to local alias, ordered by path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PkgImports(BTreeMap<String, String>);

impl PkgImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an import; a later import of the same path replaces the alias
    pub fn insert(&mut self, path: impl Into<String>, alias: impl Into<String>) {
        self.0.insert(path.into(), alias.into());
    }

    pub fn path_exists(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn alias(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    /// Insert `path` with `alias` unless the path is already imported
    ///
    /// Returns the alias the path is reachable under.
    pub fn ensure(&mut self, path: &str, alias: &str) -> String {
        self.0
            .entry(path.to_string())
            .or_insert_with(|| alias.to_string())
            .clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for PkgImports {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}
