//! Interface declaration extraction
//!
//! A single walk over the top-level declarations of a Go file records the
//! package name and the imports, and turns every requested interface into an
//! [`InterfaceInfo`] whose parameters and results all carry usable names.
//!
//! ## Naming rules
//!
//! - a parameter without a name gets a synthetic `<Method>Un<Type>...` name
//! - a blank `_` parameter gets a synthetic `<Method>Un...` name
//! - results follow the same rules with the `ResUn` tag
//! - a declared name equal to the span variable renames the span variable
//!
//! Synthetic names are checked against every name the method already binds
//! and regenerated until they are unique.

use crate::constants::{field_names, node_kinds, punctuation};
use crate::imports::ImportTracker;
use crate::names::{
    unnamed_param_tag, NameGenerator, DEFAULT_LENGTH, TAG_RESULT_UNNAMED, TAG_SPAN, TAG_UNNAMED,
};
use crate::source::{field_children, named_children, GoSource};
use crate::type_printer::TypePrinter;
use sirish_core::error::{Error, Result};
use sirish_core::model::{CONTEXT_TYPE, DEFAULT_SPAN_NAME, ERROR_TYPE};
use sirish_core::{InterfaceInfo, Method, ParamInfo, PkgImports, ResultInfo, Targets, TypeParamInfo};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};
use tree_sitter::Node;

/// Synthetic-name attempts before a numeric suffix is appended
const MAX_ATTEMPTS: usize = 8;

/// Constraint used when a type parameter declares none
const DEFAULT_CONSTRAINT: &str = "any";

/// Everything one extraction run produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub package: String,
    pub interfaces: Vec<InterfaceInfo>,
    pub imports: PkgImports,
}

/// Closed set of declaration kinds the walk reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    SourceFile,
    PackageClause,
    ImportDeclaration,
    ImportSpecList,
    ImportSpec,
    TypeDeclaration,
    TypeSpec,
    TypeAlias,
    Other,
}

impl NodeKind {
    fn of(node: Node) -> Self {
        match node.kind() {
            node_kinds::SOURCE_FILE => Self::SourceFile,
            node_kinds::PACKAGE_CLAUSE => Self::PackageClause,
            node_kinds::IMPORT_DECLARATION => Self::ImportDeclaration,
            node_kinds::IMPORT_SPEC_LIST => Self::ImportSpecList,
            node_kinds::IMPORT_SPEC => Self::ImportSpec,
            node_kinds::TYPE_DECLARATION => Self::TypeDeclaration,
            node_kinds::TYPE_SPEC => Self::TypeSpec,
            node_kinds::TYPE_ALIAS => Self::TypeAlias,
            _ => Self::Other,
        }
    }
}

/// Accumulator threaded through the walk
struct ExtractionState<'a> {
    targets: &'a Targets,
    base_name: String,
    file_path: String,
    directory: String,
    package: Option<String>,
    interfaces: Vec<InterfaceInfo>,
    imports: ImportTracker,
}

impl<'a> ExtractionState<'a> {
    fn new(source: &GoSource, targets: &'a Targets) -> Self {
        let path = source.path();
        Self {
            targets,
            base_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_path: path.display().to_string(),
            directory: path
                .parent()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            package: None,
            interfaces: Vec::new(),
            imports: ImportTracker::new(),
        }
    }

    /// Output file name for declaration `name`
    fn file_name_for(&self, name: &str) -> String {
        if self.targets.len() > 1 {
            format!("{name}.{}", self.base_name)
        } else {
            self.base_name.clone()
        }
    }

    fn finish(self) -> Result<Extraction> {
        let package = self.package.ok_or_else(|| {
            Error::extraction(format!("{} has no package clause", self.file_path))
        })?;
        for target in self.targets.iter() {
            if !self.interfaces.iter().any(|iface| iface.name == target) {
                warn!(target_name = target, "No interface declaration found for target");
            }
        }
        let interfaces = self
            .interfaces
            .into_iter()
            .map(|iface| InterfaceInfo {
                package: package.clone(),
                ..iface
            })
            .collect();
        Ok(Extraction {
            package,
            interfaces,
            imports: self.imports.finish(),
        })
    }
}

/// One parameter or result field after grouping
#[derive(Debug)]
struct Field {
    names: Vec<String>,
    type_name: String,
}

/// Names bound inside one method signature
struct MethodScope {
    taken: HashSet<String>,
}

impl MethodScope {
    fn new<'n>(declared: impl Iterator<Item = &'n str>) -> Self {
        let mut taken: HashSet<String> = declared
            .filter(|name| *name != punctuation::BLANK)
            .map(String::from)
            .collect();
        taken.insert(DEFAULT_SPAN_NAME.to_string());
        Self { taken }
    }

    fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    fn claim(&mut self, name: String) -> String {
        self.taken.insert(name.clone());
        name
    }

    /// A synthetic name no other identifier of the method uses
    fn fresh(
        &mut self,
        names: &mut NameGenerator,
        method: &str,
        field_index: usize,
        name_index: usize,
        tag: &str,
    ) -> String {
        let mut candidate = String::new();
        for _ in 0..MAX_ATTEMPTS {
            candidate = names.synthetic(method, field_index, name_index, DEFAULT_LENGTH, tag);
            if !self.contains(&candidate) {
                return self.claim(candidate);
            }
            debug!(name = %candidate, "Synthetic name collided, retrying");
        }
        let mut attempt = MAX_ATTEMPTS;
        loop {
            let suffixed = format!("{candidate}_{attempt}");
            if !self.contains(&suffixed) {
                return self.claim(suffixed);
            }
            attempt += 1;
        }
    }
}

/// Extracts target interface declarations from Go source files
#[derive(Debug, Default)]
pub struct DeclarationExtractor {
    names: NameGenerator,
}

impl DeclarationExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor using `names` for synthetic identifiers
    pub fn with_name_generator(names: NameGenerator) -> Self {
        Self { names }
    }

    /// Read, parse and extract the file at `path`
    pub fn extract_file(&mut self, path: &Path, targets: &Targets) -> Result<Extraction> {
        let source = GoSource::read(path)?;
        self.extract(&source, targets)
    }

    /// Extract every interface in `source` whose name is in `targets`
    pub fn extract(&mut self, source: &GoSource, targets: &Targets) -> Result<Extraction> {
        let mut state = ExtractionState::new(source, targets);
        self.visit(source.root(), source, &mut state)?;
        let extraction = state.finish()?;
        debug!(
            file = %source.path().display(),
            interfaces = extraction.interfaces.len(),
            imports = extraction.imports.len(),
            "Extraction finished"
        );
        Ok(extraction)
    }

    fn visit(&mut self, node: Node, source: &GoSource, state: &mut ExtractionState) -> Result<()> {
        match NodeKind::of(node) {
            NodeKind::SourceFile
            | NodeKind::ImportDeclaration
            | NodeKind::ImportSpecList
            | NodeKind::TypeDeclaration => {
                for child in named_children(node) {
                    self.visit(child, source, state)?;
                }
            }
            NodeKind::PackageClause => {
                if let Some(name) = named_children(node).first() {
                    state.package = Some(source.node_text(*name)?.to_string());
                }
            }
            NodeKind::ImportSpec => state.imports.record(node, source)?,
            NodeKind::TypeSpec => {
                if let Some(info) = self.type_spec(node, source, state)? {
                    state.interfaces.push(info);
                }
            }
            NodeKind::TypeAlias => debug!("Skipping type alias"),
            NodeKind::Other => {}
        }
        Ok(())
    }

    fn type_spec(
        &mut self,
        node: Node,
        source: &GoSource,
        state: &ExtractionState,
    ) -> Result<Option<InterfaceInfo>> {
        let Some(name_node) = node.child_by_field_name(field_names::NAME) else {
            return Ok(None);
        };
        let name = source.node_text(name_node)?;
        if !state.targets.exists(name) {
            return Ok(None);
        }
        let Some(type_node) = node.child_by_field_name(field_names::TYPE) else {
            return Ok(None);
        };
        if type_node.kind() != node_kinds::INTERFACE_TYPE {
            debug!(declaration = name, kind = type_node.kind(), "Target is not an interface");
            return Ok(None);
        }

        let printer = TypePrinter::new(source.text());
        let type_params = node
            .child_by_field_name(field_names::TYPE_PARAMETERS)
            .map(|params| type_params(params, source, printer))
            .transpose()?
            .unwrap_or_default();

        let mut methods = Vec::new();
        for elem in named_children(type_node) {
            if !matches!(elem.kind(), node_kinds::METHOD_ELEM | node_kinds::METHOD_SPEC) {
                continue;
            }
            let Some(method_name) = elem.child_by_field_name(field_names::NAME) else {
                continue;
            };
            let method_name = source.node_text(method_name)?;
            methods.push(self.method(name, method_name, elem, source, printer)?);
        }

        debug!(interface = name, methods = methods.len(), "Extracted interface");
        Ok(Some(InterfaceInfo {
            name: name.to_string(),
            type_params,
            methods,
            file_name: state.file_name_for(name),
            file_path: state.file_path.clone(),
            package: String::new(),
            directory: state.directory.clone(),
        }))
    }

    fn method(
        &mut self,
        interface: &str,
        name: &str,
        elem: Node,
        source: &GoSource,
        printer: TypePrinter,
    ) -> Result<Method> {
        let label = format!("{interface}.{name}");
        let params = match elem.child_by_field_name(field_names::PARAMETERS) {
            Some(list) => fields(list, source, printer, &label)?,
            None => Vec::new(),
        };
        let results = match elem.child_by_field_name(field_names::RESULT) {
            Some(result) if result.kind() == node_kinds::PARAMETER_LIST => {
                fields(result, source, printer, &label)?
            }
            Some(result) => vec![Field {
                names: Vec::new(),
                type_name: printed(printer, result, &label)?,
            }],
            None => Vec::new(),
        };

        let mut method = Method::new(interface, name);
        let mut scope = MethodScope::new(
            params
                .iter()
                .chain(results.iter())
                .flat_map(|field| field.names.iter().map(String::as_str)),
        );

        let mut param_infos = Vec::new();
        for (field_index, field) in params.iter().enumerate() {
            let is_ctx = !method.has_ctx && field.type_name == CONTEXT_TYPE;
            if field.names.is_empty() {
                let param = if is_ctx {
                    method.has_ctx = true;
                    let ctx = self.ctx_name(&mut scope, field_index);
                    method.ctx_name = ctx.clone();
                    ctx
                } else {
                    let tag = unnamed_param_tag(&field.type_name);
                    scope.fresh(&mut self.names, name, field_index, 0, &tag)
                };
                param_infos.push(ParamInfo {
                    name: param,
                    type_name: field.type_name.clone(),
                });
                continue;
            }
            for (name_index, declared) in field.names.iter().enumerate() {
                let param = if is_ctx && name_index == 0 {
                    method.has_ctx = true;
                    let ctx = if declared == punctuation::BLANK {
                        self.ctx_name(&mut scope, field_index)
                    } else {
                        declared.clone()
                    };
                    method.ctx_name = ctx.clone();
                    ctx
                } else if declared == punctuation::BLANK {
                    scope.fresh(&mut self.names, name, field_index, name_index, TAG_UNNAMED)
                } else {
                    declared.clone()
                };
                self.rename_span_on_collision(&mut method, &mut scope, &param, field_index);
                param_infos.push(ParamInfo {
                    name: param,
                    type_name: field.type_name.clone(),
                });
            }
        }

        let mut result_infos = Vec::new();
        for (field_index, field) in results.iter().enumerate() {
            method.has_error |= field.type_name == ERROR_TYPE;
            if field.names.is_empty() {
                let result =
                    scope.fresh(&mut self.names, name, field_index, 0, TAG_RESULT_UNNAMED);
                result_infos.push(ResultInfo {
                    name: result,
                    type_name: field.type_name.clone(),
                });
                continue;
            }
            method.has_named_result = true;
            for (name_index, declared) in field.names.iter().enumerate() {
                let result = if declared == punctuation::BLANK {
                    scope.fresh(&mut self.names, name, field_index, name_index, TAG_RESULT_UNNAMED)
                } else {
                    declared.clone()
                };
                self.rename_span_on_collision(&mut method, &mut scope, &result, field_index);
                result_infos.push(ResultInfo {
                    name: result,
                    type_name: field.type_name.clone(),
                });
            }
        }

        method.set_params(param_infos);
        method.set_results(result_infos);
        debug!(
            method = %method.special_name,
            params = method.params.len(),
            results = method.results.len(),
            has_ctx = method.has_ctx,
            "Extracted method"
        );
        Ok(method)
    }

    /// `ctx_<field>_0`, made unique within the method
    fn ctx_name(&mut self, scope: &mut MethodScope, field_index: usize) -> String {
        let base = format!("ctx_{field_index}_0");
        if !scope.contains(&base) {
            return scope.claim(base);
        }
        let mut attempt = 1;
        loop {
            let candidate = format!("{base}_{attempt}");
            if !scope.contains(&candidate) {
                return scope.claim(candidate);
            }
            attempt += 1;
        }
    }

    fn rename_span_on_collision(
        &mut self,
        method: &mut Method,
        scope: &mut MethodScope,
        bound: &str,
        field_index: usize,
    ) {
        if bound != method.span_name {
            return;
        }
        let renamed = scope.fresh(&mut self.names, &method.name, field_index, 0, TAG_SPAN);
        debug!(method = %method.special_name, span = %renamed, "Renamed span variable");
        method.span_name = renamed;
    }
}

fn type_params(
    list: Node,
    source: &GoSource,
    printer: TypePrinter,
) -> Result<Vec<TypeParamInfo>> {
    let mut params = Vec::new();
    for decl in named_children(list) {
        if decl.kind() != node_kinds::TYPE_PARAMETER_DECLARATION {
            continue;
        }
        let constraint = decl
            .child_by_field_name(field_names::TYPE)
            .map(|node| printer.print(node))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_CONSTRAINT.to_string());
        for name in field_children(decl, field_names::NAME) {
            params.push(TypeParamInfo {
                name: source.node_text(name)?.to_string(),
                constraint: constraint.clone(),
            });
        }
    }
    Ok(params)
}

/// Printed type of `node`; an unprintable type aborts extraction
fn printed(printer: TypePrinter, node: Node, method: &str) -> Result<String> {
    let text = printer.print(node);
    if text.is_empty() {
        return Err(Error::extraction(format!(
            "{method}: cannot print type expression `{}`",
            node.kind()
        )));
    }
    Ok(text)
}

/// Declarations of a parameter list, grouped the way Go reads them
///
/// In `(a, b int)` the names `a` and `b` share one field. When the grammar
/// reports the leading names as type-only declarations they are folded into
/// the next named declaration.
fn fields(list: Node, source: &GoSource, printer: TypePrinter, method: &str) -> Result<Vec<Field>> {
    struct Raw<'t> {
        names: Vec<String>,
        type_node: Node<'t>,
        variadic: bool,
    }

    let mut raw = Vec::new();
    for decl in named_children(list) {
        let variadic = match decl.kind() {
            node_kinds::PARAMETER_DECLARATION => false,
            node_kinds::VARIADIC_PARAMETER_DECLARATION => true,
            _ => continue,
        };
        let type_node = decl.child_by_field_name(field_names::TYPE).ok_or_else(|| {
            Error::extraction(format!("{method}: parameter declaration without a type"))
        })?;
        let names = field_children(decl, field_names::NAME)
            .into_iter()
            .map(|name| source.node_text(name).map(String::from))
            .collect::<Result<Vec<_>>>()?;
        raw.push(Raw {
            names,
            type_node,
            variadic,
        });
    }

    let any_named = raw.iter().any(|r| !r.names.is_empty());
    let mut grouped: Vec<Raw> = Vec::with_capacity(raw.len());
    let mut pending: Vec<Raw> = Vec::new();
    for mut r in raw {
        let bare_name = r.names.is_empty()
            && !r.variadic
            && matches!(
                r.type_node.kind(),
                node_kinds::TYPE_IDENTIFIER | node_kinds::IDENTIFIER
            );
        if any_named && bare_name {
            pending.push(r);
            continue;
        }
        if !r.names.is_empty() && !pending.is_empty() {
            let mut names = pending
                .drain(..)
                .map(|p| source.node_text(p.type_node).map(String::from))
                .collect::<Result<Vec<_>>>()?;
            names.append(&mut r.names);
            r.names = names;
        }
        grouped.append(&mut pending);
        grouped.push(r);
    }
    grouped.append(&mut pending);

    grouped
        .into_iter()
        .map(|r| {
            let mut type_name = printed(printer, r.type_node, method)?;
            if r.variadic {
                type_name.insert_str(0, punctuation::ELLIPSIS);
            }
            Ok(Field {
                names: r.names,
                type_name,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::LetterSource;
    use pretty_assertions::assert_eq;

    /// Cycles through a fixed list of indexes
    struct Sequence {
        values: Vec<usize>,
        next: usize,
    }

    impl LetterSource for Sequence {
        fn pick(&mut self, _bound: usize) -> std::result::Result<usize, rand::Error> {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            Ok(value)
        }
    }

    fn extract_with(text: &str, targets: &[&str], names: NameGenerator) -> Extraction {
        let source = GoSource::parse("/src/store/types.go", text).expect("parse");
        let targets: Targets = targets.iter().map(|t| t.to_string()).collect();
        DeclarationExtractor::with_name_generator(names)
            .extract(&source, &targets)
            .expect("extract")
    }

    fn extract(text: &str, targets: &[&str]) -> Extraction {
        extract_with(text, targets, NameGenerator::secure())
    }

    fn param_names(method: &Method) -> Vec<&str> {
        method.params.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_node_kind_dispatch() {
        let source = GoSource::parse("a.go", "package a\n\ntype T = int\n").expect("parse");
        let root = source.root();
        assert_eq!(NodeKind::of(root), NodeKind::SourceFile);
        let kinds: Vec<NodeKind> = named_children(root).into_iter().map(NodeKind::of).collect();
        assert_eq!(kinds, vec![NodeKind::PackageClause, NodeKind::TypeDeclaration]);
    }

    #[test]
    fn test_interface_metadata() {
        let extraction = extract(
            "package store\n\ntype Repo interface {\n\tGet(id int) error\n}\n",
            &["Repo"],
        );
        assert_eq!(extraction.package, "store");
        let repo = &extraction.interfaces[0];
        assert_eq!(repo.name, "Repo");
        assert_eq!(repo.file_name, "types.go");
        assert_eq!(repo.file_path, "/src/store/types.go");
        assert_eq!(repo.directory, "/src/store");
        assert_eq!(repo.package, "store");
        assert_eq!(repo.methods[0].special_name, "Repo.Get");
    }

    #[test]
    fn test_non_targets_and_non_interfaces_are_skipped() {
        let extraction = extract(
            r#"package store

type Repo struct{}

type (
	Cache interface{ Put() }
	Other interface{ Drop() }
	Alias = Cache
)
"#,
            &["Repo", "Cache", "Alias"],
        );
        let names: Vec<&str> = extraction.interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Cache"]);
        assert_eq!(extraction.interfaces[0].file_name, "Cache.types.go");
    }

    #[test]
    fn test_only_first_name_of_context_field_is_the_context() {
        let extraction = extract(
            r#"package store

import "context"

type Repo interface {
	Many(a, b context.Context, c context.Context) error
	BlankFirst(_, b context.Context) error
}
"#,
            &["Repo"],
        );
        let methods = &extraction.interfaces[0].methods;

        let many = &methods[0];
        assert!(many.has_ctx);
        assert_eq!(many.ctx_name, "a");
        assert_eq!(param_names(many), vec!["a", "b", "c"]);
        assert_eq!(
            many.params_overall_names,
            "a context.Context, b context.Context, c context.Context"
        );

        let blank_first = &methods[1];
        assert!(blank_first.has_ctx);
        assert_eq!(blank_first.ctx_name, "ctx_0_0");
        assert_eq!(param_names(blank_first), vec!["ctx_0_0", "b"]);
    }

    #[test]
    fn test_context_detection_uses_first_context_field() {
        let extraction = extract(
            r#"package store

import "context"

type Repo interface {
	Get(ctx context.Context, parent context.Context, id int) error
	Blank(_ context.Context) error
	Anonymous(context.Context, int) error
	Pointer(c *context.Context) error
}
"#,
            &["Repo"],
        );
        let methods = &extraction.interfaces[0].methods;

        assert!(methods[0].has_ctx);
        assert_eq!(methods[0].ctx_name, "ctx");
        assert_eq!(param_names(&methods[0]), vec!["ctx", "parent", "id"]);

        assert!(methods[1].has_ctx);
        assert_eq!(methods[1].ctx_name, "ctx_0_0");

        assert!(methods[2].has_ctx);
        assert_eq!(methods[2].ctx_name, "ctx_0_0");
        assert_eq!(methods[2].params.len(), 2);

        assert!(!methods[3].has_ctx);
        assert_eq!(methods[3].ctx_name, "");
    }

    #[test]
    fn test_span_renamed_on_collision() {
        let extraction = extract_with(
            "package store\n\ntype Repo interface {\n\tGet(span string) (n int)\n\tPut(v int) (span error)\n}\n",
            &["Repo"],
            NameGenerator::with_source(Sequence {
                values: vec![0],
                next: 0,
            }),
        );
        let methods = &extraction.interfaces[0].methods;
        assert_eq!(methods[0].span_name, "GetSpnaaaa_0_0");
        assert_eq!(param_names(&methods[0]), vec!["span"]);
        assert_eq!(methods[1].span_name, "PutSpnaaaa_0_0");
        assert_eq!(methods[1].result_names, "span");
    }

    #[test]
    fn test_forced_collisions_stay_unique() {
        // Every draw yields the same letters, so the synthetic name for the
        // blank parameter keeps hitting the declared one.
        let extraction = extract_with(
            "package store\n\ntype Repo interface {\n\tGet(GetUndddd_1_0 int, _ string) (int, int)\n}\n",
            &["Repo"],
            NameGenerator::with_source(Sequence {
                values: vec![3],
                next: 0,
            }),
        );
        let method = &extraction.interfaces[0].methods[0];
        let names: Vec<&str> = method.bound_names().collect();
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(names.len(), unique.len(), "names collide: {names:?}");
        assert_eq!(
            param_names(method),
            vec!["GetUndddd_1_0", "GetUndddd_1_0_8"]
        );
        assert_eq!(method.result_names, "GetResUndddd_0_0, GetResUndddd_1_0");
    }

    #[test]
    fn test_type_params() {
        let extraction = extract(
            "package store\n\ntype Cache[K comparable, V any, N ~int | ~int64] interface {\n\tGet(k K) (V, bool)\n}\n",
            &["Cache"],
        );
        let cache = &extraction.interfaces[0];
        let params: Vec<(&str, &str)> = cache
            .type_params
            .iter()
            .map(|tp| (tp.name.as_str(), tp.constraint.as_str()))
            .collect();
        assert_eq!(
            params,
            vec![("K", "comparable"), ("V", "any"), ("N", "~int | ~int64")]
        );
        assert_eq!(cache.type_params_decl(), "[K comparable, V any, N ~int | ~int64]");
    }

    #[test]
    fn test_variadic_and_embedded() {
        let extraction = extract(
            "package store\n\nimport \"io\"\n\ntype Repo interface {\n\tio.Closer\n\tFind(prefix string, opts ...Option) []string\n}\n",
            &["Repo"],
        );
        let methods = &extraction.interfaces[0].methods;
        assert_eq!(methods.len(), 1);
        let find = &methods[0];
        assert!(find.is_variadic);
        assert_eq!(find.params_overall_names, "prefix string, opts ...Option");
        assert!(!find.has_named_result);
        assert_eq!(find.result_types_names, "[]string");
    }

    #[test]
    fn test_missing_package_clause_is_an_error() {
        let source = GoSource::parse("a.go", "type A interface{}\n")
            .expect("the grammar accepts a file without a package clause");
        let targets: Targets = std::iter::once("A".to_string()).collect();
        let result = DeclarationExtractor::new().extract(&source, &targets);
        assert!(matches!(result, Err(Error::Extraction(_))));
    }
}
