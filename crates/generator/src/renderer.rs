//! Wrapper source rendering
//!
//! [`ApmRenderer`] turns one [`InterfaceInfo`] into a Go file declaring a
//! struct that implements the interface by delegating to another
//! implementation, opening an APM span around every call and reporting
//! returned errors. The file layout lives in `templates/wrapper.go.txt`;
//! this module chooses the identifiers and imports the template prints.

use askama::Template;
use sirish_core::error::{Error, Result};
use sirish_core::{InterfaceInfo, Method, PkgImports};
use sirish_parser::{ensure_tracing_import, TRACING_IMPORT_PATH};
use std::collections::HashSet;

/// Import path providing `context.Background`
const CONTEXT_IMPORT_PATH: &str = "context";

/// Span type used when the constructor receives an empty one
const DEFAULT_SPAN_TYPE: &str = "custom";

/// Preferred local identifiers inside generated methods
const RECEIVER: &str = "w";
const CONTEXT_LOCAL: &str = "ctx";
const TRANSACTION_LOCAL: &str = "tx";

/// Values available while rendering one wrapper
#[derive(Debug, Clone)]
pub struct TemplateContext<'a> {
    pub version: &'a str,
    pub interface: &'a InterfaceInfo,
    pub imports: &'a PkgImports,
    pub suffix: &'a str,
    /// `<Interface><Suffix>`, e.g. `RepoSirish`
    pub type_name: String,
    pub create_tx: bool,
}

impl<'a> TemplateContext<'a> {
    pub fn new(
        version: &'a str,
        interface: &'a InterfaceInfo,
        imports: &'a PkgImports,
        suffix: &'a str,
        create_tx: bool,
    ) -> Self {
        Self {
            version,
            interface,
            imports,
            suffix,
            type_name: type_name(&interface.name, suffix),
            create_tx,
        }
    }

    /// Name of the generated struct
    pub fn wrapper_name(&self) -> String {
        format!("{}WrapperImpl", self.type_name)
    }
}

/// `<interface>` followed by `suffix` with its first letter upper-cased
pub fn type_name(interface: &str, suffix: &str) -> String {
    let mut chars = suffix.chars();
    match chars.next() {
        Some(first) => format!("{interface}{}{}", first.to_uppercase(), chars.as_str()),
        None => interface.to_string(),
    }
}

/// Renders the Go source of one wrapper
pub trait WrapperRenderer {
    fn render(&self, ctx: &TemplateContext<'_>) -> Result<String>;
}

/// Renders wrappers instrumented with the Elastic APM Go agent
#[derive(Debug, Default, Clone, Copy)]
pub struct ApmRenderer;

impl ApmRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl WrapperRenderer for ApmRenderer {
    fn render(&self, ctx: &TemplateContext<'_>) -> Result<String> {
        let iface = ctx.interface;
        if iface.package.is_empty() {
            return Err(Error::render(&iface.name, "package name is empty"));
        }
        for method in &iface.methods {
            if method.bound_names().any(str::is_empty) {
                return Err(Error::render(
                    &iface.name,
                    format!("{} has an unnamed parameter or result", method.special_name),
                ));
            }
        }

        let mut imports = ctx.imports.clone();
        let apm = ensure_tracing_import(&mut imports);
        let background = iface.methods.iter().any(|m| !m.has_ctx);
        let context = background.then(|| imports.ensure(CONTEXT_IMPORT_PATH, CONTEXT_IMPORT_PATH));
        let context_pkg = context.as_deref().unwrap_or(CONTEXT_IMPORT_PATH);

        let qualifiers = referenced_qualifiers(iface);
        let selected: Vec<(&str, &str)> = imports
            .iter()
            .filter(|(path, alias)| {
                *path == TRACING_IMPORT_PATH
                    || (background && *path == CONTEXT_IMPORT_PATH)
                    || *alias == "."
                    || (*alias != "_" && qualifiers.contains(*alias))
            })
            .collect();
        let package_names: HashSet<&str> = selected.iter().map(|(_, alias)| *alias).collect();

        let template = WrapperTemplate {
            version: ctx.version,
            package_name: &iface.package,
            imports: selected
                .iter()
                .map(|(path, alias)| import_line(path, alias))
                .collect(),
            interface_name: &iface.name,
            wrapper: ctx.wrapper_name(),
            type_params_decl: iface.type_params_decl(),
            type_params: iface.type_params_use(),
            generic: !iface.type_params.is_empty(),
            default_span_type: go_quote(DEFAULT_SPAN_TYPE),
            apm: &apm,
            context_pkg,
            methods: iface
                .methods
                .iter()
                .map(|method| MethodView::new(ctx, method, &apm, context_pkg, &package_names))
                .collect(),
        };

        let mut out = template
            .render()
            .map_err(|e| Error::render(&iface.name, format!("failed to render template: {e}")))?;
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

/// Layout of one generated file
#[derive(Template)]
#[template(path = "wrapper.go.txt", escape = "none")]
struct WrapperTemplate<'a> {
    version: &'a str,
    package_name: &'a str,
    /// Import block lines, `"path"` or `alias "path"`
    imports: Vec<String>,
    interface_name: &'a str,
    wrapper: String,
    type_params_decl: String,
    type_params: String,
    generic: bool,
    default_span_type: String,
    apm: &'a str,
    context_pkg: &'a str,
    methods: Vec<MethodView>,
}

/// Identifiers and fragments of one generated method
struct MethodView {
    receiver: String,
    name: String,
    params: String,
    results: String,
    label: String,
    span: String,
    /// Context passed to `CaptureError`, `_` when nothing uses it
    ctx: String,
    has_ctx: bool,
    start_tx: bool,
    tx: String,
    call: String,
    result_names: String,
    assign: &'static str,
    errors: Vec<String>,
}

impl MethodView {
    fn new(
        ctx: &TemplateContext<'_>,
        method: &Method,
        apm: &str,
        context_pkg: &str,
        package_names: &HashSet<&str>,
    ) -> Self {
        let mut locals = Locals::new(method, package_names);
        let mut packages = vec![apm];
        if !method.has_ctx {
            packages.push(context_pkg);
        }
        let method = unshadow(method, &packages, &mut locals);

        let receiver = locals.pick(RECEIVER);
        let start_tx = !method.has_ctx && ctx.create_tx;
        let tx = if start_tx {
            locals.pick(TRANSACTION_LOCAL)
        } else {
            String::new()
        };
        let ctx_local = if method.has_ctx {
            method.ctx_name.clone()
        } else if method.has_error {
            locals.pick(CONTEXT_LOCAL)
        } else {
            "_".to_string()
        };

        Self {
            call: format!("{receiver}.next.{}({})", method.name, call_arguments(&method)),
            receiver,
            name: method.name.clone(),
            params: method.params_overall_names.clone(),
            results: result_signature(&method),
            label: go_quote(&method.special_name),
            span: method.span_name.clone(),
            ctx: ctx_local,
            has_ctx: method.has_ctx,
            start_tx,
            tx,
            result_names: method.result_names.clone(),
            assign: if method.has_named_result { "=" } else { ":=" },
            errors: method.error_results().map(|r| r.name.clone()).collect(),
        }
    }
}

/// `method` with every parameter or result named like one of `packages`
/// renamed, so the body can still reach those packages
fn unshadow(method: &Method, packages: &[&str], locals: &mut Locals) -> Method {
    let mut method = method.clone();
    if !method.bound_names().any(|name| packages.contains(&name)) {
        return method;
    }

    let mut params = Vec::with_capacity(method.params.len());
    for param in &method.params {
        let mut param = param.clone();
        if packages.contains(&param.name.as_str()) {
            let renamed = locals.pick(&param.name);
            if method.has_ctx && method.ctx_name == param.name {
                method.ctx_name = renamed.clone();
            }
            param.name = renamed;
        }
        params.push(param);
    }
    let mut results = Vec::with_capacity(method.results.len());
    for result in &method.results {
        let mut result = result.clone();
        if packages.contains(&result.name.as_str()) {
            result.name = locals.pick(&result.name);
        }
        results.push(result);
    }
    method.set_params(params);
    method.set_results(results);
    method
}

/// Local identifiers of one generated method
struct Locals {
    taken: HashSet<String>,
}

impl Locals {
    fn new(method: &Method, package_names: &HashSet<&str>) -> Self {
        let taken = method
            .bound_names()
            .chain(package_names.iter().copied())
            .map(String::from)
            .collect();
        Self { taken }
    }

    /// `preferred`, or the first free `preferred_<n>`
    fn pick(&mut self, preferred: &str) -> String {
        let mut candidate = preferred.to_string();
        let mut attempt = 0;
        while self.taken.contains(&candidate) {
            attempt += 1;
            candidate = format!("{preferred}_{attempt}");
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Result part of a method signature, including the leading space
fn result_signature(method: &Method) -> String {
    match method.results.as_slice() {
        [] => String::new(),
        _ if method.has_named_result => format!(" ({})", method.result_overall_names),
        [single] => format!(" {}", single.type_name),
        _ => format!(" ({})", method.result_types_names),
    }
}

/// Arguments forwarded to the wrapped implementation
fn call_arguments(method: &Method) -> String {
    if method.is_variadic {
        format!("{}...", method.params_names)
    } else {
        method.params_names.clone()
    }
}

/// Package qualifiers (`pkg` in `pkg.Type`) used by the interface's types
fn referenced_qualifiers(iface: &InterfaceInfo) -> HashSet<String> {
    let types = iface
        .type_params
        .iter()
        .map(|tp| tp.constraint.as_str())
        .chain(iface.methods.iter().flat_map(|m| {
            m.params
                .iter()
                .map(|p| p.type_name.as_str())
                .chain(m.results.iter().map(|r| r.type_name.as_str()))
        }));

    let mut qualifiers = HashSet::new();
    for text in types {
        let mut word = String::new();
        let mut after_dot = false;
        for c in text.chars() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                continue;
            }
            let qualifier = c == '.' && !word.is_empty();
            if qualifier && !after_dot {
                qualifiers.insert(word.clone());
            }
            after_dot = qualifier;
            word.clear();
        }
    }
    qualifiers
}

/// One line of the import block, aliased only when the alias differs from
/// the last path segment
fn import_line(path: &str, alias: &str) -> String {
    if path.rsplit('/').next() == Some(alias) {
        go_quote(path)
    } else {
        format!("{alias} {}", go_quote(path))
    }
}

/// Go interpreted string literal for `text`
fn go_quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sirish_core::{ParamInfo, ResultInfo, TypeParamInfo};

    fn param(name: &str, type_name: &str) -> ParamInfo {
        ParamInfo {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }

    fn result(name: &str, type_name: &str) -> ResultInfo {
        ResultInfo {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }

    fn method(
        name: &str,
        params: Vec<ParamInfo>,
        results: Vec<ResultInfo>,
        named_results: bool,
    ) -> Method {
        let mut method = Method::new("Store", name);
        if let Some(ctx) = params.iter().find(|p| p.type_name == "context.Context") {
            method.has_ctx = true;
            method.ctx_name = ctx.name.clone();
        }
        method.has_error = results.iter().any(|r| r.type_name == "error");
        method.has_named_result = named_results;
        method.set_params(params);
        method.set_results(results);
        method
    }

    fn store(methods: Vec<Method>) -> InterfaceInfo {
        InterfaceInfo {
            name: "Store".to_string(),
            type_params: Vec::new(),
            methods,
            file_name: "store.go".to_string(),
            file_path: "/src/store/store.go".to_string(),
            package: "store".to_string(),
            directory: "/src/store".to_string(),
        }
    }

    fn render(iface: &InterfaceInfo, imports: &PkgImports, create_tx: bool) -> String {
        let ctx = TemplateContext::new("1.2.3", iface, imports, "sirish", create_tx);
        ApmRenderer::new().render(&ctx).expect("render")
    }

    #[test]
    fn test_type_name_capitalizes_suffix() {
        assert_eq!(type_name("TestModule", "sirish"), "TestModuleSirish");
        assert_eq!(type_name("Repo", "traced"), "RepoTraced");
        assert_eq!(type_name("Repo", ""), "Repo");
    }

    #[test]
    fn test_header_type_and_constructor() {
        let iface = store(vec![method("Ping", Vec::new(), Vec::new(), false)]);
        let out = render(&iface, &PkgImports::new(), false);
        assert!(out.starts_with("// Code generated by sirish 1.2.3. DO NOT EDIT.\n\npackage store\n"));
        assert!(out.contains("\t\"context\"\n"));
        assert!(out.contains("\tapm \"go.elastic.co/apm/v2\"\n"));
        assert!(out.contains("var _ Store = (*StoreSirishWrapperImpl)(nil)"));
        assert!(out.contains("type StoreSirishWrapperImpl struct {"));
        assert!(out.contains(
            "func NewStoreSirishWrapperImpl(name string, next Store, spanType string) *StoreSirishWrapperImpl {"
        ));
        assert!(out.contains("\t\tspanType = \"custom\"\n"));
    }

    #[test]
    fn test_method_with_context_and_error() {
        let iface = store(vec![method(
            "Get",
            vec![param("ctx", "context.Context"), param("id", "string")],
            vec![result("StoreResUnabcd_0_0", "*model.Item"), result("GetResUnabcd_1_0", "error")],
            false,
        )]);
        let mut imports = PkgImports::new();
        imports.insert("context", "context");
        imports.insert("example.com/shop/model", "model");
        imports.insert("example.com/unused", "unused");
        let out = render(&iface, &imports, true);

        let expected = r#"func (w *StoreSirishWrapperImpl) Get(ctx context.Context, id string) (*model.Item, error) {
	span, ctx := apm.StartSpan(ctx, "Store.Get", w.spanType)
	defer span.End()

	StoreResUnabcd_0_0, GetResUnabcd_1_0 := w.next.Get(ctx, id)
	if GetResUnabcd_1_0 != nil {
		apm.CaptureError(ctx, GetResUnabcd_1_0).Send()
	}
	return StoreResUnabcd_0_0, GetResUnabcd_1_0
}
"#;
        assert!(out.ends_with(expected), "unexpected output:\n{out}");
        assert!(out.contains("\t\"example.com/shop/model\"\n"));
        assert!(!out.contains("example.com/unused"));
        assert!(!out.contains("StartTransaction"));
    }

    #[test]
    fn test_transaction_without_context() {
        let iface = store(vec![method(
            "Flush",
            Vec::new(),
            vec![result("err", "error")],
            true,
        )]);
        let out = render(&iface, &PkgImports::new(), true);
        let expected = r#"func (w *StoreSirishWrapperImpl) Flush() (err error) {
	tx := apm.DefaultTracer().StartTransaction("Store.Flush", w.spanType)
	defer tx.End()
	span, ctx := apm.StartSpan(apm.ContextWithTransaction(context.Background(), tx), "Store.Flush", w.spanType)
	defer span.End()

	err = w.next.Flush()
	if err != nil {
		apm.CaptureError(ctx, err).Send()
	}
	return err
}
"#;
        assert!(out.ends_with(expected), "unexpected output:\n{out}");
    }

    #[test]
    fn test_background_span_without_error_discards_context() {
        let iface = store(vec![method(
            "Len",
            Vec::new(),
            vec![result("n", "int")],
            true,
        )]);
        let out = render(&iface, &PkgImports::new(), false);
        assert!(out.contains(
            "\tspan, _ := apm.StartSpan(context.Background(), \"Store.Len\", w.spanType)\n"
        ));
        assert!(out.contains("\tn = w.next.Len()\n\treturn n\n"));
    }

    #[test]
    fn test_locals_avoid_bound_names() {
        let mut flush = method(
            "Flush",
            vec![param("w", "int"), param("tx", "string")],
            vec![result("ctx", "error")],
            true,
        );
        flush.span_name = "FlushSpnabcd_0_0".to_string();
        let out = render(&store(vec![flush]), &PkgImports::new(), true);
        assert!(out.contains("func (w_1 *StoreSirishWrapperImpl) Flush(w int, tx string) (ctx error) {"));
        assert!(out.contains("\ttx_1 := apm.DefaultTracer()"));
        assert!(out.contains("\tFlushSpnabcd_0_0, ctx_1 := apm.StartSpan("));
        assert!(out.contains("\t\tapm.CaptureError(ctx_1, ctx).Send()"));
    }

    #[test]
    fn test_parameters_named_like_packages_are_renamed() {
        let iface = store(vec![
            method(
                "Get",
                vec![param("ctx", "context.Context"), param("apm", "string")],
                vec![result("GetResUnabcd_0_0", "error")],
                false,
            ),
            method(
                "Trace",
                vec![param("apm", "context.Context")],
                vec![result("TraceResUnabcd_0_0", "error")],
                false,
            ),
            method(
                "Put",
                vec![param("context", "string")],
                vec![result("PutResUnabcd_0_0", "error")],
                false,
            ),
        ]);
        let out = render(&iface, &PkgImports::new(), true);

        assert!(out.contains(
            "func (w *StoreSirishWrapperImpl) Get(ctx context.Context, apm_1 string) error {\n\tspan, ctx := apm.StartSpan(ctx, \"Store.Get\", w.spanType)\n"
        ));
        assert!(out.contains("\tGetResUnabcd_0_0 := w.next.Get(ctx, apm_1)\n"));
        assert!(out.contains(
            "func (w *StoreSirishWrapperImpl) Trace(apm_1 context.Context) error {\n\tspan, apm_1 := apm.StartSpan(apm_1, \"Store.Trace\", w.spanType)\n"
        ));
        assert!(out.contains("\t\tapm.CaptureError(apm_1, TraceResUnabcd_0_0).Send()\n"));

        let expected = r#"func (w *StoreSirishWrapperImpl) Put(context_1 string) error {
	tx := apm.DefaultTracer().StartTransaction("Store.Put", w.spanType)
	defer tx.End()
	span, ctx := apm.StartSpan(apm.ContextWithTransaction(context.Background(), tx), "Store.Put", w.spanType)
	defer span.End()

	PutResUnabcd_0_0 := w.next.Put(context_1)
	if PutResUnabcd_0_0 != nil {
		apm.CaptureError(ctx, PutResUnabcd_0_0).Send()
	}
	return PutResUnabcd_0_0
}
"#;
        assert!(out.ends_with(expected), "unexpected output:\n{out}");
    }

    #[test]
    fn test_named_result_shadowing_package_is_renamed() {
        let iface = store(vec![method(
            "Len",
            Vec::new(),
            vec![result("apm", "int")],
            true,
        )]);
        let out = render(&iface, &PkgImports::new(), false);
        assert!(out.contains("Len() (apm_1 int) {\n"));
        assert!(out.contains("\tapm_1 = w.next.Len()\n\treturn apm_1\n}\n"));
    }

    #[test]
    fn test_variadic_arguments_are_spread() {
        let iface = store(vec![method(
            "Log",
            vec![param("ctx", "context.Context"), param("args", "...any")],
            Vec::new(),
            false,
        )]);
        let out = render(&iface, &PkgImports::new(), false);
        assert!(out.contains("\tw.next.Log(ctx, args...)\n}"));
        assert!(!out.contains("\t\"context\"\n"), "no background context needed");
    }

    #[test]
    fn test_generic_interface() {
        let mut iface = store(vec![method(
            "Get",
            vec![param("ctx", "context.Context"), param("k", "K")],
            vec![result("v", "V"), result("ok", "bool")],
            true,
        )]);
        iface.type_params = vec![
            TypeParamInfo {
                name: "K".to_string(),
                constraint: "comparable".to_string(),
            },
            TypeParamInfo {
                name: "V".to_string(),
                constraint: "any".to_string(),
            },
        ];
        let out = render(&iface, &PkgImports::new(), false);
        assert!(!out.contains("var _ Store"));
        assert!(out.contains("type StoreSirishWrapperImpl[K comparable, V any] struct {"));
        assert!(out.contains("\tnext     Store[K, V]\n"));
        assert!(out.contains(
            "func NewStoreSirishWrapperImpl[K comparable, V any](name string, next Store[K, V], spanType string) *StoreSirishWrapperImpl[K, V] {"
        ));
        assert!(out.contains("\treturn &StoreSirishWrapperImpl[K, V]{\n"));
        assert!(out.contains("func (w *StoreSirishWrapperImpl[K, V]) Get(ctx context.Context, k K) (v V, ok bool) {"));
    }

    #[test]
    fn test_import_selection() {
        let iface = store(vec![method(
            "Put",
            vec![param("ctx", "context.Context"), param("items", "[]*m.Item")],
            vec![result("err", "error")],
            true,
        )]);
        let mut imports = PkgImports::new();
        imports.insert("context", "context");
        imports.insert("example.com/model", "m");
        imports.insert("example.com/dsl", ".");
        imports.insert("embed", "_");
        imports.insert("go.elastic.co/apm/v2", "elastic");
        let out = render(&iface, &imports, false);
        assert!(out.contains(
            "import (\n\t\"context\"\n\t. \"example.com/dsl\"\n\tm \"example.com/model\"\n\telastic \"go.elastic.co/apm/v2\"\n)\n"
        ));
        assert!(out.contains("elastic.StartSpan(ctx"));
    }

    #[test]
    fn test_referenced_qualifiers() {
        let iface = store(vec![method(
            "Put",
            vec![
                param("a", "map[pkg.Key][]*other.Value"),
                param("b", "...model.Entry"),
                param("c", "func(x io.Reader) error"),
            ],
            Vec::new(),
            false,
        )]);
        let mut found: Vec<String> = referenced_qualifiers(&iface).into_iter().collect();
        found.sort();
        assert_eq!(found, vec!["io", "model", "other", "pkg"]);
    }

    #[test]
    fn test_render_rejects_missing_package() {
        let mut iface = store(Vec::new());
        iface.package.clear();
        let imports = PkgImports::new();
        let ctx = TemplateContext::new("dev", &iface, &imports, "sirish", false);
        let err = ApmRenderer::new().render(&ctx).expect_err("must fail");
        assert!(matches!(err, Error::Render { .. }));
    }
}
