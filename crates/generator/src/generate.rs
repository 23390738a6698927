//! One output file per extracted interface
//!
//! Failures are isolated per declaration: a wrapper that cannot be rendered
//! or written is logged and recorded in the [`GenerationReport`], and the
//! remaining declarations are still generated.

use crate::formatter::{GoImports, ImportFormatter};
use crate::renderer::{ApmRenderer, TemplateContext, WrapperRenderer};
use sirish_core::config::DEFAULT_SUFFIX;
use sirish_core::error::{Error, Result};
use sirish_core::{InterfaceInfo, PkgImports};
use sirish_parser::ensure_tracing_import;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Per-run generation switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Version written into the generated header
    pub version: String,
    /// Pass rendered files through the import formatter
    pub organize_imports: bool,
    /// Start a transaction in methods without a context parameter
    pub create_tx: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            version: sirish_core::VERSION.to_string(),
            organize_imports: true,
            create_tx: true,
        }
    }
}

/// A declaration whose wrapper was not written
#[derive(Debug)]
pub struct GenerationFailure {
    pub interface: String,
    pub error: Error,
}

/// Outcome of a generation run
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, in declaration order
    pub written: Vec<PathBuf>,
    /// Files written without import formatting because the formatter failed
    pub unformatted: Vec<PathBuf>,
    pub failures: Vec<GenerationFailure>,
}

impl GenerationReport {
    /// Every declaration produced a file
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Path of the wrapper generated for `iface`
///
/// `store.go` becomes `store.<suffix>.go` in the interface's directory.
pub fn output_path(iface: &InterfaceInfo, suffix: &str) -> PathBuf {
    let stem = iface
        .file_name
        .strip_suffix(".go")
        .unwrap_or(&iface.file_name);
    Path::new(&iface.directory).join(format!("{stem}.{suffix}.go"))
}

/// Renders and writes wrapper files
pub struct WrapperGenerator {
    suffix: String,
    interfaces: Vec<InterfaceInfo>,
    imports: PkgImports,
    renderer: Box<dyn WrapperRenderer>,
    formatter: Box<dyn ImportFormatter>,
}

impl std::fmt::Debug for WrapperGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperGenerator")
            .field("suffix", &self.suffix)
            .field("interfaces", &self.interfaces.len())
            .field("imports", &self.imports.len())
            .finish_non_exhaustive()
    }
}

impl WrapperGenerator {
    /// Generator for `interfaces` using the APM renderer and `goimports`
    ///
    /// An empty suffix falls back to the default one. The tracing library is
    /// added to `imports` when missing.
    pub fn new(
        suffix: impl Into<String>,
        interfaces: Vec<InterfaceInfo>,
        mut imports: PkgImports,
    ) -> Self {
        let suffix = suffix.into();
        let suffix = if suffix.is_empty() {
            DEFAULT_SUFFIX.to_string()
        } else {
            suffix
        };
        ensure_tracing_import(&mut imports);
        Self {
            suffix,
            interfaces,
            imports,
            renderer: Box::new(ApmRenderer::new()),
            formatter: Box::new(GoImports::default()),
        }
    }

    pub fn with_renderer(mut self, renderer: impl WrapperRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_formatter(mut self, formatter: impl ImportFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn imports(&self) -> &PkgImports {
        &self.imports
    }

    /// Generate every wrapper
    pub fn generate(&self, options: &GenerationOptions) -> GenerationReport {
        let mut report = GenerationReport::default();
        for iface in &self.interfaces {
            info!(
                interface = %iface.name,
                directory = %iface.directory,
                "Generating wrapper"
            );
            let path = output_path(iface, &self.suffix);
            match self.generate_one(iface, &path, options, &mut report) {
                Ok(()) => {
                    debug!(path = %path.display(), "Wrote wrapper");
                    report.written.push(path);
                }
                Err(e) => {
                    error!(interface = %iface.name, "Skipping wrapper: {e}");
                    report.failures.push(GenerationFailure {
                        interface: iface.name.clone(),
                        error: e,
                    });
                }
            }
        }
        report
    }

    fn generate_one(
        &self,
        iface: &InterfaceInfo,
        path: &Path,
        options: &GenerationOptions,
        report: &mut GenerationReport,
    ) -> Result<()> {
        let ctx = TemplateContext::new(
            &options.version,
            iface,
            &self.imports,
            &self.suffix,
            options.create_tx,
        );
        let rendered = self.renderer.render(&ctx)?.into_bytes();

        let (contents, fallback) = if options.organize_imports {
            match self.formatter.format(path, &rendered) {
                Ok(formatted) => (formatted, false),
                Err(e) => {
                    warn!(interface = %iface.name, "Import formatting failed, writing unformatted output: {e}");
                    (rendered, true)
                }
            }
        } else {
            (rendered, false)
        };

        std::fs::write(path, contents).map_err(|e| Error::write(path.display().to_string(), e))?;
        if fallback {
            report.unformatted.push(path.to_path_buf());
        }
        Ok(())
    }
}
