//! Scan, extract and generate for one input file

use anyhow::{bail, Result};
use sirish_core::config::{local_config_path, CONFIG_FILE_NAME};
use sirish_core::{Config, Targets};
use sirish_generator::{GenerationOptions, GenerationReport, GoImports, WrapperGenerator};
use sirish_parser::{resolve_targets, DeclarationExtractor};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Settings given on the command line, each overriding the loaded config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub format_imports: Option<bool>,
    pub create_tx: Option<bool>,
    pub show_banner: Option<bool>,
    pub suffix: Option<String>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) {
        if let Some(format_imports) = self.format_imports {
            config.generation.format_imports = format_imports;
        }
        if let Some(create_tx) = self.create_tx {
            config.generation.create_tx = create_tx;
        }
        if let Some(show_banner) = self.show_banner {
            config.show_banner = show_banner;
        }
        if let Some(suffix) = &self.suffix {
            config.generation.suffix = suffix.clone();
        }
    }
}

/// Configuration file to load, if any
///
/// An explicit path must exist. Otherwise `./sirish.toml` is preferred over
/// the per-user file in the platform configuration directory.
pub fn config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Configuration file {} does not exist", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }
    let local = local_config_path()?;
    if local.exists() {
        return Ok(Some(local));
    }
    Ok(dirs::config_dir()
        .map(|dir| dir.join("sirish").join(CONFIG_FILE_NAME))
        .filter(|path| path.exists()))
}

/// Load defaults, the configuration file and `SIRISH_*` variables
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match config_path(explicit)? {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            Config::from_file(&path)?
        }
        None => Config::load(None)?,
    };
    Ok(config)
}

/// Absolute path of the input file
///
/// Relative paths, including the bare file name `go generate` passes in
/// `GOFILE`, are resolved against `cwd`.
pub fn resolve_file(file: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    match file {
        Some(path) if !path.as_os_str().is_empty() => Ok(cwd.join(path)),
        _ => bail!("No input file: pass --file or run sirish through go generate"),
    }
}

/// Targets from repeated and comma separated `--types` values
pub fn targets_from_flags(values: &[String]) -> Targets {
    let mut targets = Targets::new();
    for value in values {
        targets.set(value);
    }
    targets
}

/// Long flags that may also be written with a single dash, as Go's flag
/// package allows (`-tg=false`)
const LONG_FLAGS: [&str; 9] = [
    "file", "package", "types", "fmt", "tg", "banner", "suffix", "config", "verbose",
];

/// Rewrite single-dash long flags to their double-dash form
pub fn go_style_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            let Some(rest) = arg.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}

/// Everything a run needs, after flags and environment are resolved
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub file: PathBuf,
    /// Package the caller expects the file to declare (`GOPACKAGE`)
    pub package: Option<String>,
    pub targets: Targets,
    pub config: Config,
}

/// What a run did
#[derive(Debug)]
pub struct RunSummary {
    /// Configured and comment-discovered targets, merged
    pub targets: Targets,
    pub package: String,
    pub report: GenerationReport,
}

/// Run the pipeline
///
/// Parse and extraction errors abort the run. Generation failures are
/// recorded in the report and do not.
pub fn run(plan: &RunPlan) -> sirish_core::Result<RunSummary> {
    let targets = resolve_targets(&plan.file, &plan.targets)?;
    info!(
        file = %plan.file.display(),
        package = plan.package.as_deref().unwrap_or("-"),
        targets = %targets,
        "sirish configs"
    );
    if targets.is_empty() {
        warn!("No target interfaces: pass --types or add a `// sirish:Name` comment");
    }

    let extraction = DeclarationExtractor::new().extract_file(&plan.file, &targets)?;
    if let Some(expected) = plan.package.as_deref() {
        if expected != extraction.package {
            warn!(
                expected,
                declared = %extraction.package,
                "Package name differs from the one the file declares"
            );
        }
    }

    let generation = &plan.config.generation;
    let generator = WrapperGenerator::new(
        generation.suffix.clone(),
        extraction.interfaces,
        extraction.imports,
    )
    .with_formatter(GoImports::new(generation.formatter_command.clone()));

    info!("sirish starts the firework...");
    let report = generator.generate(&GenerationOptions {
        version: sirish_core::VERSION.to_string(),
        organize_imports: generation.format_imports,
        create_tx: generation.create_tx,
    });

    Ok(RunSummary {
        targets,
        package: extraction.package,
        report,
    })
}
