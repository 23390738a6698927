//! sirish - APM tracing wrappers for Go interfaces
//!
//! Usually invoked through `go generate`:
//!
//! ```text
//! //go:generate sirish -t Store -tg=false
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::Parser;
use sirish::pipeline::{self, go_style_args, load_config, resolve_file, targets_from_flags};
use sirish::{Banner, Overrides, RunPlan};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sirish")]
#[command(about = "Generate APM tracing wrappers for Go interfaces")]
#[command(version)]
struct Cli {
    /// Go source file to scan
    #[arg(short, long, value_name = "FILE", env = "GOFILE")]
    file: Option<PathBuf>,

    /// Package the file is expected to declare
    #[arg(short, long, value_name = "NAME", env = "GOPACKAGE")]
    package: Option<String>,

    /// Interfaces to wrap, repeatable or comma separated
    #[arg(short = 't', long = "types", value_name = "NAMES")]
    types: Vec<String>,

    /// Organize imports of generated files with goimports
    #[arg(long = "fmt", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    format_imports: Option<bool>,

    /// Start a transaction in methods without a context parameter
    #[arg(long = "tg", value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    create_tx: Option<bool>,

    /// Print the banner
    #[arg(long, value_name = "BOOL", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    banner: Option<bool>,

    /// Suffix of generated files and types
    #[arg(long, value_name = "SUFFIX")]
    suffix: Option<String>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            format_imports: self.format_imports,
            create_tx: self.create_tx,
            show_banner: self.banner,
            suffix: self.suffix.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(go_style_args(env::args()));

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("sirish={level}")))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.overrides().apply(&mut config);
    config.validate()?;

    if config.show_banner {
        match Banner::default().render() {
            Ok(banner) => print!("{banner}"),
            Err(e) => warn!("Failed to render banner: {e}"),
        }
    }

    let cwd = env::current_dir().context("Failed to get current directory")?;
    let plan = RunPlan {
        file: resolve_file(cli.file.as_deref(), &cwd)?,
        package: cli.package,
        targets: targets_from_flags(&cli.types),
        config,
    };

    let summary = pipeline::run(&plan)
        .with_context(|| format!("Failed to process {}", plan.file.display()))?;

    info!(
        package = %summary.package,
        written = summary.report.written.len(),
        unformatted = summary.report.unformatted.len(),
        failed = summary.report.failures.len(),
        "Generation finished"
    );
    Ok(())
}
