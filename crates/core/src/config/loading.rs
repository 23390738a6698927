//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{local_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `SIRISH_` and use double underscores
    /// for nested values. For example:
    /// - `SIRISH_GENERATION__SUFFIX=trace`
    /// - `SIRISH_SHOW_BANNER=false`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // The config crate does not apply serde defaults for missing sections
        let builder = set_config_default(builder, "generation.suffix", default_suffix())?;
        let builder = set_config_default(
            builder,
            "generation.format_imports",
            default_format_imports(),
        )?;
        let builder = set_config_default(builder, "generation.create_tx", default_create_tx())?;
        let builder = set_config_default(
            builder,
            "generation.formatter_command",
            default_formatter_command(),
        )?;
        let mut builder = set_config_default(builder, "show_banner", default_show_banner())?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        } else {
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        }

        // Add environment variables with SIRISH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("SIRISH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (`./sirish.toml` or custom --config path)
    /// 3. Environment variables (SIRISH_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => local_config_path()?,
        };
        Self::from_file(&path)
    }
}
