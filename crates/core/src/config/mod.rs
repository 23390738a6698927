//! Configuration module for sirish
//!
//! Configuration is layered: built-in defaults, an optional TOML file and
//! `SIRISH_` environment variables. Command-line flags are applied on top by
//! the binary.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::{DEFAULT_FORMATTER_COMMAND, DEFAULT_SUFFIX};

use defaults::*;

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "sirish.toml";

/// Returns the path of the configuration file in the current directory
pub fn local_config_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| Error::config(format!("Unable to determine current directory: {e}")))?;
    Ok(cwd.join(CONFIG_FILE_NAME))
}

/// Wrapper generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Suffix inserted before `.go` in generated file names
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Run the import formatter over generated files
    #[serde(default = "default_format_imports")]
    pub format_imports: bool,

    /// Start a transaction in methods that receive no context
    #[serde(default = "default_create_tx")]
    pub create_tx: bool,

    /// Executable used to organize imports of generated files
    #[serde(default = "default_formatter_command")]
    pub formatter_command: String,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Print the banner before running
    #[serde(default = "default_show_banner")]
    pub show_banner: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            format_imports: default_format_imports(),
            create_tx: default_create_tx(),
            formatter_command: default_formatter_command(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            show_banner: default_show_banner(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let suffix = &self.generation.suffix;
        if suffix.is_empty() {
            return Err(Error::config("generation.suffix must not be empty"));
        }
        if !suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::config(format!(
                "Invalid suffix '{suffix}'. Only ASCII letters, digits, '_' and '-' are allowed"
            )));
        }
        if !suffix.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(Error::config(format!(
                "Invalid suffix '{suffix}'. It must start with a letter"
            )));
        }

        if self.generation.format_imports && self.generation.formatter_command.trim().is_empty()
        {
            return Err(Error::config(
                "generation.formatter_command must be set when format_imports is enabled",
            ));
        }

        Ok(())
    }
}
