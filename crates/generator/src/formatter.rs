//! Import organizing for generated files
//!
//! Generated wrappers list every import the interface might need; an
//! [`ImportFormatter`] gets the final say on the import block and layout.

use sirish_core::config::DEFAULT_FORMATTER_COMMAND;
use sirish_core::error::{Error, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// Rewrites the source of a generated file before it is written
pub trait ImportFormatter {
    /// Format `source`, which will be written to `path`
    fn format(&self, path: &Path, source: &[u8]) -> Result<Vec<u8>>;
}

/// Formatter running the `goimports` executable
#[derive(Debug, Clone)]
pub struct GoImports {
    command: String,
}

impl Default for GoImports {
    fn default() -> Self {
        Self::new(DEFAULT_FORMATTER_COMMAND)
    }
}

impl GoImports {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command_name(&self) -> &str {
        &self.command
    }

    /// Command formatting stdin as if it lived next to `path`
    pub fn build_command(program: &Path, path: &Path) -> Command {
        let mut cmd = Command::new(program);
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            cmd.arg("-srcdir").arg(dir);
        }
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl ImportFormatter for GoImports {
    fn format(&self, path: &Path, source: &[u8]) -> Result<Vec<u8>> {
        let program = which::which(&self.command)
            .map_err(|e| Error::format(format!("{} not found in PATH: {e}", self.command)))?;
        debug!(formatter = %program.display(), file = %path.display(), "Formatting imports");

        let mut child = Self::build_command(&program, path)
            .spawn()
            .map_err(|e| Error::format(format!("Failed to spawn {}: {e}", self.command)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source)
                .map_err(|e| Error::format(format!("Failed to write to {}: {e}", self.command)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| Error::format(format!("Failed to wait for {}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::format(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }
        if output.stdout.is_empty() {
            return Err(Error::format(format!("{} produced no output", self.command)));
        }
        Ok(output.stdout)
    }
}
