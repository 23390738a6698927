use thiserror::Error;

/// Result type for sirish operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sirish operations
///
/// Structural errors (`Parse`, `ImportDecode`, `Extraction`) abort the whole
/// run. Generation errors (`Render`, `Format`, `Write`) are isolated to the
/// declaration that produced them.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source file cannot be parsed as valid Go syntax
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// An import path literal cannot be decoded
    #[error("Cannot decode import path {path}: {message}")]
    ImportDecode { path: String, message: String },

    /// A type parameter, parameter or result field cannot be processed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Wrapper rendering failed for one declaration
    #[error("Render error for {interface}: {message}")]
    Render { interface: String, message: String },

    /// The import formatter failed
    #[error("Format error: {0}")]
    Format(String),

    /// Creating or writing a generated file failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    /// Creates a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a parse error
    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Creates an import decode error
    pub fn import_decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ImportDecode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an extraction error
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction(msg.into())
    }

    /// Creates a render error
    pub fn render(interface: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            interface: interface.into(),
            message: message.into(),
        }
    }

    /// Creates a format error
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Creates a write error
    pub fn write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Adds context to any error
    pub fn with_context<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error must abort the whole run
    ///
    /// Render, format and write failures only affect a single declaration.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::Render { .. } | Self::Format(_) | Self::Write { .. }
        )
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::with_context(context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_errors_are_fatal() {
        assert!(Error::parse("a.go", "unexpected token").is_fatal());
        assert!(Error::import_decode("\"fmt", "missing quote").is_fatal());
        assert!(Error::extraction("bad field").is_fatal());
    }

    #[test]
    fn test_generation_errors_are_recoverable() {
        assert!(!Error::render("Store", "boom").is_fatal());
        assert!(!Error::format("goimports missing").is_fatal());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        assert!(!Error::write("/tmp/a.sirish.go", io).is_fatal());
    }

    #[test]
    fn test_display_includes_location() {
        let err = Error::parse("/src/store.go", "syntax error at 3:7");
        assert_eq!(
            err.to_string(),
            "Parse error in /src/store.go: syntax error at 3:7"
        );
    }
}
