//! Default values and functions for configuration

/// Suffix used when none is configured
pub const DEFAULT_SUFFIX: &str = "sirish";

/// Import organizer invoked on generated files
pub const DEFAULT_FORMATTER_COMMAND: &str = "goimports";

pub(crate) fn default_suffix() -> String {
    DEFAULT_SUFFIX.to_string()
}

pub(crate) fn default_format_imports() -> bool {
    true
}

pub(crate) fn default_create_tx() -> bool {
    true
}

pub(crate) fn default_formatter_command() -> String {
    DEFAULT_FORMATTER_COMMAND.to_string()
}

pub(crate) fn default_show_banner() -> bool {
    true
}
