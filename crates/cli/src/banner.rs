//! Startup banner

use std::fmt::{self, Write};

/// ASCII art shown at the top of the banner
pub const ASCII_ART: &str = include_str!("../assets/ascii.txt");

/// One-line program description
pub const DESCRIPTION: &str = "sirish, a solution to create wrappers for your tracing needs";

/// Build metadata, overridable at compile time
pub const BUILD_DATE: &str = match option_env!("SIRISH_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};
pub const BUILT_BY: &str = match option_env!("SIRISH_BUILT_BY") {
    Some(builder) => builder,
    None => "cargo",
};

/// Values printed by the banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub ascii_art: String,
    pub description: String,
    pub version: String,
    pub build_date: String,
    pub built_by: String,
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            ascii_art: ASCII_ART.to_string(),
            description: DESCRIPTION.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            build_date: BUILD_DATE.to_string(),
            built_by: BUILT_BY.to_string(),
        }
    }
}

impl Banner {
    pub fn render(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{}", self.ascii_art.trim_end())?;
        writeln!(out)?;
        writeln!(out, "{}", self.description)?;
        writeln!(out, "version:    {}", self.version)?;
        writeln!(out, "build date: {}", self.build_date)?;
        writeln!(out, "built by:   {}", self.built_by)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_layout() {
        let banner = Banner {
            ascii_art: "ART\n\n".to_string(),
            description: "desc".to_string(),
            version: "1.0.0".to_string(),
            build_date: "2025-12-20".to_string(),
            built_by: "ci".to_string(),
        };
        assert_eq!(
            banner.render().expect("render"),
            "ART\n\ndesc\nversion:    1.0.0\nbuild date: 2025-12-20\nbuilt by:   ci\n"
        );
    }

    #[test]
    fn test_default_banner_uses_embedded_art() {
        let rendered = Banner::default().render().expect("render");
        assert!(rendered.starts_with(ASCII_ART.trim_end()));
        assert!(rendered.contains(env!("CARGO_PKG_VERSION")));
    }
}
