//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://example.github.io/project/"
//! ```
//!
//! The URL's path (`project`) is what a browser's location starts with on
//! every page, so it becomes part of each page location.

use serde::Deserialize;

use crate::config::{ConfigDiagnostics, FieldPath};

/// Site deployment settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Public URL of the site root.
    pub url: Option<String>,
}

impl SiteSectionConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(url) = &self.url else {
            return;
        };
        match url::Url::parse(url) {
            Ok(parsed) if !parsed.cannot_be_a_base() => {}
            _ => diag.error_with_hint(
                Self::URL,
                format!("`{url}` is not an absolute URL"),
                "use a full URL such as \"https://example.org/docs/\"",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_site_url() {
        let config = test_parse_config("[site]\nurl = \"https://example.org/docs/\"");
        assert_eq!(config.site.url.as_deref(), Some("https://example.org/docs/"));

        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_site_url_must_be_absolute() {
        let config = test_parse_config("[site]\nurl = \"example.org/docs\"");
        let mut diag = ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field, SiteSectionConfig::URL);
    }
}
