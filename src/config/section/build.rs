//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "site"     # Directory holding the built pages
//! ```

use serde::Deserialize;
use std::path::PathBuf;

/// Built site settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory of the site generator (relative to the config file).
    pub output: PathBuf,

    /// URL path the site is served under, derived from `site.url`.
    #[serde(skip)]
    pub path_prefix: String,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("site"),
            path_prefix: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_build_default_output() {
        let config = test_parse_config("");
        assert_eq!(config.build.output, PathBuf::from("site"));
        assert!(config.build.path_prefix.is_empty());
    }

    #[test]
    fn test_build_custom_output() {
        let config = test_parse_config("[build]\noutput = \"public/docs\"");
        assert_eq!(config.build.output, PathBuf::from("public/docs"));
    }
}
