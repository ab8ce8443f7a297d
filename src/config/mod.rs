//! Site configuration management for `langlink.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── localize   # [localize]
//! │   └── site       # [site]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[site]`     | Public URL (its path prefixes page locations)  |
//! | `[build]`    | Built site directory                           |
//! | `[localize]` | Languages, hint attribute, version detection   |

pub mod section;
pub mod types;
mod util;

use util::{extract_url_path, find_config_file};

pub use section::{BuildSectionConfig, LocalizeConfig, SiteSectionConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, debug, log};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing langlink.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SiteConfig {
    /// Project root directory - parent of config file, or cwd
    #[serde(skip)]
    pub root: PathBuf,

    /// Site deployment settings
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Built site settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Link localization settings
    #[serde(default)]
    pub localize: LocalizeConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, built-in
    /// defaults apply and the project root is cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.finalize(cli);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI overrides, normalize paths and derive the path prefix.
    fn finalize(&mut self, cli: &Cli) {
        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.localize.languages, cli.languages.as_ref());
        if let Some(url) = &cli.site_url {
            self.site.url = Some(url.clone());
        }

        self.root = crate::utils::path::normalize_path(&self.root);
        self.build.output = crate::utils::path::normalize_path(&self.root.join(&self.build.output));
        self.sync_path_prefix_from_url();
    }

    /// Derive path_prefix from site.url.
    ///
    /// `https://example.github.io/project/` serves every page under
    /// `/project/`, which is what the browser location starts with.
    fn sync_path_prefix_from_url(&mut self) {
        if let Some(ref url) = self.site.url
            && let Some(path) = extract_url_path(url)
        {
            self.build.path_prefix = path;
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) =
            Self::parse_with_ignored(&content).map_err(ConfigError::Toml)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), toml::de::Error> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Built site directory (absolute after loading).
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.localize.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse a config snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    let (parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_invalid_toml() {
        assert!(SiteConfig::parse_with_ignored("[localize\nlanguages = []").is_err());
    }

    #[test]
    fn test_site_config_default() {
        let config = SiteConfig::default();
        assert_eq!(config.localize.languages, ["zh"]);
        assert_eq!(config.build.output, PathBuf::from("site"));
        assert!(config.site.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[localize]\nlanguages = [\"zh\"]\nlangs = [\"ja\"]\n[unknown_section]\nfield = 1";
        let (config, ignored) = SiteConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.localize.languages, ["zh"]);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
        assert!(ignored.iter().any(|f| f.contains("langs")));
    }

    #[test]
    fn test_from_path_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SiteConfig::from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_finalize_applies_cli_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "langlink",
            "--output",
            "public",
            "--languages",
            "ja,ko",
            "-U",
            "https://example.github.io/project/",
            "resolve",
            "/",
        ]);

        let mut config = SiteConfig {
            root: dir.path().to_path_buf(),
            ..SiteConfig::default()
        };
        config.finalize(&cli);

        assert_eq!(config.localize.languages, ["ja", "ko"]);
        assert!(config.output_dir().ends_with("public"));
        assert!(config.output_dir().is_absolute());
        assert_eq!(config.build.path_prefix, "project");
    }

    #[test]
    fn test_path_prefix_from_config_url() {
        let mut config = test_parse_config("[site]\nurl = \"https://example.org/a/b/\"");
        config.sync_path_prefix_from_url();
        assert_eq!(config.build.path_prefix, "a/b");
    }

    #[test]
    fn test_validate_reports_diagnostics() {
        let config = test_parse_config("[localize]\nlanguages = []\n[site]\nurl = \"nope\"");
        let err = config.validate().unwrap_err();
        let diag = err.downcast_ref::<ConfigError>().unwrap();
        let ConfigError::Diagnostics(diag) = diag else {
            panic!("expected diagnostics");
        };
        assert_eq!(diag.len(), 2);
    }
}
