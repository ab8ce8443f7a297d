//! `[localize]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [localize]
//! languages = ["zh"]                      # Supported alternate languages
//! attribute = "hreflang"                  # Anchor attribute naming the language
//! version_pattern = '^v?[0-9]+(\.[0-9]+)*$'     # Version segments (case-insensitive)
//! special_versions = ["latest"]           # Channel names treated as versions
//! ```

use serde::Deserialize;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::localize::{
    DEFAULT_ATTRIBUTE, DEFAULT_VERSION_PATTERN, Languages, Localizer, VersionMatcher,
};

/// Characters that cannot appear in a language path segment.
const FORBIDDEN_IN_CODE: [char; 3] = ['/', '?', '#'];

/// Link localization settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalizeConfig {
    /// Supported language codes, matched exactly against path segments
    /// and anchor hints.
    pub languages: Vec<String>,

    /// Anchor attribute holding the target language.
    pub attribute: String,

    /// Regular expression for version-like segments.
    pub version_pattern: String,

    /// Segment names treated as versions even though they fail the pattern.
    pub special_versions: Vec<String>,
}

impl Default for LocalizeConfig {
    fn default() -> Self {
        Self {
            languages: vec!["zh".to_string()],
            attribute: DEFAULT_ATTRIBUTE.to_string(),
            version_pattern: DEFAULT_VERSION_PATTERN.to_string(),
            special_versions: vec!["latest".to_string()],
        }
    }
}

impl LocalizeConfig {
    pub const LANGUAGES: FieldPath = FieldPath::new("localize.languages");
    pub const ATTRIBUTE: FieldPath = FieldPath::new("localize.attribute");
    pub const VERSION_PATTERN: FieldPath = FieldPath::new("localize.version_pattern");

    /// Validate the section, collecting every problem into `diag`.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.languages.is_empty() {
            diag.error_with_hint(
                Self::LANGUAGES,
                "at least one language is required",
                "languages = [\"zh\"]",
            );
        }

        for code in &self.languages {
            if code.is_empty() {
                diag.error(Self::LANGUAGES, "language code cannot be empty");
            } else if code.contains(FORBIDDEN_IN_CODE) {
                diag.error(
                    Self::LANGUAGES,
                    format!("`{code}` cannot be used as a path segment"),
                );
            }
        }

        if self.attribute.trim().is_empty() {
            diag.error(Self::ATTRIBUTE, "attribute name cannot be empty");
        }

        if let Err(err) = VersionMatcher::new(&self.version_pattern, &self.special_versions) {
            diag.error(
                Self::VERSION_PATTERN,
                format!("invalid regular expression: {err}"),
            );
        }
    }

    /// Build the localizer described by this section.
    pub fn localizer(&self) -> Result<Localizer, regex::Error> {
        let versions = VersionMatcher::new(&self.version_pattern, &self.special_versions)?;
        Ok(Localizer::new(
            Languages::new(self.languages.iter().cloned()),
            self.attribute.trim(),
            versions,
        ))
    }
}
