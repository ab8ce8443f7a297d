//! Version-like segment detection.

use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashSet;

/// Default shape of a version segment: `1`, `0.1`, `v0.1.1`, `V2.0`.
pub const DEFAULT_VERSION_PATTERN: &str = r"^v?[0-9]+(\.[0-9]+)*$";

/// Classifies a path segment as a version or release channel.
#[derive(Debug, Clone)]
pub struct VersionMatcher {
    pattern: Regex,
    /// Lowercased channel names (`latest`, `stable`, ...).
    special: FxHashSet<String>,
}

impl VersionMatcher {
    /// Compile `pattern` (case-insensitive) with the given channel names.
    pub fn new<I, S>(pattern: &str, special: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        let special = special
            .into_iter()
            .map(|name| name.as_ref().to_lowercase())
            .collect();
        Ok(Self { pattern, special })
    }

    /// Whether `segment` is a version token or a named channel.
    pub fn is_version(&self, segment: &str) -> bool {
        self.pattern.is_match(segment) || self.special.contains(&segment.to_lowercase())
    }
}

impl Default for VersionMatcher {
    fn default() -> Self {
        Self {
            pattern: RegexBuilder::new(DEFAULT_VERSION_PATTERN)
                .case_insensitive(true)
                .build()
                .expect("default version pattern is valid"),
            special: FxHashSet::from_iter(["latest".to_string()]),
        }
    }
}
