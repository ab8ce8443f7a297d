//! Current page location.
//!
//! A [`Location`] is what a browser's address bar holds for a page, reduced
//! to the three pieces link localization needs:
//!
//! - path segments (split on `/`, empty segments dropped)
//! - whether the path ends in `/` (false for the bare root `/`)
//! - the query string plus fragment, kept byte-for-byte

use std::path::{Component, Path};

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Bytes a browser percent-encodes inside a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// Page file that maps to its directory URL.
const INDEX_FILE: &str = "index.html";

/// Location of the page whose anchors are being localized.
///
/// Invariants:
/// - `segments` never contains an empty string
/// - `trailing_slash` is false when the path is exactly `/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    segments: Vec<String>,
    trailing_slash: bool,
    suffix: String,
}

impl Location {
    /// Build from a decoded-as-is path and a verbatim `?query#fragment` suffix.
    pub fn from_parts(path: &str, suffix: impl Into<String>) -> Self {
        let path = if path.is_empty() { "/" } else { path };
        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            segments,
            trailing_slash: path.ends_with('/') && path != "/",
            suffix: suffix.into(),
        }
    }

    /// Parse a browser location.
    ///
    /// Accepts an absolute URL (`https://host/a/b/?q#f`) or a site path
    /// (`/a/b/?q#f`). For plain paths everything from the first `?` or `#`
    /// on is the suffix, untouched.
    pub fn parse(href: &str) -> Self {
        if let Ok(url) = url::Url::parse(href)
            && !url.cannot_be_a_base()
        {
            let mut suffix = String::new();
            if let Some(query) = url.query() {
                suffix.push('?');
                suffix.push_str(query);
            }
            if let Some(fragment) = url.fragment() {
                suffix.push('#');
                suffix.push_str(fragment);
            }
            return Self::from_parts(url.path(), suffix);
        }

        match href.find(['?', '#']) {
            Some(pos) => Self::from_parts(&href[..pos], &href[pos..]),
            None => Self::from_parts(href, String::new()),
        }
    }

    /// Location a browser shows for a built page file.
    ///
    /// `relative` is the file path inside the output directory, `prefix` the
    /// site's deployment sub-path (e.g. `docs` for `https://host/docs/`).
    ///
    /// | File                        | Location            |
    /// |-----------------------------|---------------------|
    /// | `index.html`                | `/`                 |
    /// | `reference/foo/index.html`  | `/reference/foo/`   |
    /// | `404.html`                  | `/404.html`         |
    pub fn for_page(relative: &Path, prefix: &str) -> Self {
        let mut parts: Vec<String> = prefix
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        for component in relative.components() {
            if let Component::Normal(name) = component {
                let name = name.to_string_lossy();
                parts.push(utf8_percent_encode(&name, PATH_SEGMENT).to_string());
            }
        }

        let is_index = parts.last().is_some_and(|last| last == INDEX_FILE);
        if is_index {
            parts.pop();
        }

        let mut path = format!("/{}", parts.join("/"));
        if is_index && !parts.is_empty() {
            path.push('/');
        }

        Self::from_parts(&path, String::new())
    }

    /// Non-empty path segments, in order.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the original path ended in `/` (never true for the root).
    #[inline]
    pub fn has_trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Query string plus fragment, exactly as given.
    #[inline]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.segments.join("/"))?;
        if self.trailing_slash {
            f.write_str("/")?;
        }
        f.write_str(&self.suffix)
    }
}
