//! Language-switch link localization.
//!
//! For every anchor whose language hint (e.g. `hreflang="zh"`) names a
//! supported language, the anchor is pointed at the current page's path with
//! that language segment inserted:
//!
//! | Current location          | Link for `zh`                |
//! |---------------------------|------------------------------|
//! | `/reference/foo`          | `/zh/reference/foo`          |
//! | `/v0.1.1/reference/foo`   | `/v0.1.1/zh/reference/foo`   |
//! | `/latest/guide/`          | `/latest/zh/guide/`          |
//! | `/zh/reference/foo`       | `/zh/reference/foo`          |
//! | `/guide?x=1#top`          | `/zh/guide?x=1#top`          |
//! | `/`                       | `/zh`                        |
//!
//! The computation is split into three pure steps
//! ([`sanitize_segments`], [`compute_insert_index`], [`build_localized_path`])
//! and a page-level driver, [`Localizer::run`].

mod version;

pub use version::{DEFAULT_VERSION_PATTERN, VersionMatcher};

use rustc_hash::FxHashSet;

use crate::core::Location;
use crate::debug;
use crate::dom::Document;

/// Default language-hint attribute.
pub const DEFAULT_ATTRIBUTE: &str = "hreflang";

// =============================================================================
// Languages
// =============================================================================

/// Supported language codes, in configured order.
#[derive(Debug, Clone, Default)]
pub struct Languages {
    ordered: Vec<String>,
    set: FxHashSet<String>,
}

impl Languages {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut languages = Self::default();
        for code in codes {
            let code = code.into();
            if languages.set.insert(code.clone()) {
                languages.ordered.push(code);
            }
        }
        languages
    }

    /// Exact, case-sensitive membership.
    #[inline]
    pub fn contains(&self, code: &str) -> bool {
        self.set.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ordered.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

// =============================================================================
// Pure Steps
// =============================================================================

/// Remove the first segment that is a supported language code.
///
/// At most one segment is removed, so a later segment that happens to look
/// like a language code (`/zh/blog/zh`) survives. Returns the remaining
/// segments and whether a removal happened.
pub fn sanitize_segments<S: AsRef<str>>(raw: &[S], languages: &Languages) -> (Vec<String>, bool) {
    let mut clean: Vec<String> = raw.iter().map(|s| s.as_ref().to_owned()).collect();
    match clean.iter().position(|segment| languages.contains(segment)) {
        Some(pos) => {
            clean.remove(pos);
            (clean, true)
        }
        None => (clean, false),
    }
}

/// Where the language segment goes: 1 after a leading version/channel
/// segment, 0 otherwise. Only the first segment is inspected.
pub fn compute_insert_index<S: AsRef<str>>(clean: &[S], versions: &VersionMatcher) -> usize {
    match clean.first() {
        Some(first) if versions.is_version(first.as_ref()) => 1,
        _ => 0,
    }
}

/// Join `clean` with `lang` inserted at `insert_index`.
///
/// - empty result is `/`
/// - a trailing slash is added when the location had one, except for `/`
/// - `search_and_hash` is appended verbatim
pub fn build_localized_path<S: AsRef<str>>(
    lang: &str,
    clean: &[S],
    insert_index: usize,
    has_trailing_slash: bool,
    search_and_hash: &str,
) -> String {
    let mut segments: Vec<&str> = clean.iter().map(|s| s.as_ref()).collect();
    segments.insert(insert_index.min(segments.len()), lang);

    let mut path = if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    };

    if has_trailing_slash && path != "/" {
        path.push('/');
    }

    path.push_str(search_and_hash);
    path
}

// =============================================================================
// Page Driver
// =============================================================================

/// Outcome of localizing one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Anchors whose `href` was overwritten.
    pub rewritten: usize,
    /// Anchors with the hint attribute but no supported value.
    pub skipped: usize,
}

/// Localizer configured with the supported languages, the hint attribute
/// and the version classifier. Immutable once built.
#[derive(Debug, Clone)]
pub struct Localizer {
    languages: Languages,
    attribute: String,
    versions: VersionMatcher,
}

impl Localizer {
    pub fn new(languages: Languages, attribute: impl Into<String>, versions: VersionMatcher) -> Self {
        Self {
            languages,
            attribute: attribute.into(),
            versions,
        }
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Localized path for `lang` at `location`, or `None` if `lang` is not
    /// supported.
    pub fn localize(&self, location: &Location, lang: &str) -> Option<String> {
        if !self.languages.contains(lang) {
            return None;
        }
        let target = self.target(location);
        Some(target.path_for(lang))
    }

    /// Rewrite every language-switch anchor of `doc` for `location`.
    ///
    /// The sanitized segments and insertion index are computed once and
    /// shared by all anchors. Anchors without a supported hint are skipped.
    pub fn run<D: Document + ?Sized>(&self, doc: &mut D, location: &Location) -> RunStats {
        let anchors = doc.anchors(&self.attribute);
        let mut stats = RunStats::default();
        if anchors.is_empty() {
            return stats;
        }

        let target = self.target(location);

        for anchor in anchors {
            match anchor.value.as_deref() {
                Some(lang) if self.languages.contains(lang) => {
                    doc.set_href(anchor.index, &target.path_for(lang));
                    stats.rewritten += 1;
                }
                other => {
                    debug!("localize"; "skipping anchor with {}={:?}", self.attribute, other);
                    stats.skipped += 1;
                }
            }
        }

        stats
    }

    fn target<'l>(&self, location: &'l Location) -> Target<'l> {
        let (clean, _) = sanitize_segments(location.segments(), &self.languages);
        let insert_index = compute_insert_index(clean.as_slice(), &self.versions);
        Target {
            clean,
            insert_index,
            trailing_slash: location.has_trailing_slash(),
            suffix: location.suffix(),
        }
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(
            Languages::new(["zh"]),
            DEFAULT_ATTRIBUTE,
            VersionMatcher::default(),
        )
    }
}

/// Location reduced to what every anchor of the page shares.
struct Target<'l> {
    clean: Vec<String>,
    insert_index: usize,
    trailing_slash: bool,
    suffix: &'l str,
}

impl Target<'_> {
    fn path_for(&self, lang: &str) -> String {
        build_localized_path(
            lang,
            self.clean.as_slice(),
            self.insert_index,
            self.trailing_slash,
            self.suffix,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
