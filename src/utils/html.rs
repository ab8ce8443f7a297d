//! HTML utility functions.
//!
//! - `escape_attr()` - HTML entity escaping for attribute values
//! - `unescape()` - decode entities in attribute values read from a page
//! - `is_raw_text_element()` - elements whose content is never markup
//! - `scan_start_tag()` - locate attributes inside a start tag by byte offset
//! - `find_start_tags()` - every start tag of one element, outside comments
//!   and raw text

use std::borrow::Cow;
use std::ops::Range;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML attribute values.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Unescape HTML entities back to characters.
///
/// Handles common named entities and numeric character references.
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '&' {
            result.push(c);
            continue;
        }

        // Collect entity
        let mut entity = String::new();
        let mut terminated = false;
        for c in chars.by_ref() {
            if c == ';' {
                terminated = true;
                break;
            }
            entity.push(c);
            if entity.len() > 10 {
                break;
            }
        }

        if !terminated {
            result.push('&');
            result.push_str(&entity);
            continue;
        }

        match entity.as_str() {
            "lt" => result.push('<'),
            "gt" => result.push('>'),
            "amp" => result.push('&'),
            "quot" => result.push('"'),
            "apos" => result.push('\''),
            "nbsp" => result.push('\u{00A0}'),
            s if s.starts_with('#') => {
                let code = if s.starts_with("#x") || s.starts_with("#X") {
                    u32::from_str_radix(&s[2..], 16).ok()
                } else {
                    s[1..].parse().ok()
                };
                if let Some(c) = code.and_then(char::from_u32) {
                    result.push(c);
                } else {
                    result.push('&');
                    result.push_str(&entity);
                    result.push(';');
                }
            }
            _ => {
                result.push('&');
                result.push_str(&entity);
                result.push(';');
            }
        }
    }

    Cow::Owned(result)
}

// =============================================================================
// Start Tag Scanning
// =============================================================================

/// An attribute located inside a start tag.
///
/// All ranges are byte offsets relative to the scanned tag text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrSpan {
    /// Attribute name as written.
    pub name: Range<usize>,
    /// Value without surrounding quotes, `None` for boolean attributes.
    pub value: Option<Range<usize>>,
    /// Whether the value was wrapped in quotes.
    pub quoted: bool,
}

/// A start tag split into its name and attribute spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag {
    /// Offset right after the tag name (`<a|`).
    pub name_end: usize,
    /// Offset right after the closing `>` (end of input if unterminated).
    pub end: usize,
    pub attrs: Vec<AttrSpan>,
}

impl StartTag {
    /// Find an attribute by name (ASCII case-insensitive).
    pub fn find<'t>(&'t self, tag: &str, name: &str) -> Option<&'t AttrSpan> {
        self.attrs
            .iter()
            .find(|attr| tag[attr.name.clone()].eq_ignore_ascii_case(name))
    }
}

/// Scan the start tag at the beginning of `tag` (`<a href="..." ...>`).
///
/// Input: `<a href="/x" hreflang=zh download>`
/// Output: name_end = 2, attributes `href`, `hreflang`, `download`
///
/// Returns `None` if `tag` does not begin with `<` followed by a tag name.
pub fn scan_start_tag(tag: &str) -> Option<StartTag> {
    let bytes = tag.as_bytes();
    if bytes.first() != Some(&b'<') || !bytes.get(1).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }

    let mut pos = 1;
    while pos < bytes.len() && !is_tag_delimiter(bytes[pos]) {
        pos += 1;
    }
    if pos == 1 {
        return None;
    }
    let name_end = pos;

    let mut attrs = Vec::new();
    loop {
        // Skip whitespace and stray slashes between attributes
        while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b'/') {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }
        if bytes[pos] == b'>' {
            pos += 1;
            break;
        }

        // Attribute name
        let name_start = pos;
        while pos < bytes.len() && !is_tag_delimiter(bytes[pos]) && bytes[pos] != b'=' {
            pos += 1;
        }
        // A lone `=` would otherwise stall the scan
        if pos == name_start {
            pos += 1;
            continue;
        }
        let name = name_start..pos;

        let mut look = pos;
        while look < bytes.len() && bytes[look].is_ascii_whitespace() {
            look += 1;
        }

        if look < bytes.len() && bytes[look] == b'=' {
            pos = look + 1;
            while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }

            if pos < bytes.len() && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
                let quote = bytes[pos];
                let start = pos + 1;
                let end = bytes[start..]
                    .iter()
                    .position(|&b| b == quote)
                    .map_or(bytes.len(), |i| start + i);
                attrs.push(AttrSpan {
                    name,
                    value: Some(start..end),
                    quoted: true,
                });
                pos = (end + 1).min(bytes.len());
            } else {
                let start = pos;
                while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>' {
                    pos += 1;
                }
                attrs.push(AttrSpan {
                    name,
                    value: Some(start..pos),
                    quoted: false,
                });
            }
        } else {
            attrs.push(AttrSpan {
                name,
                value: None,
                quoted: false,
            });
        }
    }

    Some(StartTag {
        name_end,
        end: pos,
        attrs,
    })
}

#[inline]
fn is_tag_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'>' || b == b'/'
}

// =============================================================================
// Element Classes
// =============================================================================

/// Check if tag is a raw text element.
///
/// Per HTML spec: script and style contain raw text, never markup.
#[inline]
pub fn is_raw_text_element(tag: &str) -> bool {
    matches!(tag, "script" | "style")
}

/// Check if tag is an escapable raw text element.
///
/// Per HTML spec: textarea and title are "escapable raw text".
#[inline]
pub fn is_escapable_raw_text_element(tag: &str) -> bool {
    matches!(tag, "textarea" | "title")
}

// =============================================================================
// Tag Discovery
// =============================================================================

/// Find every start tag named `name` (ASCII case-insensitive) in `source`.
///
/// Returns `(offset of '<', tag)` pairs in document order. The content of
/// comments, declarations, processing instructions and (escapable) raw text
/// elements is skipped, as is anything inside another tag's attribute values.
pub fn find_start_tags(source: &str, name: &str) -> Vec<(usize, StartTag)> {
    let bytes = source.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(i) = bytes[pos..].iter().position(|&b| b == b'<') {
        let at = pos + i;
        let rest = &source[at..];

        if rest.starts_with("<!--") {
            pos = find_from(bytes, at + 4, b"-->").map_or(bytes.len(), |end| end + 3);
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") || rest.starts_with("</") {
            pos = find_from(bytes, at + 2, b">").map_or(bytes.len(), |end| end + 1);
            continue;
        }

        let Some(tag) = scan_start_tag(rest) else {
            pos = at + 1;
            continue;
        };

        let tag_name = rest[1..tag.name_end].to_ascii_lowercase();
        pos = at + tag.end;
        if tag_name.eq_ignore_ascii_case(name) {
            found.push((at, tag));
        }

        if is_raw_text_element(&tag_name) || is_escapable_raw_text_element(&tag_name) {
            let close = format!("</{tag_name}");
            pos = find_from(bytes, pos, close.as_bytes()).unwrap_or(bytes.len());
        }
    }

    found
}

/// Position of `needle` (ASCII case-insensitive) in `bytes`, starting at `from`.
fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|i| from + i)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("normal"), "normal");
        assert_eq!(escape_attr("/zh/guide?a=1&b=2"), "/zh/guide?a=1&amp;b=2");
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
        assert!(matches!(escape_attr("/zh/"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("zh"), "zh");
        assert_eq!(unescape("a &amp; b"), "a & b");
        assert_eq!(unescape("&#x7A;h"), "zh");
        assert_eq!(unescape("&#122;h"), "zh");
        assert_eq!(unescape("&unknown;"), "&unknown;");
        assert_eq!(unescape("fish & chips"), "fish & chips");
    }

    #[test]
    fn test_scan_quoted_and_unquoted() {
        let tag = r#"<a href="/guide/" hreflang=zh class='lang'>"#;
        let start = scan_start_tag(tag).unwrap();
        assert_eq!(start.name_end, 2);
        assert_eq!(start.attrs.len(), 3);

        let href = start.find(tag, "href").unwrap();
        assert_eq!(&tag[href.value.clone().unwrap()], "/guide/");
        assert!(href.quoted);

        let lang = start.find(tag, "hreflang").unwrap();
        assert_eq!(&tag[lang.value.clone().unwrap()], "zh");
        assert!(!lang.quoted);

        let class = start.find(tag, "CLASS").unwrap();
        assert_eq!(&tag[class.value.clone().unwrap()], "lang");
    }

    #[test]
    fn test_scan_boolean_and_spaced_attrs() {
        let tag = "<a download hreflang = \"zh\" >text</a>";
        let start = scan_start_tag(tag).unwrap();
        assert_eq!(start.attrs.len(), 2);
        assert_eq!(start.attrs[0].value, None);

        let lang = start.find(tag, "hreflang").unwrap();
        assert_eq!(&tag[lang.value.clone().unwrap()], "zh");
    }

    #[test]
    fn test_scan_empty_value() {
        let tag = r#"<a href="" hreflang="zh">"#;
        let start = scan_start_tag(tag).unwrap();
        let href = start.find(tag, "href").unwrap();
        assert_eq!(href.value, Some(9..9));
    }

    #[test]
    fn test_scan_stops_at_tag_end() {
        let tag = r#"<a hreflang="zh">href="/ignored"</a>"#;
        let start = scan_start_tag(tag).unwrap();
        assert_eq!(start.attrs.len(), 1);
        assert!(start.find(tag, "href").is_none());
    }

    #[test]
    fn test_scan_rejects_non_tags() {
        assert!(scan_start_tag("a href").is_none());
        assert!(scan_start_tag("< a>").is_none());
        assert!(scan_start_tag("<3 a>").is_none());
        assert!(scan_start_tag("").is_none());
    }

    #[test]
    fn test_scan_tag_end() {
        let tag = "<a href=/zh/ hreflang=zh>x</a>";
        let start = scan_start_tag(tag).unwrap();
        assert_eq!(&tag[..start.end], "<a href=/zh/ hreflang=zh>");
        assert_eq!(&tag[start.find(tag, "href").unwrap().value.clone().unwrap()], "/zh/");

        let unterminated = r#"<a href="/x"#;
        assert_eq!(scan_start_tag(unterminated).unwrap().end, unterminated.len());
    }

    #[test]
    fn test_raw_text_elements() {
        assert!(is_raw_text_element("script"));
        assert!(is_raw_text_element("style"));
        assert!(!is_raw_text_element("a"));
        assert!(is_escapable_raw_text_element("textarea"));
        assert!(is_escapable_raw_text_element("title"));
    }

    fn offsets(source: &str) -> Vec<usize> {
        find_start_tags(source, "a").into_iter().map(|(at, _)| at).collect()
    }

    #[test]
    fn test_find_start_tags_unquoted_slash_values() {
        let html = "<nav><a href=/en/ hreflang=en>EN</a><A hreflang=zh href=/zh/>中文</A></nav>";
        assert_eq!(offsets(html), [5, 36]);
    }

    #[test]
    fn test_find_start_tags_skips_comments_and_raw_text() {
        let html = concat!(
            "<!-- <a hreflang=zh> -->",
            "<script>var s = '<a href=\"/js\" hreflang=\"zh\">';</script>",
            "<STYLE>a::after { content: '<a>' }</STYLE>",
            "<title><a></title>",
            "<div data-x='<a hreflang=zh>'></div>",
            "<a id=real>",
        );
        let found = find_start_tags(html, "a");
        assert_eq!(found.len(), 1);
        assert!(html[found[0].0..].starts_with("<a id=real>"));
    }

    #[test]
    fn test_find_start_tags_ignores_similar_names() {
        let html = "<abbr>x</abbr><area href=/x><a>";
        assert_eq!(offsets(html), [28]);
    }

    #[test]
    fn test_find_start_tags_unterminated_script() {
        assert!(offsets("<script><a hreflang=zh>").is_empty());
    }
}
