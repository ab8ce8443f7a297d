//! HTML page binding.
//!
//! `<a>` start tags are located by byte offset, skipping comments and the
//! content of raw text elements (`script`, `style`, `textarea`, `title`), so
//! markup inside them or inside attribute values is never mistaken for an
//! anchor. Rewrites are spliced into the page source: every byte outside the
//! rewritten `href` values is left untouched.

use std::borrow::Cow;
use std::ops::Range;

use super::{AnchorRef, Document};
use crate::utils::html::{StartTag, escape_attr, find_start_tags, unescape};

/// An `<a>` start tag located in the page source.
#[derive(Debug)]
struct HtmlAnchor {
    /// Byte offset of `<` in the page source.
    start: usize,
    /// Start tag text, from `<` to the closing `>`.
    text: Range<usize>,
    tag: StartTag,
}

/// Static HTML page with pending `href` rewrites.
#[derive(Debug)]
pub struct HtmlDocument<'a> {
    source: &'a str,
    anchors: Vec<HtmlAnchor>,
    hrefs: Vec<Option<String>>,
}

impl<'a> HtmlDocument<'a> {
    /// Locate the anchors of a page.
    pub fn parse(source: &'a str) -> Self {
        let anchors: Vec<_> = find_start_tags(source, "a")
            .into_iter()
            .map(|(start, tag)| HtmlAnchor {
                start,
                text: start..start + tag.end,
                tag,
            })
            .collect();

        let hrefs = vec![None; anchors.len()];
        Self {
            source,
            anchors,
            hrefs,
        }
    }

    /// Number of `<a>` elements in the page.
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Apply pending rewrites.
    ///
    /// Returns the source unchanged (borrowed) when nothing was rewritten.
    pub fn finish(self) -> Cow<'a, str> {
        let mut edits: Vec<(Range<usize>, String)> = Vec::new();

        for (anchor, href) in self.anchors.iter().zip(&self.hrefs) {
            let Some(href) = href else {
                continue;
            };
            let escaped = escape_attr(href);
            let text = &self.source[anchor.text.clone()];

            let edit = match anchor.tag.find(text, "href") {
                Some(attr) => match (&attr.value, attr.quoted) {
                    (Some(value), true) => (shift(value, anchor.start), escaped.into_owned()),
                    (Some(value), false) => (shift(value, anchor.start), format!("\"{escaped}\"")),
                    (None, _) => {
                        let at = anchor.start + attr.name.end;
                        (at..at, format!("=\"{escaped}\""))
                    }
                },
                None => {
                    let at = anchor.start + anchor.tag.name_end;
                    (at..at, format!(" href=\"{escaped}\""))
                }
            };
            edits.push(edit);
        }

        if edits.is_empty() {
            return Cow::Borrowed(self.source);
        }

        edits.sort_by_key(|(range, _)| range.start);

        let mut out = String::with_capacity(self.source.len() + edits.len() * 8);
        let mut cursor = 0;
        for (range, replacement) in edits {
            out.push_str(&self.source[cursor..range.start]);
            out.push_str(&replacement);
            cursor = range.end;
        }
        out.push_str(&self.source[cursor..]);

        Cow::Owned(out)
    }
}

impl Document for HtmlDocument<'_> {
    fn anchors(&self, attr: &str) -> Vec<AnchorRef> {
        self.anchors
            .iter()
            .enumerate()
            .filter_map(|(index, anchor)| {
                let text = &self.source[anchor.text.clone()];
                let found = anchor.tag.find(text, attr)?;
                let value = found
                    .value
                    .as_ref()
                    .map(|range| unescape(&text[range.clone()]).into_owned());
                Some(AnchorRef { index, value })
            })
            .collect()
    }

    fn set_href(&mut self, index: usize, href: &str) {
        if let Some(slot) = self.hrefs.get_mut(index) {
            *slot = Some(href.to_string());
        }
    }
}

#[inline]
fn shift(range: &Range<usize>, by: usize) -> Range<usize> {
    range.start + by..range.end + by
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite_all(source: &str, attr: &str, href: &str) -> String {
        let mut doc = HtmlDocument::parse(source);
        for anchor in doc.anchors(attr) {
            doc.set_href(anchor.index, href);
        }
        doc.finish().into_owned()
    }

    #[test]
    fn test_finds_only_anchors_with_attr() {
        let html = r#"<nav><a href="/">Home</a><a href="/" hreflang="zh">中文</a></nav>"#;
        let doc = HtmlDocument::parse(html);
        assert_eq!(doc.anchor_count(), 2);

        let anchors = doc.anchors("hreflang");
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].index, 1);
        assert_eq!(anchors[0].value.as_deref(), Some("zh"));
    }

    #[test]
    fn test_rewrite_preserves_other_bytes() {
        let html = "<!doctype html>\n<p>Lang: <a  class=\"x\" href=\"/old/\" hreflang=\"zh\">zh</a></p>\n";
        let out = rewrite_all(html, "hreflang", "/zh/guide/");
        assert_eq!(
            out,
            "<!doctype html>\n<p>Lang: <a  class=\"x\" href=\"/zh/guide/\" hreflang=\"zh\">zh</a></p>\n"
        );
    }

    #[test]
    fn test_rewrite_unquoted_href() {
        let html = "<a href=/old hreflang=zh>zh</a>";
        let out = rewrite_all(html, "hreflang", "/zh/");
        assert_eq!(out, "<a href=\"/zh/\" hreflang=zh>zh</a>");
    }

    #[test]
    fn test_rewrite_unquoted_slash_values() {
        let html = "<nav><a href=/en/ hreflang=en>EN</a><a hreflang=zh href=/zh/>中文</a></nav>";
        let mut doc = HtmlDocument::parse(html);
        assert_eq!(doc.anchor_count(), 2);

        let anchors = doc.anchors("hreflang");
        assert_eq!(anchors[1].value.as_deref(), Some("zh"));
        doc.set_href(anchors[1].index, "/zh/guide/");
        assert_eq!(
            doc.finish(),
            "<nav><a href=/en/ hreflang=en>EN</a><a hreflang=zh href=\"/zh/guide/\">中文</a></nav>"
        );
    }

    #[test]
    fn test_anchor_in_script_is_ignored() {
        let html = r#"<script>var s = '<a href="/js" hreflang="zh">';</script><a href="/x" hreflang="zh">x</a>"#;
        let out = rewrite_all(html, "hreflang", "/zh/x");
        assert_eq!(
            out,
            r#"<script>var s = '<a href="/js" hreflang="zh">';</script><a href="/zh/x" hreflang="zh">x</a>"#
        );
    }

    #[test]
    fn test_rewrite_empty_and_missing_href() {
        let html = r#"<a href="" hreflang="zh">a</a><a hreflang="zh">b</a>"#;
        let out = rewrite_all(html, "hreflang", "/zh/");
        assert_eq!(
            out,
            r#"<a href="/zh/" hreflang="zh">a</a><a href="/zh/" hreflang="zh">b</a>"#
        );
    }

    #[test]
    fn test_rewrite_boolean_href() {
        let html = r#"<a href hreflang="zh">a</a>"#;
        let out = rewrite_all(html, "hreflang", "/zh/");
        assert_eq!(out, r#"<a href="/zh/" hreflang="zh">a</a>"#);
    }

    #[test]
    fn test_rewrite_escapes_value() {
        let html = r#"<a href="/" hreflang="zh">a</a>"#;
        let out = rewrite_all(html, "hreflang", "/zh/?a=1&b=2");
        assert_eq!(out, r#"<a href="/zh/?a=1&amp;b=2" hreflang="zh">a</a>"#);
    }

    #[test]
    fn test_hint_value_is_unescaped() {
        let html = r#"<a href="/" hreflang="&#x7A;h">a</a>"#;
        let doc = HtmlDocument::parse(html);
        assert_eq!(doc.anchors("hreflang")[0].value.as_deref(), Some("zh"));
    }

    #[test]
    fn test_untouched_document_is_borrowed() {
        let html = r#"<a href="/" hreflang="zh">a</a>"#;
        let doc = HtmlDocument::parse(html);
        assert!(matches!(doc.finish(), Cow::Borrowed(_)));
    }

    #[test]
    fn test_anchor_text_in_comment_is_ignored() {
        let html = r#"<!-- <a href="/" hreflang="zh">x</a> --><a href="/a" hreflang="zh">y</a>"#;
        let out = rewrite_all(html, "hreflang", "/zh/a");
        assert_eq!(
            out,
            r#"<!-- <a href="/" hreflang="zh">x</a> --><a href="/zh/a" hreflang="zh">y</a>"#
        );
    }
}
