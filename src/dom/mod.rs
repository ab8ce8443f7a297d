//! Page document bindings.
//!
//! The localizer never touches a concrete page format. It sees a
//! [`Document`]: something that can list its anchors carrying a given
//! attribute and overwrite an anchor's `href`.
//!
//! - [`HtmlDocument`]: static HTML page source (byte-preserving rewrites)

mod html;

pub use html::HtmlDocument;

/// An anchor carrying the requested attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef {
    /// Position among the document's anchors, used to address `set_href`.
    pub index: usize,
    /// Attribute value, `None` when the attribute has no value.
    pub value: Option<String>,
}

/// A page whose anchors can be read and re-targeted.
pub trait Document {
    /// Anchors carrying `attr`, in document order.
    fn anchors(&self, attr: &str) -> Vec<AnchorRef>;

    /// Overwrite the `href` of the anchor at `index`.
    fn set_href(&mut self, index: usize, href: &str);
}

#[cfg(test)]
pub(crate) use memory::MemoryDocument;

#[cfg(test)]
mod memory {
    use super::{AnchorRef, Document};
    use rustc_hash::FxHashMap;

    /// In-memory document for exercising the localizer without markup.
    #[derive(Debug, Default)]
    pub struct MemoryDocument {
        pub anchors: Vec<FxHashMap<String, Option<String>>>,
    }

    impl MemoryDocument {
        pub fn with_anchors(anchors: &[&[(&str, Option<&str>)]]) -> Self {
            let anchors = anchors
                .iter()
                .map(|attrs| {
                    attrs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.map(str::to_owned)))
                        .collect()
                })
                .collect();
            Self { anchors }
        }

        pub fn href(&self, index: usize) -> Option<&str> {
            self.anchors[index].get("href").and_then(|v| v.as_deref())
        }
    }

    impl Document for MemoryDocument {
        fn anchors(&self, attr: &str) -> Vec<AnchorRef> {
            self.anchors
                .iter()
                .enumerate()
                .filter_map(|(index, attrs)| {
                    attrs.get(attr).map(|value| AnchorRef {
                        index,
                        value: value.clone(),
                    })
                })
                .collect()
        }

        fn set_href(&mut self, index: usize, href: &str) {
            self.anchors[index].insert("href".to_string(), Some(href.to_string()));
        }
    }
}
