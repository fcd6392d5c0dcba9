//! Fence metadata: title, highlighted lines and extra attributes.
//!
//! The metadata is the part of a fenced code block's info string that
//! follows the language identifier.
//!
//! ## Examples
//!
//! With title and highlighted lines:
//! ````markdown
//! ```js title="a.js" {1,3-5}
//! const a = 1;
//! ```
//! ````
//!
//! With the key form and line numbers:
//! ````markdown
//! ```ts highlight=2 line-numbering=true
//! const x = 1;
//! const y = 2;
//! ```
//! ````

mod parser;

pub use parser::{parse_metadata, split_info_string, try_parse_metadata};

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Metadata extracted from a fenced code block's info string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FenceMetadata {
    /// Optional title rendered above the code.
    pub title: Option<String>,
    /// Raw highlight selectors, e.g. `"1"` and `"3-5"`.
    pub highlight: Option<HighlightSelectors>,
    /// Whether to show line numbers.
    pub line_numbering: bool,
    /// Any other `key=value` pairs and bare flags (flags map to `"true"`).
    pub attributes: BTreeMap<String, String>,
}

impl FenceMetadata {
    /// True when no title and no highlight were given.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.highlight.is_none()
            && !self.line_numbering
            && self.attributes.is_empty()
    }
}

/// Highlight selectors keyed by their raw string form.
///
/// Keys keep their first-seen order and are unique. Each key is implicitly
/// mapped to `true`, which is also how the collection serializes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSelectors(Vec<String>);

impl HighlightSelectors {
    /// Creates an empty selector collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a selector key, ignoring duplicates.
    pub fn insert(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.0.contains(&key) {
            self.0.push(key);
        }
    }

    /// Adds every non-empty comma-separated entry of `list`.
    pub(crate) fn extend_from_list(&mut self, list: &str) {
        for part in list.split(',') {
            let part = part.trim();
            if !part.is_empty() {
                self.insert(part);
            }
        }
    }

    /// Checks whether a selector key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    /// The selector keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the keys joined with `,`, ready for range expansion.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for HighlightSelectors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for key in &self.0 {
            map.serialize_entry(key, &true)?;
        }
        map.end()
    }
}
