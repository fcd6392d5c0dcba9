//! Parser for fence metadata strings.
//!
//! Parses metadata like:
//! - `title="foo.js" {1,3-5}`
//! - `title='Main' highlight=2,4-6 line-numbering=true`
//! - `{1} {4-5} showLineNumbers`

use super::{FenceMetadata, HighlightSelectors};
use crate::{CodeBlockError, CodeBlockResult};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// One metadata item: a `{...}` group, a `key=value` pair or a bare flag.
    /// Values may be `"..."`, `'...'`, `{...}` or a run of non-whitespace.
    static ref ITEM_PATTERN: Regex = Regex::new(concat!(
        r#"\{(?P<group>[^}]*)\}"#,
        r#"|(?P<key>[^\s="'{]+)=(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|\{(?P<brace>[^}]*)\}|(?P<bare>[^\s"'{]\S*))"#,
        r#"|(?P<flag>[^\s="'{]+)"#,
    ))
    .unwrap();
}

/// A single metadata item before interpretation.
#[derive(Debug, PartialEq)]
enum Item<'a> {
    /// `{...}` without a key.
    Group(&'a str),
    /// `key=value`.
    Pair { key: &'a str, value: &'a str },
    /// A bare word.
    Flag(&'a str),
}

impl<'a> Item<'a> {
    fn from_captures(caps: &Captures<'a>) -> Self {
        if let Some(body) = caps.name("group") {
            return Item::Group(body.as_str());
        }
        if let Some(key) = caps.name("key") {
            let value = ["dq", "sq", "brace", "bare"]
                .into_iter()
                .find_map(|name| caps.name(name))
                .map_or("", |m| m.as_str());
            return Item::Pair {
                key: key.as_str(),
                value,
            };
        }
        Item::Flag(caps.name("flag").map_or("", |m| m.as_str()))
    }
}

/// Splits `src` into items. Anything the pattern leaves unconsumed, other
/// than whitespace, is malformed.
fn scan(src: &str) -> CodeBlockResult<Vec<Item<'_>>> {
    let mut items = Vec::new();
    let mut consumed = 0;

    for caps in ITEM_PATTERN.captures_iter(src) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        check_gap(src, consumed, whole.start())?;
        items.push(Item::from_captures(&caps));
        consumed = whole.end();
    }
    check_gap(src, consumed, src.len())?;

    Ok(items)
}

fn check_gap(src: &str, from: usize, to: usize) -> CodeBlockResult<()> {
    match src[from..to].char_indices().find(|(_, c)| !c.is_whitespace()) {
        Some((idx, _)) => Err(diagnose(src, from + idx)),
        None => Ok(()),
    }
}

/// Explains why the text at `at` matched no item.
fn diagnose(src: &str, at: usize) -> CodeBlockError {
    let before = &src[..at];
    let follows_key = before
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_whitespace() && !matches!(c, '}' | '"' | '\''));

    let (offset, reason) = match src[at..].chars().next() {
        Some('{') => (at, "unterminated brace group".to_string()),
        Some('"' | '\'') => (at, "quoted value without a key".to_string()),
        Some('=') if !follows_key => (at, "missing key before '='".to_string()),
        Some('=') => {
            let value_at = at + 1;
            let reason = match src[value_at..].chars().next() {
                Some('"') => "unterminated double-quoted value".to_string(),
                Some('\'') => "unterminated single-quoted value".to_string(),
                Some('{') => "unterminated brace group".to_string(),
                _ => {
                    let key = before
                        .rsplit(|c: char| c.is_whitespace() || c == '}')
                        .next()
                        .unwrap_or_default();
                    format!("missing value for '{}'", key)
                }
            };
            (value_at, reason)
        }
        Some(c) => (at, format!("unexpected character '{}'", c)),
        None => (at, "unexpected end of metadata".to_string()),
    };

    CodeBlockError::MalformedMetadata { offset, reason }
}

/// Parses a boolean value from string.
fn parse_bool(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

/// Parses a fence metadata string, failing on malformed syntax.
///
/// ## Format
///
/// Whitespace separates items outside quotes and braces:
///
/// - `{1,3-5}`: highlight selectors; several groups accumulate
/// - `key=value`: value is `"..."`, `'...'`, `{...}` or a bare word
/// - `word`: a flag
///
/// Recognised keys are `title`, `highlight` (alias `hl`) and
/// `line-numbering` (alias `showLineNumbers`). Everything else lands in
/// [`FenceMetadata::attributes`].
///
/// ## Examples
///
/// ```
/// use codefence_lib::fence::try_parse_metadata;
///
/// let meta = try_parse_metadata(r#"title="a.js" {1,3-5}"#).unwrap();
/// assert_eq!(meta.title.as_deref(), Some("a.js"));
/// let highlight = meta.highlight.unwrap();
/// assert!(highlight.contains_key("1"));
/// assert!(highlight.contains_key("3-5"));
///
/// assert!(try_parse_metadata(r#"title="oops"#).is_err());
/// ```
///
/// ## Errors
///
/// Returns [`CodeBlockError::MalformedMetadata`] for unterminated quotes or
/// braces, a `=` without key, or a key without value.
pub fn try_parse_metadata(meta: &str) -> CodeBlockResult<FenceMetadata> {
    let mut result = FenceMetadata::default();
    let mut selectors = HighlightSelectors::new();

    for item in scan(meta)? {
        match item {
            Item::Group(body) => selectors.extend_from_list(body),
            Item::Pair { key, value } => match key {
                "title" => {
                    result.title = Some(value.to_string()).filter(|t| !t.is_empty());
                }
                "highlight" | "hl" => selectors.extend_from_list(value),
                "line-numbering" | "showLineNumbers" => {
                    result.line_numbering = parse_bool(value);
                }
                _ => {
                    result.attributes.insert(key.to_string(), value.to_string());
                }
            },
            Item::Flag(word) => {
                if word == "showLineNumbers" {
                    result.line_numbering = true;
                }
                result.attributes.insert(word.to_string(), "true".to_string());
            }
        }
    }

    if !selectors.is_empty() {
        result.highlight = Some(selectors);
    }

    Ok(result)
}

/// Parses fence metadata, never failing.
///
/// An absent, empty or malformed string yields an empty record (no title,
/// no highlight). Malformed input is logged at `warn`.
///
/// ## Examples
///
/// ```
/// use codefence_lib::fence::parse_metadata;
///
/// assert!(parse_metadata(None).title.is_none());
/// assert!(parse_metadata(Some("")).highlight.is_none());
/// assert!(parse_metadata(Some("{1,2")).highlight.is_none());
/// ```
pub fn parse_metadata(meta: Option<&str>) -> FenceMetadata {
    let Some(meta) = meta.map(str::trim).filter(|m| !m.is_empty()) else {
        return FenceMetadata::default();
    };

    match try_parse_metadata(meta) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::warn!(metadata = %meta, error = %err, "Ignoring malformed fence metadata");
            FenceMetadata::default()
        }
    }
}

/// Splits a full info string into the language token and the metadata.
///
/// ## Examples
///
/// ```
/// use codefence_lib::fence::split_info_string;
///
/// assert_eq!(split_info_string(r#"rust title="a.rs""#), ("rust", r#"title="a.rs""#));
/// assert_eq!(split_info_string("rust"), ("rust", ""));
/// assert_eq!(split_info_string(""), ("", ""));
/// ```
pub fn split_info_string(info: &str) -> (&str, &str) {
    let info = info.trim();
    match info.split_once(char::is_whitespace) {
        Some((language, rest)) => (language, rest.trim_start()),
        None => (info, ""),
    }
}
