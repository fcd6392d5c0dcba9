//! Typed input for one code block.
//!
//! A code block arrives as a class name (`language-rust`), one or more
//! source fragments, and a metadata string that may come from either a
//! `metastring` property or a `data-meta` attribute. [`CodeBlockInput`]
//! resolves all of that once, at the boundary.

use crate::fence::{FenceMetadata, parse_metadata};

/// Class name used when none is given.
pub const DEFAULT_CLASS_NAME: &str = "language-text";

const LANGUAGE_PREFIX: &str = "language-";

/// Raw content of a fenced code block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlockInput {
    class_name: Option<String>,
    fragments: Vec<String>,
    metastring: Option<String>,
    data_meta: Option<String>,
}

impl CodeBlockInput {
    /// Creates an input from a single source string.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            fragments: vec![source.into()],
            ..Default::default()
        }
    }

    /// Creates an input from several source fragments, concatenated in order.
    ///
    /// ## Examples
    ///
    /// ```
    /// use codefence_lib::input::CodeBlockInput;
    ///
    /// let input = CodeBlockInput::from_fragments(["let a = 1;\n", "let b = 2;\n\n"]);
    /// assert_eq!(input.source(), "let a = 1;\nlet b = 2;");
    /// ```
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Sets the full class name, e.g. `language-rust`.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Sets the class name from a bare language id.
    pub fn with_language(self, language: &str) -> Self {
        self.with_class_name(format!("{}{}", LANGUAGE_PREFIX, language))
    }

    /// Sets the `metastring` property.
    pub fn with_metastring(mut self, meta: impl Into<String>) -> Self {
        self.metastring = Some(meta.into());
        self
    }

    /// Sets the `data-meta` attribute.
    pub fn with_data_meta(mut self, meta: impl Into<String>) -> Self {
        self.data_meta = Some(meta.into());
        self
    }

    /// The class name, defaulting to `language-text`.
    pub fn class_name(&self) -> &str {
        self.class_name.as_deref().unwrap_or(DEFAULT_CLASS_NAME)
    }

    /// The language id: the class name without its `language-` prefix.
    ///
    /// ## Examples
    ///
    /// ```
    /// use codefence_lib::input::CodeBlockInput;
    ///
    /// assert_eq!(CodeBlockInput::new("").language(), "text");
    /// assert_eq!(CodeBlockInput::new("").with_class_name("language-rust").language(), "rust");
    /// assert_eq!(CodeBlockInput::new("").with_class_name("shell").language(), "shell");
    /// ```
    pub fn language(&self) -> &str {
        let class_name = self.class_name();
        class_name
            .strip_prefix(LANGUAGE_PREFIX)
            .unwrap_or(class_name)
    }

    /// The fragments concatenated, untrimmed.
    pub fn raw_source(&self) -> String {
        self.fragments.concat()
    }

    /// The source text that is highlighted and copied: the concatenated
    /// fragments with leading and trailing whitespace removed.
    pub fn source(&self) -> String {
        self.raw_source().trim().to_string()
    }

    /// The metadata string. A non-empty `metastring` wins over `data-meta`.
    pub fn meta(&self) -> Option<&str> {
        self.metastring
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.data_meta.as_deref().filter(|m| !m.is_empty()))
    }

    /// Parses the metadata, never failing.
    pub fn metadata(&self) -> FenceMetadata {
        parse_metadata(self.meta())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_class_name() {
        let input = CodeBlockInput::new("x");
        assert_eq!(input.class_name(), "language-text");
        assert_eq!(input.language(), "text");
    }

    #[test]
    fn test_with_language() {
        let input = CodeBlockInput::new("x").with_language("typescript");
        assert_eq!(input.class_name(), "language-typescript");
        assert_eq!(input.language(), "typescript");
    }

    #[test]
    fn test_source_is_trimmed() {
        let input = CodeBlockInput::new("\n  fn main() {}\n\n   ");
        assert_eq!(input.source(), "fn main() {}");
        assert_eq!(input.raw_source(), "\n  fn main() {}\n\n   ");
    }

    #[test]
    fn test_fragments_are_concatenated() {
        let input = CodeBlockInput::from_fragments(vec!["a\n".to_string(), "b\n".to_string()]);
        assert_eq!(input.source(), "a\nb");
    }

    #[test]
    fn test_no_fragments_is_empty_source() {
        let input = CodeBlockInput::from_fragments(Vec::<String>::new());
        assert_eq!(input.source(), "");
    }

    #[test]
    fn test_metastring_precedence() {
        let input = CodeBlockInput::new("x")
            .with_data_meta("title=data")
            .with_metastring("title=meta");
        assert_eq!(input.meta(), Some("title=meta"));
        assert_eq!(input.metadata().title, Some("meta".to_string()));
    }

    #[test]
    fn test_data_meta_fallback() {
        let input = CodeBlockInput::new("x").with_data_meta("{2}");
        assert_eq!(input.meta(), Some("{2}"));

        let input = CodeBlockInput::new("x")
            .with_metastring("")
            .with_data_meta("{3}");
        assert_eq!(input.meta(), Some("{3}"));
    }

    #[test]
    fn test_no_meta() {
        let input = CodeBlockInput::new("x");
        assert_eq!(input.meta(), None);
        assert!(input.metadata().is_empty());
    }
}
