//! Turning source text into lines of styled tokens.

use super::{CodeTheme, LanguageRegistry, css_hex};
use crate::error::CodeBlockResult;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style};

/// Presentation attributes for one element: a class list and inline CSS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    pub class: String,
    pub style: String,
}

/// Style of one token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStyle {
    /// CSS color, e.g. `#d73a49`.
    pub foreground: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl TokenStyle {
    fn from_syntect(style: Style) -> Self {
        Self {
            foreground: css_hex(style.foreground),
            bold: style.font_style.contains(FontStyle::BOLD),
            italic: style.font_style.contains(FontStyle::ITALIC),
            underline: style.font_style.contains(FontStyle::UNDERLINE),
        }
    }

    /// Inline CSS for this style.
    pub fn css(&self) -> String {
        let mut css = format!("color: {};", self.foreground);
        if self.bold {
            css.push_str(" font-weight: bold;");
        }
        if self.italic {
            css.push_str(" font-style: italic;");
        }
        if self.underline {
            css.push_str(" text-decoration: underline;");
        }
        css
    }
}

/// A run of text sharing one style. Never contains a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub content: String,
    pub style: TokenStyle,
}

impl Token {
    pub fn props(&self) -> Props {
        Props {
            class: "token".to_string(),
            style: self.style.css(),
        }
    }
}

/// Colors of the whole block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockStyle {
    pub background: String,
    pub foreground: String,
}

impl BlockStyle {
    pub fn css(&self) -> String {
        format!(
            "background-color: {}; color: {};",
            self.background, self.foreground
        )
    }
}

/// Tokenizer output: block-level class and style, then tokens per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedCode {
    pub class_name: String,
    pub style: BlockStyle,
    pub lines: Vec<Vec<Token>>,
}

impl TokenizedCode {
    /// Props for the line at `index` (0-based), `None` past the end.
    pub fn line_props(&self, index: usize) -> Option<Props> {
        self.lines.get(index).map(|_| Props {
            class: "token-line".to_string(),
            style: String::new(),
        })
    }

    /// Block-level props for the `pre` element.
    pub fn block_props(&self) -> Props {
        Props {
            class: self.class_name.clone(),
            style: self.style.css(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Splits source into lines the way every tokenizer must: on `\n`, with a
/// trailing `\r` dropped. Empty source is one empty line.
fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

fn block_class(language: &str) -> String {
    format!("code-block-pre language-{}", language)
}

fn block_style(theme: &CodeTheme) -> BlockStyle {
    BlockStyle {
        background: theme.background(),
        foreground: theme.foreground(),
    }
}

/// Produces styled tokens for a language, source and theme.
pub trait Tokenizer {
    fn tokenize(
        &self,
        language: &str,
        source: &str,
        theme: &CodeTheme,
    ) -> CodeBlockResult<TokenizedCode>;
}

/// Tokenizer backed by syntect and the registered grammars.
#[derive(Debug, Clone, Copy)]
pub struct SyntectTokenizer {
    registry: &'static LanguageRegistry,
}

impl SyntectTokenizer {
    /// A tokenizer over the built-in language registry.
    pub fn new() -> Self {
        Self::with_registry(LanguageRegistry::global())
    }

    pub fn with_registry(registry: &'static LanguageRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'static LanguageRegistry {
        self.registry
    }
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for SyntectTokenizer {
    fn tokenize(
        &self,
        language: &str,
        source: &str,
        theme: &CodeTheme,
    ) -> CodeBlockResult<TokenizedCode> {
        let syntax_set = self.registry.syntax_set();
        let syntax = self.registry.resolve(language);
        let mut hl = HighlightLines::new(syntax, theme.syntect_theme());

        let mut lines: Vec<Vec<Token>> = Vec::new();
        let mut buf = String::new();
        for line in split_lines(source) {
            // grammars loaded "with newlines" expect each line to end in '\n'
            buf.clear();
            buf.push_str(line);
            buf.push('\n');

            let ranges = hl.highlight_line(&buf, syntax_set)?;
            let tokens: Vec<Token> = ranges
                .into_iter()
                .filter_map(|(style, text)| {
                    let content = text.trim_end_matches('\n');
                    (!content.is_empty()).then(|| Token {
                        content: content.to_string(),
                        style: TokenStyle::from_syntect(style),
                    })
                })
                .collect();
            lines.push(tokens);
        }

        tracing::trace!(
            language = %language,
            syntax = %syntax.name,
            lines = lines.len(),
            "Tokenized code"
        );

        Ok(TokenizedCode {
            class_name: block_class(language),
            style: block_style(theme),
            lines,
        })
    }
}

/// Tokenizer that applies no grammar: each line is one token in the
/// theme's foreground color.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(
        &self,
        language: &str,
        source: &str,
        theme: &CodeTheme,
    ) -> CodeBlockResult<TokenizedCode> {
        let style = TokenStyle {
            foreground: theme.foreground(),
            ..Default::default()
        };
        let lines = split_lines(source)
            .map(|line| {
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![Token {
                        content: line.to_string(),
                        style: style.clone(),
                    }]
                }
            })
            .collect();

        Ok(TokenizedCode {
            class_name: block_class(language),
            style: block_style(theme),
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::{ColorMode, ThemePair};

    fn theme() -> CodeTheme {
        CodeTheme::new(ThemePair::Github, ColorMode::Light)
    }

    fn line_text(line: &[Token]) -> String {
        line.iter().map(|t| t.content.as_str()).collect()
    }

    #[test]
    fn test_syntect_preserves_text() {
        let source = "fn main() {\n    println!(\"hi\");\n}";
        let code = SyntectTokenizer::new()
            .tokenize("rust", source, &theme())
            .unwrap();
        assert_eq!(code.lines.len(), 3);
        let rebuilt: Vec<_> = code.lines.iter().map(|l| line_text(l)).collect();
        assert_eq!(rebuilt.join("\n"), source);
    }

    #[test]
    fn test_syntect_produces_several_styles() {
        let code = SyntectTokenizer::new()
            .tokenize("rust", "fn main() { let x = 1; }", &theme())
            .unwrap();
        let colors: std::collections::HashSet<_> = code.lines[0]
            .iter()
            .map(|t| t.style.foreground.clone())
            .collect();
        assert!(colors.len() > 1);
    }

    #[test]
    fn test_tokens_never_contain_newlines() {
        let code = SyntectTokenizer::new()
            .tokenize("javascript", "const a = 1;\r\nconst b = 2;\n", &theme())
            .unwrap();
        for token in code.lines.iter().flatten() {
            assert!(!token.content.contains('\n'));
            assert!(!token.content.contains('\r'));
        }
    }

    #[test]
    fn test_empty_source_is_one_empty_line() {
        let code = SyntectTokenizer::new().tokenize("rust", "", &theme()).unwrap();
        assert_eq!(code.lines.len(), 1);
        assert!(code.lines[0].is_empty());

        let code = PlainTokenizer.tokenize("rust", "", &theme()).unwrap();
        assert_eq!(code.lines, vec![Vec::<Token>::new()]);
    }

    #[test]
    fn test_unknown_language_still_tokenizes() {
        let code = SyntectTokenizer::new()
            .tokenize("cobol-2077", "MOVE A TO B", &theme())
            .unwrap();
        assert_eq!(line_text(&code.lines[0]), "MOVE A TO B");
        assert_eq!(code.class_name, "code-block-pre language-cobol-2077");
    }

    #[test]
    fn test_plain_tokenizer_one_token_per_line() {
        let theme = theme();
        let code = PlainTokenizer.tokenize("text", "a\n\nb", &theme).unwrap();
        assert_eq!(code.lines.len(), 3);
        assert_eq!(code.lines[0].len(), 1);
        assert!(code.lines[1].is_empty());
        assert_eq!(code.lines[2][0].style.foreground, theme.foreground());
    }

    #[test]
    fn test_props() {
        let code = PlainTokenizer.tokenize("text", "a", &theme()).unwrap();
        assert_eq!(code.line_props(0).unwrap().class, "token-line");
        assert!(code.line_props(1).is_none());

        let props = code.lines[0][0].props();
        assert_eq!(props.class, "token");
        assert!(props.style.starts_with("color: #"));

        let block = code.block_props();
        assert!(block.class.contains("language-text"));
        assert!(block.style.contains("background-color"));
    }

    #[test]
    fn test_token_style_css() {
        let style = TokenStyle {
            foreground: "#000000".into(),
            bold: true,
            italic: true,
            underline: false,
        };
        assert_eq!(
            style.css(),
            "color: #000000; font-weight: bold; font-style: italic;"
        );
    }
}
