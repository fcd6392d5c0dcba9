//! Composing a code block: metadata, highlighting, title, copy control and
//! an optional caller-supplied menu.
//!
//! ## Examples
//!
//! ```
//! use codefence_lib::highlighting::{CodeTheme, ColorMode, PlainTokenizer, ThemePair};
//! use codefence_lib::input::CodeBlockInput;
//! use codefence_lib::render::{CodeBlock, LanguageMenu};
//!
//! let input = CodeBlockInput::new("a\nb\nc\nd\ne").with_metastring("{2,4}");
//! let menu = LanguageMenu::new("text", ["text", "rust"]);
//! let theme = CodeTheme::new(ThemePair::OneHalf, ColorMode::Dark);
//!
//! let block = CodeBlock::new(&input)
//!     .with_menu(&menu)
//!     .render(&PlainTokenizer, &theme)
//!     .unwrap();
//! assert_eq!(block.highlighted_lines(), vec![2, 4]);
//! assert!(block.title().is_none());
//! ```

mod html;
mod markdown;

pub use html::{COPY_SCRIPT, assets, stylesheet};
pub use markdown::{render_markdown, render_markdown_with};

use crate::clipboard::CopyControl;
use crate::error::CodeBlockResult;
use crate::highlighting::{
    BlockStyle, CodeTheme, ColorMode, LanguageRegistry, ThemePair, Token, Tokenizer,
    detect_color_mode,
};
use crate::input::CodeBlockInput;
use crate::range::HighlightSet;

/// Environment variable naming the theme pair.
pub const CODE_THEME_ENV: &str = "CODE_THEME";

/// A piece of markup placed next to the copy button.
pub trait MenuFragment {
    fn render_html(&self) -> String;
}

/// A language picker rendered as a `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMenu {
    current: String,
    languages: Vec<String>,
}

impl LanguageMenu {
    pub fn new<I, S>(current: impl Into<String>, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            current: current.into(),
            languages: languages.into_iter().map(Into::into).collect(),
        }
    }

    /// A menu offering every canonical id in `registry`.
    pub fn from_registry(current: impl Into<String>, registry: &LanguageRegistry) -> Self {
        Self::new(current, registry.languages().into_iter().map(|(id, _)| id))
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}

impl MenuFragment for LanguageMenu {
    fn render_html(&self) -> String {
        let mut out = String::from(
            r#"<select class="code-block-language-menu" aria-label="Language">"#,
        );
        for language in &self.languages {
            let value = html_escape::encode_double_quoted_attribute(language);
            let selected = if *language == self.current {
                " selected"
            } else {
                ""
            };
            out.push_str(&format!(
                r#"<option value="{}"{}>{}</option>"#,
                value,
                selected,
                html_escape::encode_text(language)
            ));
        }
        out.push_str("</select>");
        out
    }
}

/// Trusted markup inserted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment(pub String);

impl MenuFragment for RawFragment {
    fn render_html(&self) -> String {
        self.0.clone()
    }
}

/// Rendering options shared by single blocks and whole documents.
///
/// ## Examples
///
/// ```
/// use codefence_lib::highlighting::{ColorMode, ThemePair};
/// use codefence_lib::render::RenderOptions;
///
/// let mut options = RenderOptions::default();
/// options.theme_pair = ThemePair::Github;
/// options.color_mode = ColorMode::Light;
/// options.line_numbers = true;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub theme_pair: ThemePair,
    pub color_mode: ColorMode,
    /// Emit the `<style>` block.
    pub include_styles: bool,
    /// Emit the script wiring the copy buttons to the browser clipboard.
    pub include_copy_script: bool,
    /// Global default for line numbers; a block's metadata can turn them on.
    pub line_numbers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme_pair: ThemePair::default(),
            color_mode: ColorMode::default(),
            include_styles: true,
            include_copy_script: true,
            line_numbers: false,
        }
    }
}

impl RenderOptions {
    /// Defaults with the theme pair from `CODE_THEME` and the detected
    /// color mode. An invalid `CODE_THEME` is logged and ignored.
    pub fn from_env() -> Self {
        let theme_pair = match std::env::var(CODE_THEME_ENV) {
            Ok(name) => ThemePair::try_from(name.as_str()).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Ignoring {}", CODE_THEME_ENV);
                ThemePair::default()
            }),
            Err(_) => ThemePair::default(),
        };

        Self {
            theme_pair,
            color_mode: detect_color_mode(),
            ..Default::default()
        }
    }

    /// Loads the theme these options name.
    pub fn theme(&self) -> CodeTheme {
        CodeTheme::new(self.theme_pair, self.color_mode)
    }
}

/// A code block ready to be rendered.
pub struct CodeBlock<'a> {
    input: &'a CodeBlockInput,
    menu: Option<&'a dyn MenuFragment>,
}

impl<'a> CodeBlock<'a> {
    pub fn new(input: &'a CodeBlockInput) -> Self {
        Self { input, menu: None }
    }

    /// Places `menu` next to the copy button.
    pub fn with_menu(mut self, menu: &'a dyn MenuFragment) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Same as [`with_menu`](Self::with_menu) but accepts an absent menu.
    pub fn with_optional_menu(mut self, menu: Option<&'a dyn MenuFragment>) -> Self {
        self.menu = menu;
        self
    }

    /// Parses metadata, tokenizes the trimmed source and marks highlighted
    /// lines. Metadata problems never fail the render.
    pub fn render<T: Tokenizer + ?Sized>(
        &self,
        tokenizer: &T,
        theme: &CodeTheme,
    ) -> CodeBlockResult<RenderedCodeBlock> {
        let metadata = self.input.metadata();
        let highlight = HighlightSet::from_metadata(&metadata);
        let source = self.input.source();
        let language = self.input.language().to_string();

        let code = tokenizer.tokenize(&language, &source, theme)?;

        let lines: Vec<RenderedLine> = code
            .lines
            .into_iter()
            .enumerate()
            .map(|(idx, tokens)| {
                let number = idx + 1;
                RenderedLine {
                    number,
                    highlighted: highlight.contains(number),
                    tokens,
                }
            })
            .collect();

        let out_of_range: Vec<usize> = highlight
            .lines()
            .iter()
            .copied()
            .filter(|n| *n > lines.len())
            .collect();
        if !out_of_range.is_empty() {
            tracing::debug!(
                lines = ?out_of_range,
                line_count = lines.len(),
                "Highlighted lines past the end of the block"
            );
        }

        tracing::debug!(
            language = %language,
            lines = lines.len(),
            highlighted = highlight.len(),
            title = metadata.title.as_deref().unwrap_or(""),
            "Rendered code block"
        );

        Ok(RenderedCodeBlock {
            title: metadata.title.filter(|t| !t.is_empty()),
            language,
            class_name: code.class_name,
            style: code.style,
            line_numbers: metadata.line_numbering,
            lines,
            copy: CopyControl::new(source),
            menu_html: self.menu.map(|m| m.render_html()),
        })
    }
}

/// One rendered source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// 1-based line number.
    pub number: usize,
    pub highlighted: bool,
    pub tokens: Vec<Token>,
}

impl RenderedLine {
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.content.as_str()).collect()
    }
}

/// The output of [`CodeBlock::render`].
#[derive(Debug, Clone)]
pub struct RenderedCodeBlock {
    pub title: Option<String>,
    pub language: String,
    /// Class list for the `pre` element.
    pub class_name: String,
    pub style: BlockStyle,
    /// Line numbers requested by the block's own metadata.
    pub line_numbers: bool,
    pub lines: Vec<RenderedLine>,
    pub copy: CopyControl,
    pub menu_html: Option<String>,
}

impl RenderedCodeBlock {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// 1-based numbers of the highlighted lines, ascending.
    pub fn highlighted_lines(&self) -> Vec<usize> {
        self.lines
            .iter()
            .filter(|l| l.highlighted)
            .map(|l| l.number)
            .collect()
    }

    /// The block as an HTML fragment. Styles and script are not included;
    /// see [`assets`].
    pub fn to_html(&self, theme: &CodeTheme, options: &RenderOptions) -> String {
        html::code_block_html(self, theme, options)
    }
}
