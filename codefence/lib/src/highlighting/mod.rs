//! Tokenization, language registration and theming.
//!
//! The theme is an explicit value: callers resolve a [`ColorMode`] once
//! (see [`detect_color_mode`]) and pass a [`CodeTheme`] down to the
//! tokenizer and the renderer. Nothing in here looks up ambient state.

mod grammars;
mod languages;
mod themes;
mod tokenizer;

pub use languages::{LanguageRegistry, REGISTRATIONS, Registration};
pub use themes::{ColorMode, InvalidThemeName, ThemePair, detect_color_mode};
pub use tokenizer::{
    BlockStyle, PlainTokenizer, Props, SyntectTokenizer, Token, TokenStyle, TokenizedCode,
    Tokenizer,
};

use syntect::highlighting::{Color, Theme as SyntectTheme};

const FALLBACK_DARK_BACKGROUND: Color = Color { r: 40, g: 44, b: 52, a: 255 };
const FALLBACK_DARK_FOREGROUND: Color = Color { r: 220, g: 223, b: 228, a: 255 };
const FALLBACK_LIGHT_BACKGROUND: Color = Color { r: 255, g: 255, b: 255, a: 255 };
const FALLBACK_LIGHT_FOREGROUND: Color = Color { r: 36, g: 41, b: 46, a: 255 };

/// Colors of the block frame around the highlighted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    /// Background of a highlighted line.
    pub highlight_background: &'static str,
    /// Border of the block and the title bar.
    pub border: &'static str,
    /// Background of the title bar.
    pub title_background: &'static str,
}

impl Chrome {
    /// The fixed frame palette for a color mode.
    pub const fn for_mode(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => Chrome {
                highlight_background: "#EDF2F7",
                border: "#E2E8F0",
                title_background: "#FFFFFF",
            },
            ColorMode::Dark => Chrome {
                highlight_background: "rgba(0, 0, 0, 0.24)",
                border: "#2D3748",
                title_background: "inherit",
            },
        }
    }
}

/// A resolved theme: the syntect theme for one pair and mode, plus the
/// frame colors for that mode.
#[derive(Debug, Clone)]
pub struct CodeTheme {
    pair: ThemePair,
    mode: ColorMode,
    theme: SyntectTheme,
    chrome: Chrome,
}

impl CodeTheme {
    pub fn new(pair: ThemePair, mode: ColorMode) -> Self {
        tracing::debug!(theme = pair.kebab_name(), color_mode = mode.as_str(), "Loading theme");
        Self {
            pair,
            mode,
            theme: themes::load_theme(pair, mode),
            chrome: Chrome::for_mode(mode),
        }
    }

    pub fn pair(&self) -> ThemePair {
        self.pair
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    /// The underlying syntect theme.
    pub fn syntect_theme(&self) -> &SyntectTheme {
        &self.theme
    }

    /// Block background as a CSS color.
    pub fn background(&self) -> String {
        let fallback = match self.mode {
            ColorMode::Light => FALLBACK_LIGHT_BACKGROUND,
            ColorMode::Dark => FALLBACK_DARK_BACKGROUND,
        };
        css_hex(self.theme.settings.background.unwrap_or(fallback))
    }

    /// Default text color as a CSS color.
    pub fn foreground(&self) -> String {
        let fallback = match self.mode {
            ColorMode::Light => FALLBACK_LIGHT_FOREGROUND,
            ColorMode::Dark => FALLBACK_DARK_FOREGROUND,
        };
        css_hex(self.theme.settings.foreground.unwrap_or(fallback))
    }
}

impl Default for CodeTheme {
    fn default() -> Self {
        Self::new(ThemePair::default(), ColorMode::default())
    }
}

/// Formats a syntect color as `#rrggbb`, ignoring alpha.
pub(crate) fn css_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}
