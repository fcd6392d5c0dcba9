//! Theme pairing, loading and color-mode detection.
//!
//! Every [`ThemePair`] resolves to a concrete syntect theme for a
//! [`ColorMode`]. Themes are embedded through two-face and loaded lazily.

use lazy_static::lazy_static;
use syntect::highlighting::Theme as SyntectTheme;
use thiserror::Error;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes};

/// A theme name that matches no [`ThemePair`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid theme name: '{0}'. Valid names: {names}", names = valid_names())]
pub struct InvalidThemeName(pub String);

fn valid_names() -> String {
    PAIRS
        .iter()
        .map(|entry| entry.name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Light/dark display preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorMode {
    Light,
    #[default]
    Dark,
}

impl ColorMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

/// A named pair of syntect themes, one per [`ColorMode`].
///
/// ## Examples
///
/// ```
/// use codefence_lib::highlighting::{ColorMode, ThemePair};
///
/// let pair = ThemePair::try_from("one-half").unwrap();
/// assert_eq!(pair, ThemePair::OneHalf);
/// assert!(pair.description(ColorMode::Light).contains("light"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ThemePair {
    Base16Ocean,
    Github,
    Gruvbox,
    #[default]
    OneHalf,
    Solarized,
    Nord,
    Dracula,
    Monokai,
    VisualStudioDark,
}

/// One half of a pair: the embedded theme and how to describe it.
#[derive(Clone, Copy)]
struct Variant {
    embedded: EmbeddedThemeName,
    description: &'static str,
}

struct PairEntry {
    pair: ThemePair,
    name: &'static str,
    aliases: &'static [&'static str],
    light: Variant,
    dark: Variant,
}

const fn variant(embedded: EmbeddedThemeName, description: &'static str) -> Variant {
    Variant {
        embedded,
        description,
    }
}

/// Pairs without a light theme reuse their dark variant.
#[allow(deprecated)]
const PAIRS: &[PairEntry] = &[
    PairEntry {
        pair: ThemePair::Base16Ocean,
        name: "base16-ocean",
        aliases: &["base-16-ocean"],
        light: variant(EmbeddedThemeName::Base16OceanLight, "Base16 Ocean (light)"),
        dark: variant(EmbeddedThemeName::Base16OceanDark, "Base16 Ocean (dark)"),
    },
    PairEntry {
        pair: ThemePair::Github,
        name: "github",
        aliases: &[],
        light: variant(EmbeddedThemeName::InspiredGithub, "Inspired GitHub (light)"),
        dark: variant(EmbeddedThemeName::Github, "GitHub (dark)"),
    },
    PairEntry {
        pair: ThemePair::Gruvbox,
        name: "gruvbox",
        aliases: &[],
        light: variant(EmbeddedThemeName::GruvboxLight, "Gruvbox (light)"),
        dark: variant(EmbeddedThemeName::GruvboxDark, "Gruvbox (dark)"),
    },
    PairEntry {
        pair: ThemePair::OneHalf,
        name: "one-half",
        aliases: &["onehalf"],
        light: variant(EmbeddedThemeName::OneHalfLight, "OneHalf (light)"),
        dark: variant(EmbeddedThemeName::OneHalfDark, "OneHalf (dark)"),
    },
    PairEntry {
        pair: ThemePair::Solarized,
        name: "solarized",
        aliases: &[],
        light: variant(EmbeddedThemeName::SolarizedLight, "Solarized (light)"),
        dark: variant(EmbeddedThemeName::SolarizedDark, "Solarized (dark)"),
    },
    PairEntry {
        pair: ThemePair::Nord,
        name: "nord",
        aliases: &[],
        light: variant(EmbeddedThemeName::Nord, "Nord (dark only)"),
        dark: variant(EmbeddedThemeName::Nord, "Nord (dark only)"),
    },
    PairEntry {
        pair: ThemePair::Dracula,
        name: "dracula",
        aliases: &[],
        light: variant(EmbeddedThemeName::Dracula, "Dracula (dark only)"),
        dark: variant(EmbeddedThemeName::Dracula, "Dracula (dark only)"),
    },
    PairEntry {
        pair: ThemePair::Monokai,
        name: "monokai",
        aliases: &["monokai-extended"],
        light: variant(EmbeddedThemeName::MonokaiExtended, "Monokai Extended (dark only)"),
        dark: variant(EmbeddedThemeName::MonokaiExtended, "Monokai Extended (dark only)"),
    },
    PairEntry {
        pair: ThemePair::VisualStudioDark,
        name: "vs-dark",
        aliases: &["visual-studio-dark"],
        light: variant(EmbeddedThemeName::VisualStudioDarkPlus, "Visual Studio Dark+ (dark only)"),
        dark: variant(EmbeddedThemeName::VisualStudioDarkPlus, "Visual Studio Dark+ (dark only)"),
    },
];

impl TryFrom<&str> for ThemePair {
    type Error = InvalidThemeName;

    /// Case-insensitive; `_` and `-` are interchangeable.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        PAIRS
            .iter()
            .find(|entry| entry.name == wanted || entry.aliases.contains(&wanted.as_str()))
            .map(|entry| entry.pair)
            .ok_or_else(|| InvalidThemeName(s.to_string()))
    }
}

impl ThemePair {
    fn entry(self) -> &'static PairEntry {
        // Every variant has a row.
        PAIRS
            .iter()
            .find(|entry| entry.pair == self)
            .unwrap_or(&PAIRS[0])
    }

    fn variant(self, mode: ColorMode) -> Variant {
        let entry = self.entry();
        match mode {
            ColorMode::Light => entry.light,
            ColorMode::Dark => entry.dark,
        }
    }

    /// The name accepted by `TryFrom<&str>` and printed by `--list-themes`.
    pub fn kebab_name(self) -> &'static str {
        self.entry().name
    }

    /// Human-readable description of the theme used for `mode`.
    pub fn description(self, mode: ColorMode) -> &'static str {
        self.variant(mode).description
    }

    pub fn all() -> Vec<ThemePair> {
        PAIRS.iter().map(|entry| entry.pair).collect()
    }
}

lazy_static! {
    static ref THEME_SET: EmbeddedLazyThemeSet = extra_themes();
}

/// Loads the syntect theme for a theme pair and color mode.
pub(crate) fn load_theme(theme_pair: ThemePair, color_mode: ColorMode) -> SyntectTheme {
    THEME_SET.get(theme_pair.variant(color_mode).embedded).clone()
}

/// Detects the color mode from environment variables.
///
/// Detection priority:
/// 1. `NO_COLOR` set: Dark
/// 2. `COLORFGBG` as `fg;bg`: bg < 7 is Dark, otherwise Light
/// 3. Default: Dark
pub fn detect_color_mode() -> ColorMode {
    if std::env::var("NO_COLOR").is_ok() {
        tracing::info!(color_mode = "dark", source = "NO_COLOR", "Detected color mode");
        return ColorMode::Dark;
    }

    if let Ok(colorfgbg) = std::env::var("COLORFGBG")
        && let Some(bg) = colorfgbg.split(';').next_back()
        && let Ok(bg_num) = bg.parse::<u8>()
    {
        let mode = if bg_num < 7 {
            ColorMode::Dark
        } else {
            ColorMode::Light
        };
        tracing::info!(
            color_mode = mode.as_str(),
            source = "COLORFGBG",
            colorfgbg = %colorfgbg,
            "Detected color mode"
        );
        return mode;
    }

    tracing::info!(color_mode = "dark", source = "default", "Detected color mode");
    ColorMode::Dark
}
