//! # codefence CLI
//!
//! Renders fenced code blocks, or whole markdown documents, to themed HTML
//! with highlighted lines, a title bar and a copy button.
//!
//! ## Usage
//!
//! ```bash
//! # Render a markdown document (file or stdin)
//! codefence README.md > readme.html
//! cat README.md | codefence
//!
//! # Render one raw code block
//! codefence main.rs --block --lang rust --meta 'title="main.rs" {1,3-5}'
//!
//! # Pick a theme and color mode
//! codefence README.md --theme github --light
//! CODE_THEME=dracula codefence README.md
//!
//! # Copy a block's trimmed source to the terminal clipboard (OSC 52)
//! codefence snippet.sh --block --lang bash --copy
//!
//! # Inspect the metadata and range grammar
//! codefence meta 'title="a.js" {1,3-5}'
//! codefence expand 1,3-5
//!
//! # Discover names
//! codefence --list-themes
//! codefence --list-languages
//! ```
//!
//! Verbosity: `-v` INFO, `-vv` DEBUG, `-vvv` TRACE. `RUST_LOG` overrides.

pub use cli::{Cli, Command};

mod cli {
    use clap::{Parser, Subcommand};
    use codefence_lib::highlighting::ThemePair;
    use std::path::PathBuf;

    /// Command-line interface for the codefence renderer.
    #[derive(Parser, Debug)]
    #[command(name = "codefence", about = "Themed, copyable code blocks", version)]
    #[command(args_conflicts_with_subcommands = true)]
    pub struct Cli {
        #[command(subcommand)]
        pub command: Option<Command>,

        /// Input file path (reads from stdin if not provided, use "-" for explicit stdin)
        pub input: Option<PathBuf>,

        /// Treat the input as the body of a single code block
        #[arg(long, conflicts_with = "markdown")]
        pub block: bool,

        /// Treat the input as a markdown document (default)
        #[arg(long)]
        pub markdown: bool,

        /// Language of the code block (implies --block)
        #[arg(long, value_name = "LANG", conflicts_with = "markdown")]
        pub lang: Option<String>,

        /// Fence metadata for the code block, e.g. 'title="a.rs" {1,3-5}' (implies --block)
        #[arg(long, value_name = "META", conflicts_with = "markdown")]
        pub meta: Option<String>,

        /// Theme pair (kebab-case name); defaults to $CODE_THEME
        #[arg(long, value_parser = super::parse_theme_name)]
        pub theme: Option<ThemePair>,

        /// Force the light variant of the theme
        #[arg(long, conflicts_with = "dark")]
        pub light: bool,

        /// Force the dark variant of the theme
        #[arg(long)]
        pub dark: bool,

        /// Include line numbers in every code block
        #[arg(long)]
        pub line_numbers: bool,

        /// Omit the <style> block
        #[arg(long)]
        pub no_styles: bool,

        /// Omit the copy-button script
        #[arg(long)]
        pub no_script: bool,

        /// Add a language menu next to each copy button
        #[arg(long)]
        pub language_menu: bool,

        /// Copy the block's trimmed source to the terminal clipboard (OSC 52)
        #[arg(long, conflicts_with = "markdown")]
        pub copy: bool,

        /// List available themes
        #[arg(long)]
        pub list_themes: bool,

        /// List registered languages
        #[arg(long)]
        pub list_languages: bool,

        /// Increase verbosity (-v INFO, -vv DEBUG, -vvv TRACE, -vvvv TRACE with file/line)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        pub verbose: u8,
    }

    impl Cli {
        /// Whether the input is a single code block rather than a document.
        pub fn is_block_mode(&self) -> bool {
            self.block || self.lang.is_some() || self.meta.is_some()
        }
    }

    /// Inspection subcommands.
    #[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
    pub enum Command {
        /// Expand line selectors such as "1,3-5" and print them as JSON
        Expand {
            /// Comma-separated line numbers and inclusive ranges
            ranges: String,
        },
        /// Parse a fence metadata string and print it as JSON
        Meta {
            /// Metadata string, e.g. 'title="a.js" {1,3-5}'
            meta: String,
        },
    }
}

/// Parses a theme name string into ThemePair.
fn parse_theme_name(s: &str) -> Result<codefence_lib::highlighting::ThemePair, String> {
    codefence_lib::highlighting::ThemePair::try_from(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use codefence_lib::highlighting::ThemePair;

    #[test]
    fn test_parse_theme_name() {
        assert_eq!(parse_theme_name("github"), Ok(ThemePair::Github));
        assert!(parse_theme_name("nope").unwrap_err().contains("Valid names"));
    }

    #[test]
    fn test_block_mode_is_implied() {
        let cli = Cli::parse_from(["codefence", "a.rs", "--lang", "rust"]);
        assert!(cli.is_block_mode());
        let cli = Cli::parse_from(["codefence", "a.md"]);
        assert!(!cli.is_block_mode());
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::parse_from(["codefence", "expand", "1,3-5"]);
        assert_eq!(
            cli.command,
            Some(Command::Expand {
                ranges: "1,3-5".into()
            })
        );
        assert!(cli.input.is_none());
    }

    #[test]
    fn test_conflicting_modes_rejected() {
        assert!(Cli::try_parse_from(["codefence", "--light", "--dark"]).is_err());
        assert!(Cli::try_parse_from(["codefence", "--markdown", "--copy"]).is_err());
    }

    #[test]
    fn test_verbose_count() {
        let cli = Cli::parse_from(["codefence", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }
}
