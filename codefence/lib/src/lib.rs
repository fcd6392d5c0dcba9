//! # codefence
//!
//! Syntax-highlighted, copyable code blocks for documentation sites.
//!
//! A fenced code block carries an info string such as
//! `rust title="main.rs" {1,3-5}`. This crate:
//!
//! - parses the metadata part of that string ([`fence`])
//! - expands the highlighted line selectors into line numbers ([`range`])
//! - normalizes the raw block content into one typed input ([`input`])
//! - tokenizes the source with syntect against a light/dark theme ([`highlighting`])
//! - models the "copy to clipboard" control ([`clipboard`])
//! - composes everything into HTML, for a single block or a whole markdown
//!   document ([`render`])
//!
//! ## Examples
//!
//! ```
//! use codefence_lib::highlighting::{CodeTheme, ColorMode, SyntectTokenizer, ThemePair};
//! use codefence_lib::input::CodeBlockInput;
//! use codefence_lib::render::{CodeBlock, RenderOptions};
//!
//! let input = CodeBlockInput::new("fn main() {}\n")
//!     .with_language("rust")
//!     .with_metastring(r#"title="main.rs" {1}"#);
//!
//! let theme = CodeTheme::new(ThemePair::Github, ColorMode::Light);
//! let tokenizer = SyntectTokenizer::new();
//! let block = CodeBlock::new(&input).render(&tokenizer, &theme).unwrap();
//!
//! assert_eq!(block.title(), Some("main.rs"));
//! assert_eq!(block.highlighted_lines(), vec![1]);
//!
//! let html = block.to_html(&theme, &RenderOptions::default());
//! assert!(html.contains("copy-code-btn"));
//! ```

pub mod clipboard;
pub mod fence;
pub mod highlighting;
pub mod input;
pub mod range;
pub mod render;

mod error;

pub use error::{CodeBlockError, CodeBlockResult};
