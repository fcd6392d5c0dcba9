//! Rendering whole markdown documents, replacing every code block.

use super::{CodeBlock, MenuFragment, RenderOptions, assets};
use crate::error::CodeBlockResult;
use crate::fence::split_info_string;
use crate::highlighting::{SyntectTokenizer, Tokenizer};
use crate::input::CodeBlockInput;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

/// Converts markdown to HTML, rendering each code block with highlighting,
/// title, copy button and `menu`.
///
/// Styles and the copy script are prepended once, as `options` request.
///
/// ## Examples
///
/// ```
/// use codefence_lib::render::{RenderOptions, render_markdown};
///
/// let md = "# Demo\n\n```rust title=\"main.rs\" {1}\nfn main() {}\n```\n";
/// let html = render_markdown(md, &RenderOptions::default(), None).unwrap();
/// assert!(html.contains("<h1>Demo</h1>"));
/// assert!(html.contains(r#"<div class="code-block-title""#));
/// ```
///
/// ## Errors
///
/// Returns an error if highlighting fails.
pub fn render_markdown(
    markdown: &str,
    options: &RenderOptions,
    menu: Option<&dyn MenuFragment>,
) -> CodeBlockResult<String> {
    render_markdown_with(markdown, options, menu, &SyntectTokenizer::new())
}

/// [`render_markdown`] with an explicit tokenizer.
pub fn render_markdown_with<T: Tokenizer + ?Sized>(
    markdown: &str,
    options: &RenderOptions,
    menu: Option<&dyn MenuFragment>,
    tokenizer: &T,
) -> CodeBlockResult<String> {
    let theme = options.theme();
    let mut output = assets(&theme, options);

    let parser = Parser::new_ext(
        markdown,
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES,
    );

    let mut pending: Vec<Event> = Vec::new();
    let mut code: Option<(String, Vec<String>)> = None;
    let mut blocks = 0usize;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                html::push_html(&mut output, pending.drain(..));
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((info, Vec::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, fragments)) = code.take() {
                    let input = block_input(&info, fragments);
                    let rendered = CodeBlock::new(&input)
                        .with_optional_menu(menu)
                        .render(tokenizer, &theme)?;
                    output.push_str(&rendered.to_html(&theme, options));
                    blocks += 1;
                }
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, fragments)) = code.as_mut() {
                    fragments.push(text.into_string());
                }
            }
            other => pending.push(other),
        }
    }
    html::push_html(&mut output, pending.into_iter());

    tracing::debug!(code_blocks = blocks, "Rendered markdown document");
    Ok(output)
}

/// Builds the input for one fenced block from its info string.
///
/// An info string that opens with metadata (`{1,2}` or `title=...`) has no
/// language.
fn block_input(info: &str, fragments: Vec<String>) -> CodeBlockInput {
    let (language, meta) = split_info_string(info);
    let (language, meta) = if language.starts_with('{') || language.contains('=') {
        ("", info.trim())
    } else {
        (language, meta)
    };

    let mut input = CodeBlockInput::from_fragments(fragments);
    if !language.is_empty() {
        input = input.with_language(language);
    }
    if !meta.is_empty() {
        input = input.with_metastring(meta);
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::PlainTokenizer;
    use crate::render::RawFragment;

    fn bare() -> RenderOptions {
        RenderOptions {
            include_styles: false,
            include_copy_script: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_prose_passes_through() {
        let html = render_markdown("# Title\n\nSome *text*.", &bare(), None).unwrap();
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
        assert!(!html.contains("code-block"));
    }

    #[test]
    fn test_fenced_block_is_replaced() {
        let md = "```rust {2}\nfn a() {}\nfn b() {}\n```\n";
        let html = render_markdown(md, &bare(), None).unwrap();
        assert!(html.contains(r#"data-language="rust""#));
        assert!(html.contains(r#"<div class="token-line highlighted" data-line="2""#));
        assert!(!html.contains("<code"));
    }

    #[test]
    fn test_block_without_language() {
        let md = "```\nplain\n```\n";
        let html = render_markdown_with(md, &bare(), None, &PlainTokenizer).unwrap();
        assert!(html.contains("language-text"));
        assert!(html.contains(">plain</span>"));
    }

    #[test]
    fn test_metadata_without_language() {
        let input = block_input(r#"{1} title="x""#, vec!["a".into()]);
        assert_eq!(input.language(), "text");
        assert_eq!(input.metadata().title.as_deref(), Some("x"));
    }

    #[test]
    fn test_indented_block() {
        let md = "Para\n\n    indented code\n";
        let html = render_markdown_with(md, &bare(), None, &PlainTokenizer).unwrap();
        assert!(html.contains(">indented code</span>"));
    }

    #[test]
    fn test_assets_emitted_once() {
        let md = "```js\na\n```\n\n```js\nb\n```\n";
        let html = render_markdown(md, &RenderOptions::default(), None).unwrap();
        assert_eq!(html.matches("<style>").count(), 1);
        assert_eq!(html.matches("<script>").count(), 1);
        assert_eq!(html.matches(r#"class="copy-code-btn""#).count(), 2);
    }

    #[test]
    fn test_menu_in_every_block() {
        let md = "```js\na\n```\n\n```js\nb\n```\n";
        let menu = RawFragment("<nav>menu</nav>".into());
        let html = render_markdown(md, &bare(), Some(&menu)).unwrap();
        assert_eq!(html.matches("<nav>menu</nav>").count(), 2);
    }

    #[test]
    fn test_code_block_inside_list() {
        let md = "- item\n\n  ```text\n  inner\n  ```\n";
        let html = render_markdown_with(md, &bare(), None, &PlainTokenizer).unwrap();
        assert!(html.contains("<li>"));
        assert!(html.contains(">inner</span>"));
        assert!(html.contains("</ul>"));
    }
}
