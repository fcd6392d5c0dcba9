//! End-to-end tests: metadata through to HTML.

mod common;

use codefence_lib::clipboard::{CopyControl, MemoryClipboard};
use codefence_lib::fence::parse_metadata;
use codefence_lib::highlighting::{CodeTheme, ColorMode, SyntectTokenizer, ThemePair};
use codefence_lib::input::CodeBlockInput;
use codefence_lib::range::expand_ranges;
use codefence_lib::render::{CodeBlock, LanguageMenu, RenderOptions, render_markdown};
use common::load_fixture;

fn bare_options() -> RenderOptions {
    RenderOptions {
        theme_pair: ThemePair::Github,
        color_mode: ColorMode::Light,
        include_styles: false,
        include_copy_script: false,
        line_numbers: false,
    }
}

#[test]
fn empty_or_absent_metadata_has_no_title_or_highlight() {
    for meta in [None, Some("")] {
        let parsed = parse_metadata(meta);
        assert!(parsed.title.is_none());
        assert!(parsed.highlight.is_none());
    }
}

#[test]
fn title_and_selectors_are_parsed() {
    let parsed = parse_metadata(Some(r#"title="a.js" {1,3-5}"#));
    assert_eq!(parsed.title.as_deref(), Some("a.js"));
    let keys: Vec<_> = parsed.highlight.as_ref().unwrap().keys().collect();
    assert_eq!(keys, vec!["1", "3-5"]);
}

#[test]
fn selectors_expand_to_line_numbers() {
    assert_eq!(expand_ranges("1,3-5").unwrap(), vec![1, 3, 4, 5]);
    assert_eq!(expand_ranges("").unwrap(), Vec::<usize>::new());
    assert_eq!(expand_ranges("2").unwrap(), vec![2]);
}

#[test]
fn metadata_drives_highlighted_lines() {
    let theme = CodeTheme::new(ThemePair::Github, ColorMode::Light);
    let input = CodeBlockInput::new("one\ntwo\nthree\nfour\nfive")
        .with_language("text")
        .with_metastring("{2,4}");
    let block = CodeBlock::new(&input)
        .render(&SyntectTokenizer::new(), &theme)
        .unwrap();

    assert_eq!(block.highlighted_lines(), vec![2, 4]);
    let html = block.to_html(&theme, &bare_options());
    assert_eq!(html.matches("token-line highlighted").count(), 2);
}

#[test]
fn data_meta_is_used_when_metastring_is_missing() {
    let theme = CodeTheme::new(ThemePair::Github, ColorMode::Dark);
    let input = CodeBlockInput::new("a\nb").with_data_meta(r#"title="from-attr" {1}"#);
    let block = CodeBlock::new(&input)
        .render(&SyntectTokenizer::new(), &theme)
        .unwrap();
    assert_eq!(block.title(), Some("from-attr"));
    assert_eq!(block.highlighted_lines(), vec![1]);
}

#[test]
fn copy_sets_flag_and_copies_trimmed_source() {
    let theme = CodeTheme::new(ThemePair::OneHalf, ColorMode::Dark);
    let input = CodeBlockInput::from_fragments(["\n  let a = 1;\n", "let b = 2;\n\n"])
        .with_language("rust");
    let mut block = CodeBlock::new(&input)
        .render(&SyntectTokenizer::new(), &theme)
        .unwrap();

    let mut clipboard = MemoryClipboard::new();
    assert!(!block.copy.has_copied());
    block.copy.on_copy(&mut clipboard);
    assert!(block.copy.has_copied());
    assert_eq!(block.copy.label(), "Copied!");
    assert_eq!(clipboard.contents(), Some("let a = 1;\nlet b = 2;"));
    assert_eq!(block.copy.text(), CopyControl::new(input.source()).text());
}

#[test]
fn same_block_renders_differently_per_color_mode() {
    let input = CodeBlockInput::new("let x = 1;")
        .with_language("javascript")
        .with_metastring(r#"title="x.js""#);
    let render = |mode| {
        let theme = CodeTheme::new(ThemePair::Github, mode);
        CodeBlock::new(&input)
            .render(&SyntectTokenizer::new(), &theme)
            .unwrap()
            .to_html(&theme, &bare_options())
    };

    let light = render(ColorMode::Light);
    let dark = render(ColorMode::Dark);
    assert_ne!(light, dark);
    assert!(light.contains("#E2E8F0"));
    assert!(dark.contains("#2D3748"));
}

#[test]
fn guide_fixture_renders_every_block() {
    let md = load_fixture("guide.md");
    let menu = LanguageMenu::new("javascript", ["javascript", "typescript"]);
    let html = render_markdown(&md, &bare_options(), Some(&menu)).unwrap();

    assert!(html.contains("<h1>Getting started</h1>"));
    assert_eq!(html.matches(r#"class="copy-code-btn""#).count(), 3);
    assert_eq!(html.matches("<select").count(), 3);
    assert_eq!(html.matches(r#"class="code-block-title""#).count(), 2);
    assert!(html.contains(">server.js</div>"));
    assert_eq!(html.matches("token-line highlighted").count(), 3);
    assert!(html.contains(r#"data-line="4" style="background-color: #EDF2F7;""#));
    assert!(html.contains("&lt;ok&gt;"));
}

#[test]
fn malformed_fixture_degrades_gracefully() {
    let md = load_fixture("malformed.md");
    let html = render_markdown(&md, &bare_options(), None).unwrap();

    assert_eq!(html.matches(r#"class="copy-code-btn""#).count(), 2);
    assert!(!html.contains("code-block-title"));
    assert!(!html.contains("highlighted"));
}
