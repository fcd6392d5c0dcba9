//! HTML output for rendered code blocks.

use super::{RenderOptions, RenderedCodeBlock, RenderedLine};
use crate::clipboard::COPY_LABEL;
use crate::highlighting::CodeTheme;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Browser script wiring every `.copy-code-btn` to the clipboard.
///
/// The button copies its `data-copy` attribute and shows `Copied!` for
/// 1.5 seconds. A rejected clipboard write leaves the label unchanged.
pub const COPY_SCRIPT: &str = r#"<script>
document.addEventListener('click', function (event) {
  var button = event.target.closest('.copy-code-btn');
  if (!button || !navigator.clipboard) return;
  navigator.clipboard.writeText(button.getAttribute('data-copy') || '').then(function () {
    button.textContent = 'Copied!';
    button.classList.add('copied');
    clearTimeout(button._codefenceReset);
    button._codefenceReset = setTimeout(function () {
      button.textContent = 'Copy';
      button.classList.remove('copied');
    }, 1500);
  }, function () {});
});
</script>
"#;

pub(super) fn code_block_html(
    block: &RenderedCodeBlock,
    theme: &CodeTheme,
    options: &RenderOptions,
) -> String {
    let chrome = theme.chrome();
    let show_line_numbers = block.line_numbers || options.line_numbers;
    let mut out = String::new();

    out.push_str(&format!(
        r#"<div class="code-block" data-language="{}" style="{} border: 1px solid {};">"#,
        attr(&block.language),
        block.style.css(),
        chrome.border
    ));
    out.push('\n');

    if let Some(title) = block.title() {
        out.push_str(&format!(
            r#"<div class="code-block-title" style="background-color: {}; border-bottom: 1px solid {};">{}</div>"#,
            chrome.title_background,
            chrome.border,
            text(title)
        ));
        out.push('\n');
    }

    out.push_str(r#"<div class="code-block-body">"#);
    out.push('\n');

    out.push_str(&format!(
        r#"<pre class="{}" style="{}">"#,
        attr(&block.class_name),
        attr(&block.style.css())
    ));
    for line in &block.lines {
        push_line(&mut out, line, chrome.highlight_background, show_line_numbers);
    }
    out.push_str("</pre>\n");

    // The page script owns the transient "Copied!" state.
    out.push_str(r#"<div class="code-block-controls">"#);
    out.push_str(&format!(
        r#"<button class="copy-code-btn" type="button" aria-label="Copy code" data-copy="{}">{}</button>"#,
        attr(block.copy.text()),
        COPY_LABEL
    ));
    if let Some(menu) = &block.menu_html {
        out.push_str(menu);
    }
    out.push_str("</div>\n");

    out.push_str("</div>\n</div>\n");
    out
}

fn push_line(out: &mut String, line: &RenderedLine, highlight_bg: &str, line_numbers: bool) {
    if line.highlighted {
        out.push_str(&format!(
            r#"<div class="token-line highlighted" data-line="{}" style="background-color: {};">"#,
            line.number, highlight_bg
        ));
    } else {
        out.push_str(&format!(
            r#"<div class="token-line" data-line="{}">"#,
            line.number
        ));
    }

    if line_numbers {
        out.push_str(&format!(
            r#"<span class="line-number" aria-hidden="true">{}</span>"#,
            line.number
        ));
    }

    if line.tokens.is_empty() {
        out.push('\n');
    }
    for token in &line.tokens {
        let props = token.props();
        out.push_str(&format!(
            r#"<span class="{}" style="{}">{}</span>"#,
            props.class,
            props.style,
            text(&token.content)
        ));
    }

    out.push_str("</div>");
}

/// The stylesheet for code blocks under `theme`.
pub fn stylesheet(theme: &CodeTheme) -> String {
    let chrome = theme.chrome();
    format!(
        r#"<style>
.code-block {{
    background-color: {bg};
    color: {fg};
    border: 1px solid {border};
    border-radius: 6px;
    margin: 1em 0;
    overflow: hidden;
}}

.code-block-title {{
    background-color: {title_bg};
    border-bottom: 1px solid {border};
    padding: 0.5em 1em;
    font-weight: bold;
}}

.code-block-body {{
    position: relative;
}}

.code-block-pre {{
    margin: 0;
    padding: 1em 0;
    overflow-x: auto;
    font-family: 'Monaco', 'Menlo', 'Ubuntu Mono', monospace;
    font-size: 0.9em;
}}

.token-line {{
    padding: 0 1em;
    min-height: 1.2em;
}}

.token-line.highlighted {{
    background-color: {highlight_bg};
}}

.line-number {{
    display: inline-block;
    width: 2em;
    margin-right: 1em;
    text-align: right;
    user-select: none;
    opacity: 0.5;
}}

.code-block-controls {{
    position: absolute;
    top: 0.5em;
    right: 0.5em;
    display: flex;
    gap: 0.5em;
}}

.copy-code-btn {{
    cursor: pointer;
    font-size: 0.8em;
    padding: 0.2em 0.6em;
    border: 1px solid {border};
    border-radius: 4px;
    background: transparent;
    color: inherit;
}}
</style>
"#,
        bg = theme.background(),
        fg = theme.foreground(),
        border = chrome.border,
        title_bg = chrome.title_background,
        highlight_bg = chrome.highlight_background,
    )
}

/// Document-level assets requested by `options`: stylesheet and copy script.
pub fn assets(theme: &CodeTheme, options: &RenderOptions) -> String {
    let mut out = String::new();
    if options.include_styles {
        out.push_str(&stylesheet(theme));
    }
    if options.include_copy_script {
        out.push_str(COPY_SCRIPT);
    }
    out
}
