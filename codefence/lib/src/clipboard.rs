//! Copy-to-clipboard support.
//!
//! The clipboard itself is a collaborator behind the [`Clipboard`] trait so
//! the copy control can be driven by a terminal (OSC 52), a test double, or
//! anything else that accepts text. [`CopyControl`] owns the text to copy and
//! the short-lived "copied" acknowledgment shown on the button.
//!
//! ## OSC 52
//!
//! ```text
//! ESC ] 52 ; <target> ; <base64-data> BEL
//! ```
//!
//! The terminal intercepts the sequence and sets the system clipboard. Many
//! terminals require the feature to be enabled explicitly (tmux needs
//! `set-clipboard on`).

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// How long the "copied" acknowledgment stays visible.
pub const DEFAULT_RESET_AFTER: Duration = Duration::from_millis(1500);

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

/// Something that can receive copied text.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// In-memory clipboard holding the last written text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// OSC 52 clipboard target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardTarget {
    /// System clipboard (Ctrl+V paste)
    #[default]
    Clipboard,
    /// X11 primary selection (middle-click paste)
    Primary,
    /// Both clipboard and primary selection
    Both,
}

impl ClipboardTarget {
    fn as_specifier(&self) -> &'static str {
        match self {
            ClipboardTarget::Clipboard => "c",
            ClipboardTarget::Primary => "p",
            ClipboardTarget::Both => "pc",
        }
    }
}

/// Builds the OSC 52 sequence that sets `content` on `target`.
///
/// ## Examples
///
/// ```
/// use codefence_lib::clipboard::{ClipboardTarget, build_osc52_sequence};
///
/// let sequence = build_osc52_sequence("Hello", ClipboardTarget::Clipboard);
/// assert_eq!(sequence, "\x1b]52;c;SGVsbG8=\x07");
/// ```
pub fn build_osc52_sequence(content: &str, target: ClipboardTarget) -> String {
    let encoded = BASE64.encode(content.as_bytes());
    format!("\x1b]52;{};{}\x07", target.as_specifier(), encoded)
}

/// Clipboard that writes OSC 52 sequences to a terminal.
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    writer: W,
    target: ClipboardTarget,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(writer: W) -> Self {
        Self::with_target(writer, ClipboardTarget::default())
    }

    pub fn with_target(writer: W, target: ClipboardTarget) -> Self {
        Self { writer, target }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let sequence = build_osc52_sequence(text, self.target);
        self.writer.write_all(sequence.as_bytes())?;
        self.writer.flush()
    }
}

/// The copy button's state: what it copies and whether it was just used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyControl {
    text: String,
    copied_at: Option<Instant>,
    reset_after: Duration,
}

impl CopyControl {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            copied_at: None,
            reset_after: DEFAULT_RESET_AFTER,
        }
    }

    /// Overrides how long the acknowledgment lasts.
    pub fn with_reset_after(mut self, reset_after: Duration) -> Self {
        self.reset_after = reset_after;
        self
    }

    /// The text that gets copied.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn reset_after(&self) -> Duration {
        self.reset_after
    }

    /// Writes the text to `clipboard`.
    ///
    /// Success sets the acknowledgment immediately. A failing clipboard is
    /// logged and leaves the control unchanged; it never propagates.
    pub fn on_copy<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C) -> bool {
        self.on_copy_at(clipboard, Instant::now())
    }

    /// [`on_copy`](Self::on_copy) with an explicit clock.
    pub fn on_copy_at<C: Clipboard + ?Sized>(&mut self, clipboard: &mut C, now: Instant) -> bool {
        match clipboard.write_text(&self.text) {
            Ok(()) => {
                tracing::debug!(bytes = self.text.len(), "Copied code block");
                self.copied_at = Some(now);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to copy code block to clipboard");
                false
            }
        }
    }

    /// Whether the acknowledgment is showing right now.
    pub fn has_copied(&self) -> bool {
        self.has_copied_at(Instant::now())
    }

    /// Whether the acknowledgment is showing at `now`.
    pub fn has_copied_at(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < self.reset_after)
    }

    /// Button label for the current state.
    pub fn label(&self) -> &'static str {
        self.label_at(Instant::now())
    }

    pub fn label_at(&self, now: Instant) -> &'static str {
        if self.has_copied_at(now) {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    struct BrokenClipboard;

    impl Clipboard for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_clipboard_target_specifier() {
        assert_eq!(ClipboardTarget::Clipboard.as_specifier(), "c");
        assert_eq!(ClipboardTarget::Primary.as_specifier(), "p");
        assert_eq!(ClipboardTarget::Both.as_specifier(), "pc");
    }

    #[test]
    fn test_build_osc52_sequence_empty_content() {
        let sequence = build_osc52_sequence("", ClipboardTarget::Clipboard);
        assert_eq!(sequence, "\x1b]52;c;\x07");
    }

    #[test]
    fn test_build_osc52_sequence_multiline() {
        let content = "fn main() {\n}\n";
        let sequence = build_osc52_sequence(content, ClipboardTarget::Both);
        assert!(sequence.starts_with("\x1b]52;pc;"));
        let start = "\x1b]52;pc;".len();
        let encoded = &sequence[start..sequence.len() - 1];
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), content);
    }

    #[test]
    fn test_osc52_clipboard_writes_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("Hello").unwrap();
        assert_eq!(clipboard.into_inner(), b"\x1b]52;c;SGVsbG8=\x07");
    }

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.contents(), None);
        clipboard.write_text("abc").unwrap();
        assert_eq!(clipboard.contents(), Some("abc"));
    }

    #[test]
    fn test_copy_sets_flag_immediately() {
        let mut control = CopyControl::new("let x = 1;");
        let mut clipboard = MemoryClipboard::new();
        assert!(!control.has_copied());
        assert_eq!(control.label(), "Copy");

        assert!(control.on_copy(&mut clipboard));
        assert!(control.has_copied());
        assert_eq!(control.label(), "Copied!");
        assert_eq!(clipboard.contents(), Some("let x = 1;"));
    }

    #[test]
    fn test_flag_resets_after_timeout() {
        let mut control = CopyControl::new("x");
        let start = Instant::now();
        control.on_copy_at(&mut MemoryClipboard::new(), start);

        assert!(control.has_copied_at(start + Duration::from_millis(1499)));
        assert!(!control.has_copied_at(start + Duration::from_millis(1500)));
        assert_eq!(control.label_at(start + Duration::from_secs(2)), "Copy");
    }

    #[test]
    fn test_custom_reset_after() {
        let mut control = CopyControl::new("x").with_reset_after(Duration::from_millis(10));
        let start = Instant::now();
        control.on_copy_at(&mut MemoryClipboard::new(), start);
        assert!(!control.has_copied_at(start + Duration::from_millis(10)));
    }

    #[test]
    fn test_copy_again_restarts_timer() {
        let mut control = CopyControl::new("x");
        let mut clipboard = MemoryClipboard::new();
        let start = Instant::now();
        control.on_copy_at(&mut clipboard, start);
        control.on_copy_at(&mut clipboard, start + Duration::from_millis(1000));
        assert!(control.has_copied_at(start + Duration::from_millis(2000)));
    }

    #[test]
    #[traced_test]
    fn test_failed_copy_leaves_flag_unset() {
        let mut control = CopyControl::new("x");
        assert!(!control.on_copy(&mut BrokenClipboard));
        assert!(!control.has_copied());
        assert!(logs_contain("Failed to copy code block to clipboard"));
    }
}
