//! Error type shared by every module of the crate.

use thiserror::Error;

/// Errors that can occur while parsing or rendering a code block.
#[derive(Error, Debug)]
pub enum CodeBlockError {
    /// The fence metadata string could not be tokenized.
    #[error("Malformed fence metadata at byte {offset}: {reason}")]
    MalformedMetadata {
        /// Byte offset into the metadata string where parsing stopped.
        offset: usize,
        /// What was wrong.
        reason: String,
    },

    /// A `low-high` range where `low > high`.
    #[error("Invalid line range: {low}-{high} (start must be <= end)")]
    InvalidRange { low: usize, high: usize },

    /// A selector that is not a positive integer.
    #[error("Invalid line number: {0:?}")]
    InvalidLineNumber(String),

    /// A range expansion that would produce an unreasonable number of lines.
    #[error("Line range expands to {count} lines (limit is {limit})")]
    RangeTooLarge { count: usize, limit: usize },

    /// Syntax highlighting failed.
    #[error("Syntax highlighting failed: {0}")]
    Highlight(String),

    /// Failed to read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<syntect::Error> for CodeBlockError {
    fn from(err: syntect::Error) -> Self {
        CodeBlockError::Highlight(err.to_string())
    }
}

/// Result type for code block operations.
pub type CodeBlockResult<T> = Result<T, CodeBlockError>;
