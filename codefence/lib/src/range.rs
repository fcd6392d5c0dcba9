//! Line range expansion and the resolved highlight set.
//!
//! A highlight specification is a comma-separated list of 1-based line
//! numbers and inclusive `low-high` ranges:
//!
//! ```
//! use codefence_lib::range::expand_ranges;
//!
//! assert_eq!(expand_ranges("1,3-5").unwrap(), vec![1, 3, 4, 5]);
//! assert_eq!(expand_ranges("").unwrap(), Vec::<usize>::new());
//! assert!(expand_ranges("5-3").is_err());
//! ```

use crate::fence::FenceMetadata;
use crate::{CodeBlockError, CodeBlockResult};

/// Upper bound on the number of line numbers one expansion may produce.
pub const MAX_EXPANDED_LINES: usize = 100_000;

/// Validated line range with enforced invariants (`1 <= start <= end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    /// Creates a single-line range.
    ///
    /// ## Errors
    ///
    /// Returns an error if `line` is zero.
    pub fn single(line: usize) -> CodeBlockResult<Self> {
        Self::new(line, line)
    }

    /// Creates a range from start to end (inclusive).
    ///
    /// ## Errors
    ///
    /// Returns an error if `start > end` or if `start` is zero.
    pub fn new(start: usize, end: usize) -> CodeBlockResult<Self> {
        if start == 0 {
            return Err(CodeBlockError::InvalidLineNumber("0".to_string()));
        }
        if start > end {
            return Err(CodeBlockError::InvalidRange {
                low: start,
                high: end,
            });
        }
        Ok(Self { start, end })
    }

    /// Checks if a line number falls within this range.
    pub fn contains(&self, line: usize) -> bool {
        line >= self.start && line <= self.end
    }

    /// Returns the start of the range.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end of the range.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of lines covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A validated range always covers at least one line.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates every line number in the range.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }
}

/// Parses one comma-separated entry (`"7"` or `"3-5"`).
fn parse_selector(part: &str) -> CodeBlockResult<LineRange> {
    match part.split_once('-') {
        // A leading '-' is a negative number, not a range.
        Some((low, high)) if !low.trim().is_empty() => {
            let low = parse_line_number(low)?;
            let high = parse_line_number(high)?;
            LineRange::new(low, high)
        }
        _ => LineRange::single(parse_line_number(part)?),
    }
}

fn parse_line_number(s: &str) -> CodeBlockResult<usize> {
    let s = s.trim();
    match s.parse::<usize>() {
        Ok(0) | Err(_) => Err(CodeBlockError::InvalidLineNumber(s.to_string())),
        Ok(n) => Ok(n),
    }
}

/// Expands a comma-separated list of line numbers and ranges.
///
/// The result is sorted ascending with duplicates removed, so overlapping
/// selectors (`"1-3,2"`) collapse. Empty entries are skipped. The size limit
/// applies to the distinct lines produced, not to the sum of range lengths.
///
/// ## Errors
///
/// - [`CodeBlockError::InvalidRange`] when a range has `low > high`
/// - [`CodeBlockError::InvalidLineNumber`] for zero, negative or non-numeric entries
/// - [`CodeBlockError::RangeTooLarge`] past [`MAX_EXPANDED_LINES`]
///
/// ## Examples
///
/// ```
/// use codefence_lib::range::expand_ranges;
///
/// assert_eq!(expand_ranges("2").unwrap(), vec![2]);
/// assert_eq!(expand_ranges("4-6, 1").unwrap(), vec![1, 4, 5, 6]);
/// ```
pub fn expand_ranges(spec: &str) -> CodeBlockResult<Vec<usize>> {
    let mut ranges = spec
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_selector)
        .collect::<CodeBlockResult<Vec<_>>>()?;
    ranges.sort_unstable_by_key(LineRange::start);

    let count = distinct_lines(&ranges);
    if count > MAX_EXPANDED_LINES {
        return Err(CodeBlockError::RangeTooLarge {
            count,
            limit: MAX_EXPANDED_LINES,
        });
    }

    let mut lines: Vec<usize> = Vec::with_capacity(count);
    for range in &ranges {
        lines.extend(range.iter());
    }
    lines.sort_unstable();
    lines.dedup();

    Ok(lines)
}

/// Size of the union of `ranges`, which must be sorted by start.
fn distinct_lines(ranges: &[LineRange]) -> usize {
    let mut count = 0usize;
    let mut covered_to = 0usize;
    for range in ranges {
        if range.end() <= covered_to {
            continue;
        }
        let from = range.start().max(covered_to + 1);
        count = count.saturating_add(range.end() - from + 1);
        covered_to = range.end();
    }
    count
}

/// The resolved, ascending set of 1-based line numbers to emphasize.
///
/// Out-of-range numbers are kept; they simply never match a rendered line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSet(Vec<usize>);

impl HighlightSet {
    /// Creates an empty highlight set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands a range specification into a highlight set.
    pub fn parse(spec: &str) -> CodeBlockResult<Self> {
        expand_ranges(spec).map(Self)
    }

    /// Resolves the highlight set for parsed fence metadata.
    ///
    /// Each selector is expanded on its own. An invalid selector never fails
    /// the render: it is logged and skipped, and the valid ones still apply.
    pub fn from_metadata(meta: &FenceMetadata) -> Self {
        let Some(selectors) = meta.highlight.as_ref() else {
            return Self::new();
        };

        let valid: Vec<&str> = selectors
            .keys()
            .filter(|selector| match expand_ranges(selector) {
                Ok(_) => true,
                Err(err) => {
                    tracing::warn!(
                        selector = %selector,
                        error = %err,
                        "Ignoring invalid highlight selector"
                    );
                    false
                }
            })
            .collect();

        let joined = valid.join(",");
        Self::parse(&joined).unwrap_or_else(|err| {
            tracing::warn!(
                selectors = %joined,
                error = %err,
                "Ignoring invalid highlight selector"
            );
            Self::new()
        })
    }

    /// Checks if a 1-based line number is highlighted.
    pub fn contains(&self, line: usize) -> bool {
        self.0.binary_search(&line).is_ok()
    }

    /// The highlighted line numbers, ascending.
    pub fn lines(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
