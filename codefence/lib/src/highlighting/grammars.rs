//! Grammar loading.
//!
//! The syntax set is syntect's default grammars plus the extra grammars
//! curated by the bat project (TypeScript, Kotlin, Swift, GraphQL, TOML, ...),
//! shipped by two-face.

use lazy_static::lazy_static;
use syntect::parsing::SyntaxSet;
use two_face::syntax::extra_newlines as extra_syntax_set;

lazy_static! {
    static ref SYNTAX_SET: SyntaxSet = extra_syntax_set();
}

/// Returns the process-wide syntax set.
pub(crate) fn syntax_set() -> &'static SyntaxSet {
    &SYNTAX_SET
}
