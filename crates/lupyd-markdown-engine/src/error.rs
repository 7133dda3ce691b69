use std::ops::Range;

use crate::catalog::RuleKind;

/// Contract violations raised by a pattern rule during a parse call.
///
/// Malformed markup is never an error; it degrades to plain text. These only
/// occur when a rule's matcher or stripping function breaks its contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("rule {rule} matched {len} bytes but stripping needs at least {required}")]
    DelimiterUnderflow {
        rule: RuleKind,
        len: usize,
        required: usize,
    },
    #[error("rule {rule} stripped {strip} bytes from {raw:?}, which splits a character")]
    NotCharBoundary {
        rule: RuleKind,
        raw: String,
        strip: usize,
    },
    #[error("rule {rule} produced match {range:?} outside the {len} byte input")]
    InvalidMatchRange {
        rule: RuleKind,
        range: Range<usize>,
        len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown rule name: {0}")]
    UnknownRule(String),
}
