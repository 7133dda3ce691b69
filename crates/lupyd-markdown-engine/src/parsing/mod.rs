//! # Parsing
//!
//! Recursive pattern matching over a [`PatternCatalog`](crate::PatternCatalog).
//!
//! ## Modules
//!
//! - **`span`**: `Span` (text + type + source range) and `Document`
//! - **`escape`**: backslash escape resolution for plain text
//! - **`parser`**: `MarkupParser` and the `parse` / `parse_text` entry points
//!
//! ## Overlaps
//!
//! The earliest-starting match wins; on equal starts the earlier-declared
//! rule wins. Later overlapping matches are dropped, never split or merged.

pub mod escape;
pub mod parser;
pub mod span;

#[cfg(test)]
mod tests;

pub use escape::resolve_escapes;
pub use parser::{DEFAULT_MAX_DEPTH, MarkupParser, ParseOptions, parse, parse_text};
pub use span::{Document, Span};
