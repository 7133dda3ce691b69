//! # lupyd-markdown-engine
//!
//! Turns a flat string written in the lupyd markup dialect into an ordered
//! list of typed text spans.
//!
//! ## Modules
//!
//! - **`element_type`**: `ElementType` bit flags (Bold, Italic, HashTag, ...)
//! - **`catalog`**: `PatternCatalog` of `PatternRule`s and the matchers behind them
//! - **`parsing`**: `MarkupParser`, `Span`, `Document` and escape resolution
//! - **`render`**: presentation sink folding each span's flags into a node
//!
//! ```text
//! "Hello ***world***, @alice"
//!   -> [{"Hello ", Normal}, {"world", Bold}, {", ", Normal}, {"alice", Mention}]
//! ```

pub mod catalog;
pub mod element_type;
pub mod error;
pub mod parsing;
pub mod render;

pub use catalog::{PatternCatalog, PatternRule, RuleKind, Strip};
pub use element_type::ElementType;
pub use error::{CatalogError, ParseError};
pub use parsing::{Document, MarkupParser, ParseOptions, Span, parse, parse_text};
pub use render::{Fragment, HtmlPresenter, HyperLink, LinkKind, Presenter, render, render_html};
