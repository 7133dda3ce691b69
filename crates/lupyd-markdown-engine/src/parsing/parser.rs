use std::ops::Range;

use crate::{
    ElementType, ParseError,
    catalog::{PatternCatalog, PatternRule},
};

use super::{
    escape::resolve_escapes,
    span::{Document, Span},
};

/// Nesting depth at which a branch stops being decomposed.
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest recursion (gap or interior) before a branch is emitted raw.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// A candidate match: the rule that produced it and its range in the text.
struct Candidate<'c> {
    range: Range<usize>,
    rule: &'c PatternRule,
}

/// Recursive span parser over a borrowed catalog.
///
/// Holds no state between calls; one parser may be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct MarkupParser<'c> {
    catalog: &'c PatternCatalog,
    options: ParseOptions,
}

impl<'c> MarkupParser<'c> {
    pub fn new(catalog: &'c PatternCatalog) -> Self {
        Self {
            catalog,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parses `text` into spans, starting from the `ambient` type.
    ///
    /// # Algorithm
    /// 1. Every rule's matcher runs over the whole text.
    /// 2. Candidates are ordered by start offset; ties keep catalog order.
    /// 3. Left to right, a candidate starting before the cursor is dropped.
    ///    Text between the cursor and an accepted candidate is parsed again
    ///    under `ambient`; the candidate's stripped interior is either parsed
    ///    again under its new type or emitted as one leaf span.
    /// 4. Whatever follows the last candidate is emitted with escapes resolved.
    ///
    /// # Errors
    /// Only when a rule breaks its contract (see [`ParseError`]). Unclosed or
    /// malformed markup is plain text.
    pub fn parse(&self, text: &str, ambient: ElementType) -> Result<Document, ParseError> {
        let mut spans = Vec::new();
        self.parse_into(text, text, 0, ambient, 0, &mut spans)?;
        log::debug!(
            "parsed {} bytes into {} spans with {} rules",
            text.len(),
            spans.len(),
            self.catalog.len()
        );
        Ok(Document::new(spans))
    }

    /// `text` is `root[base..base + text.len()]`.
    fn parse_into(
        &self,
        root: &str,
        text: &str,
        base: usize,
        ambient: ElementType,
        depth: usize,
        out: &mut Vec<Span>,
    ) -> Result<(), ParseError> {
        if self.catalog.is_empty() {
            out.push(Span::new(text, ambient, base..base + text.len()));
            return Ok(());
        }
        if text.is_empty() {
            return Ok(());
        }
        if depth > self.options.max_depth {
            log::warn!(
                "nesting deeper than {} at byte {base}, keeping {} bytes as raw text",
                self.options.max_depth,
                text.len()
            );
            out.push(Span::new(text, ambient, base..base + text.len()));
            return Ok(());
        }

        let mut current = 0;
        for Candidate { range, rule } in self.candidates(root, text, base)? {
            if range.start < current {
                continue;
            }
            if current < range.start {
                let gap = &text[current..range.start];
                self.parse_into(root, gap, base + current, ambient, depth + 1, out)?;
            }

            let raw = &text[range.clone()];
            let interior = rule.interior(raw)?;
            if !interior.is_empty() {
                let inner = &raw[interior.clone()];
                let inner_base = base + range.start + interior.start;
                let element_type = rule.resulting_type(ambient);
                if rule.recurse_into_match() {
                    self.parse_into(root, inner, inner_base, element_type, depth + 1, out)?;
                } else {
                    let source = inner_base..inner_base + inner.len();
                    out.push(Span::new(inner, element_type, source));
                }
            }

            current = range.end;
        }

        if current < text.len() {
            let rest = resolve_escapes(&text[current..]);
            out.push(Span::new(rest, ambient, base + current..base + text.len()));
        }
        Ok(())
    }

    /// Runs every rule over `text` and orders the results by start offset.
    ///
    /// Rules anchored to a line start only keep matches that begin at the
    /// start of `root` or right after one of its newlines.
    fn candidates(
        &self,
        root: &str,
        text: &str,
        base: usize,
    ) -> Result<Vec<Candidate<'c>>, ParseError> {
        let mut candidates = Vec::new();
        for rule in self.catalog.rules() {
            for range in rule.find_all(text) {
                let valid = range.start <= range.end
                    && range.end <= text.len()
                    && text.is_char_boundary(range.start)
                    && text.is_char_boundary(range.end);
                if !valid {
                    return Err(ParseError::InvalidMatchRange {
                        rule: rule.kind(),
                        range,
                        len: text.len(),
                    });
                }
                if rule.starts_line() && !at_line_start(root, base + range.start) {
                    continue;
                }
                candidates.push(Candidate { range, rule });
            }
        }
        // Stable sort keeps declaration order for equal starts.
        candidates.sort_by_key(|c| c.range.start);
        Ok(candidates)
    }
}

fn at_line_start(root: &str, offset: usize) -> bool {
    offset == 0 || root.as_bytes().get(offset - 1) == Some(&b'\n')
}

/// Parses `text` against `catalog` with default options.
pub fn parse(
    text: &str,
    ambient: ElementType,
    catalog: &PatternCatalog,
) -> Result<Document, ParseError> {
    MarkupParser::new(catalog).parse(text, ambient)
}

/// Parses `text` with the standard catalog, starting from plain text.
pub fn parse_text(text: &str) -> Result<Document, ParseError> {
    parse(text, ElementType::NORMAL, PatternCatalog::standard())
}
