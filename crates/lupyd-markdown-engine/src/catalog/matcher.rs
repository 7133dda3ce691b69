//! # Matchers
//!
//! A matcher answers one question: given a text, which byte ranges match?
//! Every call starts from scratch; no search position survives between calls.
//!
//! - **`FenceMatcher`**: `***...***` style, closing delimiter required
//! - **`WordMatcher`**: `*word*` style, confined to one whitespace-free run
//! - **`RegexMatcher`**: standalone tokens such as `#tag` or `[label](url)`
//!
//! All three reject a candidate whose first character is escaped by a
//! backslash.

use std::ops::Range;

use regex::Regex;

use super::delimiters::ESCAPE;

/// Produces the ascending, non-overlapping match ranges of one pattern.
pub trait Matcher: Send + Sync {
    fn find_all(&self, text: &str) -> Vec<Range<usize>>;
}

impl<F> Matcher for F
where
    F: Fn(&str) -> Vec<Range<usize>> + Send + Sync,
{
    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        self(text)
    }
}

/// Returns true when the byte at `idx` is preceded by an odd run of escapes.
pub fn is_escaped(text: &str, idx: usize) -> bool {
    let escapes = text.as_bytes()[..idx]
        .iter()
        .rev()
        .take_while(|&&b| b == ESCAPE as u8)
        .count();
    escapes % 2 == 1
}

fn char_len_at(text: &str, idx: usize) -> usize {
    text[idx..].chars().next().map_or(1, char::len_utf8)
}

/// Finds the first unescaped occurrence of `needle` at or after `from`.
fn find_unescaped(text: &str, needle: &str, mut from: usize) -> Option<usize> {
    while from < text.len() {
        let idx = from + text[from..].find(needle)?;
        if !is_escaped(text, idx) {
            return Some(idx);
        }
        from = idx + char_len_at(text, idx);
    }
    None
}

/// Delimited span closed by the same delimiter, e.g. `***bold***`.
///
/// The interior is lazy: the first unescaped closing delimiter wins, and the
/// interior may cross line breaks.
#[derive(Debug, Clone)]
pub struct FenceMatcher {
    delimiter: &'static str,
}

impl FenceMatcher {
    pub fn new(delimiter: &'static str) -> Self {
        Self { delimiter }
    }
}

impl Matcher for FenceMatcher {
    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let delimiter = self.delimiter;
        let mut matches = Vec::new();
        let mut pos = 0;

        while let Some(open) = find_unescaped(text, delimiter, pos) {
            let interior = open + delimiter.len();
            // Later openings only see a suffix of this search space, so an
            // unclosed opening ends the scan.
            let Some(close) = find_unescaped(text, delimiter, interior) else {
                break;
            };
            let end = close + delimiter.len();
            matches.push(open..end);
            pos = end;
        }

        matches
    }
}

/// Word-scoped variant, e.g. `*word*`.
///
/// Opens on a delimiter followed by a non-whitespace character and closes on
/// the last unescaped delimiter of that whitespace-free run. The interior
/// must hold something besides the delimiter itself, so a stray `***` is
/// plain text rather than a bold `*`.
///
/// Each run is scanned once: when an opening finds no close, no later
/// opening in the same run can, so the search resumes after the run.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    delimiter: &'static str,
}

impl WordMatcher {
    pub fn new(delimiter: &'static str) -> Self {
        Self { delimiter }
    }

    /// Close for an opening whose interior starts at `interior`.
    fn close(&self, text: &str, interior: usize, run_end: usize) -> Option<usize> {
        let delimiter = self.delimiter;
        let mut content = interior;
        while text[content..run_end].starts_with(delimiter) {
            content += delimiter.len();
        }
        if content >= run_end {
            return None;
        }
        text[content..run_end]
            .rmatch_indices(delimiter)
            .map(|(i, _)| content + i)
            .find(|&idx| !is_escaped(text, idx))
    }
}

impl Matcher for WordMatcher {
    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let delimiter = self.delimiter;
        let mut matches = Vec::new();
        let mut pos = 0;

        while let Some(open) = find_unescaped(text, delimiter, pos) {
            let interior = open + delimiter.len();
            let run_end = text[interior..]
                .find(char::is_whitespace)
                .map_or(text.len(), |i| interior + i);

            match self.close(text, interior, run_end) {
                Some(close) => {
                    let end = close + delimiter.len();
                    matches.push(open..end);
                    pos = end;
                }
                None => pos = run_end,
            }
        }

        matches
    }
}

/// Standalone token described by a regular expression.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl Matcher for RegexMatcher {
    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos <= text.len() {
            let Some(m) = self.regex.find_at(text, pos) else {
                break;
            };
            if m.is_empty() || is_escaped(text, m.start()) {
                pos = m.start() + char_len_at(text, m.start());
                continue;
            }
            matches.push(m.range());
            pos = m.end();
        }

        matches
    }
}
