//! # Pattern Catalog
//!
//! The ordered set of rules one parse pass runs against its input.
//!
//! ## Rule families
//!
//! - **Delimited**: a closing delimiter is required. Triple fences
//!   (`***`, `///`, `___`, `###`, `` ``` ``, `|||`) and their single-character
//!   word-scoped variants (`*word*`, `/word/`, ...).
//! - **Standalone**: a complete token with no separate close (`#tag`,
//!   `@name`, `>| quote`, `[label](url)`, `<svg>...</svg>`).
//!
//! ## Precedence
//!
//! Declaration order breaks ties between matches that start at the same
//! offset, so triple fences are declared before their word variants and the
//! word header before the hashtag.

pub mod delimiters;
pub mod matcher;

use std::{fmt, ops::Range, str::FromStr, sync::Arc};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ElementType, error::CatalogError, error::ParseError};
use matcher::{FenceMatcher, Matcher, RegexMatcher, WordMatcher};

/// Names every built-in rule; `Custom` covers rules supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Code,
    Bold,
    Italic,
    Underline,
    Header,
    Spoiler,
    Svg,
    HyperLink,
    Quote,
    WordBold,
    WordItalic,
    WordUnderline,
    WordHeader,
    WordSpoiler,
    Mention,
    HashTag,
    Custom(&'static str),
}

impl RuleKind {
    /// Built-in rules in default declaration order.
    pub const BUILT_IN: [RuleKind; 16] = [
        RuleKind::Code,
        RuleKind::Bold,
        RuleKind::Italic,
        RuleKind::Underline,
        RuleKind::Header,
        RuleKind::Spoiler,
        RuleKind::Svg,
        RuleKind::HyperLink,
        RuleKind::Quote,
        RuleKind::WordBold,
        RuleKind::WordItalic,
        RuleKind::WordUnderline,
        RuleKind::WordHeader,
        RuleKind::WordSpoiler,
        RuleKind::Mention,
        RuleKind::HashTag,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Code => "code",
            RuleKind::Bold => "bold",
            RuleKind::Italic => "italic",
            RuleKind::Underline => "underline",
            RuleKind::Header => "header",
            RuleKind::Spoiler => "spoiler",
            RuleKind::Svg => "svg",
            RuleKind::HyperLink => "hyperlink",
            RuleKind::Quote => "quote",
            RuleKind::WordBold => "word-bold",
            RuleKind::WordItalic => "word-italic",
            RuleKind::WordUnderline => "word-underline",
            RuleKind::WordHeader => "word-header",
            RuleKind::WordSpoiler => "word-spoiler",
            RuleKind::Mention => "mention",
            RuleKind::HashTag => "hashtag",
            RuleKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        RuleKind::BUILT_IN
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| CatalogError::UnknownRule(s.to_string()))
    }
}

/// How many delimiter bytes a rule removes from its raw match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strip {
    /// Keep the raw match as-is (quote, hyperlink, svg).
    #[default]
    None,
    /// Remove `n` bytes from each end (`***bold***`, `*word*`).
    Both(usize),
    /// Remove `n` leading bytes (`#tag`, `@name`).
    Leading(usize),
}

impl Strip {
    /// Minimum raw length this strip can be applied to.
    pub fn required_len(self) -> usize {
        match self {
            Strip::None => 0,
            Strip::Both(n) => n * 2,
            Strip::Leading(n) => n,
        }
    }

    /// Interior byte range of `raw`, or `None` when `raw` is too short.
    pub fn interior(self, raw: &str) -> Option<Range<usize>> {
        if raw.len() < self.required_len() {
            return None;
        }
        let range = match self {
            Strip::None => 0..raw.len(),
            Strip::Both(n) => n..raw.len() - n,
            Strip::Leading(n) => n..raw.len(),
        };
        Some(range)
    }
}

/// One pattern definition. Immutable and shared across parse calls.
#[derive(Clone)]
pub struct PatternRule {
    kind: RuleKind,
    matcher: Arc<dyn Matcher>,
    strip: Strip,
    element_type: ElementType,
    recurse_into_match: bool,
    exclusive_type: bool,
    line_start: bool,
}

impl PatternRule {
    /// A terminal, merging rule that keeps its raw match.
    pub fn new(kind: RuleKind, matcher: impl Matcher + 'static, element_type: ElementType) -> Self {
        Self {
            kind,
            matcher: Arc::new(matcher),
            strip: Strip::None,
            element_type,
            recurse_into_match: false,
            exclusive_type: false,
            line_start: false,
        }
    }

    pub fn with_strip(mut self, strip: Strip) -> Self {
        self.strip = strip;
        self
    }

    /// Re-parse the stripped interior against the full catalog.
    pub fn recursive(mut self) -> Self {
        self.recurse_into_match = true;
        self
    }

    /// Replace the ambient type instead of merging with it.
    pub fn exclusive(mut self) -> Self {
        self.exclusive_type = true;
        self
    }

    /// Only accept matches that begin a line of the whole input, not just
    /// the start of a gap or interior.
    pub fn at_line_start(mut self) -> Self {
        self.line_start = true;
        self
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    pub fn strip(&self) -> Strip {
        self.strip
    }

    pub fn recurse_into_match(&self) -> bool {
        self.recurse_into_match
    }

    pub fn exclusive_type(&self) -> bool {
        self.exclusive_type
    }

    pub fn starts_line(&self) -> bool {
        self.line_start
    }

    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        self.matcher.find_all(text)
    }

    /// Type of a span produced by this rule under `ambient`.
    pub fn resulting_type(&self, ambient: ElementType) -> ElementType {
        if self.exclusive_type {
            self.element_type
        } else {
            ambient | self.element_type
        }
    }

    /// Byte range of `raw` left after removing this rule's delimiters.
    pub fn interior(&self, raw: &str) -> Result<Range<usize>, ParseError> {
        let range = self
            .strip
            .interior(raw)
            .ok_or(ParseError::DelimiterUnderflow {
                rule: self.kind,
                len: raw.len(),
                required: self.strip.required_len(),
            })?;
        if !raw.is_char_boundary(range.start) || !raw.is_char_boundary(range.end) {
            return Err(ParseError::NotCharBoundary {
                rule: self.kind,
                raw: raw.to_string(),
                strip: self.strip.required_len(),
            });
        }
        Ok(range)
    }

    pub fn strip_delimiters<'a>(&self, raw: &'a str) -> Result<&'a str, ParseError> {
        let range = self.interior(raw)?;
        Ok(&raw[range])
    }
}

impl fmt::Debug for PatternRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternRule")
            .field("kind", &self.kind)
            .field("element_type", &self.element_type)
            .field("strip", &self.strip)
            .field("recurse_into_match", &self.recurse_into_match)
            .field("exclusive_type", &self.exclusive_type)
            .field("line_start", &self.line_start)
            .finish_non_exhaustive()
    }
}

fn regex(pattern: &str) -> RegexMatcher {
    RegexMatcher::new(Regex::new(pattern).expect("built-in pattern is a valid regex"))
}

fn fence(kind: RuleKind, delimiter: &'static str, element_type: ElementType) -> PatternRule {
    PatternRule::new(kind, FenceMatcher::new(delimiter), element_type)
        .with_strip(Strip::Both(delimiters::FENCE_LEN))
}

fn word(kind: RuleKind, delimiter: &'static str, element_type: ElementType) -> PatternRule {
    PatternRule::new(kind, WordMatcher::new(delimiter), element_type)
        .with_strip(Strip::Both(delimiters::MARKER_LEN))
        .recursive()
}

/// Builds the rule for one built-in kind. `Custom` has no built-in rule.
pub fn built_in_rule(kind: RuleKind) -> Option<PatternRule> {
    use delimiters::*;

    let rule = match kind {
        RuleKind::Code => fence(kind, CODE_FENCE, ElementType::CODE),
        RuleKind::Bold => fence(kind, BOLD_FENCE, ElementType::BOLD).recursive(),
        RuleKind::Italic => fence(kind, ITALIC_FENCE, ElementType::ITALIC).recursive(),
        RuleKind::Underline => fence(kind, UNDERLINE_FENCE, ElementType::UNDERLINE).recursive(),
        RuleKind::Header => fence(kind, HEADER_FENCE, ElementType::HEADER).recursive(),
        RuleKind::Spoiler => fence(kind, SPOILER_FENCE, ElementType::SPOILER)
            .recursive()
            .exclusive(),
        RuleKind::Svg => PatternRule::new(kind, regex(SVG_PATTERN), ElementType::SVG).exclusive(),
        RuleKind::HyperLink => {
            PatternRule::new(kind, regex(HYPERLINK_PATTERN), ElementType::HYPERLINK).exclusive()
        }
        RuleKind::Quote => {
            PatternRule::new(kind, regex(QUOTE_PATTERN), ElementType::QUOTE)
                .exclusive()
                .at_line_start()
        }
        RuleKind::WordBold => word(kind, WORD_BOLD, ElementType::BOLD),
        RuleKind::WordItalic => word(kind, WORD_ITALIC, ElementType::ITALIC),
        RuleKind::WordUnderline => word(kind, WORD_UNDERLINE, ElementType::UNDERLINE),
        RuleKind::WordHeader => word(kind, WORD_HEADER, ElementType::HEADER),
        RuleKind::WordSpoiler => word(kind, WORD_SPOILER, ElementType::SPOILER).exclusive(),
        RuleKind::Mention => PatternRule::new(kind, regex(MENTION_PATTERN), ElementType::MENTION)
            .with_strip(Strip::Leading(MARKER_LEN))
            .exclusive(),
        RuleKind::HashTag => PatternRule::new(kind, regex(HASHTAG_PATTERN), ElementType::HASHTAG)
            .with_strip(Strip::Leading(MARKER_LEN))
            .exclusive(),
        RuleKind::Custom(_) => return None,
    };
    Some(rule)
}

static DEFAULT_CATALOG: Lazy<PatternCatalog> = Lazy::new(|| {
    PatternCatalog::new(
        RuleKind::BUILT_IN
            .into_iter()
            .filter_map(built_in_rule)
            .collect(),
    )
});

/// Ordered rule list. Earlier rules win ties on equal start offsets.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog {
    rules: Vec<PatternRule>,
}

impl PatternCatalog {
    pub fn new(rules: Vec<PatternRule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The shared catalog holding every built-in rule.
    pub fn standard() -> &'static PatternCatalog {
        &DEFAULT_CATALOG
    }

    pub fn push(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    /// A copy of this catalog with the given rule kinds removed.
    pub fn without(&self, kinds: &[RuleKind]) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|rule| !kinds.contains(&rule.kind()))
                .cloned()
                .collect(),
        }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn get(&self, kind: RuleKind) -> Option<&PatternRule> {
        self.rules.iter().find(|rule| rule.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
