//! Delimiter constants for every built-in rule.
//!
//! Matchers and the escape resolver read these; nothing else hardcodes
//! `***` or `@`.

pub const CODE_FENCE: &str = "```";
pub const BOLD_FENCE: &str = "***";
pub const ITALIC_FENCE: &str = "///";
pub const UNDERLINE_FENCE: &str = "___";
pub const HEADER_FENCE: &str = "###";
pub const SPOILER_FENCE: &str = "|||";

pub const WORD_BOLD: &str = "*";
pub const WORD_ITALIC: &str = "/";
pub const WORD_UNDERLINE: &str = "_";
pub const WORD_HEADER: &str = "#";
pub const WORD_SPOILER: &str = "|";

/// Triple fences strip this many bytes from each end.
pub const FENCE_LEN: usize = 3;
/// Word-scoped variants, hashtags and mentions strip a single byte.
pub const MARKER_LEN: usize = 1;

pub const HASHTAG_PATTERN: &str = r"#[0-9A-Za-z_]+";
pub const MENTION_PATTERN: &str = r"@[0-9A-Za-z_]+";
pub const QUOTE_PATTERN: &str = r"(?m)^>\|\s.*$";
pub const HYPERLINK_PATTERN: &str = r"\[([^\]\n]+)\]\(([^)\n]+)\)";
pub const SVG_PATTERN: &str = r"(?s)<svg(?:\s[^>]*)?>.*?</svg>";

/// The escape character. An odd run of these suppresses the next delimiter.
pub const ESCAPE: char = '\\';

/// Characters that lose their preceding backslash during escape resolution.
pub const ESCAPABLE: &[char] = &[
    '*', '/', '_', '#', '`', '|', '>', '<', '[', ']', '(', ')', '@', ESCAPE,
];
