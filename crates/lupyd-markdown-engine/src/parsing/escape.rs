use std::borrow::Cow;

use crate::catalog::delimiters::{ESCAPABLE, ESCAPE};

/// Removes the backslash in front of every escaped delimiter character.
///
/// One backslash is consumed per escaped character, so `\\` becomes `\` and
/// `\\*` becomes `\*`. A backslash before any other character is kept.
pub fn resolve_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains(ESCAPE) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ESCAPE
            && let Some(&next) = chars.peek()
            && ESCAPABLE.contains(&next)
        {
            out.push(next);
            chars.next();
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}
