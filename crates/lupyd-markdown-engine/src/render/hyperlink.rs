use std::fmt;

/// What a `[label](url)` link points at, decided by its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Label `image`: the url is embedded as an image.
    Image,
    /// Label `video`: the url is embedded as a playable video.
    Video,
    Link,
}

/// A hyperlink span taken apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperLink<'a> {
    pub label: &'a str,
    pub url: &'a str,
    pub kind: LinkKind,
}

impl<'a> HyperLink<'a> {
    /// Splits `[label](url)`. Returns `None` unless the whole text has that shape.
    pub fn parse(text: &'a str) -> Option<Self> {
        let inner = text.strip_prefix('[')?.strip_suffix(')')?;
        let (label, url) = inner.split_once("](")?;
        if label.is_empty() || url.is_empty() {
            return None;
        }
        let kind = match label {
            "image" => LinkKind::Image,
            "video" => LinkKind::Video,
            _ => LinkKind::Link,
        };
        Some(Self { label, url, kind })
    }
}

impl fmt::Display for HyperLink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})", self.label, self.url)
    }
}
