use std::{fmt, ops::Range};

use serde::{Deserialize, Serialize};

use crate::ElementType;

/// One parsed, typed fragment of text.
///
/// `text` has its delimiters stripped and escapes resolved. `source` is the
/// byte range of the parsed input the text came from; it is not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    text: String,
    element_type: ElementType,
    #[serde(skip)]
    source: Range<usize>,
}

impl Span {
    pub fn new(text: impl Into<String>, element_type: ElementType, source: Range<usize>) -> Self {
        Self {
            text: text.into(),
            element_type,
            source,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Byte range of the input this span was produced from.
    pub fn source(&self) -> Range<usize> {
        self.source.clone()
    }

    pub fn has_type(&self, flag: ElementType) -> bool {
        self.element_type.contains(flag)
    }

    /// `(text, type)` view, convenient for comparisons.
    pub fn as_pair(&self) -> (&str, ElementType) {
        (&self.text, self.element_type)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ text: {:?}, type: {} }}", self.text, self.element_type)
    }
}

/// Ordered spans of one parse, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    spans: Vec<Span>,
}

impl Document {
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<Span> {
        self.spans
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans.iter()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// All span texts joined, delimiters already removed.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }

    /// `(text, type)` pairs of every span.
    pub fn pairs(&self) -> Vec<(&str, ElementType)> {
        self.spans.iter().map(Span::as_pair).collect()
    }
}

impl IntoIterator for Document {
    type Item = Span;
    type IntoIter = std::vec::IntoIter<Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            writeln!(f, "{span}")?;
        }
        Ok(())
    }
}
