use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

bitflags::bitflags! {
    /// Style categories carried by a parsed span.
    ///
    /// Flags combine freely: a bold word inside a header is `BOLD | HEADER`.
    /// The values are part of the wire format and must not change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ElementType: u32 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const HEADER = 1 << 2;
        const UNDERLINE = 1 << 3;
        const CODE = 1 << 4;
        const QUOTE = 1 << 5;
        const SPOILER = 1 << 6;
        const HYPERLINK = 1 << 7;
        const MENTION = 1 << 8;
        const HASHTAG = 1 << 9;
        const IMAGE_LINK = 1 << 10;
        const VIDEO_LINK = 1 << 11;
        const SVG = 1 << 12;
    }
}

const NAMES: &[(ElementType, &str)] = &[
    (ElementType::BOLD, "Bold"),
    (ElementType::ITALIC, "Italic"),
    (ElementType::HEADER, "Header"),
    (ElementType::UNDERLINE, "UnderLine"),
    (ElementType::CODE, "Code"),
    (ElementType::QUOTE, "Quote"),
    (ElementType::SPOILER, "Spoiler"),
    (ElementType::HYPERLINK, "HyperLink"),
    (ElementType::MENTION, "Mention"),
    (ElementType::HASHTAG, "HashTag"),
    (ElementType::IMAGE_LINK, "ImageLink"),
    (ElementType::VIDEO_LINK, "VideoLink"),
    (ElementType::SVG, "Svg"),
];

impl ElementType {
    /// Plain text with no active style.
    pub const NORMAL: Self = Self::empty();

    /// Display name of a single flag, `None` for combinations.
    pub fn name(self) -> Option<&'static str> {
        if self.is_normal() {
            return Some("Normal");
        }
        NAMES
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, name)| *name)
    }

    pub fn is_normal(self) -> bool {
        self.is_empty()
    }
}

impl Default for ElementType {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_normal() {
            return f.write_str("Normal");
        }
        for (i, flag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(flag.name().unwrap_or("Unknown"))?;
        }
        Ok(())
    }
}

impl Serialize for ElementType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for ElementType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Self::from_bits(bits)
            .ok_or_else(|| de::Error::custom(format!("unknown element type bits: {bits}")))
    }
}
