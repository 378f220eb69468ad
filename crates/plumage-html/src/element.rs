//! The constrained element vocabulary of status HTML.
//!
//! [Mastodon API: Status `content`](https://docs.joinmastodon.org/entities/Status/#content)
//!
//! The posting backend sanitizes status content down to a fixed, small set
//! of elements. Anything outside this set is not an error: the transducer
//! treats it as a paragraph-level container and records a diagnostic.

use std::str::FromStr;

use strum_macros::{Display, EnumString};

/// An element name recognized by the transducer.
///
/// The `span` variants are distinguished by their `class` attribute at the
/// call site (`account` for mentions, `hash` for hashtags), not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    /// The synthetic document envelope added around the fragment.
    Body,
    /// Paragraph container.
    P,
    /// Preformatted container. Treated as a paragraph; whitespace arrives
    /// preserved from the tokenizer.
    Pre,
    /// Thematic break; renders as a paragraph separator.
    Hr,
    /// Italic emphasis.
    Em,
    /// Bold emphasis.
    Strong,
    /// Monospace span.
    Code,
    /// Superscript span.
    Sup,
    /// Strikethrough span.
    Strike,
    /// Anchor with an optional `href` target.
    A,
    /// Mention/hashtag wrapper, branched on its `class` attribute.
    Span,
    /// Line break; renders as U+2028 LINE SEPARATOR.
    Br,
    /// Ordered list.
    Ol,
    /// Unordered list.
    Ul,
    /// List item.
    Li,
    /// Embedded image; renders as a localized text marker.
    Img,
    /// Quoted block; renders with a positive head indent.
    Blockquote,
}

impl ElementKind {
    /// Parse a tag name, case-insensitively. Unknown names yield `None` and
    /// are handled by the caller as paragraph-level containers.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_str(&name.to_ascii_lowercase()).ok()
    }

    /// Whether a start tag of this kind pushes an element frame.
    ///
    /// `br`, `hr`, `li`, and `img` contribute output directly and never
    /// push, so their end tags (if any) pop nothing. This keeps the frame
    /// stack depth equal to the nesting depth of attribute-bearing tags.
    #[must_use]
    pub const fn pushes_frame(self) -> bool {
        !matches!(self, Self::Br | Self::Hr | Self::Li | Self::Img)
    }

    /// Whether this kind opens a list scope (`ol`/`ul`).
    #[must_use]
    pub const fn is_list(self) -> bool {
        matches!(self, Self::Ol | Self::Ul)
    }

    /// Whether a start tag of this kind separates paragraphs when output
    /// already exists.
    ///
    /// Only `p` and `pre`: a `blockquote` is a pure container whose inner
    /// paragraphs handle separation, so giving it a separator of its own
    /// would double the blank line.
    #[must_use]
    pub const fn separates_paragraphs(self) -> bool {
        matches!(self, Self::P | Self::Pre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(ElementKind::parse("EM"), Some(ElementKind::Em));
        assert_eq!(ElementKind::parse("blockquote"), Some(ElementKind::Blockquote));
        assert_eq!(ElementKind::parse("table"), None);
    }

    #[test]
    fn frameless_elements() {
        assert!(!ElementKind::Br.pushes_frame());
        assert!(!ElementKind::Hr.pushes_frame());
        assert!(!ElementKind::Li.pushes_frame());
        assert!(!ElementKind::Img.pushes_frame());
        assert!(ElementKind::P.pushes_frame());
        assert!(ElementKind::Ol.pushes_frame());
    }

    #[test]
    fn display_matches_tag_name() {
        assert_eq!(ElementKind::Blockquote.to_string(), "blockquote");
        assert_eq!(ElementKind::Ol.to_string(), "ol");
    }
}
