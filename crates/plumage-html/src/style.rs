//! The style table: attribute sets for each element kind.
//!
//! # Design
//!
//! Every function here is pure: element kind (plus the relevant attribute
//! values) in, [`AttributeSet`] out. The base font configuration is an
//! explicit [`TextStyle`] input threaded through by the transducer instead
//! of an ambient platform lookup, so the table is deterministic and
//! testable.
//!
//! Each function returns only the element's *own* attributes; the
//! transducer unions them with the enclosing frame's attributes at push
//! time, which is how `<strong><em>` content carries both flags.

use plumage_common::url::anchor_target;
use plumage_text::AttributeSet;

/// Superscript baseline raise as a fraction of the base font size.
///
/// Used when no native superscript attribute exists in the output model:
/// the run is raised by `size / 3` and set at `size / 2`.
pub const SUPERSCRIPT_RAISE_RATIO: f64 = 1.0 / 3.0;

/// Superscript font size as a fraction of the base font size.
pub const SUPERSCRIPT_SIZE_RATIO: f64 = 0.5;

/// Block quote head indent as a multiple of the base font size.
///
/// The dialect leaves the magnitude unspecified; two em-widths reads as a
/// conventional quote inset. See DESIGN.md for the decision record.
pub const BLOCKQUOTE_INDENT_RATIO: f64 = 2.0;

/// Base text configuration for a conversion.
///
/// Replaces ambient "preferred font for the current platform" state with an
/// explicit input. One value per conversion; cheap to clone.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Base body font family.
    pub family: String,
    /// Base body font size in points.
    pub size: f64,
    /// Monospace family for `<code>` runs. Always available: when the
    /// caller cannot derive one from the base font it leaves the fixed
    /// default in place rather than failing.
    pub monospace_family: String,
    /// Placeholder used in image markers when an `alt` text is absent.
    pub image_placeholder: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 16.0,
            monospace_family: "monospace".to_string(),
            image_placeholder: "image".to_string(),
        }
    }
}

impl TextStyle {
    /// Format the textual stand-in for an embedded image.
    ///
    /// Localized-template analog of `"[Image: %@]"`; an absent or empty alt
    /// text falls back to [`TextStyle::image_placeholder`].
    #[must_use]
    pub fn image_label(&self, alt: Option<&str>) -> String {
        let alt = match alt {
            Some(text) if !text.is_empty() => text,
            _ => &self.image_placeholder,
        };
        format!("[Image: {alt}]")
    }
}

/// Attributes for paragraph-level content (`body`, `p`, `pre`, and unknown
/// containers): the base body font only.
#[must_use]
pub fn paragraph(style: &TextStyle) -> AttributeSet {
    AttributeSet {
        font_family: Some(style.family.clone()),
        font_size: Some(style.size),
        ..AttributeSet::default()
    }
}

/// Attributes for `<em>`: the italic flag.
#[must_use]
pub fn emphasis() -> AttributeSet {
    AttributeSet {
        italic: true,
        ..AttributeSet::default()
    }
}

/// Attributes for `<strong>`: the bold flag.
#[must_use]
pub fn strong() -> AttributeSet {
    AttributeSet {
        bold: true,
        ..AttributeSet::default()
    }
}

/// Attributes for `<code>`: the monospace flag plus the monospace family.
///
/// Never fails: the family comes from [`TextStyle::monospace_family`],
/// which defaults to a fixed generic family.
#[must_use]
pub fn code(style: &TextStyle) -> AttributeSet {
    AttributeSet {
        monospace: true,
        font_family: Some(style.monospace_family.clone()),
        ..AttributeSet::default()
    }
}

/// Attributes for `<sup>`: superscript flag with a proportional baseline
/// raise and a reduced size.
#[must_use]
pub fn superscript(style: &TextStyle) -> AttributeSet {
    AttributeSet {
        superscript: true,
        baseline_offset: Some(style.size * SUPERSCRIPT_RAISE_RATIO),
        font_size: Some(style.size * SUPERSCRIPT_SIZE_RATIO),
        ..AttributeSet::default()
    }
}

/// Attributes for `<strike>`: the strikethrough flag.
#[must_use]
pub fn strikethrough() -> AttributeSet {
    AttributeSet {
        strikethrough: true,
        ..AttributeSet::default()
    }
}

/// Attributes for `<a>`: base font plus the link target.
///
/// An absent `href` maps to `about:blank`. A `title` attribute is accepted
/// by the dialect but not rendered, so it contributes nothing here.
#[must_use]
pub fn anchor(style: &TextStyle, href: Option<&str>) -> AttributeSet {
    AttributeSet {
        link: Some(anchor_target(href)),
        ..paragraph(style)
    }
}

/// Attributes for `<span class="account">`: bold plus the mention tag.
///
/// The transducer passes `None` (and records a diagnostic) when
/// `data-account-id` is missing or not a decimal integer; the run then
/// renders bold without the tag.
#[must_use]
pub fn mention(account_id: Option<i64>) -> AttributeSet {
    AttributeSet {
        bold: true,
        mention_account_id: account_id,
        ..AttributeSet::default()
    }
}

/// Attributes for `<span class="hash">`: italic plus the hashtag tag.
#[must_use]
pub fn hashtag(tag: Option<&str>) -> AttributeSet {
    AttributeSet {
        italic: true,
        hashtag: tag.map(str::to_string),
        ..AttributeSet::default()
    }
}

/// Attributes for list content at a 1-based indent level: base font plus
/// the indent. Identical for ordered and unordered lists.
#[must_use]
pub fn list_paragraph(style: &TextStyle, level: usize) -> AttributeSet {
    AttributeSet {
        list_indent: Some(level),
        ..paragraph(style)
    }
}

/// Attributes for `<blockquote>`: base font plus a positive head indent.
#[must_use]
pub fn block_quote(style: &TextStyle) -> AttributeSet {
    AttributeSet {
        head_indent: Some(style.size * BLOCKQUOTE_INDENT_RATIO),
        ..paragraph(style)
    }
}

/// Attributes overlaid on a footnote list-item index: superscript sizing
/// without any trailing punctuation in the label itself.
#[must_use]
pub fn footnote_index(style: &TextStyle) -> AttributeSet {
    superscript(style)
}

/// Attributes for an image marker run: italic, plus the resolved source
/// when resolution succeeded.
#[must_use]
pub fn image_marker(source: Option<String>) -> AttributeSet {
    AttributeSet {
        italic: true,
        image_source: source,
        ..AttributeSet::default()
    }
}
