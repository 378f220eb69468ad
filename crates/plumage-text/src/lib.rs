//! Attributed rich-text document model for the Plumage pipeline.
//!
//! # Design
//!
//! A [`RichText`] is an ordered sequence of [`Run`]s, semantically a flat
//! sequence of characters each tagged with the [`AttributeSet`] active when
//! it was appended. Attribute boundaries follow tag boundaries exactly: no
//! merging of adjacent equal-attribute runs is performed, and callers
//! compare documents using the coalesced string plus per-offset attribute
//! lookups.
//!
//! Attribute keys are independent and coexist; combining the sets of nested
//! elements is a union ([`AttributeSet::merge`]), which is how bold inside
//! italic keeps both flags.

use serde::Serialize;

/// Style and metadata attributes for one character run.
///
/// Flag fields are independent: bold and italic both set means both render.
/// Optional fields are present-or-absent markers (link target, image source,
/// mention/hashtag tags, indentation).
///
/// Immutable value type; build composite sets with [`AttributeSet::merge`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[allow(clippy::struct_excessive_bools)] // flags are independent by design
pub struct AttributeSet {
    /// Bold font emphasis (`<strong>`, mentions).
    pub bold: bool,
    /// Italic font emphasis (`<em>`, hashtags, image markers).
    pub italic: bool,
    /// Monospace rendering (`<code>`).
    pub monospace: bool,
    /// Superscript rendering (`<sup>`, footnote indices).
    pub superscript: bool,
    /// Strikethrough rendering (`<strike>`).
    pub strikethrough: bool,
    /// Font family name, when a run pins one (body or monospace family).
    pub font_family: Option<String>,
    /// Font size in points, when a run pins one.
    pub font_size: Option<f64>,
    /// Baseline raise in points (superscript rendering without a native
    /// superscript attribute).
    pub baseline_offset: Option<f64>,
    /// Link target for anchor runs.
    pub link: Option<String>,
    /// Absolute URL of an embedded image this run stands in for.
    pub image_source: Option<String>,
    /// Account id a mention run refers to.
    pub mention_account_id: Option<i64>,
    /// Hashtag text a hashtag run refers to.
    pub hashtag: Option<String>,
    /// 1-based list nesting level for list content runs.
    pub list_indent: Option<usize>,
    /// Head indentation in points (block quotes).
    pub head_indent: Option<f64>,
}

impl AttributeSet {
    /// Combine two attribute sets: the union of their keys.
    ///
    /// Flags OR together; optional fields are last-write-wins, so a key set
    /// in `overlay` replaces the same key in `self` while keys absent from
    /// `overlay` survive from `self`. Pure; no error conditions.
    #[must_use]
    pub fn merge(&self, overlay: &Self) -> Self {
        Self {
            bold: self.bold || overlay.bold,
            italic: self.italic || overlay.italic,
            monospace: self.monospace || overlay.monospace,
            superscript: self.superscript || overlay.superscript,
            strikethrough: self.strikethrough || overlay.strikethrough,
            font_family: overlay.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: overlay.font_size.or(self.font_size),
            baseline_offset: overlay.baseline_offset.or(self.baseline_offset),
            link: overlay.link.clone().or_else(|| self.link.clone()),
            image_source: overlay
                .image_source
                .clone()
                .or_else(|| self.image_source.clone()),
            mention_account_id: overlay.mention_account_id.or(self.mention_account_id),
            hashtag: overlay.hashtag.clone().or_else(|| self.hashtag.clone()),
            list_indent: overlay.list_indent.or(self.list_indent),
            head_indent: overlay.head_indent.or(self.head_indent),
        }
    }
}

/// One contiguous stretch of characters sharing an attribute set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    /// The characters of this run.
    pub text: String,
    /// The attributes active for every character of this run.
    pub attributes: AttributeSet,
}

/// An immutable attributed document: ordered character runs.
///
/// Created empty at parse start via [`RichTextBuilder`], appended to
/// incrementally, and returned complete at parse end. No mutation after
/// return.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RichText {
    runs: Vec<Run>,
}

impl RichText {
    /// The runs of this document, in order.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The coalesced plain text of the whole document.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.runs.iter().map(|r| r.text.len()).sum());
        for run in &self.runs {
            out.push_str(&run.text);
        }
        out
    }

    /// Total number of characters across all runs.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.runs.iter().map(|r| r.text.chars().count()).sum()
    }

    /// Whether the document contains no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }

    /// The attribute set active at a character offset into the coalesced
    /// text, or `None` past the end.
    ///
    /// Offsets count characters, matching [`RichText::char_len`], so callers
    /// can index positions found in [`RichText::text`].
    #[must_use]
    pub fn attributes_at(&self, char_offset: usize) -> Option<&AttributeSet> {
        let mut remaining = char_offset;
        for run in &self.runs {
            let len = run.text.chars().count();
            if remaining < len {
                return Some(&run.attributes);
            }
            remaining -= len;
        }
        None
    }
}

/// Growable assembler for [`RichText`].
///
/// `append` is O(1) amortized; `finish` is callable exactly once per parse
/// (it consumes the builder).
#[derive(Debug, Default)]
pub struct RichTextBuilder {
    runs: Vec<Run>,
}

impl RichTextBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a character run with the given attribute set.
    ///
    /// Empty text is ignored; attribute boundaries follow tag boundaries, so
    /// no adjacent-run merging is attempted.
    pub fn append(&mut self, text: &str, attributes: AttributeSet) {
        if text.is_empty() {
            return;
        }
        self.runs.push(Run {
            text: text.to_string(),
            attributes,
        });
    }

    /// Whether nothing has been appended yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Finish assembly and return the immutable document.
    #[must_use]
    pub fn finish(self) -> RichText {
        RichText { runs: self.runs }
    }
}
