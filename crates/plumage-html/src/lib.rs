//! Status-HTML to rich-text transducer for the Plumage pipeline.
//!
//! # Scope
//!
//! This crate implements:
//! - **Element vocabulary** - the constrained set of tags the posting
//!   backend emits (`p`, `pre`, `hr`, `em`, `strong`, `code`, `sup`,
//!   `strike`, `a`, `span`, `br`, `ol`, `ul`, `li`, `img`, `blockquote`)
//! - **Style table** - pure attribute-set computation per element kind,
//!   parameterized by an explicit base [`TextStyle`]
//! - **List tracking** - nested ordered/unordered lists with sequential
//!   item numbers and footnote items
//! - **Markup transducer** - the push-driven state machine fed by the
//!   [`quick_xml`] streaming tokenizer
//!
//! # Not Implemented
//!
//! - General HTML parsing (unknown elements degrade to paragraph
//!   containers, never a crash)
//! - Rendering of the resulting runs (labels, layout, image fetching)
//! - Adjacent same-attribute run coalescing (attribute boundaries follow
//!   tag boundaries exactly)

/// Conversion entry points and the tokenizer driver.
pub mod convert;
/// The constrained element vocabulary.
pub mod element;
/// Nested list tracking.
pub mod list;
/// Attribute-set computation per element kind.
pub mod style;

pub use convert::{
    AttributeMap, ConvertError, ConvertIssue, IssueKind, MAX_NESTING_DEPTH,
    attributed_text_from_html, convert_with_issues, list_attributes, paragraph_attributes,
};
pub use element::ElementKind;
pub use style::TextStyle;
