//! Conversion entry points and the streaming-tokenizer driver.
//!
//! The driver feeds [`quick_xml`] events into the [`transducer`] state
//! machine. Per-element anomalies (unknown tags, stack underflow, bad
//! attribute values) are tolerated and recorded as [`ConvertIssue`]s;
//! only tokenizer-level failures abort the whole parse, in which case the
//! caller's documented fallback is displaying the raw string unstyled.

mod transducer;

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use strum_macros::Display;
use thiserror::Error;

use plumage_text::{AttributeSet, RichText};

use crate::style::{self, TextStyle};
use transducer::Transducer;

/// Map of attribute names to values for one element-start event.
pub type AttributeMap = HashMap<String, String>;

/// Maximum element nesting depth before the transducer stops pushing
/// frames and flattens further attributes into the enclosing frame.
///
/// Status HTML is shallow in practice; the cap exists so adversarial input
/// cannot grow the frame stack without bound.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Hard failures that abort an entire conversion.
///
/// Everything else the converter tolerates locally; see [`ConvertIssue`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The tokenizer rejected the markup outright (truncated structure,
    /// illegal syntax it cannot recover from).
    #[error("markup tokenizer error: {0}")]
    Tokenize(#[from] quick_xml::Error),
    /// The input could not be decoded as UTF-8 text.
    #[error("input not decodable as UTF-8: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
    /// An attribute list was syntactically malformed.
    #[error("attribute syntax error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    /// An attribute value carried an unresolvable escape sequence.
    #[error("attribute escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
}

/// Category of a tolerated conversion anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// An element name outside the dialect's vocabulary.
    UnknownElement,
    /// A `span` whose `class` is neither `account` nor `hash`.
    UnknownSpanClass,
    /// An entity reference that is neither predefined nor numeric.
    UnknownEntity,
    /// An end tag arrived with no open element frame.
    StackUnderflow,
    /// A list end tag or `li` arrived with no open list.
    ListUnderflow,
    /// A list end tag closed a frame of the other list type.
    ListTypeMismatch,
    /// An image `src` that could not be resolved to an absolute URL.
    BadImageSource,
    /// A mention span without a decimal `data-account-id`.
    BadMentionId,
    /// Element nesting exceeded [`MAX_NESTING_DEPTH`].
    DepthOverflow,
    /// Character data or a frameless tag arrived with an empty frame stack.
    MissingFrame,
}

/// One tolerated anomaly, recorded while parsing continues.
#[derive(Debug, Clone)]
pub struct ConvertIssue {
    /// Category of the anomaly.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

/// Convert a status-HTML fragment into attributed rich text.
///
/// The fragment is wrapped in a synthetic `<body>` envelope and bare
/// `<br>`/`<hr>` tags are rewritten to self-closing form before
/// tokenization. The returned document is always "as good as we could
/// make it": per-element anomalies degrade gracefully rather than fail.
///
/// # Errors
///
/// Returns [`ConvertError`] only for tokenizer-level failures; the caller
/// should then fall back to displaying the raw string unstyled.
pub fn attributed_text_from_html(html: &str, style: &TextStyle) -> Result<RichText, ConvertError> {
    convert_with_issues(html, style).map(|(text, _)| text)
}

/// Like [`attributed_text_from_html`], additionally returning the
/// tolerated anomalies recorded during the parse.
///
/// # Errors
///
/// Returns [`ConvertError`] only for tokenizer-level failures.
pub fn convert_with_issues(
    html: &str,
    style: &TextStyle,
) -> Result<(RichText, Vec<ConvertIssue>), ConvertError> {
    let document = normalize_fragment(html);
    let mut reader = Reader::from_str(&document);
    // Mismatched end tags are a per-frame tolerance, not a hard failure.
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_unmatched_ends = true;

    let mut transducer = Transducer::new(style);
    loop {
        match reader.read_event()? {
            Event::Start(event) => {
                let (name, attributes) = decode_start(&reader, &event)?;
                transducer.element_start(&name, &attributes);
            }
            Event::Empty(event) => {
                let (name, attributes) = decode_start(&reader, &event)?;
                transducer.element_start(&name, &attributes);
                transducer.element_end(&name);
            }
            Event::End(event) => {
                let name = reader.decoder().decode(event.name().as_ref())?.into_owned();
                transducer.element_end(&name);
            }
            Event::Text(event) => {
                let text = event.decode()?;
                transducer.character_data(&text);
            }
            Event::CData(event) => {
                let text = reader.decoder().decode(&event)?.into_owned();
                transducer.character_data(&text);
            }
            Event::GeneralRef(event) => {
                let name = event.decode()?;
                transducer.general_reference(&name);
            }
            Event::Eof => break,
            // Comments, processing instructions, and doctypes carry no
            // renderable content.
            _ => {}
        }
    }
    Ok(transducer.finish())
}

/// The default attribute set for paragraph content under a base style.
///
/// Read-only accessor for callers building comparison fixtures.
#[must_use]
pub fn paragraph_attributes(style: &TextStyle) -> AttributeSet {
    style::paragraph(style)
}

/// The default attribute set for list content at a 1-based indent level.
///
/// Read-only accessor for callers building comparison fixtures.
#[must_use]
pub fn list_attributes(style: &TextStyle, level: usize) -> AttributeSet {
    style::list_paragraph(style, level)
}

/// Wrap the fragment in a `<body>` envelope and normalize the void tags
/// the backend emits unclosed (`<br>`, `<hr>`) to XML self-closing form,
/// which the tokenizer requires.
fn normalize_fragment(html: &str) -> String {
    let normalized = html.replace("<br>", "<br />").replace("<hr>", "<hr />");
    let mut document = String::with_capacity(normalized.len() + "<body></body>".len());
    document.push_str("<body>");
    document.push_str(&normalized);
    document.push_str("</body>");
    document
}

/// Decode an element-start event into its tag name and attribute map.
///
/// Attribute values are entity-unescaped; syntactically malformed
/// attribute lists are a hard failure per the tokenizer contract.
fn decode_start(
    reader: &Reader<&[u8]>,
    event: &BytesStart<'_>,
) -> Result<(String, AttributeMap), ConvertError> {
    let decoder = reader.decoder();
    let name = decoder.decode(event.name().as_ref())?.into_owned();
    let mut attributes = AttributeMap::new();
    for attribute in event.attributes() {
        let attribute = attribute?;
        let key = decoder.decode(attribute.key.as_ref())?.into_owned();
        let raw = decoder.decode(&attribute.value)?;
        let value = quick_xml::escape::unescape(&raw)?.into_owned();
        let _ = attributes.insert(key, value);
    }
    Ok((name, attributes))
}
