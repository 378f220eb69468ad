//! The markup transducer: tokenizer events in, attributed runs out.
//!
//! # State machine
//!
//! State is implicit in two stacks. The element-frame stack holds one
//! entry per open attribute-bearing element, carrying the attribute set
//! that applies to character data inside it — already unioned with every
//! ancestor's attributes at push time, so nested emphasis keeps all flags.
//! The list stack tracks open `ol`/`ul` scopes with their indent level and
//! running item count. A "just started a list item" flag suppresses the
//! paragraph separator a following `<p>`/`<pre>` would otherwise insert,
//! preventing a double blank line at list-item boundaries.
//!
//! Every anomaly short of a tokenizer failure is recorded and tolerated:
//! the transducer itself is infallible.

use std::borrow::Cow;

use plumage_common::url::resolve_image_source;
use plumage_common::warning::warn_once;
use plumage_text::{AttributeSet, RichText, RichTextBuilder};

use super::{AttributeMap, ConvertIssue, IssueKind, MAX_NESTING_DEPTH};
use crate::element::ElementKind;
use crate::list::{ItemStart, ListTracker};
use crate::style::{self, TextStyle};

/// Separator inserted between consecutive paragraph-level blocks.
pub(super) const PARAGRAPH_SEPARATOR: &str = "\r\n\r\n";

/// Separator inserted before every list item.
pub(super) const LIST_ITEM_SEPARATOR: &str = "\r\n";

/// U+2028 LINE SEPARATOR, emitted for `<br>`.
pub(super) const LINE_SEPARATOR: &str = "\u{2028}";

/// Label prefix for unordered list items.
const BULLET_LABEL: &str = "\u{2022} ";

/// One open attribute-bearing element.
#[derive(Debug)]
struct ElementFrame {
    /// The attribute set applying to character data inside this element,
    /// including everything inherited from enclosing frames.
    attributes: AttributeSet,
}

/// Push-driven state machine converting tokenizer callbacks into runs.
///
/// One instance per parse; owns its state exclusively and is consumed by
/// [`Transducer::finish`].
pub(super) struct Transducer<'s> {
    style: &'s TextStyle,
    frames: Vec<ElementFrame>,
    lists: ListTracker,
    /// Set by an `li` start, consumed by the next `p`/`pre` start to
    /// suppress a duplicate separator, cleared by any element end.
    just_started_item: bool,
    /// Element starts swallowed past [`MAX_NESTING_DEPTH`], kept so the
    /// matching ends stay balanced.
    depth_overflow: usize,
    overflow_reported: bool,
    output: RichTextBuilder,
    issues: Vec<ConvertIssue>,
}

impl<'s> Transducer<'s> {
    /// Create a transducer with empty stacks and empty output.
    pub(super) fn new(style: &'s TextStyle) -> Self {
        Self {
            style,
            frames: Vec::new(),
            lists: ListTracker::new(),
            just_started_item: false,
            depth_overflow: 0,
            overflow_reported: false,
            output: RichTextBuilder::new(),
            issues: Vec::new(),
        }
    }

    /// Handle an element-start event.
    pub(super) fn element_start(&mut self, name: &str, attributes: &AttributeMap) {
        let kind = ElementKind::parse(name);

        // Frameless elements contribute output directly and return early.
        match kind {
            Some(ElementKind::Br) => {
                let attrs = self.current_attributes("line break");
                self.output.append(LINE_SEPARATOR, attrs);
                return;
            }
            Some(ElementKind::Hr) => {
                let attrs = self.current_attributes("thematic break");
                self.output.append(PARAGRAPH_SEPARATOR, attrs);
                return;
            }
            Some(ElementKind::Img) => {
                self.image(attributes);
                return;
            }
            Some(ElementKind::Li) => {
                self.start_list_item(attributes);
                return;
            }
            _ => {}
        }

        if self.frames.len() >= MAX_NESTING_DEPTH {
            self.depth_overflow += 1;
            if !self.overflow_reported {
                self.overflow_reported = true;
                self.issue(
                    IssueKind::DepthOverflow,
                    format!("element nesting deeper than {MAX_NESTING_DEPTH}; flattening"),
                );
            }
            return;
        }

        let own = match kind {
            Some(ElementKind::Body | ElementKind::P | ElementKind::Pre) => {
                style::paragraph(self.style)
            }
            Some(ElementKind::Blockquote) => style::block_quote(self.style),
            Some(ElementKind::Em) => style::emphasis(),
            Some(ElementKind::Strong) => style::strong(),
            Some(ElementKind::Code) => style::code(self.style),
            Some(ElementKind::Sup) => style::superscript(self.style),
            Some(ElementKind::Strike) => style::strikethrough(),
            Some(ElementKind::A) => {
                style::anchor(self.style, attributes.get("href").map(String::as_str))
            }
            Some(ElementKind::Span) => self.span_attributes(attributes),
            Some(ElementKind::Ol | ElementKind::Ul) => {
                let ordered = kind == Some(ElementKind::Ol);
                let level = self.lists.open(ordered);
                style::list_paragraph(self.style, level)
            }
            Some(
                ElementKind::Br | ElementKind::Hr | ElementKind::Img | ElementKind::Li,
            ) => unreachable!("frameless elements return early"),
            None => {
                self.issue(
                    IssueKind::UnknownElement,
                    format!("unknown element <{name}>, treating as paragraph"),
                );
                style::paragraph(self.style)
            }
        };

        // Required union-merge: the new frame carries every ancestor
        // attribute forward, overridden by the element's own keys.
        let merged = match self.frames.last() {
            Some(top) => top.attributes.merge(&own),
            None => own,
        };

        if kind.is_some_and(ElementKind::separates_paragraphs) {
            if !self.output.is_empty() && !self.just_started_item {
                self.output.append(PARAGRAPH_SEPARATOR, merged.clone());
            }
            self.just_started_item = false;
        }

        self.frames.push(ElementFrame { attributes: merged });
    }

    /// Handle a character-data event.
    pub(super) fn character_data(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let attrs = self.current_attributes("character data");
        self.output.append(text, attrs);
    }

    /// Handle a general entity reference delivered separately from
    /// character data (`&amp;`, `&#8230;`, ...).
    ///
    /// Predefined and numeric references resolve to their characters;
    /// anything else is passed through literally with a diagnostic.
    pub(super) fn general_reference(&mut self, name: &str) {
        match resolve_entity(name) {
            Some(text) => self.character_data(&text),
            None => {
                self.issue(
                    IssueKind::UnknownEntity,
                    format!("unresolvable entity reference &{name};"),
                );
                self.character_data(&format!("&{name};"));
            }
        }
    }

    /// Handle an element-end event.
    pub(super) fn element_end(&mut self, name: &str) {
        self.just_started_item = false;
        let kind = ElementKind::parse(name);

        // br, hr, li, img never pushed, so their ends pop nothing.
        if kind.is_some_and(|k| !k.pushes_frame()) {
            return;
        }

        if self.depth_overflow > 0 {
            self.depth_overflow -= 1;
            return;
        }

        if kind.is_some_and(ElementKind::is_list) {
            let ordered = kind == Some(ElementKind::Ol);
            match self.lists.close() {
                Some(frame) if frame.ordered != ordered => self.issue(
                    IssueKind::ListTypeMismatch,
                    format!(
                        "</{name}> closed an {} list",
                        if frame.ordered { "ordered" } else { "unordered" }
                    ),
                ),
                Some(_) => {}
                None => self.issue(
                    IssueKind::ListUnderflow,
                    format!("</{name}> with no open list"),
                ),
            }
        }

        if self.frames.pop().is_none() {
            self.issue(
                IssueKind::StackUnderflow,
                format!("</{name}> with no open element"),
            );
        }
    }

    /// Finish the parse, returning the document and recorded issues.
    ///
    /// Non-empty stacks here mean the input produced more opens than
    /// closes or vice versa; tolerated, not an error.
    pub(super) fn finish(self) -> (RichText, Vec<ConvertIssue>) {
        (self.output.finish(), self.issues)
    }

    /// `<li>` start: separator, tab indentation, and the item label.
    fn start_list_item(&mut self, attributes: &AttributeMap) {
        let item = self.lists.start_item().unwrap_or(ItemStart {
            ordered: false,
            level: 1,
            index: 1,
        });
        if self.lists.depth() == 0 {
            self.issue(
                IssueKind::ListUnderflow,
                "<li> outside any open list; rendering a level-1 bullet".to_string(),
            );
        }

        let attrs = self.current_attributes("list item");
        self.output.append(LIST_ITEM_SEPARATOR, attrs.clone());
        self.output.append(&"\t".repeat(item.level), attrs.clone());

        if item.ordered {
            if has_class_token(attributes, "footnote") {
                // Footnote indices render superscript with no trailing
                // punctuation.
                let index_attrs = attrs.merge(&style::footnote_index(self.style));
                self.output.append(&item.index.to_string(), index_attrs);
            } else {
                self.output.append(&format!("{}. ", item.index), attrs);
            }
        } else {
            self.output.append(BULLET_LABEL, attrs);
        }

        self.just_started_item = true;
    }

    /// `<img>`: resolve the source and append the textual marker.
    fn image(&mut self, attributes: &AttributeMap) {
        let mut source = None;
        if let Some(src) = attributes.get("src") {
            match resolve_image_source(src) {
                Some(url) => source = Some(url.to_string()),
                None => self.issue(
                    IssueKind::BadImageSource,
                    format!("unresolvable image src {src:?}; omitting the source attribute"),
                ),
            }
        }
        let label = self
            .style
            .image_label(attributes.get("alt").map(String::as_str));
        let attrs = self
            .current_attributes("image marker")
            .merge(&style::image_marker(source));
        self.output.append(&label, attrs);
    }

    /// `<span>`: branch on the `class` attribute value.
    fn span_attributes(&mut self, attributes: &AttributeMap) -> AttributeSet {
        if has_class_token(attributes, "account") {
            let id = attributes
                .get("data-account-id")
                .and_then(|raw| raw.parse::<i64>().ok());
            if id.is_none() {
                self.issue(
                    IssueKind::BadMentionId,
                    "mention span without a decimal data-account-id".to_string(),
                );
            }
            return style::mention(id);
        }
        if has_class_token(attributes, "hash") {
            return style::hashtag(attributes.get("data-hash").map(String::as_str));
        }
        self.issue(
            IssueKind::UnknownSpanClass,
            format!(
                "unknown span class {:?}, treating as paragraph",
                attributes.get("class").map_or("", String::as_str)
            ),
        );
        style::paragraph(self.style)
    }

    /// The attribute set at the top of the frame stack. An empty stack is
    /// tolerated with a diagnostic and empty attributes.
    fn current_attributes(&mut self, context: &str) -> AttributeSet {
        if let Some(frame) = self.frames.last() {
            frame.attributes.clone()
        } else {
            self.issue(
                IssueKind::MissingFrame,
                format!("{context} with no open element; using empty attributes"),
            );
            AttributeSet::default()
        }
    }

    /// Record a tolerated anomaly: warn once on the terminal and keep the
    /// structured issue for the caller.
    fn issue(&mut self, kind: IssueKind, message: String) {
        warn_once("HTML", &message);
        self.issues.push(ConvertIssue { kind, message });
    }
}

/// Whether an element's `class` attribute contains the given token.
fn has_class_token(attributes: &AttributeMap, token: &str) -> bool {
    attributes
        .get("class")
        .is_some_and(|classes| classes.split_whitespace().any(|t| t == token))
}

/// Resolve a predefined (`amp`, `lt`, ...) or numeric (`#8230`, `#x2026`)
/// entity reference to its character data.
fn resolve_entity(name: &str) -> Option<String> {
    if let Some(text) = quick_xml::escape::resolve_predefined_entity(name) {
        return Some(text.to_string());
    }
    if name.starts_with('#') {
        return quick_xml::escape::unescape(&format!("&{name};"))
            .ok()
            .map(Cow::into_owned);
    }
    None
}
