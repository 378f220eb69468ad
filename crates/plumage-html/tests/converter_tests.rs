//! Integration tests for the status-HTML to rich-text converter.

use plumage_html::{
    IssueKind, TextStyle, attributed_text_from_html, convert_with_issues, list_attributes,
    paragraph_attributes,
};
use plumage_text::{AttributeSet, RichText};

/// Helper to convert with the default base style.
fn convert(html: &str) -> RichText {
    attributed_text_from_html(html, &TextStyle::default()).expect("conversion should succeed")
}

#[test]
fn tagless_input_is_a_single_paragraph_run() {
    let style = TextStyle::default();
    let text = convert("just plain text");

    assert_eq!(text.text(), "just plain text");
    assert_eq!(text.runs().len(), 1);
    assert_eq!(text.runs()[0].attributes, paragraph_attributes(&style));
}

#[test]
fn consecutive_paragraphs_get_one_separator() {
    let style = TextStyle::default();
    let text = convert("<p>one</p><p>two</p>");

    // Separator appears once between paragraphs, never before the first.
    assert_eq!(text.text(), "one\r\n\r\ntwo");
    for offset in 0..text.char_len() {
        assert_eq!(
            text.attributes_at(offset).unwrap(),
            &paragraph_attributes(&style),
            "offset {offset}"
        );
    }
}

#[test]
fn three_paragraphs_do_not_double_separators() {
    let text = convert("<p>a</p><p>b</p><p>c</p>");
    assert_eq!(text.text(), "a\r\n\r\nb\r\n\r\nc");
}

#[test]
fn emphasis_sets_the_italic_flag() {
    let text = convert("<em>italic</em>");
    assert_eq!(text.text(), "italic");
    let attrs = text.attributes_at(0).unwrap();
    assert!(attrs.italic);
    assert!(!attrs.bold);
}

#[test]
fn nested_emphasis_keeps_both_flags() {
    let text = convert("<strong><em>x</em></strong>");
    let attrs = text.attributes_at(0).unwrap();
    assert!(attrs.bold);
    assert!(attrs.italic);
}

#[test]
fn emphasis_nesting_is_commutative() {
    let outer_strong = convert("<strong><em>x</em></strong>");
    let outer_em = convert("<em><strong>x</strong></em>");
    assert_eq!(outer_strong, outer_em);
}

#[test]
fn ordered_list_numbers_items() {
    let style = TextStyle::default();
    let text = convert("<ol><li>1</li><li>2</li></ol>");

    assert_eq!(text.text(), "\r\n\t1. 1\r\n\t2. 2");
    for offset in 0..text.char_len() {
        assert_eq!(
            text.attributes_at(offset).unwrap(),
            &list_attributes(&style, 1),
            "offset {offset}"
        );
    }
}

#[test]
fn unordered_list_uses_bullets() {
    let text = convert("<ul><li>A</li><li>B</li></ul>");
    assert_eq!(text.text(), "\r\n\t\u{2022} A\r\n\t\u{2022} B");
}

#[test]
fn paragraph_inside_list_item_does_not_double_separate() {
    let text = convert("<ul><li><p>Single indent.</p></li></ul>");
    assert_eq!(text.text(), "\r\n\t\u{2022} Single indent.");
}

#[test]
fn paragraph_after_a_closed_list_still_separates() {
    // Closing the list item ends separator suppression, so the next
    // paragraph gets its blank line back.
    let text = convert("<ul><li>A</li></ul><p>x</p>");
    assert_eq!(text.text(), "\r\n\t\u{2022} A\r\n\r\nx");
}

#[test]
fn nested_lists_deepen_the_indent() {
    let style = TextStyle::default();
    let text = convert("<ul><li>outer</li><li><ul><li>inner</li></ul></li></ul>");

    assert_eq!(text.text(), "\r\n\t\u{2022} outer\r\n\t\u{2022} \r\n\t\t\u{2022} inner");
    // "inner" is the ASCII tail of the text, so its char offset is the
    // char length minus its own length.
    let inner_offset = text.char_len() - "inner".len();
    assert_eq!(
        text.attributes_at(inner_offset).unwrap(),
        &list_attributes(&style, 2)
    );
}

#[test]
fn footnote_items_render_superscript_without_period() {
    let text = convert("<ol><li class=\"footnote\">footnote text</li></ol>");

    // No literal ". " after the index.
    assert_eq!(text.text(), "\r\n\t1footnote text");
    // The index digit run carries superscript sizing.
    let index_attrs = text.attributes_at(3).unwrap();
    assert!(index_attrs.superscript);
    assert!(index_attrs.baseline_offset.unwrap() > 0.0);
    // The item text does not.
    let body_attrs = text.attributes_at(4).unwrap();
    assert!(!body_attrs.superscript);
}

#[test]
fn mixed_footnote_and_plain_items() {
    let text = convert("<ol><li>first</li><li class=\"footnote\">note</li></ol>");
    assert_eq!(text.text(), "\r\n\t1. first\r\n\t2note");
}

#[test]
fn image_renders_a_marker_with_resolved_source() {
    let text = convert("<img src=\"//example.com\" alt=\"an image\" />");

    assert_eq!(text.text(), "[Image: an image]");
    let attrs = text.attributes_at(0).unwrap();
    assert!(attrs.italic);
    // The url crate renders a host-only https URL with a trailing slash.
    assert_eq!(attrs.image_source.as_deref(), Some("https://example.com/"));
}

#[test]
fn image_without_alt_uses_the_placeholder() {
    let text = convert("<img src=\"https://example.com/a.png\" />");
    assert_eq!(text.text(), "[Image: image]");
}

#[test]
fn image_with_garbage_source_keeps_the_marker() {
    let (text, issues) =
        convert_with_issues("<img src=\"   \" alt=\"broken\" />", &TextStyle::default())
            .expect("conversion should succeed");

    assert_eq!(text.text(), "[Image: broken]");
    assert!(text.attributes_at(0).unwrap().image_source.is_none());
    assert!(issues.iter().any(|i| i.kind == IssueKind::BadImageSource));
}

#[test]
fn line_break_becomes_a_line_separator() {
    // Bare <br> is normalized to self-closing form before tokenizing.
    let text = convert("<p>a<br>b</p>");
    assert_eq!(text.text(), "a\u{2028}b");
}

#[test]
fn thematic_break_separates_paragraphs() {
    let text = convert("one<hr>two");
    assert_eq!(text.text(), "one\r\n\r\ntwo");
}

#[test]
fn anchor_carries_its_target() {
    let text = convert("<a href=\"https://example.com/@user\" title=\"profile\">@user</a>");
    let attrs = text.attributes_at(0).unwrap();
    assert_eq!(attrs.link.as_deref(), Some("https://example.com/@user"));
}

#[test]
fn anchor_without_href_targets_about_blank() {
    let text = convert("<a>dangling</a>");
    let attrs = text.attributes_at(0).unwrap();
    assert_eq!(attrs.link.as_deref(), Some("about:blank"));
}

#[test]
fn mention_span_is_bold_and_tagged() {
    let text = convert("<span class=\"account\" data-account-id=\"12345\">@user</span>");
    let attrs = text.attributes_at(0).unwrap();
    assert!(attrs.bold);
    assert_eq!(attrs.mention_account_id, Some(12_345));
}

#[test]
fn mention_span_with_bad_id_stays_bold() {
    let (text, issues) = convert_with_issues(
        "<span class=\"account\" data-account-id=\"abc\">@user</span>",
        &TextStyle::default(),
    )
    .expect("conversion should succeed");

    let attrs = text.attributes_at(0).unwrap();
    assert!(attrs.bold);
    assert!(attrs.mention_account_id.is_none());
    assert!(issues.iter().any(|i| i.kind == IssueKind::BadMentionId));
}

#[test]
fn hashtag_span_is_italic_and_tagged() {
    let text = convert("<span class=\"hash\" data-hash=\"rust\">#rust</span>");
    let attrs = text.attributes_at(0).unwrap();
    assert!(attrs.italic);
    assert_eq!(attrs.hashtag.as_deref(), Some("rust"));
}

#[test]
fn unknown_span_class_degrades_to_paragraph() {
    let style = TextStyle::default();
    let (text, issues) = convert_with_issues(
        "<span class=\"ellipsis\">trimmed</span>",
        &style,
    )
    .expect("conversion should succeed");

    assert_eq!(text.text(), "trimmed");
    assert_eq!(text.attributes_at(0).unwrap(), &paragraph_attributes(&style));
    assert!(issues.iter().any(|i| i.kind == IssueKind::UnknownSpanClass));
}

#[test]
fn unknown_elements_degrade_to_paragraph_containers() {
    let (text, issues) = convert_with_issues(
        "<table><tr><td>cell</td></tr></table>",
        &TextStyle::default(),
    )
    .expect("conversion should succeed");

    assert_eq!(text.text(), "cell");
    assert!(issues.iter().any(|i| i.kind == IssueKind::UnknownElement));
}

#[test]
fn blockquote_content_gets_a_positive_head_indent() {
    let text = convert("<blockquote><p>quoted</p></blockquote>");
    assert_eq!(text.text(), "quoted");
    assert!(text.attributes_at(0).unwrap().head_indent.unwrap() > 0.0);
}

#[test]
fn entity_references_resolve_to_characters() {
    let text = convert("<p>AT&amp;T &#8230; a &lt;tag&gt;</p>");
    assert_eq!(text.text(), "AT&T \u{2026} a <tag>");
}

#[test]
fn fallback_text_round_trips_unchanged() {
    let style = TextStyle::default();
    let first = convert("no tags here, just text");
    let second =
        attributed_text_from_html(&first.text(), &style).expect("round trip should succeed");

    assert_eq!(second.text(), first.text());
    assert_eq!(second.attributes_at(0).unwrap(), &paragraph_attributes(&style));
}

#[test]
fn mismatched_list_close_pops_exactly_one_frame() {
    let (text, issues) =
        convert_with_issues("<ol><li>1</li></ul>", &TextStyle::default())
            .expect("conversion should succeed");

    assert_eq!(text.text(), "\r\n\t1. 1");
    assert!(issues.iter().any(|i| i.kind == IssueKind::ListTypeMismatch));
    // Exactly one list frame was popped: a following list starts at level 1.
    let (again, _) = convert_with_issues(
        "<ol><li>1</li></ul><ul><li>A</li></ul>",
        &TextStyle::default(),
    )
    .expect("conversion should succeed");
    assert_eq!(again.text(), "\r\n\t1. 1\r\n\t\u{2022} A");
}

#[test]
fn stray_close_tags_are_tolerated() {
    let (text, issues) = convert_with_issues("</em>text", &TextStyle::default())
        .expect("conversion should succeed");

    assert_eq!(text.text(), "text");
    // The stray close pops the enclosing frame, so the text runs with
    // empty attributes and a MissingFrame diagnostic, and the input ends
    // with more closes than opens.
    assert_eq!(text.attributes_at(0).unwrap(), &AttributeSet::default());
    assert!(issues.iter().any(|i| i.kind == IssueKind::MissingFrame));
    assert!(issues.iter().any(|i| i.kind == IssueKind::StackUnderflow));
}

#[test]
fn list_item_outside_a_list_renders_a_bullet() {
    let (text, issues) = convert_with_issues("<li>stray</li>", &TextStyle::default())
        .expect("conversion should succeed");

    assert_eq!(text.text(), "\r\n\t\u{2022} stray");
    assert!(issues.iter().any(|i| i.kind == IssueKind::ListUnderflow));
}

#[test]
fn deep_nesting_is_capped_not_fatal() {
    let mut html = String::new();
    for _ in 0..200 {
        html.push_str("<em>");
    }
    html.push('x');
    for _ in 0..200 {
        html.push_str("</em>");
    }

    let (text, issues) =
        convert_with_issues(&html, &TextStyle::default()).expect("conversion should succeed");
    assert_eq!(text.text(), "x");
    assert!(text.attributes_at(0).unwrap().italic);
    assert!(issues.iter().any(|i| i.kind == IssueKind::DepthOverflow));
}

#[test]
fn unterminated_attribute_is_a_hard_failure() {
    let result = attributed_text_from_html("<p a=\"1>text</p>", &TextStyle::default());
    assert!(result.is_err());
}
