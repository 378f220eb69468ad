//! URL resolution for image sources and anchor targets.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! Status HTML frequently carries scheme-relative image sources
//! (`//files.example.com/media/1.png`) or bare hostnames; rendering needs
//! absolute URLs. Resolution never fails the caller: an unresolvable value
//! yields `None` plus a warning, and the caller omits the attribute.

use ::url::Url;

use crate::warning::warn_once;

/// The target used for anchors that carry no `href` attribute.
///
/// [§ 2.6 "about:blank"](https://html.spec.whatwg.org/multipage/infrastructure.html#about:blank)
pub const BLANK_TARGET: &str = "about:blank";

/// Resolve an image `src` value to an absolute URL.
///
/// # Algorithm
///
/// STEP 1: If the value already parses as an absolute URL, use it.
///
/// STEP 2: Otherwise assume a missing scheme and retry with an `https:`
/// prefix. Per the [URL Standard § 4.4](https://url.spec.whatwg.org/#url-parsing)
/// special-scheme rules this covers both scheme-relative values
/// (`//host/path`) and bare host/path values.
///
/// STEP 3: If it still does not parse, warn and return `None`; the caller
/// drops the image-source attribute rather than failing the parse.
#[must_use]
pub fn resolve_image_source(src: &str) -> Option<Url> {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        warn_once("URL", "empty image src attribute");
        return None;
    }

    // STEP 1: Absolute URLs pass through untouched.
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }

    // STEP 2: Retry with an https scheme prefix.
    if let Ok(url) = Url::parse(&format!("https:{trimmed}")) {
        return Some(url);
    }

    // STEP 3: Give up; the caller omits the attribute.
    warn_once("URL", &format!("unresolvable image src {trimmed:?}"));
    None
}

/// Resolve an anchor `href` value to a link target string.
///
/// An absent `href` maps to [`BLANK_TARGET`]. The value is otherwise taken
/// verbatim; anchors in status HTML are emitted by the backend and already
/// absolute.
#[must_use]
pub fn anchor_target(href: Option<&str>) -> String {
    match href {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => BLANK_TARGET.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_source_is_unchanged() {
        let url = resolve_image_source("https://example.com/a.png").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a.png");
    }

    #[test]
    fn scheme_relative_source_gets_https() {
        let url = resolve_image_source("//example.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn garbage_source_is_none() {
        assert!(resolve_image_source("").is_none());
        assert!(resolve_image_source("   ").is_none());
    }

    #[test]
    fn missing_href_is_about_blank() {
        assert_eq!(anchor_target(None), BLANK_TARGET);
        assert_eq!(anchor_target(Some("")), BLANK_TARGET);
        assert_eq!(anchor_target(Some("https://example.com/@user")), "https://example.com/@user");
    }
}
