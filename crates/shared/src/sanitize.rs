//! Floor-plan SVG sanitation.
//!
//! Plan documents come from externally hosted files and routinely carry
//! embedded `<style>` blocks that fight the presentation page's own zone
//! styling, plus `<text>` labels that swallow clicks meant for the zone
//! underneath them. Both are neutralized before the markup is injected
//! into the page.

use regex::Regex;
use std::sync::OnceLock;

const TEXT_NEUTRALIZER: &str = r#" style="pointer-events: none; user-select: none;""#;

fn style_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<style.*?</style>").expect("valid regex"))
}

/// Sanitize a fetched floor-plan document: strip every `<style>` block and
/// disable pointer events and text selection on `<text>` tags.
///
/// Idempotent: sanitizing an already-sanitized document changes nothing.
/// The document is not validated; malformed markup passes through as-is.
pub fn sanitize_plan_svg(raw: &str) -> String {
    let stripped = style_block_re().replace_all(raw, "");
    neutralize_text_tags(&stripped)
}

/// Inject the pointer-events neutralizer onto each `<text>` opening tag.
/// Tags that already carry the neutralizer are left untouched, which is what
/// makes a second sanitize pass a no-op.
fn neutralize_text_tags(svg: &str) -> String {
    let mut out = String::with_capacity(svg.len() + 64);
    let mut rest = svg;
    while let Some(pos) = rest.find("<text") {
        let split = pos + "<text".len();
        out.push_str(&rest[..split]);
        rest = &rest[split..];
        // Only actual <text> tags: skip <textPath> and friends.
        let at_tag_boundary = matches!(rest.chars().next(), Some(c) if c.is_whitespace() || c == '>' || c == '/');
        if at_tag_boundary && !rest.starts_with(TEXT_NEUTRALIZER) {
            out.push_str(TEXT_NEUTRALIZER);
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_style_block() {
        let raw = r#"<svg><style>.a { fill: red; }</style><rect id="z1"/></svg>"#;
        let clean = sanitize_plan_svg(raw);
        assert!(!clean.contains("<style"));
        assert!(clean.contains(r#"<rect id="z1"/>"#));
    }

    #[test]
    fn test_strips_multiple_style_blocks() {
        let raw = "<svg><style>a</style><g/><style>b</style></svg>";
        let clean = sanitize_plan_svg(raw);
        assert!(!clean.contains("<style"));
        assert!(!clean.contains("</style>"));
        assert!(clean.contains("<g/>"));
    }

    #[test]
    fn test_strips_style_case_insensitive_and_multiline() {
        let raw = "<svg><STYLE type=\"text/css\">\n.z { fill: blue; }\n</STYLE></svg>";
        let clean = sanitize_plan_svg(raw);
        assert!(!clean.to_lowercase().contains("<style"));
    }

    #[test]
    fn test_text_tags_get_pointer_events_disabled() {
        let raw = r#"<svg><text x="1">Unit 101</text></svg>"#;
        let clean = sanitize_plan_svg(raw);
        assert!(clean.contains(r#"<text style="pointer-events: none; user-select: none;" x="1">"#));
    }

    #[test]
    fn test_bare_text_tag_neutralized() {
        let clean = sanitize_plan_svg("<svg><text>hi</text></svg>");
        assert!(clean.contains(r#"<text style="pointer-events: none; user-select: none;">hi</text>"#));
    }

    #[test]
    fn test_textpath_left_alone() {
        let raw = r##"<svg><textPath href="#p">curve</textPath></svg>"##;
        let clean = sanitize_plan_svg(raw);
        assert_eq!(clean, raw);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let raw = r#"<svg><style>.a{}</style><text x="0">A</text><g id="z"/></svg>"#;
        let once = sanitize_plan_svg(raw);
        let twice = sanitize_plan_svg(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_no_style_no_text_is_untouched() {
        let raw = r#"<svg><g id="z1"><path d="M0 0"/></g></svg>"#;
        assert_eq!(sanitize_plan_svg(raw), raw);
    }
}
