//! Regular-expression scanner
//!
//! Used when the body is not well-formed enough for the markup scanner.
//! It never fails: anything the patterns do not recognize is ignored.

use super::RawReferences;
use quick_xml::escape::unescape;
use regex::Regex;
use std::sync::LazyLock;

/// Builds the pattern for `<tag ... attribute="value">`
///
/// The value may be double-quoted, single-quoted or bare.
fn attribute_pattern(tag: &str, attribute: &str) -> Regex {
    let pattern = format!(
        r#"(?i)<{tag}\s+(?:[^>]*?\s+)?{attribute}\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#
    );
    Regex::new(&pattern).expect("hardcoded regex pattern is valid")
}

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("a", "href"));
static AREA: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("area", "href"));
static IMAGE: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("img", "src"));
static SOURCE: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("source", "src"));
static SCRIPT: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("script", "src"));
static LINK: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("link", "href"));
static BASE: LazyLock<Regex> = LazyLock::new(|| attribute_pattern("base", "href"));

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("hardcoded regex pattern is valid"));

static STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("hardcoded regex pattern is valid")
});

/// Scans any body for link-bearing attributes
///
/// Commented-out markup is ignored. Attribute values have their entities
/// decoded; a value with a malformed entity is kept as written.
pub fn scan(body: &str) -> RawReferences {
    let uncommented = COMMENT.replace_all(body, "");
    let body: &str = &uncommented;

    let mut references = RawReferences {
        base: values(&BASE, body).into_iter().next(),
        anchors: values(&ANCHOR, body),
        areas: values(&AREA, body),
        images: values(&IMAGE, body),
        media: values(&SOURCE, body),
        scripts: values(&SCRIPT, body),
        stylesheets: values(&LINK, body),
        styles: Vec::new(),
    };

    for style in values(&STYLE, body) {
        references.push_style(&style);
    }

    references
}

/// Collects the captured value of every match, in document order
fn values(pattern: &Regex, body: &str) -> Vec<String> {
    pattern
        .captures_iter(body)
        .filter_map(|captures| {
            captures
                .iter()
                .skip(1)
                .flatten()
                .next()
                .map(|m| decode(m.as_str()))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    unescape(raw)
        .map(|value| value.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_styles() {
        let refs = scan(r#"<a href="/double">1</a><a href='/single'>2</a><a href=/bare>3</a>"#);
        assert_eq!(refs.anchors, vec!["/double", "/single", "/bare"]);
    }

    #[test]
    fn test_attributes_before_href() {
        let refs = scan(r#"<a class="nav" id='x' href="/target">t</a>"#);
        assert_eq!(refs.anchors, vec!["/target"]);
    }

    #[test]
    fn test_prefixed_attribute_not_matched() {
        let refs = scan(r#"<a data-href="/wrong">t</a>"#);
        assert!(refs.anchors.is_empty());
    }

    #[test]
    fn test_area_not_mistaken_for_anchor() {
        let refs = scan(r#"<area href="/map" /><abbr title="x">y</abbr>"#);
        assert!(refs.anchors.is_empty());
        assert_eq!(refs.areas, vec!["/map"]);
    }

    #[test]
    fn test_case_insensitive_tags() {
        let refs = scan(r#"<IMG SRC="/logo.png"><SCRIPT Src='/app.js'></SCRIPT>"#);
        assert_eq!(refs.images, vec!["/logo.png"]);
        assert_eq!(refs.scripts, vec!["/app.js"]);
    }

    #[test]
    fn test_spaces_around_equals() {
        let refs = scan("<script src = 'file.js' /><base href = 'www.wipro.com' />");
        assert_eq!(refs.scripts, vec!["file.js"]);
        assert_eq!(refs.base.as_deref(), Some("www.wipro.com"));
    }

    #[test]
    fn test_first_base_wins() {
        let refs = scan(r#"<base href="/one"><base href="/two">"#);
        assert_eq!(refs.base.as_deref(), Some("/one"));
    }

    #[test]
    fn test_styles_with_url_only() {
        let refs = scan(
            r#"<body style = "background: url('text.png');" ><p style='color: red'>x</p></body>"#,
        );
        assert_eq!(refs.styles, vec!["background: url('text.png');"]);
    }

    #[test]
    fn test_multiline_tags() {
        let refs = scan("<a\n  class=\"x\"\n  href=\"/wrapped\"\n>w</a>");
        assert_eq!(refs.anchors, vec!["/wrapped"]);
    }

    #[test]
    fn test_malformed_markup_still_scanned() {
        let refs = scan(r#"<html><body><p>unclosed <a href="/still">x</a><br></div>"#);
        assert_eq!(refs.anchors, vec!["/still"]);
    }

    #[test]
    fn test_entities_in_values_decoded() {
        let refs = scan(r#"<a href="/s?a=1&amp;b=2">x</a><img src='/i?w=1&#38;h=2'>"#);
        assert_eq!(refs.anchors, vec!["/s?a=1&b=2"]);
        assert_eq!(refs.images, vec!["/i?w=1&h=2"]);
    }

    #[test]
    fn test_malformed_entity_kept_as_written() {
        let refs = scan(r#"<a href="/s?a=1&b=2">x</a>"#);
        assert_eq!(refs.anchors, vec!["/s?a=1&b=2"]);
    }

    #[test]
    fn test_commented_out_links_ignored() {
        let refs = scan(
            "<!-- <a href=\"/old\">old</a>\n<img src=\"/old.png\"> --><a href=\"/new\">n</a>",
        );
        assert_eq!(refs.anchors, vec!["/new"]);
        assert!(refs.images.is_empty());
    }
}
