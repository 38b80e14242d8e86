//! Link extraction from page bodies
//!
//! Extraction runs in two steps:
//! - a scanner collects raw attribute values per element kind
//! - the classification step resolves, filters and deduplicates them
//!
//! There are two scanners. The markup scanner reads the body as strict
//! XHTML and fails on anything malformed; the pattern scanner uses regular
//! expressions and always succeeds. [`extract_links`] tries the markup
//! scanner first and falls back to the pattern scanner.

mod markup;
mod pattern;

use crate::crawler::link::{LinkCategory, PageLink};
use crate::url::{can_be_crawled, is_excluded_reference, is_same_as_page_url, resolve};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;

/// Errors raised by the strict markup scanner
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Malformed markup: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("End tag </{found}> does not close <{expected}>")]
    MismatchedEnd { expected: String, found: String },

    #[error("End tag </{0}> has no matching start tag")]
    UnexpectedEnd(String),

    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),
}

static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("hardcoded regex pattern is valid"));

static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']*)'").expect("hardcoded regex pattern is valid"));

/// Raw attribute values collected by a scanner, grouped by element kind
///
/// Values are kept exactly as they appeared in the markup; resolution
/// happens in [`RawReferences::into_page_links`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawReferences {
    /// First `<base href>` value
    pub base: Option<String>,
    pub anchors: Vec<String>,
    pub areas: Vec<String>,
    pub images: Vec<String>,
    pub media: Vec<String>,
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
    /// Inline `style` attribute values that mention `url`
    pub styles: Vec<String>,
}

impl RawReferences {
    /// Records a `style` attribute value if it can carry a background URL
    pub(crate) fn push_style(&mut self, value: &str) {
        if value.to_ascii_lowercase().contains("url") {
            self.styles.push(value.to_string());
        }
    }

    /// Resolves and classifies the collected references
    ///
    /// # Classification Rules
    ///
    /// | Source | Category | Crawlable | Same-page links dropped |
    /// |--------|----------|-----------|-------------------------|
    /// | `<a href>` | URL | not a bookmark and on the domain | yes |
    /// | `<area href>` | AREA | on the domain | yes |
    /// | `<img src>` | IMAGE | never | yes |
    /// | `<source src>` | MEDIA | never | no |
    /// | `<script src>` | SCRIPT | never | no |
    /// | `<link href>` | CSSLINK | never | no |
    /// | `style` `url(...)` | CSSBACKGROUND | never | no |
    ///
    /// Blank, `data:` and `javascript:` references are skipped. The result
    /// holds each target once, in the order of the table above.
    ///
    /// # Arguments
    ///
    /// * `page_url` - The URL of the page the references came from
    /// * `domain` - The crawl domain
    pub fn into_page_links(self, page_url: &str, domain: &str) -> Vec<PageLink> {
        let base = self.base.as_deref();
        let mut links = LinkList::default();

        for href in self.anchors.iter().filter_map(|r| usable(r)) {
            let is_bookmark = href.starts_with('#');
            let link = resolve(href, page_url, base, domain);
            let crawlable = !is_bookmark && can_be_crawled(&link, domain);
            if !is_same_as_page_url(&link, page_url) {
                links.push(PageLink::new(link, LinkCategory::Url, crawlable));
            }
        }

        for href in self.areas.iter().filter_map(|r| usable(r)) {
            let link = resolve(href, page_url, base, domain);
            let crawlable = can_be_crawled(&link, domain);
            if !is_same_as_page_url(&link, page_url) {
                links.push(PageLink::new(link, LinkCategory::Area, crawlable));
            }
        }

        for src in self.images.iter().filter_map(|r| usable(r)) {
            let link = resolve(src, page_url, base, domain);
            if !is_same_as_page_url(&link, page_url) {
                links.push(PageLink::new(link, LinkCategory::Image, false));
            }
        }

        let never_crawled = [
            (&self.media, LinkCategory::Media),
            (&self.scripts, LinkCategory::Script),
            (&self.stylesheets, LinkCategory::CssLink),
        ];
        for (references, category) in never_crawled {
            for reference in references.iter().filter_map(|r| usable(r)) {
                let link = resolve(reference, page_url, base, domain);
                links.push(PageLink::new(link, category, false));
            }
        }

        for reference in self
            .styles
            .iter()
            .filter_map(|style| css_background_url(style))
            .filter_map(usable)
        {
            let link = resolve(reference, page_url, base, domain);
            links.push(PageLink::new(link, LinkCategory::CssBackground, false));
        }

        links.into_vec()
    }
}

/// Insertion-ordered list that keeps the first link seen for each target
#[derive(Default)]
struct LinkList {
    seen: HashSet<String>,
    links: Vec<PageLink>,
}

impl LinkList {
    fn push(&mut self, link: PageLink) {
        if self.seen.insert(link.target.clone()) {
            self.links.push(link);
        }
    }

    fn into_vec(self) -> Vec<PageLink> {
        self.links
    }
}

/// Trims a raw reference, dropping blanks and excluded schemes
fn usable(raw: &str) -> Option<&str> {
    let reference = raw.trim();
    if reference.is_empty() || is_excluded_reference(reference) {
        None
    } else {
        Some(reference)
    }
}

/// Picks the URL out of an inline style value
///
/// The first double-quoted string wins; otherwise the first single-quoted
/// string is used. Unquoted `url(...)` values are not recognized.
///
/// # Examples
///
/// ```
/// use sitemap_ripple::crawler::css_background_url;
///
/// assert_eq!(css_background_url("background: url('bg.png');"), Some("bg.png"));
/// assert_eq!(css_background_url("background: url(bg.png);"), None);
/// ```
pub fn css_background_url(style: &str) -> Option<&str> {
    DOUBLE_QUOTED
        .captures(style)
        .or_else(|| SINGLE_QUOTED.captures(style))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Extracts the links of a page, falling back to pattern scanning
///
/// The strict markup scanner runs first. When it rejects the body, the
/// failure is logged at debug level and the pattern scanner takes over;
/// extraction itself never fails.
///
/// # Arguments
///
/// * `body` - The page body
/// * `page_url` - The URL the body was fetched from
/// * `domain` - The crawl domain
///
/// # Example
///
/// ```
/// use sitemap_ripple::crawler::extract_links;
///
/// let body = r##"<a href="#clickme">x</a><a href="/relative/get">y</a>"##;
/// let links = extract_links(body, "http://x.com", "http://x.com");
/// // The bookmark points back at the page itself and is dropped
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].target, "http://x.com/relative/get");
/// assert!(links[0].crawlable);
/// ```
pub fn extract_links(body: &str, page_url: &str, domain: &str) -> Vec<PageLink> {
    match extract_with_markup(body, page_url, domain) {
        Ok(links) => links,
        Err(e) => {
            tracing::debug!("Falling back to pattern scan for {}: {}", page_url, e);
            extract_with_patterns(body, page_url, domain)
        }
    }
}

/// Extracts links with the strict markup scanner only
pub fn extract_with_markup(
    body: &str,
    page_url: &str,
    domain: &str,
) -> Result<Vec<PageLink>, ExtractError> {
    Ok(markup::scan(body)?.into_page_links(page_url, domain))
}

/// Extracts links with the pattern scanner only
pub fn extract_with_patterns(body: &str, page_url: &str, domain: &str) -> Vec<PageLink> {
    pattern::scan(body).into_page_links(page_url, domain)
}
