//! URL handling module for Sitemap-Ripple
//!
//! This module provides link resolution against a page, base tag and crawl
//! domain, plus the same-domain and same-page checks that decide which links
//! the crawler may follow.

mod domain;
mod membership;
mod resolve;

// Re-export main functions
pub use domain::{extract_domain, seed_address, validate_seed};
pub use membership::{can_be_crawled, is_same_as_page_url};
pub use resolve::resolve;

/// Schemes that never produce a sitemap entry
const EXCLUDED_SCHEMES: &[&str] = &["data:", "javascript:"];

/// Returns true if a raw reference uses a scheme that is never recorded
///
/// # Examples
///
/// ```
/// use sitemap_ripple::url::is_excluded_reference;
///
/// assert!(is_excluded_reference("javascript:void(0)"));
/// assert!(is_excluded_reference("  data:image/png;base64,AAAA"));
/// assert!(!is_excluded_reference("/about"));
/// ```
pub fn is_excluded_reference(reference: &str) -> bool {
    let reference = reference.trim_start();
    EXCLUDED_SCHEMES
        .iter()
        .any(|scheme| {
            reference
                .get(..scheme.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
        })
}
