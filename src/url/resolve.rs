use url::Host;

/// Expands a raw link reference into the address recorded in the sitemap
///
/// # Resolution Rules
///
/// 1. Bookmarks (`#section`) are appended to the page URL, so they keep their
///    literal fragment instead of being resolved against a host
/// 2. The resolution host is the `<base href>` value when present and
///    non-blank, otherwise the crawl domain; it always ends with one `/`
/// 3. Root-relative references (`/path`, but not `//host`) are joined onto
///    the resolution host
/// 4. References that parse as a bare host name or IP literal (`about`,
///    `page.html`, `10.0.0.1`) are prefixed with the resolution host
/// 5. Everything else (absolute, protocol-relative and path-like references)
///    is returned unchanged
///
/// Step 4 is a heuristic: any single token that is a valid DNS label
/// sequence counts as host-like, so file names get prefixed while
/// `dir/page` does not.
///
/// # Arguments
///
/// * `link` - The reference as it appeared in the attribute
/// * `page_url` - The URL of the page the reference was found on
/// * `base_ref` - The page's `<base href>` value, if any
/// * `domain` - The crawl domain
///
/// # Examples
///
/// ```
/// use sitemap_ripple::url::resolve;
///
/// assert_eq!(resolve("#top", "https://example.com", None, "https://example.com"), "https://example.com/#top");
/// assert_eq!(resolve("/about", "https://example.com/a", None, "https://example.com"), "https://example.com/about");
/// assert_eq!(resolve("//cdn.example.com/x.js", "https://example.com", None, "https://example.com"), "//cdn.example.com/x.js");
/// ```
pub fn resolve(link: &str, page_url: &str, base_ref: Option<&str>, domain: &str) -> String {
    if link.trim().starts_with('#') {
        return format!("{}/{}", page_url.trim_matches('/'), link);
    }

    let host = match base_ref {
        Some(base) if !base.trim().is_empty() => base,
        _ => domain,
    };
    let host = format!("{}/", host.trim_end_matches('/'));

    if link.starts_with('/') && !link.starts_with("//") {
        return format!("{}{}", host, link.trim_start_matches('/'));
    }

    if is_host_like(link) {
        return format!("{}{}", host, link);
    }

    link.to_string()
}

/// Returns true if the whole reference parses as a host (domain, IPv4 or IPv6)
///
/// Parse failures count as "not a host", which leaves the reference as is.
fn is_host_like(link: &str) -> bool {
    if link.is_empty() {
        return false;
    }
    Host::parse(link).is_ok()
}
