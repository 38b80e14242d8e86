use super::domain::extract_domain;
use url::Url;

/// Determines whether a resolved link lives on the crawl domain
///
/// Both sides are lowercased, stripped of any `www.` host prefix and forced
/// onto a dummy `http://` scheme before parsing, so `https` vs `http` and
/// `www.` vs bare host never affect the result. Only the hosts are compared.
///
/// Anything that fails to parse is treated as not crawlable.
///
/// # Examples
///
/// ```
/// use sitemap_ripple::url::can_be_crawled;
///
/// assert!(can_be_crawled("https://bbc.com/x", "http://www.bbc.com"));
/// assert!(!can_be_crawled("https://cnn.com/x", "http://www.bbc.com"));
/// ```
pub fn can_be_crawled(link: &str, domain: &str) -> bool {
    match (host_of(link), host_of(domain)) {
        (Some(link_host), Some(domain_host)) => link_host == domain_host,
        _ => false,
    }
}

/// Returns true if `link` points at the same page as `page_url`
///
/// Hosts are compared case-insensitively and path plus query must match
/// exactly. Scheme, port and fragment are ignored, so `https://a.com/#top`
/// is the same page as `https://a.com`.
pub fn is_same_as_page_url(link: &str, page_url: &str) -> bool {
    let (Ok(link), Ok(page)) = (Url::parse(link), Url::parse(page_url)) else {
        return false;
    };

    let hosts_match = match (extract_domain(&link), extract_domain(&page)) {
        (Some(a), Some(b)) => a == b,
        (None, None) => true,
        _ => false,
    };

    hosts_match && link.path() == page.path() && link.query() == page.query()
}

/// Parses the host out of a link after scheme and `www.` coercion
fn host_of(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase().replace("/www.", "/");
    let without_www = lowered.strip_prefix("www.").unwrap_or(&lowered);
    let without_scheme = without_www
        .strip_prefix("https://")
        .or_else(|| without_www.strip_prefix("http://"))
        .unwrap_or(without_www);
    let coerced = format!("http://{}", without_scheme);

    let url = Url::parse(&coerced).ok()?;
    extract_domain(&url).filter(|host| !host.is_empty())
}
