use crate::{UrlError, UrlResult};
use url::{Host, Url};

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// URLs without a host (`mailto:`, `data:`) return None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitemap_ripple::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks that a seed is either a bare host name / IP address or an absolute URL
///
/// Accepts the forms a user would type: `example.com`, `10.0.0.1`,
/// `https://www.example.com/`, `http://example.com:8080`.
///
/// # Returns
///
/// * `Ok(())` - The seed can be crawled from
/// * `Err(UrlError)` - The seed is blank or neither a host nor a URL with a host
pub fn validate_seed(seed: &str) -> UrlResult<()> {
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(UrlError::InvalidSeed("empty seed".to_string()));
    }

    if Host::parse(seed).is_ok() {
        return Ok(());
    }

    let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;
    if url.cannot_be_a_base() {
        return Err(UrlError::InvalidSeed(seed.to_string()));
    }

    extract_domain(&url)
        .filter(|host| !host.is_empty())
        .map(|_| ())
        .ok_or(UrlError::MissingDomain)
}

/// Turns a validated seed into an address that can be fetched
///
/// Bare host names and IP addresses get an `http://` prefix; absolute URLs
/// are returned trimmed but otherwise unchanged.
///
/// # Examples
///
/// ```
/// use sitemap_ripple::url::seed_address;
///
/// assert_eq!(seed_address("example.com"), "http://example.com");
/// assert_eq!(seed_address("https://example.com/"), "https://example.com/");
/// ```
pub fn seed_address(seed: &str) -> String {
    let seed = seed.trim();
    if Host::parse(seed).is_ok() {
        format!("http://{}", seed)
    } else {
        seed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_without_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(extract_domain(&url), None);
    }

    #[test]
    fn test_seed_bare_domain() {
        assert!(validate_seed("wiprodigital.com").is_ok());
        assert!(validate_seed("wipro.digital").is_ok());
    }

    #[test]
    fn test_seed_ip_address() {
        assert!(validate_seed("52.7.121.233").is_ok());
    }

    #[test]
    fn test_seed_absolute_urls() {
        assert!(validate_seed("https://www.wiprodigital.com").is_ok());
        assert!(validate_seed("http://wiprodigital.com/").is_ok());
        assert!(validate_seed("https://52.7.121.233:443/").is_ok());
    }

    #[test]
    fn test_seed_rejects_garbage() {
        assert!(validate_seed("").is_err());
        assert!(validate_seed("   ").is_err());
        assert!(validate_seed("not a url").is_err());
        assert!(validate_seed("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_seed_address_prefixes_hosts() {
        assert_eq!(seed_address("www.example.com"), "http://www.example.com");
        assert_eq!(seed_address(" 10.0.0.1 "), "http://10.0.0.1");
        assert_eq!(seed_address("http://example.com/a"), "http://example.com/a");
    }
}
