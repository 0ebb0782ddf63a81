use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (which shouldn't happen for valid HTTP(S) URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use blog_lens::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the site host: the lowercase domain without a leading `www.`
pub fn site_host(url: &Url) -> Option<String> {
    extract_domain(url).map(|host| match host.strip_prefix("www.") {
        Some(bare) => bare.to_string(),
        None => host,
    })
}

/// Checks whether two URLs belong to the same site
///
/// Hosts are compared case-insensitively with a `www.` prefix ignored, and
/// explicit ports must match (`Url::port` omits scheme defaults). The scheme
/// is not compared, so an `http` link on an `https` blog is the same site.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use blog_lens::url::same_origin;
///
/// let root = Url::parse("https://www.example.com/blog").unwrap();
/// let post = Url::parse("https://example.com/blog/hello").unwrap();
/// let other = Url::parse("https://example.org/blog/hello").unwrap();
/// assert!(same_origin(&root, &post));
/// assert!(!same_origin(&root, &other));
/// ```
pub fn same_origin(a: &Url, b: &Url) -> bool {
    match (site_host(a), site_host(b)) {
        (Some(host_a), Some(host_b)) => host_a == host_b && a.port() == b.port(),
        _ => false,
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
    fn test_site_host_strips_www() {
        let url = Url::parse("https://WWW.Example.com/blog").unwrap();
        assert_eq!(site_host(&url), Some("example.com".to_string()));

        let url = Url::parse("https://blog.example.com/").unwrap();
        assert_eq!(site_host(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_same_origin_subdomain_is_different() {
        let a = Url::parse("https://example.com/blog").unwrap();
        let b = Url::parse("https://blog.example.com/post").unwrap();
        assert!(!same_origin(&a, &b));
    }

    #[test]
    fn test_same_origin_ignores_scheme() {
        let a = Url::parse("https://example.com/blog").unwrap();
        let b = Url::parse("http://example.com/blog/post").unwrap();
        assert!(same_origin(&a, &b));
    }

    #[test]
    fn test_same_origin_requires_matching_port() {
        let a = Url::parse("http://127.0.0.1:8080/blog").unwrap();
        let b = Url::parse("http://127.0.0.1:8080/blog/post").unwrap();
        let c = Url::parse("http://127.0.0.1:9090/blog/post").unwrap();
        assert!(same_origin(&a, &b));
        assert!(!same_origin(&a, &c));
    }
}
