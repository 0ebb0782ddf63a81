//! URL handling module for Blog-Lens
//!
//! This module provides link resolution, domain extraction and the
//! same-site check used by link discovery.

mod domain;

use url::Url;

// Re-export main functions
pub use domain::{extract_domain, same_origin, site_host};

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// Any fragment is dropped from the resolved URL so that `/post#comments`
/// and `/post` resolve to the same page.
///
/// # Examples
///
/// ```
/// use blog_lens::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/blog/").unwrap();
/// let resolved = resolve_link("hello-world#top", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://example.com/blog/hello-world");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    // Skip empty hrefs
    if href.is_empty() {
        return None;
    }

    // Skip special schemes
    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    // Skip fragment-only links (same page anchors)
    if href.starts_with('#') {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url)
}

/// Returns the non-empty path segments of a URL
pub fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/blog/").unwrap()
    }

    #[test]
    fn test_resolve_absolute_link() {
        let resolved = resolve_link("https://other.com/page", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://other.com/page");
    }

    #[test]
    fn test_resolve_root_relative_link() {
        let resolved = resolve_link("/news/launch", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/news/launch");
    }

    #[test]
    fn test_resolve_path_relative_link() {
        let resolved = resolve_link("first-post", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/blog/first-post");
    }

    #[test]
    fn test_resolve_strips_fragment() {
        let resolved = resolve_link("/blog/post#comments", &base_url()).unwrap();
        assert_eq!(resolved.as_str(), "https://example.com/blog/post");
    }

    #[test]
    fn test_skip_special_schemes() {
        assert!(resolve_link("javascript:void(0)", &base_url()).is_none());
        assert!(resolve_link("JavaScript:void(0)", &base_url()).is_none());
        assert!(resolve_link("mailto:test@example.com", &base_url()).is_none());
        assert!(resolve_link("tel:+1234567890", &base_url()).is_none());
        assert!(resolve_link("data:text/html,<h1>x</h1>", &base_url()).is_none());
        assert!(resolve_link("ftp://example.com/file", &base_url()).is_none());
    }

    #[test]
    fn test_skip_fragment_only_and_empty() {
        assert!(resolve_link("#section", &base_url()).is_none());
        assert!(resolve_link("   ", &base_url()).is_none());
    }

    #[test]
    fn test_path_segments() {
        let url = Url::parse("https://example.com/blog//2024/post/").unwrap();
        assert_eq!(path_segments(&url), vec!["blog", "2024", "post"]);

        let root = Url::parse("https://example.com/").unwrap();
        assert!(path_segments(&root).is_empty());
    }
}
