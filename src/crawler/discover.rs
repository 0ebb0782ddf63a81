//! Post-link discovery on a company's blog root page
//!
//! Every `<a href>` on the root page is resolved against the root URL and
//! run through a [`LinkPolicy`]. Qualifying links are kept in first-seen
//! order, exact repeats are dropped, and the list is cut at the policy's
//! `max_links`.

use crate::config::DiscoveryConfig;
use crate::model::CandidateLink;
use crate::url::{path_segments, resolve_link, same_origin};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Path segments that mark a blog section
const DEFAULT_POST_INDICATORS: &[&str] = &[
    "blog", "blogs", "post", "posts", "article", "articles", "news", "insights", "stories",
];

/// Path segments that mark listing, archive or utility pages
const DEFAULT_EXCLUDED_SEGMENTS: &[&str] = &[
    "page", "tag", "tags", "category", "categories", "author", "authors", "feed", "rss",
    "search", "login", "signup", "subscribe",
];

/// File extensions that can still be HTML posts
const HTML_EXTENSIONS: &[&str] = &["html", "htm", "php", "asp", "aspx"];

/// Tunable rules for deciding whether a link points at a single post
///
/// A link qualifies when all of these hold:
/// - it resolves to an http(s) URL on the same site as the root page
/// - it is not the root page itself
/// - it has at least `min_path_segments` non-empty path segments
/// - none of its segments is in `excluded_segments`
/// - its last segment is a slug: not purely numeric, not itself a post
///   indicator, and without a non-HTML file extension
/// - it lives in a blog section: some segment is a post indicator, some
///   segment is a year, or its path extends the root page's path
#[derive(Debug, Clone, PartialEq)]
pub struct LinkPolicy {
    pub max_links: usize,
    pub min_path_segments: usize,
    pub post_indicators: Vec<String>,
    pub excluded_segments: Vec<String>,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self::from(&DiscoveryConfig::default())
    }
}

impl From<&DiscoveryConfig> for LinkPolicy {
    fn from(config: &DiscoveryConfig) -> Self {
        let lowered = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.trim().to_lowercase()).collect()
        };
        let defaults = |items: &[&str]| -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        };

        Self {
            max_links: config.max_links,
            min_path_segments: config.min_path_segments,
            post_indicators: config
                .post_indicators
                .as_deref()
                .map(lowered)
                .unwrap_or_else(|| defaults(DEFAULT_POST_INDICATORS)),
            excluded_segments: config
                .excluded_segments
                .as_deref()
                .map(lowered)
                .unwrap_or_else(|| defaults(DEFAULT_EXCLUDED_SEGMENTS)),
        }
    }
}

impl LinkPolicy {
    /// Decides whether `url` looks like an individual post under `root_url`
    pub fn qualifies(&self, url: &Url, root_url: &Url) -> bool {
        if !same_origin(url, root_url) {
            return false;
        }

        let segments: Vec<String> = path_segments(url)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect();
        let root_segments: Vec<String> = path_segments(root_url)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect();

        if segments == root_segments && url.query() == root_url.query() {
            return false;
        }

        if segments.len() < self.min_path_segments {
            return false;
        }

        if segments
            .iter()
            .any(|s| self.excluded_segments.iter().any(|e| e == s))
        {
            return false;
        }

        let Some(last) = segments.last() else {
            return false;
        };
        if !self.is_slug(last) {
            return false;
        }

        let in_blog_section = segments
            .iter()
            .any(|s| self.post_indicators.iter().any(|i| i == s) || is_year(s));
        let extends_root = !root_segments.is_empty()
            && segments.len() > root_segments.len()
            && segments.starts_with(&root_segments);

        in_blog_section || extends_root
    }

    /// A slug names one page rather than an archive or a section
    fn is_slug(&self, segment: &str) -> bool {
        if !segment.chars().any(|c| c.is_alphabetic()) {
            return false;
        }

        if self.post_indicators.iter().any(|i| i == segment) {
            return false;
        }

        match segment.rsplit_once('.') {
            Some((stem, ext)) => !stem.is_empty() && HTML_EXTENSIONS.contains(&ext),
            None => true,
        }
    }
}

/// Four-digit year segment as used by date-based permalinks
fn is_year(segment: &str) -> bool {
    segment.len() == 4
        && segment.chars().all(|c| c.is_ascii_digit())
        && matches!(segment.parse::<u32>(), Ok(1990..=2100))
}

/// Extracts up to `policy.max_links` distinct post URLs from a root page
///
/// The result is deterministic for a given input and keeps first-seen order.
/// A page without post-like links yields an empty list.
///
/// # Example
///
/// ```
/// use blog_lens::crawler::{discover, LinkPolicy};
/// use url::Url;
///
/// let html = r#"<a href="/blog/hello-world">Hello</a><a href="https://other.com/blog/x">X</a>"#;
/// let root = Url::parse("https://example.com/blog").unwrap();
/// let links = discover(html, &root, &LinkPolicy::default());
/// assert_eq!(links, vec!["https://example.com/blog/hello-world".to_string()]);
/// ```
pub fn discover(root_html: &str, root_url: &Url, policy: &LinkPolicy) -> Vec<String> {
    let document = Html::parse_document(root_html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        if links.len() >= policy.max_links {
            break;
        }

        // Skip if it has the download attribute
        if element.value().attr("download").is_some() {
            continue;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(absolute_url) = resolve_link(href, root_url) else {
            continue;
        };

        if !policy.qualifies(&absolute_url, root_url) {
            continue;
        }

        let url = absolute_url.to_string();
        if seen.insert(url.clone()) {
            links.push(url);
        }
    }

    links
}

/// Runs discovery for one company and tags each link with its origin
pub fn discover_candidates(
    company_id: i64,
    root_html: &str,
    root_url: &Url,
    policy: &LinkPolicy,
) -> Vec<CandidateLink> {
    discover(root_html, root_url, policy)
        .into_iter()
        .map(|url| CandidateLink {
            url,
            discovered_from: company_id,
        })
        .collect()
}
