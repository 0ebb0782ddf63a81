//! Integration tests for Blog-Lens
//!
//! These tests use wiremock to serve company blogs and exercise fetching,
//! the per-company pipeline and full runs end-to-end.

mod fetch_tests;
mod pipeline_tests;
mod run_tests;

use blog_lens::config::{
    AnalysisConfig, Config, DiscoveryConfig, ExtractionConfig, FetcherConfig, InputConfig,
    OutputConfig,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration without courtesy delays
pub fn create_test_config(
    companies_csv: &str,
    performance_csv: Option<String>,
    db_path: &str,
) -> Config {
    Config {
        fetcher: FetcherConfig {
            min_delay_ms: 0,
            max_delay_ms: 0,
            ..FetcherConfig::default()
        },
        discovery: DiscoveryConfig::default(),
        extraction: ExtractionConfig::default(),
        analysis: AnalysisConfig::default(),
        input: InputConfig {
            companies_csv: companies_csv.to_string(),
            performance_csv,
        },
        output: OutputConfig {
            database_path: db_path.to_string(),
        },
    }
}

/// A post page with a proper article container
pub fn article_page(title: &str, body: &str) -> String {
    format!(
        r#"<html><head><title>{title} | Blog</title>
        <meta property="article:published_time" content="2024-04-02T09:00:00Z">
        <meta property="article:section" content="Engineering">
        </head><body>
        <nav>Home Blog Careers</nav>
        <article><h1>{title}</h1><p>{body}</p></article>
        <footer>Copyright</footer>
        </body></html>"#
    )
}

pub const GOOD_BODY: &str = "In this post we explain how to structure a data pipeline. \
    You will learn how to split ingestion from analysis. Each stage stays small and testable. \
    The guide ends with a short checklist for your own team.";

/// Serves `body` as HTML at `route`
pub async fn serve(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a blog at `/blog` with one good post, one page without an article
/// container, one missing post and one cross-origin link
pub async fn mount_mixed_blog(server: &MockServer) {
    serve(
        server,
        "/blog",
        r#"<html><body>
            <a href="/blog/post-one">One</a>
            <a href="/blog/post-two">Two</a>
            <a href="/blog/missing">Missing</a>
            <a href="/blog/tag/rust">Tag listing</a>
            <a href="https://other.example.com/blog/elsewhere">Elsewhere</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    serve(server, "/blog/post-one", article_page("Pipeline Basics", GOOD_BODY)).await;

    serve(
        server,
        "/blog/post-two",
        "<html><body><div class=\"promo\">Sign up now</div></body></html>".to_string(),
    )
    .await;

    // /blog/missing falls through to wiremock's default 404
}
