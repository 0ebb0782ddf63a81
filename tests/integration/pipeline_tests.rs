//! Per-company pipeline tests

use crate::{article_page, create_test_config, mount_mixed_blog, serve, GOOD_BODY};
use blog_lens::crawler::Pipeline;
use blog_lens::{CompanyRef, LensError, Tone};
use std::ops::ControlFlow;
use wiremock::MockServer;

fn pipeline() -> Pipeline {
    let config = create_test_config("unused.csv", None, "unused.db");
    Pipeline::from_config(&config).unwrap()
}

fn company(server: &MockServer) -> CompanyRef {
    CompanyRef {
        company_id: 1,
        name: "Acme".to_string(),
        root_url: format!("{}/blog", server.uri()),
    }
}

#[tokio::test]
async fn test_failures_are_isolated_per_post() {
    let server = MockServer::start().await;
    mount_mixed_blog(&server).await;

    let mut pipeline = pipeline();
    let mut posts = Vec::new();
    let report = pipeline
        .process_company_with(&company(&server), |post| {
            posts.push(post);
            ControlFlow::Continue(())
        })
        .await
        .unwrap();

    assert_eq!(report.candidates, 3);
    assert_eq!(report.processed, 1);
    assert_eq!(report.fetch_failures, 1);
    assert_eq!(report.extraction_failures, 1);
    assert!(!report.stopped_early);

    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.company_id, 1);
    assert_eq!(post.url, format!("{}/blog/post-one", server.uri()));
    assert_eq!(post.title(), Some("Pipeline Basics"));
    assert_eq!(post.post.category.as_deref(), Some("Engineering"));
    assert_eq!(
        post.post.publication_date,
        chrono::NaiveDate::from_ymd_opt(2024, 4, 2)
    );
    assert!(!post.post.content_text.contains("Careers"));
    assert_eq!(post.analysis.tone_label, Tone::Informative);
    assert_eq!(post.analysis.avg_reading_time, 1);

    // root + three candidates
    assert_eq!(pipeline.requests_issued(), 4);
}

#[tokio::test]
async fn test_cross_origin_link_is_never_fetched() {
    let server = MockServer::start().await;
    mount_mixed_blog(&server).await;

    let posts = pipeline().process_company(&company(&server)).await.unwrap();
    assert!(posts.iter().all(|p| p.url.starts_with(&server.uri())));
}

#[tokio::test]
async fn test_rerun_yields_identical_posts() {
    let server = MockServer::start().await;
    mount_mixed_blog(&server).await;

    let mut pipeline = pipeline();
    let first = pipeline.process_company(&company(&server)).await.unwrap();
    let second = pipeline.process_company(&company(&server)).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_break_stops_further_fetches() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/blog",
        r#"<a href="/blog/first-post">1</a><a href="/blog/second-post">2</a>"#.to_string(),
    )
    .await;
    serve(&server, "/blog/first-post", article_page("First", GOOD_BODY)).await;
    serve(&server, "/blog/second-post", article_page("Second", GOOD_BODY)).await;

    let mut pipeline = pipeline();
    let mut seen = 0;
    let report = pipeline
        .process_company_with(&company(&server), |_| {
            seen += 1;
            ControlFlow::Break(())
        })
        .await
        .unwrap();

    assert_eq!(seen, 1);
    assert!(report.stopped_early);
    assert_eq!(pipeline.requests_issued(), 2);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/blog/second-post"));
}

#[tokio::test]
async fn test_root_without_posts_is_empty() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/blog",
        r#"<html><body><a href="/about">About</a></body></html>"#.to_string(),
    )
    .await;

    let posts = pipeline().process_company(&company(&server)).await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_missing_root_page_is_fetch_error() {
    let server = MockServer::start().await;

    let err = pipeline()
        .process_company(&company(&server))
        .await
        .unwrap_err();
    match err {
        LensError::Fetch(e) => assert_eq!(e.url, format!("{}/blog", server.uri())),
        other => panic!("expected fetch error, got {:?}", other),
    }
}
