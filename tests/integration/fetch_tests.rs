//! Fetcher behavior against a live mock server

use crate::serve;
use blog_lens::crawler::Fetcher;
use blog_lens::FetchCause;
use reqwest::Client;
use std::time::{Duration, Instant};
use wiremock::MockServer;

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;
    serve(&server, "/blog", "<html>hello</html>".to_string()).await;

    let mut fetcher = Fetcher::with_client(Client::new(), Duration::ZERO, Duration::ZERO);
    let body = fetcher
        .fetch(&format!("{}/blog", server.uri()))
        .await
        .unwrap();

    assert_eq!(body, "<html>hello</html>");
    assert_eq!(fetcher.requests_issued(), 1);
}

#[tokio::test]
async fn test_non_success_status_is_fetch_error() {
    let server = MockServer::start().await;

    let mut fetcher = Fetcher::with_client(Client::new(), Duration::ZERO, Duration::ZERO);
    let url = format!("{}/blog/missing", server.uri());
    let err = fetcher.fetch(&url).await.unwrap_err();

    assert_eq!(err.url, url);
    assert_eq!(err.cause, FetchCause::Status(404));
}

#[tokio::test]
async fn test_delay_applies_after_first_request() {
    let server = MockServer::start().await;
    serve(&server, "/a", "a".to_string()).await;
    serve(&server, "/b", "b".to_string()).await;

    let delay = Duration::from_millis(300);
    let mut fetcher = Fetcher::with_client(Client::new(), delay, delay);

    let start = Instant::now();
    fetcher.fetch(&format!("{}/a", server.uri())).await.unwrap();
    let first = start.elapsed();
    fetcher.fetch(&format!("{}/b", server.uri())).await.unwrap();
    let total = start.elapsed();

    assert!(first < delay, "first request should not wait");
    assert!(total >= delay, "second request should wait");
}
