//! Full run tests: CSV in, SQLite out

use crate::{article_page, create_test_config, mount_mixed_blog, serve, GOOD_BODY};
use blog_lens::crawler::{Coordinator, RunOptions};
use blog_lens::storage::{RunStatus, Storage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::MockServer;

fn write_companies(dir: &Path, rows: &[(i64, &str, String)]) -> String {
    let mut csv = String::from("company_id,company_name,company_url\n");
    for (id, name, url) in rows {
        csv.push_str(&format!("{},{},{}\n", id, name, url));
    }
    let path = dir.join("companies.csv");
    fs::write(&path, csv).unwrap();
    path.to_string_lossy().into_owned()
}

fn write_performance(dir: &Path, rows: &str) -> String {
    let path = dir.join("performance.csv");
    fs::write(&path, format!("metrics_id,text_id,views,CTR,CR,reshares\n{}", rows)).unwrap();
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn test_full_run_is_idempotent() {
    let server = MockServer::start().await;
    mount_mixed_blog(&server).await;

    let dir = TempDir::new().unwrap();
    let companies = write_companies(
        dir.path(),
        &[
            (1, "Acme", format!("{}/blog", server.uri())),
            (2, "Broken", "not a url".to_string()),
        ],
    );
    let performance = write_performance(dir.path(), "1,1,2500,0.031,0.004,17\n2,999,10,0.1,0.0,0\n");
    let db_path = dir.path().join("blog.db");
    let db = db_path.to_string_lossy().into_owned();

    let config = create_test_config(&companies, Some(performance.clone()), &db);
    let mut coordinator = Coordinator::new(config, "hash-1").unwrap();
    let summary = coordinator.run(&RunOptions::default()).await.unwrap();

    assert_eq!(summary.companies_processed, 1);
    assert_eq!(summary.companies_skipped, 1);
    assert_eq!(summary.posts_stored, 1);
    assert_eq!(summary.posts_failed, 2);
    assert_eq!(summary.performance_loaded, 1);
    assert_eq!(summary.performance_skipped, 1);

    let post_url = format!("{}/blog/post-one", server.uri());
    let storage = coordinator.storage();
    assert_eq!(storage.count_posts().unwrap(), 1);
    assert_eq!(storage.list_companies().unwrap().len(), 2);
    let (text_id, stored) = storage.get_post(1, &post_url).unwrap().unwrap();
    assert_eq!(text_id, 1);
    assert_eq!(stored.title(), Some("Pipeline Basics"));

    let run = storage.get_run(summary.run_id).unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.config_hash, "hash-1");
    assert_eq!(run.posts_stored, 1);
    drop(coordinator);

    // second run over the same inputs replaces rather than appends
    let config = create_test_config(&companies, Some(performance), &db);
    let mut coordinator = Coordinator::new(config, "hash-1").unwrap();
    let second = coordinator.run(&RunOptions::default()).await.unwrap();
    assert_ne!(second.run_id, summary.run_id);
    assert_eq!(second.posts_stored, 1);

    let storage = coordinator.storage();
    assert_eq!(storage.count_posts().unwrap(), 1);
    assert_eq!(storage.count_performance_rows().unwrap(), 1);
    let (rerun_id, rerun) = storage.get_post(1, &post_url).unwrap().unwrap();
    assert_eq!(rerun_id, text_id);
    assert_eq!(rerun, stored);
}

#[tokio::test]
async fn test_limit_stops_run() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/blog",
        r#"<a href="/blog/post-a">A</a><a href="/blog/post-b">B</a>"#.to_string(),
    )
    .await;
    serve(&server, "/blog/post-a", article_page("A", GOOD_BODY)).await;
    serve(&server, "/blog/post-b", article_page("B", GOOD_BODY)).await;

    let dir = TempDir::new().unwrap();
    let companies = write_companies(
        dir.path(),
        &[
            (1, "Acme", format!("{}/blog", server.uri())),
            (2, "Acme Again", format!("{}/blog", server.uri())),
        ],
    );
    let db = dir.path().join("blog.db").to_string_lossy().into_owned();

    let mut coordinator = Coordinator::new(create_test_config(&companies, None, &db), "h").unwrap();
    let summary = coordinator
        .run(&RunOptions {
            company: None,
            limit: Some(1),
        })
        .await
        .unwrap();

    assert_eq!(summary.posts_stored, 1);
    assert_eq!(summary.companies_processed, 1);
    assert_eq!(coordinator.storage().count_posts().unwrap(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_company_filter() {
    let server = MockServer::start().await;
    mount_mixed_blog(&server).await;

    let dir = TempDir::new().unwrap();
    let companies = write_companies(
        dir.path(),
        &[
            (1, "Acme", "not a url".to_string()),
            (7, "Target", format!("{}/blog", server.uri())),
        ],
    );
    let db = dir.path().join("blog.db").to_string_lossy().into_owned();

    let mut coordinator = Coordinator::new(create_test_config(&companies, None, &db), "h").unwrap();
    let summary = coordinator
        .run(&RunOptions {
            company: Some(7),
            limit: None,
        })
        .await
        .unwrap();

    assert_eq!(summary.companies_processed, 1);
    assert_eq!(summary.companies_skipped, 0);

    let storage = coordinator.storage();
    let companies = storage.list_companies().unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].company_id, 7);
    assert!(storage
        .get_post(7, &format!("{}/blog/post-one", server.uri()))
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_missing_companies_csv_is_fatal() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("blog.db").to_string_lossy().into_owned();
    let missing = dir.path().join("nope.csv").to_string_lossy().into_owned();

    let mut coordinator = Coordinator::new(create_test_config(&missing, None, &db), "h").unwrap();
    assert!(coordinator.run(&RunOptions::default()).await.is_err());

    let run = coordinator.storage().get_run(coordinator.run_id()).unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert_eq!(run.posts_stored, 0);
}

#[tokio::test]
async fn test_failed_run_records_status_and_tallies() {
    let server = MockServer::start().await;
    mount_mixed_blog(&server).await;

    let dir = TempDir::new().unwrap();
    let companies = write_companies(dir.path(), &[(1, "Acme", format!("{}/blog", server.uri()))]);
    let missing = dir.path().join("nope.csv").to_string_lossy().into_owned();
    let db = dir.path().join("blog.db").to_string_lossy().into_owned();

    let mut coordinator =
        Coordinator::new(create_test_config(&companies, Some(missing), &db), "h").unwrap();
    let err = coordinator.run(&RunOptions::default()).await.unwrap_err();
    assert!(matches!(err, blog_lens::LensError::Ingest(_)));

    let storage = coordinator.storage();
    assert_eq!(storage.count_posts().unwrap(), 1);

    let run = storage.get_run(coordinator.run_id()).unwrap();
    assert_eq!(run.status, RunStatus::Failed);
    assert_eq!(run.posts_stored, 1);
    assert_eq!(run.posts_failed, 2);
    assert!(run.finished_at.is_some());
}
