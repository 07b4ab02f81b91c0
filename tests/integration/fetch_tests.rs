//! Integration tests for the news fetcher
//!
//! These tests use wiremock to serve news pages and run the blocking fetcher
//! through the isolate boundary, the same way the worker pool does.

use newsfetch::config::FetchConfig;
use newsfetch::fetch::{extract_google_news, ExtractorTable, NewsFetcher};
use newsfetch::pool::{isolate, CancelToken, FetchOperation, NewsItem, Task, TaskError, TaskSource, WorkerPool};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOOGLE_PAGE: &str = r#"<html><body>
    <div class="esc-layout-article-cell">
        <h2 class="esc-lead-article-title"><a href="/a">First story</a></h2>
        <div class="esc-lead-snippet-wrapper">First snippet</div>
    </div>
    <div class="esc-layout-article-cell">
        <h2 class="esc-lead-article-title"><a href="/b">Second story</a></h2>
        <div class="esc-lead-snippet-wrapper">Second snippet</div>
    </div>
</body></html>"#;

fn test_config() -> FetchConfig {
    FetchConfig {
        request_timeout: 5,
        read_limit: 1_000_000,
        user_agent: "newsfetch-test/1.0".to_string(),
    }
}

/// Routes the mock server's `/news` path to the Google News extractor
fn local_fetcher(config: FetchConfig) -> Arc<NewsFetcher> {
    let table = ExtractorTable::new().with_route("127.0.0.1", "/news", extract_google_news);
    Arc::new(NewsFetcher::new(config, table))
}

async fn fetch(fetcher: &Arc<NewsFetcher>, target: String) -> Result<Vec<NewsItem>, TaskError> {
    let fetcher = Arc::clone(fetcher);
    isolate(move || fetcher.fetch(&target)).await
}

async fn serve(mock_server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_fetch_and_extract() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/news", GOOGLE_PAGE).await;

    let fetcher = local_fetcher(test_config());
    let items = fetch(&fetcher, format!("{}/news", mock_server.uri()))
        .await
        .expect("fetch failed");

    assert_eq!(
        items,
        vec![
            NewsItem::new("First story", "First snippet"),
            NewsItem::new("Second story", "Second snippet"),
        ]
    );
}

#[tokio::test]
async fn test_unmatched_path_is_empty_success() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/elsewhere", GOOGLE_PAGE).await;

    let fetcher = local_fetcher(test_config());
    let items = fetch(&fetcher, format!("{}/elsewhere", mock_server.uri()))
        .await
        .expect("fetch failed");

    assert!(items.is_empty());
}

#[tokio::test]
async fn test_http_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let fetcher = local_fetcher(test_config());
    let err = fetch(&fetcher, format!("{}/news", mock_server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.kind, "Status");
    assert!(err.message.contains("503"));
}

#[tokio::test]
async fn test_request_timeout() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(GOOGLE_PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let fetcher = local_fetcher(FetchConfig {
        request_timeout: 1,
        ..test_config()
    });
    let err = fetch(&fetcher, format!("{}/news", mock_server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.kind, "Timeout");
}

#[tokio::test]
async fn test_read_limit_truncates_document() {
    let first = r#"<html><body>
        <div class="esc-layout-article-cell">
            <div class="esc-lead-article-title">Kept</div>
            <div class="esc-lead-snippet-wrapper">Kept body</div>
        </div>"#;
    let second = r#"
        <div class="esc-layout-article-cell">
            <div class="esc-lead-article-title">Dropped</div>
            <div class="esc-lead-snippet-wrapper">Dropped body</div>
        </div>
    </body></html>"#;

    let mock_server = MockServer::start().await;
    serve(&mock_server, "/news", &format!("{}{}", first, second)).await;

    let fetcher = local_fetcher(FetchConfig {
        read_limit: first.len() as u64,
        ..test_config()
    });
    let items = fetch(&fetcher, format!("{}/news", mock_server.uri()))
        .await
        .expect("fetch failed");

    assert_eq!(items, vec![NewsItem::new("Kept", "Kept body")]);
}

#[tokio::test]
async fn test_cookies_follow_redirect_but_not_next_fetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/landing")
                .insert_header("set-cookie", "session=abc; Path=/"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(GOOGLE_PAGE))
        .mount(&mock_server)
        .await;

    let fetcher = local_fetcher(test_config());

    // The redirect target only answers when the cookie comes along.
    let redirected = fetch(&fetcher, format!("{}/news", mock_server.uri())).await;
    assert!(redirected.is_ok(), "redirected fetch failed: {:?}", redirected);

    // A fresh fetch starts with an empty cookie store.
    let direct = fetch(&fetcher, format!("{}/landing", mock_server.uri()))
        .await
        .unwrap_err();
    assert_eq!(direct.kind, "Status");
}

#[tokio::test]
async fn test_pool_with_news_fetcher() {
    let mock_server = MockServer::start().await;
    serve(&mock_server, "/news", GOOGLE_PAGE).await;

    let base = mock_server.uri();
    let targets = vec![
        format!("{}/news", base),
        format!("{}/missing", base),
        format!("{}/news", base),
    ];

    let table = ExtractorTable::new().with_route("127.0.0.1", "/news", extract_google_news);
    let pool = WorkerPool::new(NewsFetcher::new(test_config(), table));
    let source = TaskSource::new(targets.into_iter().map(Task::new));

    let report = pool.run(&source, 2, &CancelToken::new()).await;

    assert_eq!(report.completed, 2);
    assert_eq!(report.failed, 1);
}
