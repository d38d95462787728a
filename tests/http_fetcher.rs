//! `HttpFetcher` against a local mock server.

use std::time::Duration;

use ddg_sift::{HttpFetcher, PageFetcher, SearchError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> HttpFetcher {
    HttpFetcher::new("ddg-sift-test/1.0", Duration::from_secs(5)).unwrap()
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(html("<p>hello</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetcher()
        .fetch(&format!("{}/page", server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<p>hello</p>");
}

#[tokio::test]
async fn test_fetch_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "ddg-sift-test/1.0"))
        .respond_with(html("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetcher().fetch(&server.uri()).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_submit_form_posts_encoded_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/html/"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("q=rust+async"))
        .and(body_string_contains("ia=web"))
        .respond_with(html("<div class=\"result\"></div>"))
        .expect(1)
        .mount(&server)
        .await;

    let body = fetcher()
        .submit_form(
            &format!("{}/html/", server.uri()),
            &[("q", "rust async"), ("ia", "web")],
        )
        .await
        .unwrap();
    assert!(body.contains("result"));
}

#[tokio::test]
async fn test_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = fetcher().fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(err, SearchError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_rejects_binary_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7".to_vec()),
        )
        .mount(&server)
        .await;

    let err = fetcher().fetch(&server.uri()).await.unwrap_err();
    match err {
        SearchError::UnsupportedContent { content_type, .. } => {
            assert_eq!(content_type, "application/pdf")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html("late").set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new("ddg-sift-test/1.0", Duration::from_millis(100)).unwrap();
    let err = fetcher.fetch(&server.uri()).await.unwrap_err();
    assert!(matches!(err, SearchError::Timeout));
}

#[tokio::test]
async fn test_searcher_over_http() {
    use ddg_sift::engines::DuckDuckGo;
    use ddg_sift::{SearchConfig, SearchQuery, Searcher};
    use std::sync::Arc;

    let server = MockServer::start().await;
    let provider_page = format!(
        r#"<div class="result">
            <a class="result__a" href="{0}/doc">Tokio tutorial</a>
            <a class="result__url" href="{0}/doc">doc</a>
            <a class="result__snippet">Learn tokio, the async runtime.</a>
        </div>"#,
        server.uri()
    );
    Mock::given(method("POST"))
        .and(path("/html/"))
        .and(body_string_contains("q=tokio"))
        .respond_with(html(&provider_page))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(html("<html><body><main>Tokio runs futures.</main></body></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = SearchConfig::new()
        .with_cache(false)
        .with_retry(1, Duration::ZERO);
    let searcher = Searcher::with_fetcher(config, Arc::new(fetcher()))
        .with_engine(DuckDuckGo::new().with_endpoint(format!("{}/html/", server.uri())));

    let results = searcher.search(SearchQuery::new("tokio")).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Tokio tutorial");
    assert_eq!(results[0].url, format!("{}/doc", server.uri()));
    assert_eq!(results[0].content, "Tokio runs futures.");
}
