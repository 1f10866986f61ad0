//! Fetcher and webhook against a loopback HTTP server.

mod common;

use common::{StubServer, direct_client};
use sheet_notifier::error::NotifierError;
use sheet_notifier::notify::{Notifier, WebhookNotifier};
use sheet_notifier::sheet::{HttpSheetFetcher, SheetFetcher};

fn fetcher(url: &str) -> HttpSheetFetcher {
    HttpSheetFetcher::builder()
        .with_url(url)
        .with_client(direct_client())
        .build()
        .unwrap()
}

fn notifier(url: &str) -> WebhookNotifier {
    WebhookNotifier::builder()
        .with_url(url)
        .with_client(direct_client())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_fetch_parses_tsv() {
    let server = StubServer::start("200 OK", "id\tstatus\r\n1\tA\r\n2\tB\r\n").await;

    let sheet = fetcher(&server.url).fetch().await.unwrap();
    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet.last_row().unwrap().cell(1), "B");

    let request = server.request().await;
    assert!(request.starts_with("GET /hook HTTP/1.1"), "{request}");
}

#[tokio::test]
async fn test_fetch_error_status() {
    let server = StubServer::start("404 Not Found", "missing").await;

    let err = fetcher(&server.url).fetch().await.unwrap_err();
    match err {
        NotifierError::Fetch(msg) => assert!(msg.contains("404"), "{msg}"),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_empty_body() {
    let server = StubServer::start("200 OK", "").await;

    let err = fetcher(&server.url).fetch().await.unwrap_err();
    assert!(matches!(err, NotifierError::EmptyResponse));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher(&format!("http://{addr}/sheet")).fetch().await.unwrap_err();
    assert!(matches!(err, NotifierError::Fetch(_)));
}

#[tokio::test]
async fn test_webhook_posts_content_json() {
    let server = StubServer::start("204 No Content", "").await;

    notifier(&server.url).send("New value: B").await.unwrap();

    let request = server.request().await;
    assert!(request.starts_with("POST /hook HTTP/1.1"), "{request}");
    assert!(
        request.to_lowercase().contains("content-type: application/json"),
        "{request}"
    );

    let body = request.split("\r\n\r\n").nth(1).unwrap();
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json, serde_json::json!({ "content": "New value: B" }));
}

#[tokio::test]
async fn test_webhook_transport_error_hides_token() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = notifier(&format!("http://{addr}/api/webhooks/123/SECRET_TOKEN"))
        .send("hi")
        .await
        .unwrap_err();

    assert!(matches!(err, NotifierError::Delivery(_)));
    let text = err.to_string();
    assert!(!text.contains("SECRET_TOKEN"), "{text}");
    assert!(!text.contains("/api/webhooks"), "{text}");
}

#[tokio::test]
async fn test_webhook_rejection_is_delivery_error() {
    let server = StubServer::start("500 Internal Server Error", "boom").await;

    let err = notifier(&server.url).send("hello").await.unwrap_err();
    match err {
        NotifierError::Delivery(msg) => {
            assert!(msg.contains("500"), "{msg}");
            assert!(msg.contains("boom"), "{msg}");
        }
        other => panic!("expected delivery error, got {other:?}"),
    }
}
