//! Integration tests: real curl transport against a scripted local HTTP server.

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use cdxfetch_core::{CurlTransport, Disposition, FetchClient, FetchError, GetRequest, KnownHosts};
use common::status_server::{self, Reply};

fn client() -> FetchClient<CurlTransport> {
    FetchClient::new(CurlTransport::direct(), Arc::new(KnownHosts::seeded()))
}

#[tokio::test]
async fn retries_503_then_returns_body() {
    let server = status_server::start(vec![
        Reply::status(503).body("slow down"),
        Reply::status(200).body("com,example)/ 20240101000000 {}"),
    ]);
    let client = client();

    let start = Instant::now();
    let fetched = client
        .get(GetRequest::new(&server.base_url).param("url", "example.com/*"))
        .await
        .expect("get");

    assert_eq!(fetched.response.status, 200);
    assert_eq!(fetched.disposition, Disposition::Success);
    assert_eq!(fetched.response.text(), "com,example)/ 20240101000000 {}");
    assert_eq!(fetched.stats.retries, 1);
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert_eq!(server.requests().len(), 2);
    assert!(client.known_hosts().contains("127.0.0.1"));
}

#[tokio::test]
async fn sends_normalized_query_and_user_agent() {
    let server = status_server::start(vec![Reply::status(200)]);
    client()
        .get(
            GetRequest::new(&server.base_url)
                .param("from_ts", "2024")
                .param("limit", "7"),
        )
        .await
        .expect("get");

    let head = &server.requests()[0];
    let request_line = head.lines().next().unwrap();
    assert!(request_line.starts_with("GET /?"));
    assert!(request_line.contains("from=2024"));
    assert!(request_line.contains("limit=7"));
    assert!(!request_line.contains("from_ts"));
    let ua = format!("User-Agent: cdxfetch/{}", env!("CARGO_PKG_VERSION"));
    assert!(head.contains(&ua), "missing {ua} in {head}");
}

#[tokio::test]
async fn index_query_404_is_empty_result() {
    let server = status_server::start(vec![Reply::status(404).body("No Captures found")]);
    let fetched = client()
        .get(GetRequest::new(&server.base_url).index_query(true))
        .await
        .expect("benign empty");
    assert_eq!(fetched.disposition, Disposition::BenignEmpty);
    assert_eq!(fetched.response.status, 404);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn plain_400_is_fatal() {
    let server = status_server::start(vec![Reply::status(400)]);
    let err = client()
        .get(GetRequest::new(&server.base_url))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidRequest { status: 400, .. }));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn redirect_is_returned_not_followed() {
    let server = status_server::start(vec![
        Reply::status(302).location("http://127.0.0.1:9/elsewhere"),
        Reply::status(200),
    ]);
    let fetched = client()
        .get(GetRequest::new(&server.base_url))
        .await
        .expect("redirect");
    assert_eq!(fetched.disposition, Disposition::Redirect);
    assert_eq!(
        fetched.response.header("location"),
        Some("http://127.0.0.1:9/elsewhere")
    );
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn unknown_hostname_fails_fast() {
    let start = Instant::now();
    let err = client()
        .get(GetRequest::new("http://cdxfetch-no-such-host.invalid/cdx"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::InvalidHostname { .. }), "{err:?}");
    assert!(start.elapsed() < Duration::from_secs(30));
}

#[tokio::test]
async fn cancelling_stops_a_hung_request() {
    let url = status_server::start_silent();
    let start = Instant::now();
    let res = tokio::time::timeout(
        Duration::from_millis(300),
        client().get(GetRequest::new(url)),
    )
    .await;
    assert!(res.is_err());
    assert!(start.elapsed() < Duration::from_secs(5));
}
