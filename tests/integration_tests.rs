//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: search request → places client → paginator

use nearby_pager::{
    Location, PaginationConfig, Paginator, PlacesClient, SearchRequest, SearchResult,
    TerminalReason,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

const KEY: &str = "it-key";

fn places(prefix: &str, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "name": format!("{prefix} place {i}"),
                "place_id": format!("{prefix}-{i}"),
                "geometry": {"location": {"lat": 1.0, "lng": 2.0}}
            })
        })
        .collect()
}

fn page(prefix: &str, count: usize, token: Option<&str>) -> ResponseTemplate {
    let mut body = json!({"results": places(prefix, count), "status": "OK"});
    if let Some(token) = token {
        body["next_page_token"] = json!(token);
    }
    ResponseTemplate::new(200).set_body_json(body)
}

fn nearby() -> MockBuilder {
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("key", KEY))
}

fn initial() -> MockBuilder {
    nearby()
        .and(query_param("location", "40.7128,-74.006"))
        .and(query_param("radius", "1500"))
        .and(query_param_is_missing("pagetoken"))
}

fn continuation(token: &str) -> MockBuilder {
    nearby()
        .and(query_param("pagetoken", token))
        .and(query_param_is_missing("location"))
}

fn request() -> SearchRequest {
    SearchRequest::within_radius(Location::new(40.7128, -74.006), 1500)
}

async fn search(server: &MockServer, config: PaginationConfig) -> SearchResult {
    let client = PlacesClient::builder(KEY)
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    let config = config
        .with_page_delay(Duration::from_millis(10))
        .with_retry_backoff(Duration::from_millis(10));

    Paginator::new(config).fetch_all(&request(), &client).await
}

fn ids(result: &SearchResult) -> Vec<String> {
    result
        .records
        .iter()
        .filter_map(|r| r.place_id().map(str::to_string))
        .collect()
}

// ============================================================================
// Full Session Tests
// ============================================================================

#[tokio::test]
async fn test_three_pages_until_exhausted() {
    let server = MockServer::start().await;

    initial()
        .respond_with(page("p1", 20, Some("T1")))
        .expect(1)
        .mount(&server)
        .await;
    continuation("T1")
        .respond_with(page("p2", 20, Some("T2")))
        .expect(1)
        .mount(&server)
        .await;
    continuation("T2")
        .respond_with(page("p3", 10, None))
        .expect(1)
        .mount(&server)
        .await;

    let result = search(&server, PaginationConfig::default()).await;

    assert_eq!(result.reason, TerminalReason::Exhausted);
    assert_eq!(result.total(), 50);
    assert_eq!(result.pages, 3);
    assert_eq!(result.requests, 3);
    assert!(result.error.is_none());

    let ids = ids(&result);
    assert_eq!(ids.first().map(String::as_str), Some("p1-0"));
    assert_eq!(ids[20], "p2-0");
    assert_eq!(ids.last().map(String::as_str), Some("p3-9"));
}

#[tokio::test]
async fn test_cap_stops_before_third_page() {
    let server = MockServer::start().await;

    initial()
        .respond_with(page("p1", 20, Some("T1")))
        .mount(&server)
        .await;
    continuation("T1")
        .respond_with(page("p2", 20, Some("T2")))
        .mount(&server)
        .await;
    continuation("T2")
        .respond_with(page("p3", 20, None))
        .expect(0)
        .mount(&server)
        .await;

    let result = search(&server, PaginationConfig::default().with_cap(30)).await;

    assert_eq!(result.reason, TerminalReason::CapReached);
    assert_eq!(result.total(), 30);
    assert_eq!(result.requests, 2);
    assert_eq!(ids(&result).last().map(String::as_str), Some("p2-9"));
}

#[tokio::test]
async fn test_inactive_token_is_retried() {
    let server = MockServer::start().await;

    initial()
        .respond_with(page("p1", 20, Some("T1")))
        .mount(&server)
        .await;
    continuation("T1")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "status": "INVALID_REQUEST"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    continuation("T1")
        .respond_with(page("p2", 5, None))
        .expect(1)
        .mount(&server)
        .await;

    let result = search(&server, PaginationConfig::default()).await;

    assert_eq!(result.reason, TerminalReason::Exhausted);
    assert_eq!(result.total(), 25);
    assert_eq!(result.pages, 2);
    assert_eq!(result.requests, 3);
}

#[tokio::test]
async fn test_failure_keeps_earlier_pages() {
    let server = MockServer::start().await;

    initial()
        .respond_with(page("p1", 20, Some("T1")))
        .mount(&server)
        .await;
    continuation("T1")
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "status": "REQUEST_DENIED",
            "error_message": "key revoked"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = search(&server, PaginationConfig::default()).await;

    assert_eq!(result.reason, TerminalReason::Error);
    assert_eq!(result.total(), 20);
    assert_eq!(result.error.as_deref(), Some("REQUEST_DENIED: key revoked"));
}

#[tokio::test]
async fn test_server_errors_exhaust_retry_budget() {
    let server = MockServer::start().await;

    initial()
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let result = search(&server, PaginationConfig::default().with_max_retries(2)).await;

    assert_eq!(result.reason, TerminalReason::Error);
    assert!(result.is_empty());
    assert_eq!(result.requests, 3);
}

#[tokio::test]
async fn test_zero_results() {
    let server = MockServer::start().await;

    initial()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "status": "ZERO_RESULTS"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = search(&server, PaginationConfig::default()).await;

    assert_eq!(result.reason, TerminalReason::Exhausted);
    assert!(result.is_empty());
    assert!(result.is_complete());
}
