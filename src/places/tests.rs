//! Tests for places module

use super::*;
use crate::error::Error;
use crate::pagination::{ContinuationToken, PageFetcher, PageQuery, PageStatus};
use crate::search::{Location, SearchRequest};
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> SearchRequest {
    SearchRequest::within_radius(Location::new(40.7128, -74.006), 1000).with_types_csv("hospital,pharmacy")
}

async fn client(server: &MockServer) -> PlacesClient {
    PlacesClient::builder("test-key")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn place(id: &str) -> serde_json::Value {
    json!({
        "name": format!("Place {id}"),
        "place_id": id,
        "rating": 4.5,
        "geometry": {"location": {"lat": 40.7128, "lng": -74.0060}}
    })
}

// ============================================================================
// Status Mapping Tests
// ============================================================================

#[test_case("OK", false => PageStatus::Ok ; "ok")]
#[test_case("ZERO_RESULTS", false => PageStatus::ZeroResults ; "zero results")]
#[test_case("INVALID_REQUEST", true => PageStatus::InvalidToken ; "invalid request with token")]
#[test_case("INVALID_REQUEST", false => PageStatus::FatalError ; "invalid request without token")]
#[test_case("OVER_QUERY_LIMIT", false => PageStatus::TransientError ; "over query limit")]
#[test_case("UNKNOWN_ERROR", true => PageStatus::TransientError ; "unknown error")]
#[test_case("REQUEST_DENIED", false => PageStatus::FatalError ; "request denied")]
#[test_case("SOMETHING_NEW", false => PageStatus::FatalError ; "unrecognised status")]
fn test_service_status_mapping(status: &str, continuation: bool) -> PageStatus {
    ServiceStatus::parse(status).page_status(continuation)
}

#[test]
fn test_service_status_display_round_trips() {
    for s in ["OK", "ZERO_RESULTS", "REQUEST_DENIED", "SOMETHING_NEW"] {
        assert_eq!(ServiceStatus::parse(s).to_string(), s);
    }
}

#[test_case(Error::http_status(503, "") => PageStatus::TransientError ; "server error")]
#[test_case(Error::http_status(429, "") => PageStatus::TransientError ; "too many requests")]
#[test_case(Error::Timeout { timeout_ms: 10 } => PageStatus::TransientError ; "timeout")]
#[test_case(Error::http_status(403, "") => PageStatus::FatalError ; "forbidden")]
#[test_case(Error::decode("bad json") => PageStatus::FatalError ; "decode")]
fn test_classify_error(error: Error) -> PageStatus {
    classify_error(&error).status
}

// ============================================================================
// Response Conversion Tests
// ============================================================================

#[test]
fn test_response_into_page_with_token() {
    let response: NearbySearchResponse = serde_json::from_value(json!({
        "results": [place("a"), place("b")],
        "next_page_token": "NEXT",
        "status": "OK"
    }))
    .unwrap();

    let page = response.into_page(false);
    assert_eq!(page.status, PageStatus::Ok);
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.next_token.as_ref().map(ContinuationToken::as_str), Some("NEXT"));
}

#[test]
fn test_response_empty_token_is_absent() {
    let response: NearbySearchResponse = serde_json::from_value(json!({
        "results": [place("a")],
        "next_page_token": "",
        "status": "OK"
    }))
    .unwrap();

    assert!(response.into_page(false).is_last());
}

#[test]
fn test_response_without_results_is_fatal() {
    let response: NearbySearchResponse =
        serde_json::from_value(json!({"status": "OK"})).unwrap();
    assert_eq!(response.into_page(false).status, PageStatus::FatalError);
}

#[test]
fn test_response_without_status_but_results_is_ok() {
    let response: NearbySearchResponse =
        serde_json::from_value(json!({"results": [place("a")]})).unwrap();
    let page = response.into_page(false);
    assert_eq!(page.status, PageStatus::Ok);
    assert_eq!(page.records.len(), 1);
}

#[test]
fn test_response_error_message_in_detail() {
    let response: NearbySearchResponse = serde_json::from_value(json!({
        "results": [],
        "status": "REQUEST_DENIED",
        "error_message": "The provided API key is invalid."
    }))
    .unwrap();

    let page = response.into_page(false);
    assert_eq!(page.status, PageStatus::FatalError);
    assert_eq!(
        page.detail.as_deref(),
        Some("REQUEST_DENIED: The provided API key is invalid.")
    );
}

#[test]
fn test_response_keeps_every_result_entry() {
    let response: NearbySearchResponse = serde_json::from_value(json!({
        "results": [place("a"), "junk", 42],
        "status": "OK"
    }))
    .unwrap();

    let page = response.into_page(false);
    assert_eq!(page.records.len(), 3);
    assert_eq!(page.records[0].place_id(), Some("a"));
    assert_eq!(serde_json::to_value(&page.records[1]).unwrap(), json!("junk"));
}

// ============================================================================
// Client Tests
// ============================================================================

#[test]
fn test_builder_requires_api_key() {
    let result = PlacesClient::builder("  ").build();
    assert!(matches!(result, Err(Error::MissingConfigField { .. })));
}

#[tokio::test]
async fn test_initial_request_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("location", "40.7128,-74.006"))
        .and(query_param("radius", "1000"))
        .and(query_param("type", "hospital|pharmacy"))
        .and(query_param("key", "test-key"))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [place("a")],
            "status": "OK"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let req = request();
    let page = client.fetch_page(PageQuery::Initial(&req)).await;

    assert_eq!(page.status, PageStatus::Ok);
    assert_eq!(page.records[0].place_id(), Some("a"));
    assert!(page.is_last());
}

#[tokio::test]
async fn test_continuation_request_sends_only_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "T1"))
        .and(query_param("key", "test-key"))
        .and(query_param_is_missing("location"))
        .and(query_param_is_missing("radius"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [place("b")],
            "next_page_token": "T2",
            "status": "OK"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let token = ContinuationToken::new("T1");
    let page = client.fetch_page(PageQuery::Continuation(&token)).await;

    assert_eq!(page.status, PageStatus::Ok);
    assert_eq!(page.next_token.as_ref().map(ContinuationToken::as_str), Some("T2"));
}

#[tokio::test]
async fn test_inactive_token_maps_to_invalid_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "status": "INVALID_REQUEST"
        })))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let token = ContinuationToken::new("T1");
    let page = client.fetch_page(PageQuery::Continuation(&token)).await;

    assert_eq!(page.status, PageStatus::InvalidToken);
    assert!(page.records.is_empty());
}

#[tokio::test]
async fn test_http_500_maps_to_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let req = request();
    let page = client.fetch_page(PageQuery::Initial(&req)).await;

    assert_eq!(page.status, PageStatus::TransientError);
}

#[tokio::test]
async fn test_http_403_maps_to_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let req = request();
    let page = client.fetch_page(PageQuery::Initial(&req)).await;

    assert_eq!(page.status, PageStatus::FatalError);
    assert_eq!(page.detail.as_deref(), Some("HTTP 403: forbidden"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let req = request();

    let err = client.fetch(PageQuery::Initial(&req)).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));

    let page = client.fetch_page(PageQuery::Initial(&req)).await;
    assert_eq!(page.status, PageStatus::FatalError);
}

#[tokio::test]
async fn test_verbose_client_still_parses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [],
            "status": "ZERO_RESULTS"
        })))
        .mount(&server)
        .await;

    let client = PlacesClient::builder("test-key")
        .base_url(server.uri())
        .verbose(true)
        .build()
        .unwrap();
    let req = request();
    let page = client.fetch_page(PageQuery::Initial(&req)).await;

    assert_eq!(page.status, PageStatus::ZeroResults);
}
