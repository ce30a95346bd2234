//! Integration tests for `PlacesClient` using wiremock HTTP mocks.

use std::time::Duration;

use limoscout_places::{maps_link_for, DetailsPolicy, PlaceRow, PlacesClient, SearchPolicy};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, "limoscout-test/0.1", base_url)
        .expect("client construction should not fail")
}

fn fast_search() -> SearchPolicy {
    SearchPolicy {
        page_delay: Duration::ZERO,
        quota_delay: Duration::ZERO,
        invalid_request_delay: Duration::ZERO,
        ..SearchPolicy::default()
    }
}

fn fast_details() -> DetailsPolicy {
    DetailsPolicy {
        base_delay: Duration::ZERO,
        quota_floor: Duration::ZERO,
        ..DetailsPolicy::default()
    }
}

fn hits(ids: &[&str]) -> Vec<serde_json::Value> {
    ids.iter()
        .map(|id| serde_json::json!({ "place_id": id, "name": format!("Limo {id}") }))
        .collect()
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|reqs| reqs.len())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Text Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn text_search_follows_next_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "limousine service in Calgary, Alberta"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": hits(&["a", "b"]),
            "next_page_token": "PAGE2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("pagetoken", "PAGE2"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": hits(&["c"])
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .text_search("limousine service in Calgary, Alberta", &fast_search())
        .collect_all()
        .await;

    let ids: Vec<_> = results.iter().filter_map(|r| r.place_id.as_deref()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn text_search_stops_at_per_query_cap() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .and(query_param("query", "taxi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": hits(&["a", "b", "c"]),
            "next_page_token": "PAGE2"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let policy = SearchPolicy {
        max_per_query: 2,
        ..fast_search()
    };
    let mut pager = client.text_search("taxi", &policy);
    let mut ids = Vec::new();
    while let Some(hit) = pager.next_result().await {
        ids.extend(hit.place_id);
    }

    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    assert!(pager.next_result().await.is_none());
    // The continuation page is never requested once the cap is hit.
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn text_search_zero_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .text_search("chauffeur in Nowhere", &fast_search())
        .collect_all()
        .await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn text_search_abandons_on_request_denied() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .text_search("taxi", &fast_search())
        .collect_all()
        .await;
    assert!(results.is_empty());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn text_search_abandons_on_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .text_search("taxi", &fast_search())
        .collect_all()
        .await;
    assert!(results.is_empty());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn text_search_retries_quota_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "OVER_QUERY_LIMIT", "results": [] })),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": hits(&["a"])
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .text_search("taxi", &fast_search())
        .collect_all()
        .await;
    assert_eq!(results.len(), 1);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn text_search_quota_retries_are_bounded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "OVER_QUERY_LIMIT", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let policy = SearchPolicy {
        max_attempts: 4,
        ..fast_search()
    };
    let results = client.text_search("taxi", &policy).collect_all().await;
    assert!(results.is_empty());
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn text_search_ignores_empty_next_page_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/textsearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": hits(&["a"]),
            "next_page_token": ""
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let results = client
        .text_search("taxi", &fast_search())
        .collect_all()
        .await;
    assert_eq!(results.len(), 1);
    assert_eq!(request_count(&server).await, 1);
}

// ---------------------------------------------------------------------------
// Place Details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn details_ok_uses_payload_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .and(query_param("place_id", "ChIJ1"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": {
                "place_id": "ChIJ1",
                "name": "Rocky Mountain Limo",
                "url": "https://maps.google.com/?cid=1",
                "types": ["car_rental", "establishment"]
            }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client
        .fetch_details("ChIJ1", &fast_details())
        .await
        .expect("details should be returned");
    let row = PlaceRow::from_details(&details, "ChIJ1");

    assert_eq!(row.google_place_url, "https://maps.google.com/?cid=1");
    assert_eq!(row.business_name.as_deref(), Some("Rocky Mountain Limo"));
    assert_eq!(row.sub_types, "car_rental,establishment");
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn details_ok_without_url_synthesizes_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": { "place_id": "ChIJ2", "name": "Airport Sedan" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client
        .fetch_details("ChIJ2", &fast_details())
        .await
        .expect("details should be returned");
    let row = PlaceRow::from_details(&details, "ChIJ2");
    assert_eq!(row.google_place_url, maps_link_for("ChIJ2"));
}

#[tokio::test]
async fn details_quota_every_attempt_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "OVER_QUERY_LIMIT" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client.fetch_details("ChIJ3", &fast_details()).await;
    assert!(details.is_none());
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn details_retry_after_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": { "place_id": "ChIJ4", "name": "Red Deer Taxi" }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let details = client.fetch_details("ChIJ4", &fast_details()).await;
    assert_eq!(
        details.and_then(|d| d.name).as_deref(),
        Some("Red Deer Taxi")
    );
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn details_not_found_is_terminal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "NOT_FOUND" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .try_fetch_details("gone", &fast_details())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        limoscout_places::PlacesError::ApiStatus {
            status: limoscout_places::ApiStatus::NotFound,
            ..
        }
    ));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn details_empty_result_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/details/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "OK", "result": {} })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client.fetch_details("ChIJ5", &fast_details()).await.is_none());
}

// ---------------------------------------------------------------------------
// Credential hygiene
// ---------------------------------------------------------------------------

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn transport_errors_do_not_expose_api_key() {
    let key = "SECRET-KEY-123";
    let client = PlacesClient::with_base_url(key, 5, "limoscout-test/0.1", &closed_port_url())
        .expect("client construction should not fail");
    let policy = DetailsPolicy {
        max_attempts: 2,
        ..fast_details()
    };

    let err = client
        .try_fetch_details("ChIJx", &policy)
        .await
        .expect_err("connection to a closed port should fail");

    let text = err.to_string();
    assert!(
        matches!(err, limoscout_places::PlacesError::RetriesExhausted { attempts: 2, .. }),
        "expected RetriesExhausted, got: {text}"
    );
    assert!(!text.contains(key), "error text leaks the key: {text}");
    assert!(!format!("{err:?}").contains(key), "error debug leaks the key");
}
