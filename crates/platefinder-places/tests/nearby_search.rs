//! Integration tests for search-page fetching and multi-page candidate
//! collection, using wiremock HTTP mocks.

use platefinder_core::Coordinate;
use platefinder_places::{PlacesClient, PlacesError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

fn origin() -> Coordinate {
    Coordinate::new(52.52, 13.405)
}

fn search_result(place_id: &str, rating: f64, rating_count: u32) -> serde_json::Value {
    serde_json::json!({
        "place_id": place_id,
        "name": format!("Restaurant {place_id}"),
        "vicinity": format!("{place_id} Street 1"),
        "geometry": { "location": { "lat": 52.52, "lng": 13.405 } },
        "rating": rating,
        "user_ratings_total": rating_count
    })
}

fn page_body(ids: &[&str], next_page_token: Option<&str>) -> serde_json::Value {
    let results: Vec<serde_json::Value> =
        ids.iter().map(|id| search_result(id, 4.0, 100)).collect();
    match next_page_token {
        Some(token) => serde_json::json!({
            "status": "OK",
            "results": results,
            "next_page_token": token
        }),
        None => serde_json::json!({ "status": "OK", "results": results }),
    }
}

#[tokio::test]
async fn search_page_parses_candidates_and_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("key", "test-key"))
        .and(query_param("location", "52.52,13.405"))
        .and(query_param("radius", "5000"))
        .and(query_param("type", "restaurant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["a", "b"], Some("t2"))))
        .mount(&server)
        .await;

    let page = test_client(&server.uri())
        .search_page(origin(), 5000, None)
        .await
        .expect("should parse search page");

    assert_eq!(page.candidates.len(), 2);
    assert_eq!(page.candidates[0].place_id, "a");
    assert_eq!(page.candidates[0].name, "Restaurant a");
    assert_eq!(page.candidates[0].short_address.as_deref(), Some("a Street 1"));
    assert_eq!(page.next_page_token.as_deref(), Some("t2"));
}

#[tokio::test]
async fn search_page_sends_continuation_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["c"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let page = test_client(&server.uri())
        .search_page(origin(), 5000, Some("t2"))
        .await
        .expect("should parse search page");

    assert_eq!(page.candidates.len(), 1);
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn zero_results_is_an_empty_page_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ZERO_RESULTS" })),
        )
        .mount(&server)
        .await;

    let page = test_client(&server.uri())
        .search_page(origin(), 5000, None)
        .await
        .expect("ZERO_RESULTS should not be an error");

    assert!(page.candidates.is_empty());
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn non_success_status_surfaces_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "quota exceeded"
        })))
        .mount(&server)
        .await;

    let result = test_client(&server.uri()).search_page(origin(), 5000, None).await;

    assert!(
        matches!(result, Err(PlacesError::Api { ref status, ref message })
            if status == "OVER_QUERY_LIMIT" && message == "quota exceeded"),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn malformed_results_are_skipped_not_fatal() {
    let server = MockServer::start().await;

    // Second record has no place_id, third no geometry.
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [
                search_result("good", 4.2, 50),
                { "name": "No Identity Diner",
                  "geometry": { "location": { "lat": 1.0, "lng": 2.0 } } },
                { "place_id": "nowhere", "name": "Nowhere Grill" }
            ]
        })))
        .mount(&server)
        .await;

    let page = test_client(&server.uri())
        .search_page(origin(), 5000, None)
        .await
        .expect("malformed records should be skipped");

    assert_eq!(page.candidates.len(), 1);
    assert_eq!(page.candidates[0].place_id, "good");
}

#[tokio::test]
async fn collect_deduplicates_across_pages() {
    let server = MockServer::start().await;

    // Page 1: a, b. Page 2 repeats b and adds c.
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["a", "b"], Some("t2"))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["b", "c"], None)))
        .expect(1)
        .mount(&server)
        .await;

    let collected = test_client(&server.uri())
        .collect_candidates(origin(), 5000, 100, 0)
        .await
        .expect("collection should succeed");

    let ids: Vec<&str> = collected.iter().map(|c| c.place_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn collect_discards_duplicates_within_a_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "results": [
                search_result("a", 4.5, 200),
                search_result("b", 4.5, 200),
                search_result("a", 4.5, 200)
            ]
        })))
        .mount(&server)
        .await;

    let collected = test_client(&server.uri())
        .collect_candidates(origin(), 5000, 100, 0)
        .await
        .expect("collection should succeed");

    let ids: Vec<&str> = collected.iter().map(|c| c.place_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn collect_stops_at_max_results_without_wasting_a_fetch() {
    let server = MockServer::start().await;

    // A continuation token is offered, but max_results is already met after
    // page 1 — no second request may go out.
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["a", "b"], Some("t2"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["c"], None)))
        .expect(0)
        .mount(&server)
        .await;

    let collected = test_client(&server.uri())
        .collect_candidates(origin(), 5000, 2, 0)
        .await
        .expect("collection should succeed");

    assert_eq!(collected.len(), 2);
}

#[tokio::test]
async fn collect_stops_at_the_page_ceiling() {
    let server = MockServer::start().await;

    // Every page offers another token; the ceiling (3) must end the walk.
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["p1"], Some("t2"))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["p2"], Some("t3"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "t3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["p3"], Some("t4"))))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "t4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["p4"], None)))
        .expect(0)
        .mount(&server)
        .await;

    let collected = test_client(&server.uri())
        .collect_candidates(origin(), 5000, 100, 0)
        .await
        .expect("collection should succeed");

    let ids: Vec<&str> = collected.iter().map(|c| c.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);
}

#[tokio::test]
async fn collect_keeps_partial_results_when_a_later_page_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["a", "b"], Some("t2"))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .and(query_param("pagetoken", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "INVALID_REQUEST"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let collected = test_client(&server.uri())
        .collect_candidates(origin(), 5000, 100, 0)
        .await
        .expect("a mid-traversal failure should degrade, not propagate");

    let ids: Vec<&str> = collected.iter().map(|c| c.place_id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn collect_propagates_a_first_page_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "REQUEST_DENIED",
            "error_message": "bad key"
        })))
        .mount(&server)
        .await;

    let result = test_client(&server.uri())
        .collect_candidates(origin(), 5000, 100, 0)
        .await;

    assert!(
        matches!(result, Err(PlacesError::Api { ref status, .. }) if status == "REQUEST_DENIED"),
        "expected Api error, got: {result:?}"
    );
}
