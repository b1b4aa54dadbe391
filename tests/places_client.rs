//! Wire-level tests for `PlacesClient`, `PhotoValidator`, and the full
//! `run_search` pipeline.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no
//! real network traffic is made. Covers the happy paths, the geocoding
//! failure contract (no search request after a failed geocode), and the
//! best-effort photo probe.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spotfinder::config::CatalogSettings;
use spotfinder::core::SpotFilter;
use spotfinder::models::{Coordinates, SearchCriteria, Vibe};
use spotfinder::routes::spots::{run_search, AppState, SearchError};
use spotfinder::services::{PhotoValidator, PlacesClient, PlacesEndpoints, PlacesError};

/// Endpoints rooted at the mock server.
fn test_endpoints(server: &MockServer) -> PlacesEndpoints {
    PlacesEndpoints {
        geocode_url: format!("{}/maps/api/geocode/json", server.uri()),
        search_url: format!("{}/maps/api/place/nearbysearch/json", server.uri()),
        photo_url: format!("{}/maps/api/place/photo", server.uri()),
    }
}

fn test_client(server: &MockServer) -> PlacesClient {
    PlacesClient::new(test_endpoints(server), "test_key".to_string(), 400)
        .expect("failed to build test PlacesClient")
}

fn geocode_ok_body() -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [{
            "geometry": {
                "location": { "lat": 29.7436, "lng": -95.8386 }
            }
        }]
    })
}

fn brunch_criteria() -> SearchCriteria {
    SearchCriteria {
        postal_code: "77494".to_string(),
        radius_m: 8000,
        min_rating: None,
        vibe: Vibe {
            label: "Brunch Spot".to_string(),
            place_type: Some("restaurant".to_string()),
            keyword: Some("brunch".to_string()),
        },
        gluten_free: false,
        picky: true,
        blacklist: vec![],
    }
}

// ---------------------------------------------------------------------------
// Geocoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn geocode_resolves_postal_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", "77494"))
        .and(query_param("key", "test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&geocode_ok_body()))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let coords = client.geocode("77494").await.expect("expected Ok");

    assert!((coords.lat - 29.7436).abs() < 1e-9);
    assert!((coords.lng - -95.8386).abs() < 1e-9);
}

#[tokio::test]
async fn geocode_non_ok_status_fails_with_status_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.geocode("00000").await;

    match result {
        Err(PlacesError::Geocoding(message)) => assert_eq!(message, "ZERO_RESULTS"),
        other => panic!("expected Geocoding error, got: {other:?}"),
    }
}

#[tokio::test]
async fn geocode_prefers_provider_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "REQUEST_DENIED",
            "results": [],
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let result = client.geocode("77494").await;

    match result {
        Err(PlacesError::Geocoding(message)) => {
            assert_eq!(message, "The provided API key is invalid.")
        }
        other => panic!("expected Geocoding error, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Nearby search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nearby_search_empty_results_is_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "results": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let coords = Coordinates {
        lat: 29.7436,
        lng: -95.8386,
    };
    let result = client
        .nearby_search(coords, 8000, Some("restaurant"), Some("brunch"))
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn nearby_search_parses_candidates_and_skips_unlinkable_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param("location", "29.7436,-95.8386"))
        .and(query_param("radius", "8000"))
        .and(query_param("type", "restaurant"))
        .and(query_param("keyword", "brunch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "results": [
                {
                    "name": "Sunny Cafe",
                    "rating": 4.5,
                    "vicinity": "123 Main St, Katy",
                    "place_id": "sunny1",
                    "types": ["restaurant", "food"],
                    "photos": [{ "photo_reference": "ref_sunny" }]
                },
                {
                    // No place_id: cannot carry a map link, skipped
                    "name": "Ghost Kitchen",
                    "rating": 4.9
                },
                {
                    // No rating or vicinity: defaults apply
                    "name": "New Place",
                    "place_id": "new1"
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let coords = Coordinates {
        lat: 29.7436,
        lng: -95.8386,
    };
    let candidates = client
        .nearby_search(coords, 8000, Some("restaurant"), Some("brunch"))
        .await
        .expect("expected Ok");

    assert_eq!(candidates.len(), 2, "record without place_id should be skipped");

    let sunny = &candidates[0];
    assert_eq!(sunny.name, "Sunny Cafe");
    assert_eq!(sunny.rating, 4.5);
    assert_eq!(sunny.address, "123 Main St, Katy");
    assert_eq!(sunny.tags, vec!["restaurant", "food"]);
    let photo_url = sunny.photo_url.as_deref().expect("expected a photo url");
    assert!(photo_url.contains("photoreference=ref_sunny"));
    assert!(photo_url.contains("maxwidth=400"));

    let new_place = &candidates[1];
    assert_eq!(new_place.rating, 0.0);
    assert_eq!(new_place.address, "Address unavailable");
    assert!(new_place.photo_url.is_none());
}

#[tokio::test]
async fn nearby_search_omits_absent_type_and_keyword() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .and(query_param_is_missing("type"))
        .and(query_param_is_missing("keyword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "results": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let coords = Coordinates {
        lat: 29.7436,
        lng: -95.8386,
    };
    let result = client.nearby_search(coords, 1600, None, None).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

// ---------------------------------------------------------------------------
// Photo probe
// ---------------------------------------------------------------------------

#[tokio::test]
async fn photo_probe_accepts_image_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/maps/api/place/photo"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/jpeg"))
        .mount(&server)
        .await;

    let validator = PhotoValidator::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/maps/api/place/photo?photoreference=ref1", server.uri());

    assert!(validator.is_resolvable(&url).await);
}

#[tokio::test]
async fn photo_probe_rejects_non_image_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/maps/api/place/photo"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&server)
        .await;

    let validator = PhotoValidator::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/maps/api/place/photo?photoreference=ref1", server.uri());

    assert!(!validator.is_resolvable(&url).await);
}

#[tokio::test]
async fn photo_probe_rejects_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/maps/api/place/photo"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let validator = PhotoValidator::new(Duration::from_secs(5)).unwrap();
    let url = format!("{}/maps/api/place/photo?photoreference=ref1", server.uri());

    assert!(!validator.is_resolvable(&url).await);
}

#[tokio::test]
async fn photo_probe_timeout_reads_as_unresolvable() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/maps/api/place/photo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let validator = PhotoValidator::new(Duration::from_millis(50)).unwrap();
    let url = format!("{}/maps/api/place/photo?photoreference=ref1", server.uri());

    assert!(!validator.is_resolvable(&url).await);
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

fn test_state(server: &MockServer, photos: Option<PhotoValidator>) -> AppState {
    AppState {
        places: Arc::new(test_client(server)),
        photos: photos.map(Arc::new),
        filter: SpotFilter::with_default_settings(),
        catalog: CatalogSettings::default(),
    }
}

#[tokio::test]
async fn failed_geocode_issues_no_search_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({ "status": "ZERO_RESULTS", "results": [] })),
        )
        .mount(&server)
        .await;

    // The pipeline must abort before any nearby-search request goes out.
    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({ "results": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let state = test_state(&server, None);
    let result = run_search(&state, &brunch_criteria()).await;

    match result {
        Err(SearchError::Location(message)) => assert_eq!(message, "ZERO_RESULTS"),
        other => panic!("expected Location error, got: {other:?}"),
    }

    server.verify().await;
}

#[tokio::test]
async fn pipeline_filters_and_ranks_provider_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&geocode_ok_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "results": [
                { "name": "Okay Oven", "rating": 4.1, "place_id": "p1", "types": [] },
                { "name": "Great Grill", "rating": 4.7, "place_id": "p2", "types": [] },
                { "name": "Ocean Bites", "rating": 4.9, "place_id": "p3",
                  "types": ["seafood_restaurant"] }
            ]
        })))
        .mount(&server)
        .await;

    let state = test_state(&server, None);
    let outcome = run_search(&state, &brunch_criteria())
        .await
        .expect("expected Ok");

    let names: Vec<&str> = outcome.spots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Great Grill", "Okay Oven"]);
    assert_eq!(outcome.total_candidates, 3);
}

#[tokio::test]
async fn pipeline_clears_unresolvable_photos_but_keeps_spots() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&geocode_ok_body()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/maps/api/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "results": [
                { "name": "Sunny Cafe", "rating": 4.5, "place_id": "p1", "types": [],
                  "photos": [{ "photo_reference": "ref_ok" }] },
                { "name": "Corner Diner", "rating": 4.2, "place_id": "p2", "types": [],
                  "photos": [{ "photo_reference": "ref_bad" }] }
            ]
        })))
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/maps/api/place/photo"))
        .and(query_param("photoreference", "ref_ok"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "image/png"))
        .mount(&server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/maps/api/place/photo"))
        .and(query_param("photoreference", "ref_bad"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&server)
        .await;

    let validator = PhotoValidator::new(Duration::from_secs(5)).unwrap();
    let state = test_state(&server, Some(validator));
    let outcome = run_search(&state, &brunch_criteria())
        .await
        .expect("expected Ok");

    assert_eq!(outcome.spots.len(), 2, "photo failures must not drop spots");
    assert!(outcome.spots[0].photo_url.is_some());
    assert!(outcome.spots[1].photo_url.is_none());
}
