//! Integration tests for `OverpassFeatureLookup`.
//!
//! Each test stands up a local `wiremock` server so no real Overpass
//! instance is contacted.

use std::time::Duration;

use darksky_core::{FeatureKind, FeatureLookup, LookupError};
use darksky_data::overpass::{OverpassConfig, OverpassFeatureLookup};
use geo::Coord;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORIGIN: Coord<f64> = Coord { x: 11.5, y: 48.1 };

fn lookup_for(server: &MockServer) -> OverpassFeatureLookup {
    OverpassFeatureLookup::with_config(
        OverpassConfig::new(format!("{}/api", server.uri()))
            .with_timeout(Duration::from_secs(2))
            .with_user_agent("darksky-test/0.1"),
    )
    .expect("lookup should build")
}

#[tokio::test]
#[expect(clippy::indexing_slicing, reason = "Test uses known fixed indices")]
async fn posts_query_and_decodes_features() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(header("user-agent", "darksky-test/0.1"))
        .and(body_string_contains("around:2500,48.1,11.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "elements": [
                {"type": "way", "id": 10, "center": {"lat": 48.101, "lon": 11.5},
                 "tags": {"highway": "residential", "name": "Dorfstraße"}},
                {"type": "node", "id": 11, "lat": 48.102, "lon": 11.501,
                 "tags": {"amenity": "parking"}},
                {"type": "way", "id": 12, "center": {"lat": 48.103, "lon": 11.5},
                 "tags": {"highway": "path"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let features = lookup_for(&server)
        .query(ORIGIN, 2500.0)
        .await
        .expect("query should succeed");

    assert_eq!(features.len(), 2, "footpaths are not accessibility features");
    assert_eq!(features[0].kind, FeatureKind::Road);
    assert_eq!(features[0].name.as_deref(), Some("Dorfstraße"));
    assert_eq!(features[1].kind, FeatureKind::Parking);
}

#[tokio::test]
async fn empty_result_means_no_features() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"elements": []})))
        .mount(&server)
        .await;

    let features = lookup_for(&server)
        .query(ORIGIN, 3000.0)
        .await
        .expect("query should succeed");
    assert!(features.is_empty());
}

#[tokio::test]
async fn rate_limiting_surfaces_as_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = lookup_for(&server)
        .query(ORIGIN, 3000.0)
        .await
        .expect_err("429 should fail");
    assert!(
        matches!(err, LookupError::Http { status: 429, .. }),
        "expected Http 429, got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_surfaces_as_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let err = lookup_for(&server)
        .query(ORIGIN, 3000.0)
        .await
        .expect_err("HTML should not decode");
    assert!(
        matches!(err, LookupError::Decode { .. }),
        "expected Decode, got {err:?}"
    );
}

#[tokio::test]
async fn slow_server_surfaces_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"elements": []}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let lookup = OverpassFeatureLookup::with_config(
        OverpassConfig::new(format!("{}/api", server.uri()))
            .with_timeout(Duration::from_millis(200)),
    )
    .expect("lookup should build");
    let err = lookup
        .query(ORIGIN, 3000.0)
        .await
        .expect_err("slow response should time out");
    assert!(
        matches!(err, LookupError::Timeout { .. }),
        "expected Timeout, got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_server_surfaces_as_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let lookup = OverpassFeatureLookup::new(format!("{uri}/api")).expect("lookup should build");
    let err = lookup
        .query(ORIGIN, 3000.0)
        .await
        .expect_err("closed port should fail");
    assert!(
        matches!(err, LookupError::Network { .. }),
        "expected Network, got {err:?}"
    );
}
