//! End-to-end fetch pipeline tests against mock Nominatim/Overpass servers.
//!
//! The fetch services use a blocking HTTP client, so each scenario runs the
//! pipeline inside spawn_blocking while wiremock serves the upstream
//! responses on the async side.

use std::path::Path;

use maposter::error::PosterError;
use maposter::geo::Coordinates;
use maposter::models::{AppConfig, PosterLabels, Theme};
use maposter::rendering::{build_render_model, render_svg};
use maposter::services::{fetch_map_data, geocoding, FileCache};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CENTER: Coordinates = Coordinates { lat: 41.9, lon: 12.5 };

fn test_config(server_uri: &str, cache_dir: &Path) -> AppConfig {
    AppConfig {
        nominatim_url: format!("{server_uri}/search"),
        overpass_url: format!("{server_uri}/api/interpreter"),
        cache_dir: cache_dir.to_path_buf(),
        ..AppConfig::default()
    }
}

fn geocode_body() -> &'static str {
    r#"[{"display_name": "Roma, Italia", "lat": "41.9", "lon": "12.5"}]"#
}

fn roads_body() -> &'static str {
    r#"{"elements": [
        {"type": "way", "tags": {"highway": "motorway"},
         "geometry": [{"lat": 41.89, "lon": 12.49}, {"lat": 41.91, "lon": 12.51}]},
        {"type": "way", "tags": {"highway": "residential"},
         "geometry": [{"lat": 41.895, "lon": 12.495}, {"lat": 41.905, "lon": 12.505}]}
    ]}"#
}

fn empty_elements() -> &'static str {
    r#"{"elements": []}"#
}

/// Mount an Overpass mock for one query kind, distinguished by the tag name
/// appearing in the query body.
async fn mount_overpass(server: &MockServer, tag: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains(tag))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_geocode_and_fetch_pipeline() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(geocode_body()))
        .mount(&server)
        .await;
    mount_overpass(&server, "highway", ResponseTemplate::new(200).set_body_string(roads_body())).await;
    mount_overpass(&server, "natural", ResponseTemplate::new(200).set_body_string(empty_elements())).await;
    mount_overpass(&server, "leisure", ResponseTemplate::new(200).set_body_string(empty_elements())).await;

    let config = test_config(&server.uri(), cache_dir.path());
    let result = tokio::task::spawn_blocking(move || {
        let cache = FileCache::new(&config.cache_dir);
        let place = geocoding::lookup(&config, &cache, "Rome", "Italy")?;
        let raw = fetch_map_data(&config, &cache, place.coordinates, 5000.0)?;
        Ok::<_, PosterError>((place, raw))
    })
    .await
    .unwrap()
    .unwrap();

    let (place, raw) = result;
    assert_eq!(place.address, "Roma, Italia");
    assert_eq!(place.coordinates.lat, 41.9);
    assert_eq!(raw.roads.len(), 2);
    assert_eq!(raw.roads[0].highway, "motorway");
    assert!(raw.water.is_empty());
    assert!(raw.parks.is_empty());
}

#[tokio::test]
async fn test_water_failure_degrades_to_empty_artifact() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_overpass(&server, "highway", ResponseTemplate::new(200).set_body_string(roads_body())).await;
    mount_overpass(&server, "natural", ResponseTemplate::new(500)).await;
    mount_overpass(&server, "leisure", ResponseTemplate::new(200).set_body_string(empty_elements())).await;

    let config = test_config(&server.uri(), cache_dir.path());
    let raw = tokio::task::spawn_blocking(move || {
        let cache = FileCache::new(&config.cache_dir);
        fetch_map_data(&config, &cache, CENTER, 5000.0)
    })
    .await
    .unwrap()
    .unwrap();

    // Render must still succeed with zero water areas
    assert!(raw.water.is_empty());
    assert_eq!(raw.roads.len(), 2);

    let mut theme = Theme::feature_based();
    theme.road_motorway = "#000000".to_string();

    let model = build_render_model(&raw, &theme, 3600, 4800);
    assert!(model.water_areas.is_empty());

    let labels = PosterLabels {
        city: "Rome".to_string(),
        country: "Italy".to_string(),
        coordinates: CENTER,
    };
    let svg = render_svg(&model, &theme, &labels, "sans-serif");

    // The motorway stroke color flows from the theme into the artifact
    assert!(svg.contains("stroke=\"#000000\""));
    assert!(svg.contains("</svg>"));
}

#[tokio::test]
async fn test_roads_failure_is_fatal() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    mount_overpass(&server, "highway", ResponseTemplate::new(502)).await;

    let config = test_config(&server.uri(), cache_dir.path());
    let result = tokio::task::spawn_blocking(move || {
        let cache = FileCache::new(&config.cache_dir);
        fetch_map_data(&config, &cache, CENTER, 5000.0)
    })
    .await
    .unwrap();

    match result {
        Err(PosterError::Upstream { service, .. }) => assert_eq!(service, "overpass"),
        other => panic!("Expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_geocode_no_match_is_not_found() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), cache_dir.path());
    let result = tokio::task::spawn_blocking(move || {
        let cache = FileCache::new(&config.cache_dir);
        geocoding::lookup(&config, &cache, "Atlantis", "Nowhere")
    })
    .await
    .unwrap();

    match result {
        Err(PosterError::NotFound { city, country }) => {
            assert_eq!(city, "Atlantis");
            assert_eq!(country, "Nowhere");
        }
        other => panic!("Expected NotFound error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_repeated_fetch_hits_upstream_once() {
    let server = MockServer::start().await;
    let cache_dir = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/interpreter"))
        .and(body_string_contains("highway"))
        .respond_with(ResponseTemplate::new(200).set_body_string(roads_body()))
        .expect(1)
        .mount(&server)
        .await;
    mount_overpass(&server, "natural", ResponseTemplate::new(200).set_body_string(empty_elements())).await;
    mount_overpass(&server, "leisure", ResponseTemplate::new(200).set_body_string(empty_elements())).await;

    let config = test_config(&server.uri(), cache_dir.path());
    let (first, second) = tokio::task::spawn_blocking(move || {
        let cache = FileCache::new(&config.cache_dir);
        let first = fetch_map_data(&config, &cache, CENTER, 5000.0).unwrap();
        let second = fetch_map_data(&config, &cache, CENTER, 5000.0).unwrap();
        (first, second)
    })
    .await
    .unwrap();

    assert_eq!(first.roads.len(), second.roads.len());
    // Mock expectation (exactly one roads request) is verified on drop
}
