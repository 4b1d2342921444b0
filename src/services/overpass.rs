//! Overpass geometry-fetch collaborator.
//!
//! Three queries per render: roads, water and parks over one bounding box.
//! Roads are mandatory content, so a failed roads query aborts the render.
//! Water and parks are best-effort: a failure there degrades to an empty
//! list and the render continues with a sparser poster.

use crate::error::PosterError;
use crate::geo::{BoundingBox, Coordinates};
use crate::models::{AppConfig, RawMapData, RawRing, RawRoad};
use crate::services::cache::FileCache;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Overpass element as returned by `out geom`: ways carry inline geometry,
/// relations carry it per member.
#[derive(Debug, Serialize, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    tags: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    geometry: Option<Vec<GeomPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    members: Option<Vec<OverpassMember>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OverpassMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    geometry: Option<Vec<GeomPoint>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeomPoint {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// Fetch the full raw feature set for a radius around `center`.
pub fn fetch_map_data(
    config: &AppConfig,
    cache: &FileCache,
    center: Coordinates,
    radius_meters: f64,
) -> Result<RawMapData, PosterError> {
    let bounds = BoundingBox::around(center, radius_meters);
    let bbox = bounds.to_query_string();

    tracing::info!("Downloading street network");
    let roads_response = query_cached(config, cache, center, radius_meters, "roads", &roads_query(&bbox))?;
    let roads = parse_roads(&roads_response);

    tracing::info!("Downloading water features");
    let water = match query_cached(config, cache, center, radius_meters, "water", &water_query(&bbox)) {
        Ok(response) => parse_rings(&response),
        Err(e) => {
            tracing::warn!(%e, "Water query failed, continuing without water features");
            Vec::new()
        }
    };

    tracing::info!("Downloading parks/green spaces");
    let parks = match query_cached(config, cache, center, radius_meters, "parks", &parks_query(&bbox)) {
        Ok(response) => parse_rings(&response),
        Err(e) => {
            tracing::warn!(%e, "Parks query failed, continuing without parks");
            Vec::new()
        }
    };

    tracing::info!(
        roads = roads.len(),
        water = water.len(),
        parks = parks.len(),
        "Map data complete"
    );

    Ok(RawMapData {
        roads,
        water,
        parks,
        bounds,
    })
}

fn roads_query(bbox: &str) -> String {
    format!("[out:json][timeout:90];(way[\"highway\"]({bbox}););out geom;")
}

fn water_query(bbox: &str) -> String {
    format!(
        concat!(
            "[out:json][timeout:90];(",
            "way[\"natural\"=\"water\"]({bbox});",
            "way[\"waterway\"=\"riverbank\"]({bbox});",
            "relation[\"natural\"=\"water\"]({bbox});",
            ");out geom;"
        ),
        bbox = bbox
    )
}

fn parks_query(bbox: &str) -> String {
    format!(
        concat!(
            "[out:json][timeout:90];(",
            "way[\"leisure\"=\"park\"]({bbox});",
            "way[\"landuse\"=\"grass\"]({bbox});",
            "relation[\"leisure\"=\"park\"]({bbox});",
            ");out geom;"
        ),
        bbox = bbox
    )
}

/// Issue one Overpass query through the fetch cache. The key identifies the
/// query by kind, rounded center and radius.
fn query_cached(
    config: &AppConfig,
    cache: &FileCache,
    center: Coordinates,
    radius_meters: f64,
    kind: &str,
    query: &str,
) -> Result<OverpassResponse, PosterError> {
    let lat = format!("{:.4}", center.lat);
    let lon = format!("{:.4}", center.lon);
    let radius = format!("{radius_meters}");

    cache.get_or_fetch(&["overpass", kind, &lat, &lon, &radius], || {
        execute_query(config, query)
    })
}

fn execute_query(config: &AppConfig, query: &str) -> Result<OverpassResponse, PosterError> {
    tracing::debug!(bytes = query.len(), "Posting Overpass query");

    let client = reqwest::blocking::Client::builder()
        .user_agent(&config.user_agent)
        .build()?;

    let response = client
        .post(&config.overpass_url)
        .form(&[("data", query)])
        .send()?;

    if !response.status().is_success() {
        return Err(PosterError::Upstream {
            service: "overpass",
            message: response.status().to_string(),
        });
    }

    let parsed: OverpassResponse = serde_json::from_str(&response.text()?)?;
    tracing::debug!(elements = parsed.elements.len(), "Overpass response received");
    Ok(parsed)
}

/// Tagged ways with inline geometry become roads; everything else (untagged
/// ways, bare nodes) is expected noise and skipped silently.
fn parse_roads(response: &OverpassResponse) -> Vec<RawRoad> {
    response
        .elements
        .iter()
        .filter(|e| e.kind == "way")
        .filter_map(|e| {
            let geometry = e.geometry.as_ref()?;
            let highway = e.tags.get("highway")?;
            Some(RawRoad {
                points: geometry
                    .iter()
                    .map(|p| Coordinates { lat: p.lat, lon: p.lon })
                    .collect(),
                highway: highway.clone(),
            })
        })
        .collect()
}

/// Flatten ways and relation members into independent rings. Each member of
/// a multipolygon is treated as a separate area; holes are not subtracted.
fn parse_rings(response: &OverpassResponse) -> Vec<RawRing> {
    let mut rings = Vec::new();

    for element in &response.elements {
        if let Some(geometry) = &element.geometry {
            rings.push(to_ring(geometry));
        } else if let Some(members) = &element.members {
            for member in members {
                if let Some(geometry) = &member.geometry {
                    rings.push(to_ring(geometry));
                }
            }
        }
    }

    rings
}

fn to_ring(geometry: &[GeomPoint]) -> RawRing {
    RawRing {
        points: geometry
            .iter()
            .map(|p| Coordinates { lat: p.lat, lon: p.lon })
            .collect(),
    }
}
