use crate::geo::{BoundingBox, Coordinates};
use serde::{Deserialize, Serialize};

/// A raw road centerline as fetched from Overpass: lon/lat vertices plus the
/// `highway` classification tag driving its styling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoad {
    pub points: Vec<Coordinates>,
    pub highway: String,
}

/// One polygon ring of an area feature. Multipolygon relations are flattened
/// into independent rings; no hole subtraction is performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRing {
    pub points: Vec<Coordinates>,
}

/// The raw fetched feature set for one bounding box, before projection and
/// styling. Read-only once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMapData {
    pub roads: Vec<RawRoad>,
    pub water: Vec<RawRing>,
    pub parks: Vec<RawRing>,
    pub bounds: BoundingBox,
}

/// A road projected into canvas coordinates with its resolved stroke style.
#[derive(Debug, Clone)]
pub struct StyledRoad {
    pub points: Vec<(f64, f64)>,
    pub highway: String,
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    Water,
    Park,
}

/// A closed area ring projected into canvas coordinates.
#[derive(Debug, Clone)]
pub struct StyledArea {
    pub points: Vec<(f64, f64)>,
    pub kind: AreaKind,
}

/// The render-ready model: fully projected and styled, consumed read-only by
/// both backends. Built exactly once per render pass.
#[derive(Debug, Clone)]
pub struct RenderModel {
    pub roads: Vec<StyledRoad>,
    pub water_areas: Vec<StyledArea>,
    pub park_areas: Vec<StyledArea>,
    pub bounds: BoundingBox,
    pub width: u32,
    pub height: u32,
}

/// Page metadata drawn as typography over the map art.
#[derive(Debug, Clone)]
pub struct PosterLabels {
    pub city: String,
    pub country: String,
    pub coordinates: Coordinates,
}

impl PosterLabels {
    /// City name uppercased with two-space letter spacing: "Paris" becomes
    /// `P  A  R  I  S`.
    pub fn spaced_city(&self) -> String {
        self.city
            .to_uppercase()
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("  ")
    }

    /// Coordinate caption, 4 decimal places: `41.9000 N / 12.5000 E`.
    pub fn coordinate_label(&self) -> String {
        let lat = self.coordinates.lat;
        let lon = self.coordinates.lon;
        format!(
            "{:.4} {} / {:.4} {}",
            lat.abs(),
            if lat >= 0.0 { "N" } else { "S" },
            lon.abs(),
            if lon >= 0.0 { "E" } else { "W" },
        )
    }
}
