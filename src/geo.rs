//! Geographic math: distance-to-degree conversions, bounding boxes and the
//! linear lon/lat to canvas projection shared by both render backends.

/// Mean meters per degree of latitude.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// A point on the globe in decimal degrees.
///
/// `lat` is in `[-90, 90]`, `lon` in `[-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Rectangular lat/lon region scoping a geometry query and anchoring the
/// projection. Built once per render request and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Compute a box extending `radius_meters` in every direction from
    /// `center`. Pure; valid for any positive radius away from the poles.
    pub fn around(center: Coordinates, radius_meters: f64) -> Self {
        let lat_delta = meters_to_degrees_lat(radius_meters);
        let lon_delta = meters_to_degrees_lon(radius_meters, center.lat);

        Self {
            min_lat: center.lat - lat_delta,
            max_lat: center.lat + lat_delta,
            min_lon: center.lon - lon_delta,
            max_lon: center.lon + lon_delta,
        }
    }

    /// Overpass bbox clause order: south, west, north, east.
    pub fn to_query_string(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lat, self.min_lon, self.max_lat, self.max_lon
        )
    }
}

pub fn meters_to_degrees_lat(meters: f64) -> f64 {
    meters / METERS_PER_DEGREE
}

/// Longitude degrees shrink with latitude. Blows up toward the poles; that
/// is an accepted limit of the approximation, not a handled case.
pub fn meters_to_degrees_lon(meters: f64, at_lat: f64) -> f64 {
    meters / (METERS_PER_DEGREE * at_lat.to_radians().cos())
}

/// Linear-map a lon/lat pair into canvas coordinates. The y axis is flipped
/// since canvas coordinates grow downward. Callers guarantee non-degenerate
/// bounds (always true for a box built from a positive radius).
pub fn project(lon: f64, lat: f64, bounds: &BoundingBox, width: f64, height: f64) -> (f64, f64) {
    let x = (lon - bounds.min_lon) / (bounds.max_lon - bounds.min_lon) * width;
    let y = height - (lat - bounds.min_lat) / (bounds.max_lat - bounds.min_lat) * height;
    (x, y)
}
