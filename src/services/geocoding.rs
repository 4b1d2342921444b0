//! Nominatim geocoding collaborator.
//!
//! One narrow request: city + country in, matched address + coordinates
//! out. Zero matches is fatal to the whole render and surfaces verbatim.

use crate::error::PosterError;
use crate::geo::Coordinates;
use crate::models::AppConfig;
use crate::services::cache::FileCache;
use serde::{Deserialize, Serialize};

/// A successful geocoding match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub address: String,
    pub coordinates: Coordinates,
}

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimResult {
    display_name: String,
    lat: String,
    lon: String,
}

/// Resolve a city to coordinates, going through the fetch cache.
pub fn lookup(
    config: &AppConfig,
    cache: &FileCache,
    city: &str,
    country: &str,
) -> Result<GeocodedPlace, PosterError> {
    cache.get_or_fetch(&["geocode", city, country], || fetch(config, city, country))
}

fn fetch(config: &AppConfig, city: &str, country: &str) -> Result<GeocodedPlace, PosterError> {
    let query = format!("{city}, {country}");
    tracing::debug!(%query, "Geocoding lookup");

    let client = reqwest::blocking::Client::builder()
        .user_agent(&config.user_agent)
        .build()?;

    let response = client
        .get(&config.nominatim_url)
        .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
        .send()?;

    if !response.status().is_success() {
        return Err(PosterError::Upstream {
            service: "nominatim",
            message: response.status().to_string(),
        });
    }

    let results: Vec<NominatimResult> = serde_json::from_str(&response.text()?)?;

    let Some(location) = results.into_iter().next() else {
        return Err(PosterError::NotFound {
            city: city.to_string(),
            country: country.to_string(),
        });
    };

    let coordinates = Coordinates {
        lat: parse_coordinate(&location.lat)?,
        lon: parse_coordinate(&location.lon)?,
    };

    tracing::debug!(address = %location.display_name, ?coordinates, "Geocoded");

    Ok(GeocodedPlace {
        address: location.display_name,
        coordinates,
    })
}

fn parse_coordinate(raw: &str) -> Result<f64, PosterError> {
    raw.parse().map_err(|_| PosterError::Upstream {
        service: "nominatim",
        message: format!("invalid coordinate value '{raw}'"),
    })
}
