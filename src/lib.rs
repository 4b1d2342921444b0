//! maposter - city map poster generator
//!
//! Geocodes a city, fetches street/water/park geometry from Overpass,
//! projects it into page coordinates and renders a themed poster as SVG or
//! PNG. This library exposes modules for integration testing.

pub mod error;
pub mod geo;
pub mod models;
pub mod rendering;
pub mod services;
