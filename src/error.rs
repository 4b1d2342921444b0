use thiserror::Error;

/// Top-level error taxonomy for a poster generation run.
///
/// Fatal variants abort the render before any artifact is written. Optional
/// collaborator failures (water/park fetches) are recovered inside the
/// Overpass service and never reach this type.
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Could not find coordinates for {city}, {country}")]
    NotFound { city: String, country: String },

    #[error("Upstream {service} request failed: {message}")]
    Upstream { service: &'static str, message: String },

    #[error("Theme '{name}' not found. Available themes: {}", known.join(", "))]
    Configuration { name: String, known: Vec<String> },

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Failed to allocate pixmap ({width}x{height})")]
    PixmapAllocation { width: u32, height: u32 },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
