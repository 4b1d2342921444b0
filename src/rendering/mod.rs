pub mod normalize;
pub mod path;
pub mod raster;
pub mod style;
pub mod svg;

pub use normalize::build_render_model;
pub use path::{Path, PathCommand};
pub use raster::render_png;
pub use svg::render_svg;

/// Poster composition constants shared by both backends: vertical positions
/// and sizes are fractions of the canvas so the layout scales with output
/// resolution.
pub(crate) mod layout {
    /// Height of each gradient fade band (top and bottom quarter)
    pub const FADE_FRACTION: f64 = 0.25;

    pub const CITY_Y: f64 = 0.86;
    pub const COUNTRY_Y: f64 = 0.90;
    pub const COORDS_Y: f64 = 0.93;
    pub const DIVIDER_Y: f64 = 0.875;
    pub const CAPTION_Y: f64 = 0.98;

    pub const DIVIDER_X_START: f64 = 0.4;
    pub const DIVIDER_X_END: f64 = 0.6;
    pub const DIVIDER_STROKE: f64 = 3.0;
    pub const CAPTION_X: f64 = 0.98;

    /// Font sizes tuned for the default 3600x4800 canvas
    pub const CITY_FONT_SIZE: f64 = 180.0;
    pub const COUNTRY_FONT_SIZE: f64 = 66.0;
    pub const COORDS_FONT_SIZE: f64 = 42.0;
    pub const CAPTION_FONT_SIZE: f64 = 24.0;

    pub const COORDS_OPACITY: f64 = 0.7;
    pub const CAPTION_OPACITY: f64 = 0.5;

    pub const CAPTION_TEXT: &str = "OpenStreetMap contributors";
}
