pub mod cache;
pub mod fonts;
pub mod geocoding;
pub mod overpass;
pub mod themes;

pub use cache::{cache_key, FileCache};
pub use fonts::FontLibrary;
pub use geocoding::GeocodedPlace;
pub use overpass::fetch_map_data;
pub use themes::ThemeStore;
