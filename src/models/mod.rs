pub mod config;
pub mod geometry;
pub mod theme;

pub use config::AppConfig;
pub use geometry::{
    AreaKind, PosterLabels, RawMapData, RawRing, RawRoad, RenderModel, StyledArea, StyledRoad,
};
pub use theme::Theme;
