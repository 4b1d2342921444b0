//! Raw geometry to render-ready model transform.
//!
//! Pure and deterministic: projects every vertex into canvas coordinates,
//! resolves stroke styles through the tier table, and silently filters
//! degenerate geometry. Untagged and empty features are expected in the raw
//! data; dropping them is not an error and is never logged as one.

use crate::geo::project;
use crate::models::{
    AreaKind, RawMapData, RawRing, RenderModel, StyledArea, StyledRoad, Theme,
};
use crate::rendering::style;

/// Build the render-ready model for one render pass.
pub fn build_render_model(raw: &RawMapData, theme: &Theme, width: u32, height: u32) -> RenderModel {
    let w = f64::from(width);
    let h = f64::from(height);

    let roads = raw
        .roads
        .iter()
        .filter(|road| !road.points.is_empty())
        .map(|road| StyledRoad {
            points: road
                .points
                .iter()
                .map(|p| project(p.lon, p.lat, &raw.bounds, w, h))
                .collect(),
            highway: road.highway.clone(),
            color: style::color_for_class(&road.highway, theme).to_string(),
            width: style::width_for_class(&road.highway),
        })
        .collect();

    let water_areas = project_rings(&raw.water, raw, AreaKind::Water, w, h);
    let park_areas = project_rings(&raw.parks, raw, AreaKind::Park, w, h);

    RenderModel {
        roads,
        water_areas,
        park_areas,
        bounds: raw.bounds,
        width,
        height,
    }
}

/// Each ring is projected independently; rings with fewer than 3 vertices
/// cannot be filled and are dropped.
fn project_rings(
    rings: &[RawRing],
    raw: &RawMapData,
    kind: AreaKind,
    w: f64,
    h: f64,
) -> Vec<StyledArea> {
    rings
        .iter()
        .filter(|ring| ring.points.len() >= 3)
        .map(|ring| StyledArea {
            points: ring
                .points
                .iter()
                .map(|p| project(p.lon, p.lat, &raw.bounds, w, h))
                .collect(),
            kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{BoundingBox, Coordinates};
    use crate::models::RawRoad;
    use crate::rendering::path::Path;

    fn raw_data(roads: Vec<RawRoad>, water: Vec<RawRing>, parks: Vec<RawRing>) -> RawMapData {
        let center = Coordinates { lat: 41.9, lon: 12.5 };
        RawMapData {
            roads,
            water,
            parks,
            bounds: BoundingBox::around(center, 5000.0),
        }
    }

    fn ring(points: &[(f64, f64)]) -> RawRing {
        RawRing {
            points: points
                .iter()
                .map(|&(lat, lon)| Coordinates { lat, lon })
                .collect(),
        }
    }

    #[test]
    fn test_motorway_road_gets_theme_color() {
        let theme = Theme::feature_based();
        let raw = raw_data(
            vec![RawRoad {
                points: vec![
                    Coordinates { lat: 41.89, lon: 12.49 },
                    Coordinates { lat: 41.91, lon: 12.51 },
                ],
                highway: "motorway".to_string(),
            }],
            vec![],
            vec![],
        );

        let model = build_render_model(&raw, &theme, 3600, 4800);
        assert_eq!(model.roads.len(), 1);
        assert_eq!(model.roads[0].color, "#0A0A0A");
        assert_eq!(model.roads[0].width, 1.2);
        assert_eq!(model.roads[0].points.len(), 2);
    }

    #[test]
    fn test_empty_road_is_dropped_silently() {
        let theme = Theme::feature_based();
        let raw = raw_data(
            vec![RawRoad {
                points: vec![],
                highway: "residential".to_string(),
            }],
            vec![],
            vec![],
        );

        let model = build_render_model(&raw, &theme, 3600, 4800);
        assert!(model.roads.is_empty());
    }

    #[test]
    fn test_three_vertex_ring_yields_one_closed_area() {
        let theme = Theme::feature_based();
        // Collinear but distinct vertices still form a (degenerate-looking)
        // valid ring
        let raw = raw_data(
            vec![],
            vec![ring(&[(41.89, 12.49), (41.90, 12.50), (41.91, 12.51)])],
            vec![],
        );

        let model = build_render_model(&raw, &theme, 3600, 4800);
        assert_eq!(model.water_areas.len(), 1);
        assert_eq!(model.water_areas[0].points.len(), 3);
        assert_eq!(model.water_areas[0].kind, AreaKind::Water);

        let path = Path::closed(&model.water_areas[0].points);
        assert!(!path.is_empty());
        assert!(path.to_svg_data().ends_with('Z'));
    }

    #[test]
    fn test_two_vertex_ring_is_dropped() {
        let theme = Theme::feature_based();
        let raw = raw_data(vec![], vec![ring(&[(41.89, 12.49), (41.91, 12.51)])], vec![]);

        let model = build_render_model(&raw, &theme, 3600, 4800);
        assert!(model.water_areas.is_empty());
    }

    #[test]
    fn test_park_rings_get_park_kind() {
        let theme = Theme::feature_based();
        let raw = raw_data(
            vec![],
            vec![],
            vec![ring(&[(41.89, 12.49), (41.90, 12.51), (41.91, 12.49)])],
        );

        let model = build_render_model(&raw, &theme, 3600, 4800);
        assert_eq!(model.park_areas.len(), 1);
        assert_eq!(model.park_areas[0].kind, AreaKind::Park);
    }

    #[test]
    fn test_model_is_deterministic() {
        let theme = Theme::feature_based();
        let raw = raw_data(
            vec![RawRoad {
                points: vec![
                    Coordinates { lat: 41.89, lon: 12.49 },
                    Coordinates { lat: 41.91, lon: 12.51 },
                ],
                highway: "primary".to_string(),
            }],
            vec![],
            vec![],
        );

        let a = build_render_model(&raw, &theme, 3600, 4800);
        let b = build_render_model(&raw, &theme, 3600, 4800);
        assert_eq!(a.roads[0].points, b.roads[0].points);
        assert_eq!(a.roads[0].color, b.roads[0].color);
    }
}
