use serde::{Deserialize, Serialize};

/// A named, immutable color palette loaded from a theme JSON file.
///
/// All colors are `#RRGGBB` hex strings. Road colors are keyed by
/// classification tier; see [`crate::rendering::style`] for the tier table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub bg: String,
    pub text: String,
    pub gradient_color: String,
    pub water: String,
    pub parks: String,
    pub road_motorway: String,
    pub road_primary: String,
    pub road_secondary: String,
    pub road_tertiary: String,
    pub road_residential: String,
    pub road_default: String,
}

impl Theme {
    /// Built-in greyscale palette, always available even with an empty
    /// themes directory.
    pub fn feature_based() -> Self {
        Self {
            name: "Feature-Based Shading".to_string(),
            description: Some("Greyscale shading by road hierarchy".to_string()),
            bg: "#FFFFFF".to_string(),
            text: "#000000".to_string(),
            gradient_color: "#FFFFFF".to_string(),
            water: "#C0C0C0".to_string(),
            parks: "#F0F0F0".to_string(),
            road_motorway: "#0A0A0A".to_string(),
            road_primary: "#1A1A1A".to_string(),
            road_secondary: "#2A2A2A".to_string(),
            road_tertiary: "#3A3A3A".to_string(),
            road_residential: "#4A4A4A".to_string(),
            road_default: "#3A3A3A".to_string(),
        }
    }
}

/// Parse a `#RRGGBB` hex color into an RGB triple. Malformed input maps to
/// black rather than failing the render.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return (0, 0, 0);
    }
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
    (r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FFFFFF"), (255, 255, 255));
        assert_eq!(hex_to_rgb("#0A0A0A"), (10, 10, 10));
        assert_eq!(hex_to_rgb("1A2B3C"), (26, 43, 60));
    }

    #[test]
    fn test_hex_to_rgb_malformed_is_black() {
        assert_eq!(hex_to_rgb("not-a-color"), (0, 0, 0));
        assert_eq!(hex_to_rgb("#FFF"), (0, 0, 0));
        assert_eq!(hex_to_rgb(""), (0, 0, 0));
    }

    #[test]
    fn test_theme_roundtrips_through_json() {
        let theme = Theme::feature_based();
        let json = serde_json::to_string(&theme).unwrap();
        let parsed: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, theme.name);
        assert_eq!(parsed.road_motorway, "#0A0A0A");
    }

    #[test]
    fn test_theme_parses_without_description() {
        let json = r##"{
            "name": "Noir",
            "bg": "#000000", "text": "#FFFFFF", "gradient_color": "#000000",
            "water": "#111111", "parks": "#222222",
            "road_motorway": "#FFFFFF", "road_primary": "#EEEEEE",
            "road_secondary": "#DDDDDD", "road_tertiary": "#CCCCCC",
            "road_residential": "#BBBBBB", "road_default": "#CCCCCC"
        }"##;
        let theme: Theme = serde_json::from_str(json).unwrap();
        assert_eq!(theme.name, "Noir");
        assert!(theme.description.is_none());
    }
}
