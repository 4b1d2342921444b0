use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration, optionally loaded from a YAML file.
///
/// Passed by reference into every component that needs it so multiple
/// renders with different settings can coexist in one process; nothing here
/// is ambient or global.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Canvas width in pixels (12in at 300 DPI by default)
    pub width: u32,
    /// Canvas height in pixels (16in at 300 DPI by default)
    pub height: u32,
    /// Where finished posters are written
    pub output_dir: PathBuf,
    /// Where fetch results are cached as JSON envelopes
    pub cache_dir: PathBuf,
    /// Directory scanned for `*.json` theme files
    pub themes_dir: PathBuf,
    /// Directory holding the poster font family
    pub fonts_dir: PathBuf,
    /// User-Agent sent to both upstream services
    pub user_agent: String,
    /// Nominatim search endpoint
    pub nominatim_url: String,
    /// Overpass interpreter endpoint
    pub overpass_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 3600,
            height: 4800,
            output_dir: PathBuf::from("posters"),
            cache_dir: PathBuf::from("cache"),
            themes_dir: PathBuf::from("themes"),
            fonts_dir: PathBuf::from("fonts"),
            user_agent: "maposter/1.0".to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org/search".to_string(),
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file is absent or unparseable.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.width, 3600);
        assert_eq!(config.height, 4800);
        assert_eq!(config.user_agent, "maposter/1.0");
        assert_eq!(
            config.nominatim_url,
            "https://nominatim.openstreetmap.org/search"
        );
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/config.yaml")));
        assert_eq!(config.width, 3600);
    }

    #[test]
    fn test_load_partial_yaml_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "width: 1800\nheight: 2400\nuser_agent: test/1.0\n").unwrap();

        let config = AppConfig::load(Some(&path));
        assert_eq!(config.width, 1800);
        assert_eq!(config.height, 2400);
        assert_eq!(config.user_agent, "test/1.0");
        // Unlisted fields keep their defaults
        assert_eq!(config.themes_dir, PathBuf::from("themes"));
    }
}
