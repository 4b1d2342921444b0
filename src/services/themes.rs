//! Theme loading and listing.
//!
//! Themes live as `*.json` files in the configured themes directory. The
//! built-in `feature_based` palette is always available so a fresh checkout
//! renders without any theme files on disk. Requesting an unknown name is a
//! user-facing configuration error carrying the known names.

use crate::error::PosterError;
use crate::models::Theme;
use std::path::{Path, PathBuf};

pub const DEFAULT_THEME: &str = "feature_based";

pub struct ThemeStore {
    themes_dir: PathBuf,
}

impl ThemeStore {
    pub fn new(themes_dir: impl Into<PathBuf>) -> Self {
        Self {
            themes_dir: themes_dir.into(),
        }
    }

    /// Sorted names of all known themes: files on disk plus the built-in.
    pub fn available(&self) -> Vec<String> {
        let mut names = vec![DEFAULT_THEME.to_string()];

        if let Ok(entries) = std::fs::read_dir(&self.themes_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) == Some("json") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_string());
                    }
                }
            }
        }

        names.sort();
        names.dedup();
        names
    }

    /// Load a theme by name. Unknown names are fatal and list what exists.
    pub fn get(&self, name: &str) -> Result<Theme, PosterError> {
        let path = self.theme_path(name);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let theme: Theme = serde_json::from_str(&content)?;
            tracing::info!(theme = %theme.name, "Loaded theme");
            return Ok(theme);
        }

        if name == DEFAULT_THEME {
            return Ok(Theme::feature_based());
        }

        Err(PosterError::Configuration {
            name: name.to_string(),
            known: self.available(),
        })
    }

    /// All themes with their palettes, for the list-themes command.
    pub fn list(&self) -> Vec<(String, Theme)> {
        self.available()
            .into_iter()
            .filter_map(|name| self.get(&name).ok().map(|theme| (name, theme)))
            .collect()
    }

    fn theme_path(&self, name: &str) -> PathBuf {
        self.themes_dir.join(format!("{name}.json"))
    }
}

/// Convenience for callers holding only a directory path.
pub fn load_theme(themes_dir: &Path, name: &str) -> Result<Theme, PosterError> {
    ThemeStore::new(themes_dir).get(name)
}
