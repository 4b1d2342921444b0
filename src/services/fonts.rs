//! Poster font loading.
//!
//! Loads the three weights of the poster family from the configured fonts
//! directory into a shared fontdb database. A missing weight degrades the
//! typography to the generic `sans-serif` family instead of failing the
//! render; the degradation is reproducible and logged once at load time.

use std::path::Path;
use std::sync::Arc;

const FAMILY: &str = "Roboto";
const WEIGHT_FILES: [&str; 3] = ["Roboto-Bold.ttf", "Roboto-Regular.ttf", "Roboto-Light.ttf"];
const FALLBACK_FAMILY: &str = "sans-serif";

/// Shared font database plus the resolved poster family name.
pub struct FontLibrary {
    db: Arc<fontdb::Database>,
    family: &'static str,
}

impl FontLibrary {
    /// Load the poster fonts from `fonts_dir`. Never fails; system fonts are
    /// always loaded so generic-family resolution works in the raster
    /// backend.
    pub fn load(fonts_dir: &Path) -> Self {
        let mut db = fontdb::Database::new();
        let mut loaded = 0;

        for file in WEIGHT_FILES {
            let path = fonts_dir.join(file);
            match db.load_font_file(&path) {
                Ok(()) => {
                    tracing::debug!(font = %path.display(), "Loaded font");
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!(font = %path.display(), %e, "Font not available");
                }
            }
        }

        db.load_system_fonts();

        let family = if loaded == WEIGHT_FILES.len() {
            FAMILY
        } else {
            FALLBACK_FAMILY
        };
        tracing::info!(family, font_count = db.len(), "Typography configured");

        Self {
            db: Arc::new(db),
            family,
        }
    }

    /// Family name for text elements: the poster family when all weights
    /// loaded, the generic fallback otherwise.
    pub fn family(&self) -> &str {
        self.family
    }

    pub fn database(&self) -> Arc<fontdb::Database> {
        self.db.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fonts_degrade_to_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let fonts = FontLibrary::load(dir.path());
        assert_eq!(fonts.family(), "sans-serif");
    }

    #[test]
    fn test_fallback_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let first = FontLibrary::load(dir.path());
        let second = FontLibrary::load(dir.path());
        assert_eq!(first.family(), second.family());
    }
}
