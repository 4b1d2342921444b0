//! Fetch-result caching.
//!
//! Results of upstream requests are cached on disk as JSON envelopes and
//! returned unconditionally once present; entries are never invalidated by
//! age. Keys are derived deterministically from the identifying parts of a
//! request so equal requests address equal entries.

use crate::error::PosterError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Derive a filesystem-safe cache key from ordered identifying parts.
///
/// Each part is lowercased; runs of non-alphanumeric characters collapse to
/// a single `_`, parts are joined with `_`, and any remaining runs collapse
/// again. Pure function of its input: equal part sequences always yield
/// equal keys.
pub fn cache_key(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.to_lowercase())
        .collect::<Vec<_>>()
        .join("_");

    let mut key = String::with_capacity(joined.len());
    for ch in joined.chars() {
        if ch.is_ascii_alphanumeric() {
            key.push(ch);
        } else if !key.ends_with('_') {
            key.push('_');
        }
    }
    key
}

/// Opaque envelope persisted per entry. The core never reads `cached_at`;
/// it exists for operators inspecting the cache directory.
#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
}

/// On-disk get-or-compute cache addressed by [`cache_key`].
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Return the cached value for the derived key, computing and persisting
    /// it via `fetch` when absent. Corrupt entries fall through to `fetch`
    /// and are rewritten.
    pub fn get_or_fetch<T, F>(&self, parts: &[&str], fetch: F) -> Result<T, PosterError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, PosterError>,
    {
        let key = cache_key(parts);
        let path = self.dir.join(format!("{key}.json"));

        if let Ok(content) = std::fs::read_to_string(&path) {
            match serde_json::from_str::<CacheEntry<T>>(&content) {
                Ok(entry) => {
                    tracing::debug!(%key, cached_at = %entry.cached_at, "Loaded from cache");
                    return Ok(entry.data);
                }
                Err(e) => {
                    tracing::debug!(%key, %e, "Ignoring unreadable cache entry");
                }
            }
        }

        let data = fetch()?;

        let entry = CacheEntry {
            data,
            cached_at: Utc::now(),
        };
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, serde_json::to_string_pretty(&entry)?)?;
        tracing::debug!(%key, path = %path.display(), "Cached fetch result");

        Ok(entry.data)
    }
}
