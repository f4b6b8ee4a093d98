//! Analysis result caching for performance
//!
//! Caches aggregate results keyed by path and validated by a hash of the
//! resume text and file name, so unchanged resumes are not re-scored.

use crate::AggregateResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CACHE_VERSION: u32 = 1;
pub const CACHE_FILENAME: &str = ".ats-lens-cache.json";

/// Hex SHA-256 of a resume text
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

/// Cache entry for a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    /// SHA-256 of text and file name
    content_hash: String,
    result: AggregateResult,
    /// RFC 3339 timestamp
    cached_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheData {
    version: u32,
    /// Fingerprint of the engine settings the entries were computed with
    #[serde(default)]
    settings: String,
    entries: HashMap<String, CacheEntry>,
}

impl Default for CacheData {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            settings: String::new(),
            entries: HashMap::new(),
        }
    }
}

/// Cache manager for analysis results
pub struct AnalysisCache {
    cache_path: PathBuf,
    data: CacheData,
    dirty: bool,
    enabled: bool,
}

impl AnalysisCache {
    /// Load (or start) the cache in a project root
    pub fn new(project_root: &Path) -> Self {
        let cache_path = project_root.join(CACHE_FILENAME);
        let data = Self::load_cache(&cache_path).unwrap_or_default();

        Self {
            cache_path,
            data,
            dirty: false,
            enabled: true,
        }
    }

    /// Create a disabled cache (no-op)
    pub fn disabled() -> Self {
        Self {
            cache_path: PathBuf::new(),
            data: CacheData::default(),
            dirty: false,
            enabled: false,
        }
    }

    /// Drop every entry computed under different engine settings
    pub fn for_settings(mut self, settings: &str) -> Self {
        if self.enabled && self.data.settings != settings {
            if !self.data.entries.is_empty() {
                debug!(entries = self.data.entries.len(), "settings changed; cache discarded");
                self.data.entries.clear();
            }
            self.data.settings = settings.to_string();
            self.dirty = true;
        }
        self
    }

    fn load_cache(path: &Path) -> Option<CacheData> {
        let content = fs::read_to_string(path).ok()?;
        let data: CacheData = serde_json::from_str(&content).ok()?;

        if data.version != CACHE_VERSION {
            return None;
        }

        Some(data)
    }

    /// Save cache to disk
    pub fn save(&self) -> Result<()> {
        if !self.enabled || !self.dirty {
            return Ok(());
        }

        let content =
            serde_json::to_string_pretty(&self.data).context("Failed to serialize cache")?;
        fs::write(&self.cache_path, content)
            .with_context(|| format!("Failed to write cache to {}", self.cache_path.display()))?;

        Ok(())
    }

    fn hash_content(text: &str, filename: Option<&str>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        hasher.update([0u8]);
        hasher.update(filename.unwrap_or_default().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Get cached result if still valid
    pub fn get(&self, path: &Path, text: &str, filename: Option<&str>) -> Option<AggregateResult> {
        if !self.enabled {
            return None;
        }

        let key = path.to_string_lossy().to_string();
        let hit = self
            .data
            .entries
            .get(&key)
            .filter(|entry| entry.content_hash == Self::hash_content(text, filename))
            .map(|entry| entry.result.clone());
        debug!(path = %key, hit = hit.is_some(), "cache lookup");
        hit
    }

    /// Store analysis result in cache
    pub fn set(&mut self, path: &Path, text: &str, filename: Option<&str>, result: AggregateResult) {
        if !self.enabled {
            return;
        }

        let key = path.to_string_lossy().to_string();
        let entry = CacheEntry {
            content_hash: Self::hash_content(text, filename),
            result,
            cached_at: chrono::Utc::now().to_rfc3339(),
        };

        self.data.entries.insert(key, entry);
        self.dirty = true;
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.data.entries.len(),
            enabled: self.enabled,
        }
    }

    /// Clear all cached entries
    pub fn clear(&mut self) {
        self.data.entries.clear();
        self.dirty = true;
    }
}

/// Cache statistics
#[derive(Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub enabled: bool,
}
