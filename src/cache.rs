//! File-backed result cache.
//!
//! Each search is stored as one JSON file named by the hex SHA-256 digest
//! of its query text and result limit. Entries are overwritten on every
//! fresh search and never expire; pruning the directory is left to the
//! operator.

use std::fmt;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::{Result, SearchResult};

/// Deterministic digest identifying a search by its query and result limit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Computes the key for a query text and result limit.
    pub fn new(query: &str, max_results: usize) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(query.as_bytes());
        hasher.update(b"\n");
        hasher.update(max_results.to_string().as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Hex digest, also used as the file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-addressed store of result lists.
///
/// When disabled, `get` always misses and `put` does nothing.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    enabled: bool,
}

impl CacheStore {
    /// Creates an enabled store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            enabled: true,
        }
    }

    /// Creates a store that never hits and never writes.
    pub fn disabled() -> Self {
        Self::with_enabled(PathBuf::new(), false)
    }

    /// Creates a store rooted at `dir` that is active only when `enabled` is set.
    pub fn with_enabled(dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            enabled,
        }
    }

    /// Returns whether caching is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.as_str())
    }

    /// Reads the entry stored under `key`.
    ///
    /// Missing, unreadable and corrupt entries are all reported as `None`.
    pub async fn get(&self, key: &CacheKey) -> Option<Vec<SearchResult>> {
        if !self.enabled {
            return None;
        }

        let path = self.entry_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(results) => Some(results),
            Err(e) => {
                warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Writes `results` under `key`, replacing any previous entry.
    pub async fn put(&self, key: &CacheKey, results: &[SearchResult]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec(results)?;
        let path = self.entry_path(key);
        tokio::fs::write(&path, bytes).await?;
        debug!("Cached {} results at {}", results.len(), path.display());
        Ok(())
    }
}
