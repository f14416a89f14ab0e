//! TTL-keyed file cache.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Internal cache failures. These never cross the [`CacheStore`] boundary:
/// `get`/`set` log them and degrade to a miss / no-op.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed cache entry: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// On-disk entry shape: `{"timestamp": <epoch seconds>, "data": ...}`.
#[derive(Debug, Deserialize)]
struct CacheEntry {
    timestamp: f64,
    data: Value,
}

/// Key -> JSON payload store, one file per key under a fixed directory.
///
/// A single global `max_age` applies to every key; callers that need a
/// shorter freshness window encode it into the key itself (the sun lookup
/// quantizes its key by time bucket). Reads are fail-open: a missing,
/// corrupt, or expired entry is a miss, never an error. Writes are
/// best-effort and unsynchronized; concurrent writers for the same key are
/// last-writer-wins, which is fine because payloads are pure functions of
/// the key. Per-key single-flight coalescing would be a compatible
/// enhancement but is intentionally not implemented.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    max_age: Duration,
}

impl CacheStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    /// Both the directory and `max_age` are fixed for the store's lifetime.
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, max_age })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Look up `key`. Returns the payload if a fresh entry exists, `None`
    /// otherwise. An expired entry is left on disk for the sweep to reap.
    pub fn get(&self, key: &str) -> Option<Value> {
        match self.read_entry(key) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(key, error = %err, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Store `data` under `key`, overwriting any previous entry. Failures
    /// are logged and swallowed; callers get no success signal.
    pub fn set(&self, key: &str, data: &Value) {
        if let Err(err) = self.write_entry(key, data) {
            tracing::warn!(key, error = %err, "cache write failed");
        }
    }

    fn read_entry(&self, key: &str) -> Result<Option<Value>, CacheError> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let entry: CacheEntry = serde_json::from_str(&contents)?;

        if now_epoch_secs() - entry.timestamp < self.max_age.as_secs_f64() {
            Ok(Some(entry.data))
        } else {
            tracing::debug!(key, "cache entry expired");
            Ok(None)
        }
    }

    fn write_entry(&self, key: &str, data: &Value) -> Result<(), CacheError> {
        let entry = serde_json::json!({
            "timestamp": now_epoch_secs(),
            "data": data,
        });
        fs::write(self.entry_path(key), serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Deterministic key -> file mapping. Keys may contain characters that
    /// are hostile in filenames (IPv6 colons, path separators), so anything
    /// outside `[A-Za-z0-9._-]` maps to `_`.
    fn entry_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }
}

fn now_epoch_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
