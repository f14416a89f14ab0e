//! Background sweep for expired cache entries.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::CancellationToken;

/// Periodic task that deletes cache files whose modification time is older
/// than the TTL. Runs independently of request traffic and holds no lock:
/// a delete racing a concurrent read degrades to a store miss on the
/// reader's side.
///
/// Expiry here is judged by file mtime, not the `timestamp` field inside
/// the entry; the store re-validates the field on every read, so the two
/// never disagree in a way a caller can observe.
#[derive(Debug)]
pub struct CleanupScheduler {
    dir: PathBuf,
    max_age: Duration,
    interval: Duration,
}

impl CleanupScheduler {
    pub fn new(dir: impl Into<PathBuf>, max_age: Duration, interval: Duration) -> Self {
        Self {
            dir: dir.into(),
            max_age,
            interval,
        }
    }

    /// Spawn the sweep loop onto the runtime. The first sweep fires one
    /// full interval after start. Cancelling `shutdown` stops the loop
    /// promptly; the returned handle resolves once it has exited.
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        tracing::debug!("cache cleanup task stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = sweep(&self.dir, self.max_age);
                        if removed > 0 {
                            tracing::info!(removed, "cache cleanup pass finished");
                        }
                    }
                }
            }
        })
    }
}

/// One cleanup pass: delete every `*.json` entry older than `max_age` by
/// mtime. Individual failures are logged and skipped; a failure listing
/// the directory ends this pass only. Returns the number of files removed.
pub fn sweep(dir: &Path, max_age: Duration) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "cache cleanup could not list directory");
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries {
        let path = match entry {
            Ok(entry) => entry.path(),
            Err(err) => {
                tracing::warn!(error = %err, "cache cleanup could not read directory entry");
                continue;
            }
        };

        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        match entry_age(&path) {
            Ok(age) if age > max_age => match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!(file = %path.display(), "removed expired cache entry");
                    removed += 1;
                }
                Err(err) => {
                    tracing::warn!(file = %path.display(), error = %err, "failed to remove expired cache entry");
                }
            },
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(file = %path.display(), error = %err, "could not stat cache entry");
            }
        }
    }
    removed
}

fn entry_age(path: &Path) -> std::io::Result<Duration> {
    let modified = fs::metadata(path)?.modified()?;
    Ok(SystemTime::now()
        .duration_since(modified)
        .unwrap_or(Duration::ZERO))
}
