//! File-backed page cache keyed by URL hash.
//!
//! One file per URL, named by a hash of the URL string; the file's
//! modification time is the TTL clock, so no metadata wrapper is
//! needed. Stale entries are bypassed and later overwritten, never
//! proactively evicted: the cache directory is the operator-managed
//! bound on growth.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// How long cached pages stay valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
    ttl: Duration,
}

impl PageCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self { dir: dir.into(), ttl }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(url_key(url))
    }

    /// Cached payload for `url`, if a fresh entry exists.
    ///
    /// An entry older than the TTL is treated as absent; unreadable
    /// entries are skipped the same way. Nothing is deleted here.
    pub fn get(&self, url: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(url);
        let modified = fs::metadata(&path).ok()?.modified().ok()?;
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            return None;
        }
        fs::read(&path).ok()
    }

    /// Write or overwrite the entry for `url`, creating the cache
    /// directory on demand.
    ///
    /// The payload lands in a temp file first and is renamed into
    /// place, so a concurrent reader never observes a partial entry.
    /// Write failures propagate to the caller.
    pub fn put(&self, url: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::CacheWrite {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.entry_path(url);
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|source| Error::CacheWrite {
            path: path.clone(),
            source,
        })?;
        tmp.write_all(bytes).map_err(|source| Error::CacheWrite {
            path: path.clone(),
            source,
        })?;
        tmp.persist(&path).map_err(|err| Error::CacheWrite {
            path: path.clone(),
            source: err.error,
        })?;

        Ok(())
    }
}

/// Fixed-length, filesystem-safe storage key for a URL.
pub fn url_key(url: &str) -> String {
    let hash = Sha256::digest(url.as_bytes());
    hex::encode(&hash[..16])
}
