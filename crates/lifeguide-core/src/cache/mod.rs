//! Offline cache: a key-value mirror of recently fetched server payloads.
//!
//! Entries are raw JSON exactly as the server sent them. A successful live
//! fetch overwrites its entry; a failed fetch reads it back. Nothing is ever
//! evicted, the resource set is bounded by the catalog plus one user's
//! bookmarks.

pub mod keys;

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::{ApiError, decode};
use crate::config::paths;
use crate::storage;

pub trait CacheStore: Send + Sync {
    /// Unconditionally overwrites `key`, persisted before returning.
    fn put(&self, key: &str, value: &Value) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<Value>>;
}

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct DirCache {
    dir: PathBuf,
}

impl DirCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn open_default() -> Self {
        Self::new(paths::cache_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let name: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl CacheStore for DirCache {
    fn put(&self, key: &str, value: &Value) -> Result<()> {
        let contents = serde_json::to_vec(value).context("Failed to serialize cache entry")?;
        storage::write_atomic(&self.entry_path(key), &contents)
    }

    fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.entry_path(key);
        let Some(contents) = storage::read_optional(&path)? else {
            return Ok(None);
        };
        serde_json::from_str(&contents)
            .map(Some)
            .with_context(|| format!("Failed to parse cache entry {}", path.display()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CacheStore for MemoryCache {
    fn put(&self, key: &str, value: &Value) -> Result<()> {
        self.lock().insert(key.to_string(), value.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lock().get(key).cloned())
    }
}

/// Result of a cache-backed fetch.
///
/// `Cached` and `Empty` carry the error that forced the fallback, so callers
/// can still react to `Unauthenticated`.
#[derive(Debug, Clone)]
pub enum Loaded<T> {
    Live(T),
    Cached { value: T, error: ApiError },
    Empty { error: ApiError },
}

impl<T> Loaded<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Loaded::Live(value) | Loaded::Cached { value, .. } => Some(value),
            Loaded::Empty { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Loaded::Live(value) | Loaded::Cached { value, .. } => Some(value),
            Loaded::Empty { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Loaded::Live(_) => None,
            Loaded::Cached { error, .. } | Loaded::Empty { error } => Some(error),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Loaded::Live(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loaded<U> {
        match self {
            Loaded::Live(value) => Loaded::Live(f(value)),
            Loaded::Cached { value, error } => Loaded::Cached {
                value: f(value),
                error,
            },
            Loaded::Empty { error } => Loaded::Empty { error },
        }
    }
}

/// Reads a cache entry, treating unreadable entries as absent.
pub fn read_entry(cache: &dyn CacheStore, key: &str) -> Option<Value> {
    match cache.get(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %format!("{err:#}"), "Unreadable cache entry");
            None
        }
    }
}

/// Runs a live fetch and keeps `key` in step with it.
///
/// On success the payload is validated against `T`, written to the cache and
/// returned. On failure (including a payload that does not decode) the last
/// cached payload for `key` is returned instead, or `Empty` if there is none.
pub async fn fetch_through<T, F>(cache: &dyn CacheStore, key: &str, what: &str, fetch: F) -> Loaded<T>
where
    T: DeserializeOwned,
    F: Future<Output = Result<Value, ApiError>>,
{
    let error = match fetch.await {
        Ok(payload) => match decode::<T>(what, &payload) {
            Ok(value) => {
                if let Err(err) = cache.put(key, &payload) {
                    tracing::warn!(key, error = %format!("{err:#}"), "Failed to write cache entry");
                }
                return Loaded::Live(value);
            }
            Err(err) => err,
        },
        Err(err) => err,
    };

    tracing::debug!(key, kind = %error.kind, "Live fetch failed; reading offline cache");
    let cached = read_entry(cache, key).and_then(|payload| match decode::<T>(what, &payload) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "Cached payload no longer decodes");
            None
        }
    });

    match cached {
        Some(value) => Loaded::Cached { value, error },
        None => Loaded::Empty { error },
    }
}
