use core::future::Future;
use std::collections::HashMap;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::fs;

/// A persistent string-to-string store, like a browser's local storage.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> impl Future<Output = io::Result<Option<String>>> + Send;

    /// Store `value` under `key`, replacing whatever was there.
    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = io::Result<()>> + Send;

    /// Forget whatever is stored under `key`. Removing a missing key is fine.
    fn remove_item(&self, key: &str) -> impl Future<Output = io::Result<()>> + Send;
}

/// Storage backed by a directory, with one file per key. The directory is
/// created the first time something is written.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Where the files live
    dir: PathBuf,
}

impl FileStorage {
    /// Store things in `dir`.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }
}

impl Storage for FileStorage {
    async fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.dir.join(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await?;

        tracing::debug!(key, dir = %self.dir.display(), "writing storage item");
        fs::write(self.dir.join(key), value).await
    }

    async fn remove_item(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.dir.join(key)).await {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// Storage that only lasts as long as the process. Keeps a log of every
/// write, which is handy for checking what a flow actually stored.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    /// Current values and the write log
    inner: Mutex<MemoryInner>,
}

/// The lockable part of `MemoryStorage`
#[derive(Debug, Default)]
struct MemoryInner {
    /// Current value for each key
    items: HashMap<String, String>,

    /// Every `(key, value)` written, in order
    writes: Vec<(String, String)>,
}

impl MemoryStorage {
    /// Make an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(key, value)` pair written so far, in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.lock().writes.clone()
    }

    /// Nothing here can leave the map half-updated, so a poisoned lock is
    /// still usable.
    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Storage for MemoryStorage {
    async fn get_item(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock().items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut inner = self.lock();
        inner.items.insert(key.to_string(), value.to_string());
        inner.writes.push((key.to_string(), value.to_string()));

        Ok(())
    }

    async fn remove_item(&self, key: &str) -> io::Result<()> {
        self.lock().items.remove(key);

        Ok(())
    }
}
