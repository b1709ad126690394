use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

/// Durable string key/value storage, the client-side equivalent of a
/// browser profile's local storage.
///
/// Reads are served from memory. Writes are async so a durable backend can
/// reach its medium without stalling the runtime.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
    async fn remove_item(&self, key: &str) -> Result<()>;
}

fn lock_entries(
    entries: &Mutex<HashMap<String, String>>,
) -> Result<MutexGuard<'_, HashMap<String, String>>> {
    entries
        .lock()
        .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))
}

/// Process-local storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock_entries(&self.entries)?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        lock_entries(&self.entries)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        lock_entries(&self.entries)?.remove(key);
        Ok(())
    }
}

/// JSON object on disk, written through on every change.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
    // Held across a write so snapshots reach the disk in the order taken.
    write_lock: tokio::sync::Mutex<()>,
}

impl FileStorage {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(entries) => {
                    debug!("Loaded {} stored entries from {}", entries.len(), path.display());
                    entries
                }
                Err(e) => {
                    warn!(
                        "Session file {} is unreadable, starting empty: {}",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn update<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut HashMap<String, String>) + Send,
    {
        let _writing = self.write_lock.lock().await;

        let contents = {
            let mut entries = lock_entries(&self.entries)?;
            change(&mut entries);
            serde_json::to_string_pretty(&*entries)?
        };

        self.persist(contents).await
    }

    async fn persist(&self, contents: String) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    Error::storage(format!("Failed to create {}: {e}", parent.display()))
                })?;
            }
        }

        tokio::fs::write(&self.path, contents)
            .await
            .map_err(|e| Error::storage(format!("Failed to write {}: {e}", self.path.display())))
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(lock_entries(&self.entries)?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
        .await
    }
}
