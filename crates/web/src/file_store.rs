//! JSON-file key/value store for native hosts.
//!
//! All entries live in one JSON object on disk. Each `set` rewrites the file
//! through a temporary sibling and a rename, so a crash never leaves a
//! half-written file behind.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Context;
use stockdesk_catalog::{KeyValueStore, StorageError};

#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileKvStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse key/value file at {path:?}"))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read key/value file at {path:?}"));
            }
        };

        tracing::info!(path = %path.display(), "opened file key/value store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Open the store at `{app_data_dir}/stockdesk/storage.json`.
    pub fn open_default() -> anyhow::Result<Self> {
        Self::open(default_store_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_file(&self, entries: &BTreeMap<String, String>) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory at {parent:?}"))?;
        }

        let payload = serde_json::to_string_pretty(entries).context("failed to encode entries")?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, payload).with_context(|| format!("failed to write {tmp:?}"))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to move {tmp:?} to {:?}", self.path))?;
        Ok(())
    }
}

impl KeyValueStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::Unavailable("file store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::Unavailable("file store lock poisoned".to_string()))?;

        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.write_file(&next)
            .map_err(|err| StorageError::WriteRejected(format!("{err:#}")))?;
        *entries = next;
        Ok(())
    }
}

/// Resolve `{app_data_dir}/stockdesk/storage.json`.
fn default_store_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut path = base;
    path.push("stockdesk");
    path.push("storage.json");
    Ok(path)
}
