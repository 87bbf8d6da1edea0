//! Session store persisted as a JSON file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use talent_core::{Error, Result};
use tokio::sync::Mutex;

use super::SessionStore;

/// Tracing target for the file-backed store.
const TRACING_TARGET: &str = "talent_session::store::file";

/// Session store persisted to a JSON object on disk.
///
/// The file is rewritten as a whole on every change: the new content goes to
/// a sibling temporary file that is then renamed over the old one, so readers
/// never observe a partially written session.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Arc<PathBuf>,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileStore {
    /// Opens the store at `path`, loading its current content.
    ///
    /// A missing file is treated as an empty store and is only created on
    /// the first write.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|error| {
                Error::storage()
                    .with_message("session file is not a JSON object of strings")
                    .with_context(path.display().to_string())
                    .with_source(error)
            })?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                return Err(Error::from(error).with_context(path.display().to_string()));
            }
        };

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path.display(),
            keys = entries.len(),
            "Opened session file"
        );

        Ok(Self {
            path: Arc::new(path),
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&tmp_path, bytes).await?;
        tokio::fs::rename(&tmp_path, &*self.path).await?;

        tracing::trace!(
            target: TRACING_TARGET,
            path = %self.path.display(),
            keys = entries.len(),
            "Persisted session file"
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut map = self.entries.lock().await;
        let mut next = map.clone();
        for (key, value) in entries {
            next.insert((*key).to_owned(), value.clone());
        }
        self.persist(&next).await?;
        *map = next;
        Ok(())
    }

    async fn remove_many(&self, keys: &[&str]) -> Result<()> {
        let mut map = self.entries.lock().await;
        if !keys.iter().any(|key| map.contains_key(*key)) {
            return Ok(());
        }

        let mut next = map.clone();
        for key in keys {
            next.remove(*key);
        }
        self.persist(&next).await?;
        *map = next;
        Ok(())
    }
}
