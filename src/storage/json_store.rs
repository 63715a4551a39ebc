use crate::hierarchy::PageNode;
use crate::storage::traits::{PageStore, Snapshot, StorageError, StorageResult};
use chrono::Utc;
use std::path::{Path, PathBuf};
use url::Url;

/// Stores each discovery run as a pretty-printed JSON snapshot
///
/// Files are named `<domain-with-dashes>_<timestamp>.json` inside the data
/// directory, which is created on first save.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reads a snapshot back from disk
    pub fn load(path: &Path) -> StorageResult<Snapshot> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Builds the snapshot filename for a source URL at the current time
    fn filename_for(&self, source_url: &str) -> StorageResult<PathBuf> {
        let host = Url::parse(source_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
            .ok_or_else(|| StorageError::InvalidSourceUrl(source_url.to_string()))?;

        let domain = host.replace('.', "-");
        // Colons are not filename-safe everywhere
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S");
        Ok(self.data_dir.join(format!("{}_{}.json", domain, timestamp)))
    }
}

impl PageStore for JsonFileStore {
    fn save(&self, source_url: &str, pages: &[PageNode]) -> StorageResult<PathBuf> {
        std::fs::create_dir_all(&self.data_dir)?;

        let snapshot = Snapshot::new(source_url, pages.to_vec());
        let path = self.filename_for(source_url)?;
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&path, json)?;

        tracing::info!("Saved {} pages to {}", snapshot.total_pages, path.display());
        Ok(path)
    }
}
