use crate::hierarchy::{count_pages, PageNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid source URL: {0}")]
    InvalidSourceUrl(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A persisted discovery run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub source_url: String,
    pub scraped_at: DateTime<Utc>,
    /// All nodes, children included
    pub total_pages: usize,
    pub pages: Vec<PageNode>,
}

impl Snapshot {
    /// Wraps a finished page tree with its run metadata
    pub fn new(source_url: &str, pages: Vec<PageNode>) -> Self {
        Self {
            source_url: source_url.to_string(),
            scraped_at: Utc::now(),
            total_pages: count_pages(&pages),
            pages,
        }
    }
}

/// Sink that accepts a finished page tree and returns its storage location
pub trait PageStore {
    fn save(&self, source_url: &str, pages: &[PageNode]) -> StorageResult<PathBuf>;
}
