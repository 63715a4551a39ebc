//! Pagemap: website discovery and content extraction
//!
//! This crate discovers the page set of a target website (sitemap first,
//! homepage-crawl fallback), organizes it into a two-level hierarchy, and
//! extracts normalized content from each discovered page.

pub mod config;
pub mod discovery;
pub mod fetch;
pub mod hierarchy;
pub mod pipeline;
pub mod progress;
pub mod scrape;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for pagemap operations
#[derive(Debug, Error)]
pub enum PagemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] fetch::FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for pagemap operations
pub type Result<T> = std::result::Result<T, PagemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use hierarchy::{PageNode, PageType};
pub use pipeline::Pipeline;
pub use progress::{DiscoveryProgress, Phase, ProgressSink};
pub use scrape::ContentRecord;
