//! Configuration loading and validation
//!
//! Pagemap runs with built-in defaults; a TOML file can override any of the
//! fetcher, scrape, or output settings.

mod parser;
mod types;
mod validation;

pub use parser::{load_config, load_config_or_default};
pub use types::{Config, FetcherConfig, OutputConfig, ScrapeConfig};
pub use validation::validate_config;
