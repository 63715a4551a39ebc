use crate::config::types::Config;
use crate::config::validation::validate_config;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use pagemap::config::load_config;
///
/// let config = load_config(Path::new("pagemap.toml")).unwrap();
/// println!("Timeout: {}s", config.fetcher.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Loads a configuration file when a path is given, otherwise returns defaults
///
/// The built-in defaults are always valid, so validation only runs on loaded
/// files.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}
