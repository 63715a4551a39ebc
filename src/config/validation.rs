use crate::config::types::{Config, FetcherConfig, OutputConfig, ScrapeConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_scrape_config(&config.scrape)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 120, got {}",
            config.timeout_secs
        )));
    }

    if config.max_attempts < 1 || config.max_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "max-attempts must be between 1 and 10, got {}",
            config.max_attempts
        )));
    }

    Ok(())
}

/// Validates scrape configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.body_char_limit < 1 {
        return Err(ConfigError::Validation(
            "body-char-limit must be >= 1".to_string(),
        ));
    }

    if config.min_content_chars < 1 {
        return Err(ConfigError::Validation(
            "min-content-chars must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation(
            "data-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
