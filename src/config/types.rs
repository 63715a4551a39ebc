use serde::Deserialize;

/// Main configuration structure for pagemap
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// HTTP fetcher behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetcherConfig {
    /// Per-attempt request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total number of attempts per URL (first try included)
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff between retries (milliseconds); attempt i waits i * base
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Per-page scraping configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrapeConfig {
    /// Minimum time between page requests (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,

    /// Maximum length of the extracted body fragment (characters)
    #[serde(rename = "body-char-limit", default = "default_body_char_limit")]
    pub body_char_limit: usize,

    /// Maximum number of images collected per page
    #[serde(rename = "image-limit", default = "default_image_limit")]
    pub image_limit: usize,

    /// Minimum inner-HTML length for a main-content candidate to win
    #[serde(rename = "min-content-chars", default = "default_min_content_chars")]
    pub min_content_chars: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory where discovery snapshots are written
    #[serde(rename = "data-dir", default = "default_data_dir")]
    pub data_dir: String,
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    2000
}

fn default_page_delay_ms() -> u64 {
    500
}

fn default_body_char_limit() -> usize {
    50_000
}

fn default_image_limit() -> usize {
    20
}

fn default_min_content_chars() -> usize {
    100
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            page_delay_ms: default_page_delay_ms(),
            body_char_limit: default_body_char_limit(),
            image_limit: default_image_limit(),
            min_content_chars: default_min_content_chars(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}
