//! URL validation and path helpers
//!
//! The pipeline works with a normalized base URL (scheme + host, no trailing
//! slash) and base-relative page paths. This module owns those conversions.

use crate::{UrlError, UrlResult};
use url::Url;

/// Validates and normalizes the base URL a discovery run starts from
///
/// Accepts only http/https URLs with a host. The query and fragment are
/// dropped and the trailing slash is stripped, so the result can be joined
/// with relative page paths by plain concatenation.
///
/// # Examples
///
/// ```
/// use pagemap::url::normalize_base_url;
///
/// let base = normalize_base_url("https://example.com/").unwrap();
/// assert_eq!(base, "https://example.com");
/// ```
pub fn normalize_base_url(input: &str) -> UrlResult<String> {
    let mut url = Url::parse(input).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    url.set_fragment(None);
    url.set_query(None);

    let mut base = url.to_string();
    while base.ends_with('/') {
        base.pop();
    }

    Ok(base)
}

/// Converts an absolute page URL to a path relative to the base URL
///
/// The trailing slash is stripped and the bare root becomes `/`. URLs that do
/// not share the base prefix (a sitemap listing a www variant, for example)
/// fall back to their own path component.
pub fn relative_path(base_url: &str, url: &str) -> String {
    let raw = match url.strip_prefix(base_url) {
        Some(rest) => rest.to_string(),
        None => match Url::parse(url) {
            Ok(parsed) => parsed.path().to_string(),
            Err(_) => url.to_string(),
        },
    };

    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

/// Splits a relative path into its non-empty segments
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Turns a URL slug into a display title
///
/// Hyphens and underscores become spaces and each word is capitalized:
/// `"about-us"` becomes `"About Us"`.
pub fn humanize_slug(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
