//! Homepage crawl fallback
//!
//! When no sitemap candidate yields anything, the homepage's anchors are the
//! next best page list: same-origin links only, with static assets and
//! fragment/query links filtered out.

use crate::config::FetcherConfig;
use crate::fetch::fetch_text;
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;

/// Path extensions that mark a link as a static asset, not a page
const ASSET_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "svg", "pdf", "css", "js", "ico", "woff", "woff2", "ttf",
];

/// Crawls the homepage for same-origin page links
///
/// Keeps root-relative links and absolute links sharing the base URL prefix;
/// drops anything with an asset extension, a fragment, or a query string.
/// On any fetch failure the base URL itself is returned as a singleton list,
/// so the pipeline always has at least one page to process.
pub async fn crawl_homepage(client: &Client, base_url: &str, config: &FetcherConfig) -> Vec<String> {
    let html = match fetch_text(client, base_url, config).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Homepage crawl of {} failed: {}", base_url, e);
            return vec![base_url.to_string()];
        }
    };

    let links = extract_same_origin_links(&html, base_url);
    tracing::info!("Found {} links on homepage", links.len());
    links
}

/// Extracts same-origin page links from homepage HTML, in first-seen order
fn extract_same_origin_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        // Root-relative (but not protocol-relative) or same-origin absolute
        let absolute = if href.starts_with('/') && !href.starts_with("//") {
            format!("{}{}", base_url, href)
        } else if href.starts_with(base_url) {
            href.to_string()
        } else {
            continue;
        };

        let path = absolute.strip_prefix(base_url).unwrap_or(&absolute);
        if !is_page_path(path) {
            continue;
        }

        if seen.insert(absolute.clone()) {
            links.push(absolute);
        }
    }

    links
}

/// Returns false for asset links and links carrying a fragment or query
fn is_page_path(path: &str) -> bool {
    if path.contains('#') || path.contains('?') {
        return false;
    }

    let lower = path.to_lowercase();
    !ASSET_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}
