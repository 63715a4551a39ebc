//! Sitemap resolution
//!
//! Tries a fixed list of well-known sitemap locations and flattens whatever
//! it finds into a list of page URLs. A sitemap index is resolved one level
//! deep: every listed sub-sitemap is fetched and parsed for its page URLs.
//! Sub-sitemap failures are logged and skipped, so a partially broken index
//! still yields a usable page list.

use crate::config::FetcherConfig;
use crate::fetch::fetch_text;
use crate::progress::{DiscoveryProgress, ProgressSink};
use reqwest::Client;
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use std::io::Cursor;

/// Well-known sitemap paths, tried in order
const SITEMAP_CANDIDATES: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/wp-sitemap.xml",
];

/// A parsed sitemap document, split by entry kind
#[derive(Debug, Default)]
struct SitemapDocument {
    /// Page URLs from a urlset
    page_urls: Vec<String>,
    /// Sub-sitemap URLs from a sitemap index
    sub_sitemaps: Vec<String>,
}

impl SitemapDocument {
    fn is_index(&self) -> bool {
        !self.sub_sitemaps.is_empty()
    }
}

/// Resolves the site's sitemap into a flat list of page URLs
///
/// Candidates are tried in fixed order; the first one that yields at least
/// one URL wins and the rest are skipped. Returns an empty list when no
/// candidate produces anything, in which case the caller falls back to
/// crawling the homepage.
///
/// Progress is advanced through `urls_found` / `processed` / `queue` as each
/// candidate and sub-sitemap is attempted, and re-emitted to the sink after
/// every step.
pub async fn resolve_sitemap(
    client: &Client,
    base_url: &str,
    config: &FetcherConfig,
    progress: &mut DiscoveryProgress,
    sink: &mut dyn ProgressSink,
) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();

    for candidate in SITEMAP_CANDIDATES {
        let sitemap_url = format!("{}{}", base_url, candidate);
        progress.current_action = format!("Checking {}...", candidate.trim_start_matches('/'));
        sink.emit(progress);

        tracing::debug!("Trying sitemap candidate: {}", sitemap_url);
        let xml = match fetch_text(client, &sitemap_url, config).await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("No sitemap at {}: {}", sitemap_url, e);
                continue;
            }
        };

        let document = parse_sitemap(&xml);

        if document.is_index() {
            tracing::info!(
                "Found sitemap index at {} with {} sub-sitemaps",
                sitemap_url,
                document.sub_sitemaps.len()
            );
            progress.current_action =
                "Found sitemap index, fetching sub-sitemaps...".to_string();
            progress.queue = document.sub_sitemaps.len();
            sink.emit(progress);

            for sub_url in &document.sub_sitemaps {
                match fetch_text(client, sub_url, config).await {
                    Ok(sub_xml) => {
                        let sub_doc = parse_sitemap(&sub_xml);
                        urls.extend(sub_doc.page_urls);
                        progress.urls_found = urls.len();
                    }
                    Err(e) => {
                        // Partial indexes still produce a usable page list
                        tracing::warn!("Could not fetch sub-sitemap {}: {}", sub_url, e);
                    }
                }
                progress.processed += 1;
                sink.emit(progress);
            }
        }

        if !document.page_urls.is_empty() {
            urls.extend(document.page_urls);
            progress.urls_found = urls.len();
            progress.current_action = format!("Found {} URLs in sitemap", urls.len());
            sink.emit(progress);
        }

        if !urls.is_empty() {
            tracing::info!("Sitemap resolution found {} URLs", urls.len());
            break;
        }
    }

    urls
}

/// Parses sitemap XML into page URLs and sub-sitemap references
///
/// Uses the streaming reader, so a urlset and an index are handled by the
/// same pass; malformed entries are skipped.
fn parse_sitemap(xml: &str) -> SitemapDocument {
    let mut document = SitemapDocument::default();
    let reader = SiteMapReader::new(Cursor::new(xml.as_bytes()));

    for entity in reader {
        match entity {
            SiteMapEntity::Url(entry) => {
                if let Some(url) = entry.loc.get_url() {
                    document.page_urls.push(url.to_string());
                }
            }
            SiteMapEntity::SiteMap(entry) => {
                if let Some(url) = entry.loc.get_url() {
                    document.sub_sitemaps.push(url.to_string());
                }
            }
            SiteMapEntity::Err(e) => {
                tracing::debug!("Skipping malformed sitemap entry: {}", e);
            }
        }
    }

    document
}
