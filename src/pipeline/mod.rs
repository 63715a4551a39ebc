//! Discovery pipeline orchestration
//!
//! This module sequences the three phases of a discovery run, strictly in
//! order and with no re-entry:
//! 1. discovering - sitemap resolution, falling back to a homepage crawl
//! 2. building - two-level hierarchy construction
//! 3. scraping - per-node content extraction, parent first then children
//!
//! The pipeline exclusively owns the page tree and the progress record for
//! the duration of a run; all fetches are sequential, so scrape ordering is
//! stable and reproducible for a given discovered URL list.

use crate::config::Config;
use crate::discovery::{crawl_homepage, resolve_sitemap};
use crate::fetch::{build_http_client, Pacer};
use crate::hierarchy::{build_hierarchy, count_pages, PageNode};
use crate::progress::{DiscoveryProgress, Phase, ProgressSink};
use crate::scrape::{extract_content, ContentRecord};
use crate::storage::{JsonFileStore, PageStore};
use crate::url::normalize_base_url;
use crate::Result;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Drives a full discovery run against one target site
pub struct Pipeline {
    client: Client,
    config: Config,
    store: Box<dyn PageStore>,
}

impl Pipeline {
    /// Creates a pipeline with the default JSON file store
    pub fn new(config: Config) -> Result<Self> {
        let store = Box::new(JsonFileStore::new(&config.output.data_dir));
        Self::with_store(config, store)
    }

    /// Creates a pipeline with a caller-provided persistence backend
    pub fn with_store(config: Config, store: Box<dyn PageStore>) -> Result<Self> {
        let client = build_http_client(&config.fetcher)?;
        Ok(Self {
            client,
            config,
            store,
        })
    }

    /// Discovers a site's pages and extracts content for every node
    ///
    /// The base URL is validated up front; a malformed URL is the only error
    /// that surfaces before the pipeline starts. Once running, stage-local
    /// failures never escape their stage: sitemap exhaustion falls back to
    /// the homepage crawl, a failed homepage crawl falls back to the base
    /// URL itself, and per-page extraction failures land in that page's
    /// content record.
    ///
    /// The finished tree is handed to the persistence store, then returned.
    pub async fn discover(
        &self,
        base_url: &str,
        sink: &mut dyn ProgressSink,
    ) -> Result<Vec<PageNode>> {
        let base = normalize_base_url(base_url)?;

        let mut progress = DiscoveryProgress::new();
        sink.emit(&progress);

        // Phase 1: discovering
        tracing::info!("Discovering pages for {}", base);
        let mut urls = resolve_sitemap(
            &self.client,
            &base,
            &self.config.fetcher,
            &mut progress,
            sink,
        )
        .await;

        if urls.is_empty() {
            tracing::info!("No sitemap found, crawling homepage");
            progress.current_action = "No sitemap found, crawling homepage...".to_string();
            sink.emit(&progress);

            urls = crawl_homepage(&self.client, &base, &self.config.fetcher).await;
            progress.urls_found = urls.len();
            progress.current_action = format!("Found {} links on homepage", urls.len());
            sink.emit(&progress);
        }

        // Phase 2: building
        progress.phase = Phase::Building;
        progress.current_action = "Building page hierarchy...".to_string();
        sink.emit(&progress);

        let mut tree = build_hierarchy(&urls, &base);

        // Phase 3: scraping
        let total = count_pages(&tree);
        progress.phase = Phase::Scraping;
        progress.processed = 0;
        progress.queue = total;
        progress.total = total;
        progress.current_action = format!("Starting to scrape {} pages...", total);
        sink.emit(&progress);

        let mut pacer = Pacer::new(Duration::from_millis(self.config.scrape.page_delay_ms));
        for node in &mut tree {
            self.scrape_node(&base, node, &mut pacer).await;
            bump_scraped(&mut progress, sink);

            for child in &mut node.children {
                self.scrape_node(&base, child, &mut pacer).await;
                bump_scraped(&mut progress, sink);
            }
        }

        progress.current_action = "Saving data...".to_string();
        sink.emit(&progress);

        let saved = self.store.save(&base, &tree)?;
        tracing::info!("Discovery run saved to {}", saved.display());

        Ok(tree)
    }

    /// Scrapes content for the paths the caller already knows it wants
    ///
    /// Bypasses discovery and hierarchy; no progress, no persistence. Each
    /// record lands in the map under its input path.
    pub async fn scrape_selected(
        &self,
        base_url: &str,
        paths: &[String],
    ) -> Result<HashMap<String, ContentRecord>> {
        let base = normalize_base_url(base_url)?;

        let mut pacer = Pacer::new(Duration::from_millis(self.config.scrape.page_delay_ms));
        let mut results = HashMap::new();

        for path in paths {
            pacer.wait().await;
            let record = extract_content(
                &self.client,
                &base,
                path,
                &self.config.fetcher,
                &self.config.scrape,
            )
            .await;
            results.insert(path.clone(), record);
        }

        Ok(results)
    }

    /// Extracts one node's content, in place
    ///
    /// The extracted title replaces the slug-derived one when non-empty.
    async fn scrape_node(&self, base: &str, node: &mut PageNode, pacer: &mut Pacer) {
        pacer.wait().await;

        let content = extract_content(
            &self.client,
            base,
            &node.url,
            &self.config.fetcher,
            &self.config.scrape,
        )
        .await;

        if !content.title.is_empty() {
            node.title = content.title.clone();
        }
        node.content = Some(content);
    }
}

fn bump_scraped(progress: &mut DiscoveryProgress, sink: &mut dyn ProgressSink) {
    progress.processed += 1;
    progress.current_action =
        format!("Scraped {} of {} pages", progress.processed, progress.queue);
    sink.emit(progress);
}
