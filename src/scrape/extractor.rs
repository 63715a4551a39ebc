use crate::config::{FetcherConfig, ScrapeConfig};
use crate::fetch::fetch_text;
use crate::url::{humanize_slug, path_segments};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use url::Url;

/// Elements removed before extraction: scripts, styles, and common
/// navigation/sidebar chrome
const STRIP_SELECTOR: &str = "script, style, nav, footer, header, aside, .sidebar, .navigation, .menu";

/// Main-content candidates, in priority order
const MAIN_CONTENT_SELECTORS: &[&str] =
    &["main", "article", ".content", ".main-content", "#content", "#main"];

/// An image reference collected from a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageImage {
    /// Absolute URL
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// Normalized extraction result for one page
///
/// When `error` is set, all text fields are best-effort fallbacks derived
/// from the URL slug rather than fetched content, and `word_count` is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub title: String,
    pub meta_description: String,
    pub h1: String,
    /// HTML fragment, whitespace-collapsed and length-capped
    pub body_content: String,
    pub images: Vec<PageImage>,
    pub word_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Extracts the content record for one page
///
/// `path` is relative to `base_url` (`/` for the homepage). This function
/// never returns an error: a failed fetch produces a fallback record with
/// the failure message in `error`. Request pacing is the caller's concern.
pub async fn extract_content(
    client: &Client,
    base_url: &str,
    path: &str,
    fetcher: &FetcherConfig,
    scrape: &ScrapeConfig,
) -> ContentRecord {
    let url = if path == "/" {
        base_url.to_string()
    } else {
        format!("{}{}", base_url, path)
    };

    tracing::debug!("Scraping {}", url);
    match fetch_text(client, &url, fetcher).await {
        Ok(html) => extract_from_html(&html, base_url, scrape),
        Err(e) => {
            tracing::warn!("Failed to scrape {}: {}", url, e);
            fallback_record(path, e.to_string())
        }
    }
}

/// Extracts a content record from already-fetched HTML
fn extract_from_html(html: &str, base_url: &str, config: &ScrapeConfig) -> ContentRecord {
    let mut document = Html::parse_document(html);
    strip_chrome(&mut document);

    let title_text = select_text(&document, "title");
    let h1 = select_text(&document, "h1");
    let meta_description = select_attr(&document, r#"meta[name="description"]"#, "content");

    let raw_body = select_main_content(&document, config);
    let body_content = truncate_chars(&collapse_whitespace(&raw_body), config.body_char_limit);

    let word_count = strip_tags(&body_content).split_whitespace().count();
    let images = collect_images(&document, base_url, config.image_limit);

    // "Page Name | Site Name" and "Page Name - Site Name" both reduce to the
    // page name; split on | first, then -, keeping the first segment.
    let raw_title = if title_text.is_empty() {
        h1.clone()
    } else {
        title_text
    };
    let display_title = raw_title
        .split('|')
        .next()
        .unwrap_or("")
        .split('-')
        .next()
        .unwrap_or("")
        .trim()
        .to_string();
    let title = if display_title.is_empty() {
        h1.clone()
    } else {
        display_title
    };

    ContentRecord {
        title,
        meta_description,
        h1,
        body_content,
        images,
        word_count,
        error: None,
    }
}

/// Builds the best-effort record for a page that could not be fetched
fn fallback_record(path: &str, error: String) -> ContentRecord {
    let title = match path_segments(path).last() {
        Some(slug) => humanize_slug(slug),
        None => "Home".to_string(),
    };

    ContentRecord {
        title,
        meta_description: String::new(),
        h1: String::new(),
        body_content: String::new(),
        images: Vec::new(),
        word_count: 0,
        error: Some(error),
    }
}

/// Detaches scripts, styles, and navigation chrome from the document
fn strip_chrome(document: &mut Html) {
    let Ok(selector) = Selector::parse(STRIP_SELECTOR) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Returns the trimmed text of the first element matching the selector
fn select_text(document: &Html, selector: &str) -> String {
    let Ok(sel) = Selector::parse(selector) else {
        return String::new();
    };
    document
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Returns the given attribute of the first element matching the selector
fn select_attr(document: &Html, selector: &str, attr: &str) -> String {
    let Ok(sel) = Selector::parse(selector) else {
        return String::new();
    };
    document
        .select(&sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

/// Picks the most likely main-content region
///
/// Tries the candidate selectors in priority order; the first whose inner
/// HTML exceeds the configured minimum wins. Falls back to `<body>`.
fn select_main_content(document: &Html, config: &ScrapeConfig) -> String {
    for selector in MAIN_CONTENT_SELECTORS {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        if let Some(element) = document.select(&sel).next() {
            let inner = element.inner_html();
            if inner.len() > config.min_content_chars {
                return inner;
            }
        }
    }

    select_inner_html(document, "body")
}

fn select_inner_html(document: &Html, selector: &str) -> String {
    let Ok(sel) = Selector::parse(selector) else {
        return String::new();
    };
    document
        .select(&sel)
        .next()
        .map(|el| el.inner_html())
        .unwrap_or_default()
}

/// Collects up to `limit` images with a non-data-URI src, resolved absolute
fn collect_images(document: &Html, base_url: &str, limit: usize) -> Vec<PageImage> {
    let Ok(sel) = Selector::parse("img") else {
        return Vec::new();
    };
    let base = Url::parse(base_url).ok();

    let mut images = Vec::new();
    for element in document.select(&sel) {
        if images.len() >= limit {
            break;
        }

        let Some(src) = element.value().attr("src") else {
            continue;
        };
        if src.is_empty() || src.starts_with("data:") {
            continue;
        }

        let absolute = if src.starts_with("http") {
            src.to_string()
        } else {
            match base.as_ref().and_then(|b| b.join(src).ok()) {
                Some(resolved) => resolved.to_string(),
                None => continue,
            }
        };

        images.push(PageImage {
            src: absolute,
            alt: element.value().attr("alt").unwrap_or("").to_string(),
        });
    }

    images
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"))
}

fn collapse_whitespace(html: &str) -> String {
    whitespace_regex().replace_all(html, " ").trim().to_string()
}

fn strip_tags(html: &str) -> String {
    tag_regex().replace_all(html, "").to_string()
}

/// Truncates to a character count without splitting a code point
fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BASE: &str = "https://example.com";

    fn scrape_config() -> ScrapeConfig {
        ScrapeConfig::default()
    }

    fn fetcher_config() -> FetcherConfig {
        FetcherConfig {
            timeout_secs: 5,
            max_attempts: 1,
            retry_delay_ms: 10,
        }
    }

    #[test]
    fn test_extracts_title_meta_and_h1() {
        let html = r#"<html><head>
            <title>About Us | Acme Corp</title>
            <meta name="description" content="Who we are">
        </head><body>
            <h1>About Acme</h1>
            <main>
            <p>We make everything, from anvils to rockets, with pride and care.</p>
            <p>Founded long ago, still going strong. Visit our workshops any day.</p>
            </main>
        </body></html>"#;

        let record = extract_from_html(html, BASE, &scrape_config());
        assert_eq!(record.title, "About Us");
        assert_eq!(record.meta_description, "Who we are");
        assert_eq!(record.h1, "About Acme");
        assert!(record.error.is_none());
        assert!(record.body_content.contains("anvils"));
        assert!(record.word_count > 10);
    }

    #[test]
    fn test_title_splits_on_pipe_before_hyphen() {
        let html = r#"<html><head><title>State-of-the-Art Labs | Acme</title></head>
            <body><h1>Labs</h1></body></html>"#;

        let record = extract_from_html(html, BASE, &scrape_config());
        // The pipe segment is split again on '-', so hyphenated names truncate
        assert_eq!(record.title, "State");
    }

    #[test]
    fn test_missing_title_falls_back_to_h1() {
        let html = r#"<html><body><h1>Only Heading</h1><p>text</p></body></html>"#;
        let record = extract_from_html(html, BASE, &scrape_config());
        assert_eq!(record.title, "Only Heading");
    }

    #[test]
    fn test_strips_navigation_chrome() {
        let html = r#"<html><body>
            <nav><a href="/">Nav link text</a></nav>
            <div class="sidebar">Sidebar junk</div>
            <main><p>Real content of the page, long enough to win the candidate length check comfortably, with plenty of words and characters to spare.</p></main>
            <footer>Footer text</footer>
        </body></html>"#;

        let record = extract_from_html(html, BASE, &scrape_config());
        assert!(record.body_content.contains("Real content"));
        assert!(!record.body_content.contains("Nav link"));
        assert!(!record.body_content.contains("Sidebar junk"));
        assert!(!record.body_content.contains("Footer text"));
    }

    #[test]
    fn test_short_candidates_fall_back_to_body() {
        // <main> exists but is under the minimum length; a 500-character body
        // must still yield non-empty content.
        let filler = "word ".repeat(100);
        let html = format!(
            r#"<html><body><main>tiny</main><div>{}</div></body></html>"#,
            filler
        );

        let record = extract_from_html(&html, BASE, &scrape_config());
        assert!(!record.body_content.is_empty());
        assert!(record.body_content.contains("word"));
    }

    #[test]
    fn test_candidate_priority_order() {
        let long = "x".repeat(200);
        let html = format!(
            r#"<html><body>
            <article><p>article {}</p></article>
            <main><p>main {}</p></main>
            </body></html>"#,
            long, long
        );

        let record = extract_from_html(&html, BASE, &scrape_config());
        assert!(record.body_content.contains("main"));
    }

    #[test]
    fn test_body_truncation() {
        let mut config = scrape_config();
        config.body_char_limit = 50;
        let html = format!(
            "<html><body><main>{}</main></body></html>",
            "a".repeat(500)
        );

        let record = extract_from_html(&html, BASE, &config);
        assert_eq!(record.body_content.chars().count(), 50);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let long = "y".repeat(150);
        let html = format!(
            "<html><body><main><p>spaced    out\n\n\ttext {}</p></main></body></html>",
            long
        );
        let record = extract_from_html(&html, BASE, &scrape_config());
        assert!(record.body_content.contains("spaced out text"));
    }

    #[test]
    fn test_image_collection() {
        let html = r#"<html><body><main>
            <p>Long enough content to pass the candidate threshold easily, one two three four five six.</p>
            <img src="/img/a.png" alt="First">
            <img src="https://cdn.example.com/b.jpg">
            <img src="data:image/png;base64,xyz" alt="inline">
        </main></body></html>"#;

        let record = extract_from_html(html, BASE, &scrape_config());
        assert_eq!(record.images.len(), 2);
        assert_eq!(record.images[0].src, "https://example.com/img/a.png");
        assert_eq!(record.images[0].alt, "First");
        assert_eq!(record.images[1].src, "https://cdn.example.com/b.jpg");
        assert_eq!(record.images[1].alt, "");
    }

    #[test]
    fn test_image_limit() {
        let mut config = scrape_config();
        config.image_limit = 3;
        let imgs: String = (0..10)
            .map(|i| format!(r#"<img src="/i{}.png">"#, i))
            .collect();
        let html = format!(
            "<html><body><main><p>{}</p>{}</main></body></html>",
            "pad ".repeat(50),
            imgs
        );

        let record = extract_from_html(&html, BASE, &config);
        assert_eq!(record.images.len(), 3);
    }

    #[test]
    fn test_word_count_from_stripped_tags() {
        let html = format!(
            "<html><body><main><p>one two</p> <p>three four</p> {}</main></body></html>",
            "<i>pad</i> ".repeat(40)
        );
        let record = extract_from_html(&html, BASE, &scrape_config());
        assert_eq!(record.word_count, 4 + 40);
    }

    #[test]
    fn test_fallback_record_shape() {
        let record = fallback_record("/blog/my-first-post", "boom".to_string());
        assert_eq!(record.title, "My First Post");
        assert_eq!(record.word_count, 0);
        assert!(record.body_content.is_empty());
        assert!(record.images.is_empty());
        assert_eq!(record.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_fallback_record_for_root() {
        let record = fallback_record("/", "down".to_string());
        assert_eq!(record.title, "Home");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ab", 10), "ab");
    }

    #[tokio::test]
    async fn test_extract_content_fetch_failure() {
        let server = MockServer::start().await;
        // No mounts: every page 404s

        let client = crate::fetch::build_http_client(&fetcher_config()).unwrap();
        let record = extract_content(
            &client,
            &server.uri(),
            "/blog/some-post",
            &fetcher_config(),
            &scrape_config(),
        )
        .await;

        assert_eq!(record.word_count, 0);
        assert!(record.error.is_some());
        assert_eq!(record.title, "Some Post");
    }

    #[tokio::test]
    async fn test_extract_content_homepage_uses_bare_base() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><head><title>Welcome</title></head><body><h1>Hi</h1></body></html>"#,
            ))
            .mount(&server)
            .await;

        let client = crate::fetch::build_http_client(&fetcher_config()).unwrap();
        let record = extract_content(
            &client,
            &server.uri(),
            "/",
            &fetcher_config(),
            &scrape_config(),
        )
        .await;

        assert_eq!(record.title, "Welcome");
        assert!(record.error.is_none());
    }
}
