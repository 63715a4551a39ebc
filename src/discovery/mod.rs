//! Page-set discovery
//!
//! Discovery produces the flat list of candidate page URLs for a site:
//! - Sitemap resolution: well-known sitemap paths, with sitemap indexes
//!   resolved into flat URL lists
//! - Homepage crawl: fallback anchor extraction when no sitemap exists

pub mod homepage;
pub mod sitemap;

pub use homepage::crawl_homepage;
pub use sitemap::resolve_sitemap;
