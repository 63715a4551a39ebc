//! Per-page content extraction
//!
//! Fetches a single page, strips navigational chrome, picks the most likely
//! main-content region, and produces a normalized content record. Extraction
//! never fails: fetch or parse problems are captured into the record's
//! `error` field with slug-derived fallbacks.

mod extractor;

pub use extractor::{extract_content, ContentRecord, PageImage};
