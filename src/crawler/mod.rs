//! Crawler module for page fetching and link discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageFetcher`] trait
//! - The per-run fetch cache
//! - Link extraction and classification
//! - Overall crawl coordination

mod cache;
mod coordinator;
mod extract;
mod fetcher;
mod link;

pub use cache::FetchCache;
pub use coordinator::{crawl_site, Coordinator};
pub use extract::{
    css_background_url, extract_links, extract_with_markup, extract_with_patterns, ExtractError,
    RawReferences,
};
pub use fetcher::{build_http_client, fetch_url, FetchError, HttpFetcher, PageFetcher};
pub use link::{LinkCategory, PageLink};
