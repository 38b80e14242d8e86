//! Fetch cache shared by every level of a crawl
//!
//! Maps each URL to the body fetched for it, or to an empty string when the
//! fetch failed. An entry is written once, on the first attempt, and never
//! changes afterwards, so a URL costs at most one network request per run.
//! The number of entries is the crawl's processed-page count.

use super::fetcher::PageFetcher;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct FetchCache {
    pages: HashMap<String, String>,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the body for `url`, fetching it on the first request only
    ///
    /// A failed fetch is logged and stored as an empty body; it is not
    /// retried later in the run.
    pub async fn read_page<F: PageFetcher>(&mut self, url: &str, fetcher: &F) -> String {
        if let Some(body) = self.pages.get(url) {
            return body.clone();
        }

        let body = match fetcher.fetch(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Fetch failed, treating page as empty: {}", e);
                String::new()
            }
        };

        self.pages.insert(url.to_string(), body.clone());
        body
    }

    /// Number of URLs attempted so far
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.pages.get(url).map(String::as_str)
    }

    /// Seeds the cache with a known body; existing entries are left as they are
    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.pages.entry(url.into()).or_insert_with(|| body.into());
    }
}
