//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator owns everything a run mutates: the fetch cache, the
//! sitemap tree and the statistics. It walks the site depth-first, one
//! awaited fetch at a time, and stops requesting pages once the cache holds
//! `max_pages` entries. Branches that were already expanded still finish
//! attaching nodes from cached bodies after the budget is spent.

use crate::crawler::cache::FetchCache;
use crate::crawler::extract::extract_links;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::link::PageLink;
use crate::output::{CrawlStatistics, NodeId, SitemapTree};

/// Main crawler coordinator structure
pub struct Coordinator<F> {
    fetcher: F,
    seed: String,
    max_pages: usize,
    cache: FetchCache,
    tree: SitemapTree,
    stats: CrawlStatistics,
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of page bodies
    /// * `seed` - Starting URL; also the domain every link is checked against
    /// * `max_pages` - Maximum number of distinct URLs to fetch
    pub fn new(fetcher: F, seed: impl Into<String>, max_pages: usize) -> Self {
        Self {
            fetcher,
            seed: seed.into(),
            max_pages,
            cache: FetchCache::new(),
            tree: SitemapTree::new(),
            stats: CrawlStatistics::default(),
        }
    }

    /// Replaces the fetch cache, e.g. with one seeded from an earlier run
    ///
    /// Pre-seeded entries count against the page budget.
    pub fn with_cache(mut self, cache: FetchCache) -> Self {
        self.cache = cache;
        self
    }

    /// Crawls the site starting at the seed and returns the finished tree
    pub async fn crawl(&mut self) -> &SitemapTree {
        tracing::info!("Starting crawl of {} (max {} pages)", self.seed, self.max_pages);

        let seed = self.seed.clone();
        let links = self.read_links(&seed).await;
        let root = self.tree.root();
        self.tree.attach(root, &links);

        self.crawl_links(&links, root, &seed).await;

        self.stats.record_tree(&self.tree);
        tracing::info!(
            "Crawl finished: {} pages processed, {} nodes",
            self.cache.len(),
            self.stats.total_nodes()
        );

        &self.tree
    }

    /// Expands every crawlable link found on `page_url`
    ///
    /// `links` must already be attached under `parent`. Each link is looked
    /// up among `parent`'s children; links without a node are skipped. A URL
    /// seen for the first time is fetched, its links attached under its node,
    /// and the crawl descends into it. A URL already in the cache has its
    /// links attached from the cached body but is not descended into again.
    pub async fn crawl_links(&mut self, links: &[PageLink], parent: NodeId, page_url: &str) {
        for link in links {
            if !link.crawlable {
                continue;
            }

            if self.cache.len() >= self.max_pages {
                self.stats.links_over_budget += 1;
                continue;
            }

            let Some(node) = self.tree.find_child(parent, &link.target) else {
                tracing::debug!("No node for {} under {}, skipping", link.target, page_url);
                self.stats.links_without_node += 1;
                continue;
            };

            if self.cache.contains(&link.target) {
                tracing::debug!("Skipped HTTP request for {}", link.target);
                self.stats.cache_reuses += 1;
                let child_links = self.read_links(&link.target).await;
                self.tree.attach(node, &child_links);
            } else {
                let child_links = self.read_links(&link.target).await;
                self.tree.attach(node, &child_links);
                Box::pin(self.crawl_links(&child_links, node, &link.target)).await;
            }
        }
    }

    /// Reads a page through the cache and extracts its links
    async fn read_links(&mut self, url: &str) -> Vec<PageLink> {
        let fetching = !self.cache.contains(url);
        if fetching {
            tracing::info!("Crawling {}", url);
            self.stats.pages_fetched += 1;
        }

        let body = self.cache.read_page(url, &self.fetcher).await;
        if fetching && body.is_empty() {
            self.stats.empty_pages += 1;
        }

        let links = extract_links(&body, url, &self.seed);
        self.stats.links_discovered += links.len() as u64;
        links
    }

    pub fn tree(&self) -> &SitemapTree {
        &self.tree
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }

    pub fn stats(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Consumes the coordinator, returning the tree, the cache and the statistics
    pub fn into_parts(self) -> (SitemapTree, FetchCache, CrawlStatistics) {
        (self.tree, self.cache, self.stats)
    }
}

/// Crawls `seed` with a fresh cache and returns the sitemap tree
pub async fn crawl_site<F: PageFetcher>(fetcher: F, seed: &str, max_pages: usize) -> SitemapTree {
    let mut coordinator = Coordinator::new(fetcher, seed, max_pages);
    coordinator.crawl().await;
    coordinator.into_parts().0
}
