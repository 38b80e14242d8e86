//! Statistics collected while crawling
//!
//! The coordinator updates these counters as it goes; the CLI prints them
//! once the sitemap has been written.

use crate::crawler::LinkCategory;
use crate::output::SitemapTree;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Pages requested from the network
    pub pages_fetched: u64,

    /// Fetched pages that came back empty (including failed fetches)
    pub empty_pages: u64,

    /// Pages whose links were re-extracted from the cache instead of fetched
    pub cache_reuses: u64,

    /// Total links produced by extraction, over all pages
    pub links_discovered: u64,

    /// Crawlable links skipped because their tree node could not be found
    pub links_without_node: u64,

    /// Crawlable links skipped because the page budget was spent
    pub links_over_budget: u64,

    /// Node count per category in the finished tree
    pub nodes_by_category: HashMap<LinkCategory, u64>,
}

impl CrawlStatistics {
    /// Fills the per-category node counts from a finished tree
    pub fn record_tree(&mut self, tree: &SitemapTree) {
        self.nodes_by_category.clear();
        for id in tree.ids() {
            if let Some(category) = tree.node(id).category {
                *self.nodes_by_category.entry(category).or_insert(0) += 1;
            }
        }
    }

    /// Total link nodes in the tree, excluding the root
    pub fn total_nodes(&self) -> u64 {
        self.nodes_by_category.values().sum()
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Pages fetched: {}", stats.pages_fetched);
    println!("  Empty or failed pages: {}", stats.empty_pages);
    println!("  Pages re-read from cache: {}", stats.cache_reuses);
    println!("  Links discovered: {}", stats.links_discovered);
    println!("  Skipped (no tree node): {}", stats.links_without_node);
    println!("  Skipped (budget spent): {}", stats.links_over_budget);
    println!();

    println!("Sitemap Nodes by Category:");
    // Sort categories by count (descending)
    let mut category_counts: Vec<_> = stats.nodes_by_category.iter().collect();
    category_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.tag_name().cmp(b.0.tag_name())));

    let total = stats.total_nodes();
    for (category, count) in category_counts {
        let percentage = if total > 0 {
            (*count as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", category, count, percentage);
    }
}
