//! Output module for the finished sitemap
//!
//! This module handles:
//! - The sitemap tree the crawler builds
//! - Serializing the tree to an XML document
//! - Naming and writing the output file
//! - Recording crawl statistics

pub mod stats;
mod tree;
mod xml;

pub use stats::{print_statistics, CrawlStatistics};
pub use tree::{encode_loc, NodeId, SitemapNode, SitemapTree, LOC_TAG, ROOT_TAG};
pub use xml::to_xml;

use crate::SitemapError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Characters that cannot appear in a file name on common platforms
const INVALID_FILE_NAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Builds the output file name for a crawl
///
/// The name is `Crawl output for {seed} on {date} {time}.xml` with the date
/// and time written out in long form (UTC). Characters that are not valid in
/// file names are replaced with `_`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sitemap_ripple::output::output_file_name;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
/// assert_eq!(
///     output_file_name("https://a.com", at),
///     "Crawl output for https___a.com on Tuesday, March 5, 2024 2_07_09 PM.xml"
/// );
/// ```
pub fn output_file_name(seed: &str, at: DateTime<Utc>) -> String {
    let stamp = at.format("%A, %B %-d, %Y %-I:%M:%S %p");
    let name = format!("Crawl output for {} on {}.xml", seed, stamp);

    name.chars()
        .map(|c| {
            if INVALID_FILE_NAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Serializes the tree and writes it into `directory`
///
/// The directory is created if missing. Returns the path of the written file.
///
/// # Arguments
///
/// * `directory` - Where to place the file
/// * `seed` - The seed URL, used in the file name
/// * `tree` - The finished sitemap
/// * `indent` - Pretty-print the document
pub fn write_sitemap(
    directory: &Path,
    seed: &str,
    tree: &SitemapTree,
    indent: bool,
) -> Result<PathBuf, SitemapError> {
    let document = to_xml(tree, indent)?;

    std::fs::create_dir_all(directory)?;
    let path = directory.join(output_file_name(seed, Utc::now()));
    std::fs::write(&path, document)?;

    tracing::info!("Sitemap written to {}", path.display());
    Ok(path)
}
