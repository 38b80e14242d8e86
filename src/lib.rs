//! Sitemap-Ripple: a bounded single-domain sitemap crawler
//!
//! This crate crawls one web domain from a seed address, follows internal
//! links until a page budget runs out, and builds a nested sitemap tree that
//! mirrors the order in which links were discovered and crawled.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Sitemap-Ripple operations
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Output error: {0}")]
    Output(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Not a valid host name or absolute URL: {0}")]
    InvalidSeed(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sitemap-Ripple operations
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{crawl_site, Coordinator, FetchCache, HttpFetcher, LinkCategory, PageFetcher, PageLink};
pub use crate::output::{to_xml, SitemapTree};
pub use crate::url::{can_be_crawled, extract_domain, is_same_as_page_url, resolve};
