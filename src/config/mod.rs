//! Configuration module for Sitemap-Ripple
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! The file is optional: without one the crawler runs on [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use sitemap_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitemap-ripple.toml")).unwrap();
//! println!("Crawler will fetch at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

pub use validation::validate;
