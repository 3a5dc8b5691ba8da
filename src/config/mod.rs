//! Configuration module for Market-Pulse
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use market_pulse::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pulse.toml")).unwrap();
//! println!("Crawling {} seeds", config.seeds.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, DigestConfig, OutputConfig, SeedEntry, TickerConfig, UserAgentConfig,
    DEFAULT_NEWS_SEED, DEFAULT_QUOTE_SEED,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
