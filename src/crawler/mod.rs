//! Crawler module for news discovery and article extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with timeouts and failure classification
//! - Company link extraction and denylist filtering
//! - Recursive, depth-bounded link discovery
//! - Concurrent article extraction and crawl coordination

mod coordinator;
mod discover;
mod fetcher;
mod parser;

pub use coordinator::{expand_seeds, run_crawl, Coordinator};
pub use discover::{discover, discover_from, CrawlTarget};
pub use fetcher::{build_http_client, fetch_url, user_agent_string, FetchResult};
pub use parser::{company_pattern, extract_company_links, is_denied, DENYLIST};
