//! URL handling module for Market-Pulse
//!
//! Host extraction, registrable-domain decomposition, and author attribution.

mod domain;

pub use domain::{author_from_url, extract_domain, registrable_domain, title_case};
