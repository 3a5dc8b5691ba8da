//! Output module for digest files and reports
//!
//! This module handles:
//! - Writing and reading per-company digest JSON files
//! - Selecting the relevant entries of a digest
//! - Rendering digests as Markdown

mod json;
mod markdown;

pub use json::{digest_file_name, read_digest, relevant_articles, write_digest};
pub use markdown::format_digest_markdown;
