//! Fetch and extract collaborators
//!
//! This module contains the parts of a task that differ per news source:
//! - Blocking HTTP retrieval with timeout, read limit and per-fetch cookies
//! - Site-specific HTML extractors
//! - The `(host, path) -> extractor` routing table

mod fetcher;
mod matcher;
mod parser;

pub use fetcher::{build_http_client, read_body, NewsFetcher};
pub use matcher::{matches_wildcard, Extractor, ExtractorTable};
pub use parser::{extract_google_news, extract_interfax};
