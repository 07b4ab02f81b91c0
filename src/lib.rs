//! newsfetch: bulk news headline fetcher
//!
//! This crate drains a list of news page URLs through a fixed-size pool of
//! workers. Each page is fetched and parsed on its own thread so a hanging or
//! panicking fetch costs one task, never the pool.

pub mod config;
pub mod fetch;
pub mod input;
pub mod output;
pub mod pool;

use thiserror::Error;

/// Errors raised by a single fetch-and-extract operation
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Short, stable name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "InvalidUrl",
            Self::Timeout { .. } => "Timeout",
            Self::Http { .. } => "Http",
            Self::Status { .. } => "Status",
            Self::Io(_) => "Io",
        }
    }
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
}

// Re-export commonly used types
pub use config::Config;
pub use fetch::{ExtractorTable, NewsFetcher};
pub use pool::{CancelToken, NewsItem, RunReport, Task, TaskError, TaskSource, WorkerPool};
