//! Blocking HTTP fetcher
//!
//! This module performs the network side of a task:
//! - Building a client with its own cookie store for every fetch
//! - Enforcing the request timeout and the body read limit
//! - Decoding the body to text, replacing invalid UTF-8
//! - Classifying failures into `FetchError`
//!
//! Everything here blocks. The worker pool only ever calls it from an
//! isolate thread.

use crate::config::FetchConfig;
use crate::fetch::ExtractorTable;
use crate::pool::{FetchOperation, NewsItem};
use crate::FetchError;
use reqwest::blocking::Client;
use std::io::Read;
use std::time::Duration;
use url::Url;

/// Builds a blocking HTTP client for a single fetch
///
/// The client carries a fresh cookie store, so cookies set during one
/// request (including its redirects) never leak into another.
///
/// # Example
///
/// ```no_run
/// use newsfetch::config::FetchConfig;
/// use newsfetch::fetch::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Reads at most `limit` bytes from `reader` and decodes them as UTF-8
///
/// Invalid sequences are replaced with U+FFFD rather than failing.
pub fn read_body<R: Read>(reader: R, limit: u64) -> std::io::Result<String> {
    let mut bytes = Vec::new();
    reader.take(limit).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Fetches news pages and runs the matching extractor
#[derive(Debug, Clone)]
pub struct NewsFetcher {
    config: FetchConfig,
    extractors: ExtractorTable,
}

impl NewsFetcher {
    pub fn new(config: FetchConfig, extractors: ExtractorTable) -> Self {
        Self { config, extractors }
    }

    /// Creates a fetcher for the built-in news sources
    pub fn with_builtin_sources(config: FetchConfig) -> Self {
        Self::new(config, ExtractorTable::builtin())
    }

    /// Retrieves the document at `url` as text
    ///
    /// # Error Classification
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Request timed out | `Timeout` |
    /// | Non-2xx status | `Status` |
    /// | Other transport failure | `Http` |
    /// | Body read failed | `Io` |
    pub fn fetch_document(&self, url: &Url) -> Result<String, FetchError> {
        let client = build_http_client(&self.config).map_err(|e| classify(url, e))?;

        let response = client
            .get(url.clone())
            .send()
            .map_err(|e| classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = read_body(response, self.config.read_limit)?;
        tracing::trace!("Read {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

impl FetchOperation for NewsFetcher {
    fn fetch(&self, target: &str) -> Result<Vec<NewsItem>, FetchError> {
        let url = Url::parse(target)?;
        let body = self.fetch_document(&url)?;
        Ok(self.extractors.extract(&url, &body))
    }
}

fn classify(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
