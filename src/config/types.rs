use serde::Deserialize;

/// Main configuration structure for newsfetch
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Number of concurrent workers (and so of concurrent fetch threads)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

/// Per-fetch network configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Maximum number of body bytes read per page
    #[serde(rename = "read-limit", default = "default_read_limit")]
    pub read_limit: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

pub const DEFAULT_CONCURRENCY: usize = 20;
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 60;
pub const DEFAULT_READ_LIMIT: u64 = 10_000_000;

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_read_limit() -> u64 {
    DEFAULT_READ_LIMIT
}

fn default_user_agent() -> String {
    format!("newsfetch/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            read_limit: default_read_limit(),
            user_agent: default_user_agent(),
        }
    }
}
