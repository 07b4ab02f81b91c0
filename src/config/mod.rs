//! Configuration module for newsfetch
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; an absent file means all defaults.
//!
//! # Example
//!
//! ```no_run
//! use newsfetch::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("newsfetch.toml")).unwrap();
//! println!("Workers: {}", config.pool.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, PoolConfig, DEFAULT_CONCURRENCY, DEFAULT_READ_LIMIT,
    DEFAULT_REQUEST_TIMEOUT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
