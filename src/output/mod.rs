//! Output module for persisting task results
//!
//! This module handles:
//! - Creating the result directory and writing numbered result files
//! - Turning finished tasks into user-visible status lines

mod status;
mod writer;

pub use status::{finish_task, started_line, TaskStatus};
pub use writer::{format_item, OutputWriter};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
