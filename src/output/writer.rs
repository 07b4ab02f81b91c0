//! Result file writer

use crate::output::OutputResult;
use crate::pool::NewsItem;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Writes extracted news items as numbered text files
///
/// Files are named `out-<n>.txt` with `n` counting up from 0 across every
/// task that shares the writer. Each file holds the title, a blank line and
/// the body.
#[derive(Debug)]
pub struct OutputWriter {
    dir: PathBuf,
    counter: AtomicU64,
}

impl OutputWriter {
    /// Creates the output directory and a writer for it
    ///
    /// Fails if the directory already exists, so earlier results are never
    /// overwritten.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir(dir)?;
        tracing::debug!("Created output directory {}", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
            counter: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes one file per item and returns the paths written
    pub async fn write_items(&self, items: &[NewsItem]) -> OutputResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(items.len());

        for item in items {
            let index = self.counter.fetch_add(1, Ordering::Relaxed);
            let path = self.dir.join(format!("out-{}.txt", index));
            tokio::fs::write(&path, format_item(item)).await?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Formats an item as stored on disk
pub fn format_item(item: &NewsItem) -> String {
    format!("{}\n\n{}", item.title, item.body)
}
