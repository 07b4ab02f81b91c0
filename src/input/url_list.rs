use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lazy iterator over the URLs in a list file
///
/// Each line is decoded as UTF-8 with invalid sequences replaced, then
/// trimmed. Blank lines are skipped. A read error ends the sequence.
pub struct UrlList<R = BufReader<File>> {
    reader: R,
    line: Vec<u8>,
    finished: bool,
}

impl UrlList {
    /// Opens a URL list file
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> UrlList<R> {
    /// Reads URLs from any buffered reader
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for UrlList<R> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while !self.finished {
            self.line.clear();
            match self.reader.read_until(b'\n', &mut self.line) {
                Ok(0) => self.finished = true,
                Ok(_) => {
                    let text = String::from_utf8_lossy(&self.line);
                    let url = text.trim();
                    if !url.is_empty() {
                        return Some(url.to_string());
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::warn!("Stopped reading URL list: {}", e);
                    self.finished = true;
                }
            }
        }
        None
    }
}

impl<R> std::fmt::Debug for UrlList<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlList")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
