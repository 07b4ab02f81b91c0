//! Task input loading
//!
//! URL lists are plain text files with one target per line. They are read
//! lazily so very long lists never have to fit in memory.

mod url_list;

pub use url_list::UrlList;
