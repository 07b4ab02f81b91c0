//! Extractor routing by host and path

use crate::fetch::parser::{extract_google_news, extract_interfax};
use crate::pool::NewsItem;
use scraper::Html;
use url::Url;

/// Site-specific extraction function
///
/// Returns `None` when the document does not have the expected layout.
pub type Extractor = fn(&Html) -> Option<Vec<NewsItem>>;

#[derive(Clone)]
struct Route {
    host: String,
    path: String,
    extractor: Extractor,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("host", &self.host)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Static `(host, path) -> extractor` table
///
/// Routes are checked in insertion order; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct ExtractorTable {
    routes: Vec<Route>,
}

impl ExtractorTable {
    /// Creates a table with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the table of built-in news sources
    pub fn builtin() -> Self {
        Self::new()
            .with_route("www.scan-interfax.ru", "/Home/ClusterNews", extract_interfax)
            .with_route("news.google.ru", "/news/section", extract_google_news)
            .with_route("news.google.ru", "/news", extract_google_news)
            .with_route("news.google.com", "/news/section", extract_google_news)
            .with_route("news.google.com", "/news", extract_google_news)
    }

    /// Adds a route; `host` may be a `*.domain` wildcard pattern
    pub fn with_route(
        mut self,
        host: impl Into<String>,
        path: impl Into<String>,
        extractor: Extractor,
    ) -> Self {
        self.routes.push(Route {
            host: host.into().to_lowercase(),
            path: path.into(),
            extractor,
        });
        self
    }

    /// Finds the extractor for a URL, matching host (without port) and exact path
    pub fn lookup(&self, url: &Url) -> Option<Extractor> {
        let host = url.host_str()?.to_lowercase();
        self.routes
            .iter()
            .find(|route| route.path == url.path() && matches_wildcard(&route.host, &host))
            .map(|route| route.extractor)
    }

    /// Parses `body` with the extractor matching `url`
    ///
    /// Unmatched URLs and documents the extractor does not recognise both
    /// yield an empty list.
    pub fn extract(&self, url: &Url, body: &str) -> Vec<NewsItem> {
        let Some(extractor) = self.lookup(url) else {
            tracing::debug!("No extractor registered for {}", url);
            return Vec::new();
        };

        let document = Html::parse_document(body);
        extractor(&document).unwrap_or_else(|| {
            tracing::debug!("Extractor did not recognise the document at {}", url);
            Vec::new()
        })
    }
}

/// Checks if a host matches a pattern
///
/// `"example.com"` matches only itself; `"*.example.com"` matches the bare
/// domain and any subdomain.
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    if let Some(base) = pattern.strip_prefix("*.") {
        candidate == base || candidate.ends_with(&format!(".{}", base))
    } else {
        candidate == pattern
    }
}
