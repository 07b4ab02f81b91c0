//! Site-specific HTML extractors
//!
//! Each extractor locates a list of news item containers and pulls a title
//! and a body text out of every container.
//!
//! **Rules shared by all sources:**
//! - No item containers at all means the page is not the expected layout
//!   (`None`), which callers treat as "nothing to extract"
//! - Text is the element's text nodes joined by single spaces, then trimmed
//! - Items with a missing or blank title or body are skipped

use crate::pool::NewsItem;
use scraper::{ElementRef, Html, Selector};

/// CSS selectors describing one site's news list layout
struct Layout {
    item: &'static str,
    title: &'static str,
    body: &'static str,
}

const INTERFAX: Layout = Layout {
    item: "body .frontlist",
    title: ".news_head a",
    body: ".news_content",
};

const GOOGLE_NEWS: Layout = Layout {
    item: "body .esc-layout-article-cell",
    title: ".esc-lead-article-title",
    body: ".esc-lead-snippet-wrapper",
};

/// Extracts news from a Scan-Interfax cluster news page
pub fn extract_interfax(document: &Html) -> Option<Vec<NewsItem>> {
    extract_with_layout(document, &INTERFAX)
}

/// Extracts news from a Google News section page
pub fn extract_google_news(document: &Html) -> Option<Vec<NewsItem>> {
    extract_with_layout(document, &GOOGLE_NEWS)
}

fn extract_with_layout(document: &Html, layout: &Layout) -> Option<Vec<NewsItem>> {
    let item_selector = Selector::parse(layout.item).ok()?;
    let title_selector = Selector::parse(layout.title).ok()?;
    let body_selector = Selector::parse(layout.body).ok()?;

    let mut containers = document.select(&item_selector).peekable();
    containers.peek()?;

    let items = containers
        .filter_map(|container| {
            let title = first_text(container, &title_selector)?;
            let body = first_text(container, &body_selector)?;
            Some(NewsItem { title, body })
        })
        .collect();

    Some(items)
}

/// Returns the trimmed text of the first match under `element`, if non-empty
fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let found = element.select(selector).next()?;
    let text = found.text().collect::<Vec<_>>().join(" ");
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
