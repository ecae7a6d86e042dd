//! Per-page metadata extraction: the [`PageRecord`] type, URL normalization
//! helpers and the HTML queries behind them.

use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

use crate::fetch::Fetch;

/// One discovered page. `url` is normalized and unique within an inventory;
/// the text fields may be empty when the page does not provide them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    pub h1: String,
}

/// Normalizes a URL for use as an inventory key: the fragment and any
/// trailing slashes are removed. Applying it twice changes nothing.
pub fn normalize(url: &str) -> String {
    let without_fragment = url.split('#').next().unwrap_or(url);
    without_fragment.trim_end_matches('/').to_string()
}

/// True when both URLs point at the same network location. Unparseable URLs
/// never match anything.
pub fn same_host(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(left), Ok(right)) => {
            left.host_str() == right.host_str()
                && left.port_or_known_default() == right.port_or_known_default()
        }
        _ => false,
    }
}

/// Fetches a page and extracts its lightweight metadata.
///
/// Returns `None` when the response is not successful, is not HTML, or the
/// fetch fails outright. Failures never propagate to the caller.
pub async fn fetch_page_meta(fetcher: &dyn Fetch, url: &str) -> Option<PageRecord> {
    let fetched = fetcher.get(url).await.ok()?;
    if !fetched.is_success() || !fetched.is_html() {
        return None;
    }

    Some(parse_meta(url, &fetched.text()))
}

/// Extracts title, meta description and first heading from raw markup.
pub fn parse_meta(url: &str, html: &str) -> PageRecord {
    let document = Html::parse_document(html);

    PageRecord {
        url: normalize(url),
        title: title_text(&document),
        description: meta_description(&document),
        h1: first_heading(&document),
    }
}

/// Resolves every anchor href on the page against the page URL and
/// normalizes the result. Hrefs that cannot be resolved are dropped.
pub fn parse_links(page_url: &str, html: &str) -> Vec<String> {
    let Ok(base) = Url::parse(page_url) else {
        return Vec::new();
    };
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .map(|resolved| normalize(resolved.as_str()))
        .collect()
}

fn title_text(document: &Html) -> String {
    if let Ok(title_selector) = Selector::parse("title")
        && let Some(title_element) = document.select(&title_selector).next()
    {
        return title_element.text().collect::<String>().trim().to_string();
    }

    String::new()
}

fn meta_description(document: &Html) -> String {
    if let Ok(meta_selector) = Selector::parse(r#"meta[name="description"]"#)
        && let Some(meta_element) = document.select(&meta_selector).next()
    {
        return meta_element
            .value()
            .attr("content")
            .unwrap_or_default()
            .trim()
            .to_string();
    }

    String::new()
}

/// Visible text of the first h1, whitespace-joined.
fn first_heading(document: &Html) -> String {
    if let Ok(heading_selector) = Selector::parse("h1")
        && let Some(heading_element) = document.select(&heading_selector).next()
    {
        return heading_element
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
    }

    String::new()
}
