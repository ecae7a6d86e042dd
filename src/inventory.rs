//! Inventory assembly: sitemap-first page discovery with a crawl fallback,
//! priority ranking and deduplication, plus the per-session result cache.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::{info, warn};

use crate::constants::PRIORITY_WORDS;
use crate::crawl::polite_crawl;
use crate::fetch::Fetch;
use crate::page::{PageRecord, fetch_page_meta};
use crate::sitemap::{discover_sitemaps, parse_sitemap};

/// Builds the deduplicated, priority-ordered inventory of a website's pages.
///
/// The first sitemap candidate that parses to a non-empty URL list wins and
/// metadata is fetched for up to `max_pages` of its URLs in document order.
/// When no sitemap yields a usable page, a polite crawl with the same cap
/// and `excludes` takes over. Records are then stably sorted so that pages
/// whose URL contains a high-intent word come first and shorter URLs come
/// before longer ones within each tier, and deduplicated by URL keeping the
/// first occurrence.
///
/// This function never fails: every network or parse problem degrades to
/// fewer (possibly zero) records.
pub async fn build_site_inventory(
    fetcher: &dyn Fetch,
    website: &str,
    max_pages: usize,
    excludes: &[String],
    crawl_delay: Duration,
) -> Vec<PageRecord> {
    let mut inventory = Vec::new();

    for candidate in discover_sitemaps(fetcher, website).await {
        let urls = parse_sitemap(fetcher, &candidate, max_pages.saturating_mul(2)).await;
        if urls.is_empty() {
            continue;
        }

        info!("Using sitemap {candidate} ({} URLs)", urls.len());
        for url in urls.into_iter().take(max_pages) {
            if let Some(record) = fetch_page_meta(fetcher, &url).await {
                inventory.push(record);
            }
        }
        break;
    }

    if inventory.is_empty() {
        info!("No usable sitemap pages for {website}, falling back to a crawl");
        inventory = polite_crawl(fetcher, website, max_pages, crawl_delay, excludes).await;
    }

    prioritize(&mut inventory);
    let inventory = dedupe(inventory);
    if inventory.is_empty() {
        warn!("No internal pages found for {website}");
    }

    inventory
}

/// Stable sort: high-intent pages first, shorter URLs first within a tier.
fn prioritize(records: &mut [PageRecord]) {
    records.sort_by_key(|record| (priority_tier(&record.url), record.url.len()));
}

fn priority_tier(url: &str) -> usize {
    if PRIORITY_WORDS.iter().any(|word| url.contains(word)) {
        0
    } else {
        1
    }
}

/// Drops records whose URL was already seen, keeping the first occurrence.
fn dedupe(records: Vec<PageRecord>) -> Vec<PageRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.url.clone()))
        .collect()
}

/// Inputs an inventory is a pure function of; used as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InventoryKey {
    pub website: String,
    pub max_pages: usize,
    pub excludes: Vec<String>,
}

/// Process-lifetime cache of built inventories.
///
/// Lookup is check-then-insert: two concurrent builds for the same key may
/// both run, the first insert wins and the duplicate work is discarded.
/// That is acceptable because a build is idempotent for a given key. There
/// is no eviction; key cardinality stays tiny within a session.
#[derive(Default)]
pub struct InventoryCache {
    entries: Mutex<HashMap<InventoryKey, Arc<Vec<PageRecord>>>>,
}

impl InventoryCache {
    /// Returns the cached inventory for `key`, building and storing it on a
    /// miss.
    ///
    /// # Panics
    ///
    /// Panics if the cache mutex is poisoned.
    pub async fn get_or_build<F, Fut>(&self, key: &InventoryKey, build: F) -> Arc<Vec<PageRecord>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Vec<PageRecord>>,
    {
        {
            let entries = self
                .entries
                .lock()
                .expect("Inventory cache mutex poisoned");
            if let Some(cached) = entries.get(key) {
                return Arc::clone(cached);
            }
        }

        let built = Arc::new(build().await);
        let mut entries = self
            .entries
            .lock()
            .expect("Inventory cache mutex poisoned");
        Arc::clone(entries.entry(key.clone()).or_insert(built))
    }
}

#[cfg(test)]
mod tests {
    use super::{dedupe, prioritize};
    use crate::page::PageRecord;

    fn record(url: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: String::new(),
            description: String::new(),
            h1: String::new(),
        }
    }

    #[test]
    fn high_intent_pages_sort_before_others() {
        let mut records = vec![
            record("https://site.test/blog/post-1"),
            record("https://site.test/services/widget"),
        ];
        prioritize(&mut records);

        let first = records.first().map(|r| r.url.clone());
        assert_eq!(first, Some("https://site.test/services/widget".to_string()));
    }

    #[test]
    fn shorter_urls_sort_first_within_a_tier() {
        let mut records = vec![
            record("https://site.test/blog/a-long-post-slug"),
            record("https://site.test/blog/tiny"),
            record("https://site.test/pricing/enterprise"),
            record("https://site.test/pricing"),
        ];
        prioritize(&mut records);

        let urls: Vec<&str> = records.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://site.test/pricing",
                "https://site.test/pricing/enterprise",
                "https://site.test/blog/tiny",
                "https://site.test/blog/a-long-post-slug",
            ]
        );
    }

    #[test]
    fn dedupe_keeps_the_first_occurrence() {
        let records = vec![
            record("https://site.test/about"),
            record("https://site.test/team"),
            record("https://site.test/about"),
        ];

        let deduped = dedupe(records);
        let urls: Vec<&str> = deduped.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["https://site.test/about", "https://site.test/team"]);
    }
}
