//! Polite breadth-first fallback crawler, used when a site exposes no
//! usable sitemap.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use log::debug;
use tokio::time::sleep;

use crate::fetch::Fetch;
use crate::page::{PageRecord, normalize, parse_links, parse_meta, same_host};

/// Crawls outward from `seed`, staying on the seed's host and skipping any
/// URL that contains one of the `excludes` substrings.
///
/// One fetch per page serves both metadata extraction and link discovery.
/// The crawl stops once `max_pages` records are collected or the frontier
/// empties; `delay` spaces successive requests against the target host.
/// Per-URL failures contribute no record and no links, and the crawl moves
/// on to the next queued URL.
pub async fn polite_crawl(
    fetcher: &dyn Fetch,
    seed: &str,
    max_pages: usize,
    delay: Duration,
    excludes: &[String],
) -> Vec<PageRecord> {
    let start = normalize(seed);
    let mut queue = VecDeque::from([start.clone()]);
    let mut seen: HashSet<String> = HashSet::from([start]);
    let mut pages = Vec::new();

    while pages.len() < max_pages {
        let Some(url) = queue.pop_front() else {
            break;
        };

        match fetcher.get(&url).await {
            Ok(fetched) if fetched.is_success() && fetched.is_html() => {
                let html = fetched.text();
                pages.push(parse_meta(&url, &html));

                for link in parse_links(&url, &html) {
                    if !same_host(&link, seed) {
                        continue;
                    }
                    if excludes.iter().any(|pattern| link.contains(pattern.as_str())) {
                        continue;
                    }
                    if seen.insert(link.clone()) {
                        queue.push_back(link);
                    }
                }
            }
            Ok(_) => debug!("Skipping {url}: not an HTML page"),
            Err(fetch_error) => debug!("Skipping {url}: {fetch_error}"),
        }

        sleep(delay).await;
    }

    pages
}
