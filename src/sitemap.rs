//! Sitemap discovery and parsing: finds a site's sitemap candidates and
//! turns them into a bounded, ordered list of page URLs.

use std::collections::{HashSet, VecDeque};

use log::{debug, info};
use sitemap::reader::{SiteMapEntity, SiteMapReader};
use sitemap::structs::Location;
use url::Url;

use crate::fetch::Fetch;
use crate::page::normalize;

/// Returns the candidate sitemap URLs for a site: the conventional
/// `/sitemap.xml` plus anything declared by a `sitemap:` directive in
/// robots.txt. A missing or unreachable robots.txt degrades the result to
/// the default candidate alone.
pub async fn discover_sitemaps(fetcher: &dyn Fetch, base_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        debug!("Cannot parse base URL {base_url}, skipping sitemap discovery");
        return Vec::new();
    };

    let mut candidates = Vec::new();
    if let Ok(default_sitemap) = base.join("/sitemap.xml") {
        candidates.push(default_sitemap.to_string());
    }

    if let Ok(robots_url) = base.join("/robots.txt")
        && let Ok(fetched) = fetcher.get(robots_url.as_str()).await
        && fetched.is_success()
    {
        for line in fetched.text().lines() {
            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            if directive.trim().eq_ignore_ascii_case("sitemap") {
                let declared = value.trim().to_string();
                if !declared.is_empty() && !candidates.contains(&declared) {
                    candidates.push(declared);
                }
            }
        }
    }

    info!("Sitemap candidates for {base_url}: {}", candidates.len());
    candidates
}

/// Fetches and parses a sitemap, following nested sitemap indexes through an
/// explicit FIFO worklist so entries come back in document order.
///
/// At most `cap` page URLs are returned, no matter how many child sitemaps
/// an index declares; a visited set keeps cyclic indexes from looping. A
/// failed fetch, a non-success status or unparseable XML yields an empty
/// contribution for that sitemap.
pub async fn parse_sitemap(fetcher: &dyn Fetch, sitemap_url: &str, cap: usize) -> Vec<String> {
    let mut urls = Vec::new();
    let mut worklist = VecDeque::from([sitemap_url.to_string()]);
    let mut visited: HashSet<String> = HashSet::new();

    while let Some(current) = worklist.pop_front() {
        if urls.len() >= cap {
            break;
        }
        if !visited.insert(current.clone()) {
            continue;
        }

        let Ok(fetched) = fetcher.get(&current).await else {
            debug!("Failed to fetch sitemap {current}");
            continue;
        };
        if !fetched.is_success() {
            continue;
        }

        for entity in SiteMapReader::new(fetched.body.as_slice()) {
            match entity {
                SiteMapEntity::Url(url_entry) => {
                    if urls.len() >= cap {
                        break;
                    }
                    if let Location::Url(ref url) = url_entry.loc {
                        urls.push(normalize(url.as_str()));
                    }
                }
                SiteMapEntity::SiteMap(sitemap_entry) => {
                    if let Location::Url(ref url) = sitemap_entry.loc {
                        worklist.push_back(url.to_string());
                    }
                }
                SiteMapEntity::Err(_) => continue,
            }
        }
        debug!("Parsed sitemap {current}: {} URLs collected so far", urls.len());
    }

    urls
}
