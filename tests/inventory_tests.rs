use std::time::Duration;

use spectral::assert_that;

use blogsmith::crawl::polite_crawl;
use blogsmith::inventory::{InventoryCache, InventoryKey, build_site_inventory};
use blogsmith::sitemap::{discover_sitemaps, parse_sitemap};

use crate::site_extras::StubSite;

mod site_extras;

const SEED: &str = "https://site.test";

fn urlset(urls: &[&str]) -> String {
    let entries = urls
        .iter()
        .map(|url| format!("<url><loc>{url}</loc></url>"))
        .collect::<String>();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</urlset>"#
    )
}

fn sitemap_index(children: &[&str]) -> String {
    let entries = children
        .iter()
        .map(|url| format!("<sitemap><loc>{url}</loc></sitemap>"))
        .collect::<String>();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{entries}</sitemapindex>"#
    )
}

fn inventory_urls(records: &[blogsmith::PageRecord]) -> Vec<&str> {
    records.iter().map(|record| record.url.as_str()).collect()
}

#[tokio::test]
async fn sitemap_inventory_is_prioritized_and_deduped() {
    let site = StubSite::new()
        .xml(
            "https://site.test/sitemap.xml",
            &urlset(&[
                "https://site.test/blog/post-1",
                "https://site.test/services/widget",
                "https://site.test/blog/post-1/",
            ]),
        )
        .page("https://site.test/blog/post-1", "<title>Post one</title>")
        .page(
            "https://site.test/services/widget",
            "<title>Widget services</title>",
        );

    let inventory = build_site_inventory(&site, SEED, 10, &[], Duration::ZERO).await;

    assert_eq!(
        inventory_urls(&inventory),
        vec![
            "https://site.test/services/widget",
            "https://site.test/blog/post-1",
        ]
    );
}

#[tokio::test]
async fn robots_sitemap_directive_is_discovered_and_used() {
    let site = StubSite::new()
        .text(
            "https://site.test/robots.txt",
            "User-agent: *\nDisallow: /private\nSITEMAP: https://site.test/alt-map.xml\n",
        )
        .xml(
            "https://site.test/alt-map.xml",
            &urlset(&["https://site.test/about"]),
        )
        .page("https://site.test/about", "<title>About us</title>");

    let candidates = discover_sitemaps(&site, SEED).await;
    assert_that(&candidates.len()).is_equal_to(2);
    assert_that(&candidates.contains(&"https://site.test/alt-map.xml".to_string()))
        .is_equal_to(true);

    let inventory = build_site_inventory(&site, SEED, 10, &[], Duration::ZERO).await;
    assert_eq!(inventory_urls(&inventory), vec!["https://site.test/about"]);
}

#[tokio::test]
async fn sitemap_index_is_capped_across_children() {
    let child_urls = |prefix: char| -> Vec<String> {
        (0..4).map(|n| format!("https://site.test/{prefix}{n}")).collect()
    };

    let first = child_urls('a');
    let second = child_urls('b');
    let third = child_urls('c');
    let site = StubSite::new()
        .xml(
            "https://site.test/sitemap.xml",
            &sitemap_index(&[
                "https://site.test/a.xml",
                "https://site.test/b.xml",
                "https://site.test/c.xml",
            ]),
        )
        .xml(
            "https://site.test/a.xml",
            &urlset(&first.iter().map(String::as_str).collect::<Vec<_>>()),
        )
        .xml(
            "https://site.test/b.xml",
            &urlset(&second.iter().map(String::as_str).collect::<Vec<_>>()),
        )
        .xml(
            "https://site.test/c.xml",
            &urlset(&third.iter().map(String::as_str).collect::<Vec<_>>()),
        );

    let urls = parse_sitemap(&site, "https://site.test/sitemap.xml", 5).await;

    assert_that(&urls.len()).is_equal_to(5);
    assert_eq!(urls.first().map(String::as_str), Some("https://site.test/a0"));
    assert_eq!(urls.last().map(String::as_str), Some("https://site.test/b0"));
}

#[tokio::test]
async fn cyclic_sitemap_index_terminates() {
    let site = StubSite::new().xml(
        "https://site.test/sitemap.xml",
        &sitemap_index(&["https://site.test/sitemap.xml"]),
    );

    let urls = parse_sitemap(&site, "https://site.test/sitemap.xml", 10).await;
    assert!(urls.is_empty());
}

#[tokio::test]
async fn unreachable_sitemap_yields_empty_result() {
    let site = StubSite::new().status("https://site.test/sitemap.xml", 404);

    let urls = parse_sitemap(&site, "https://site.test/sitemap.xml", 10).await;
    assert!(urls.is_empty());
}

#[tokio::test]
async fn crawl_fallback_runs_when_sitemap_yields_nothing() {
    let site = StubSite::new()
        .xml("https://site.test/sitemap.xml", &urlset(&[]))
        .page(
            "https://site.test",
            r#"<title>Home</title><a href="/services">Our services</a>"#,
        )
        .page(
            "https://site.test/services",
            "<title>Services</title><h1>What we do</h1>",
        );

    let inventory = build_site_inventory(&site, SEED, 10, &[], Duration::ZERO).await;

    assert_eq!(
        inventory_urls(&inventory),
        vec!["https://site.test/services", "https://site.test"]
    );
}

#[tokio::test]
async fn non_html_and_failed_pages_are_skipped() {
    let site = StubSite::new()
        .xml(
            "https://site.test/sitemap.xml",
            &urlset(&[
                "https://site.test/whitepaper.pdf",
                "https://site.test/gone",
                "https://site.test/about",
            ]),
        )
        .text("https://site.test/whitepaper.pdf", "%PDF-1.4")
        .status("https://site.test/gone", 404)
        .page("https://site.test/about", "<title>About</title>");

    let inventory = build_site_inventory(&site, SEED, 10, &[], Duration::ZERO).await;
    assert_eq!(inventory_urls(&inventory), vec!["https://site.test/about"]);
}

#[tokio::test]
async fn crawl_terminates_on_link_cycles() {
    let site = StubSite::new()
        .page("https://site.test/a", r#"<a href="/b">b</a>"#)
        .page("https://site.test/b", r#"<a href="/a">a</a>"#);

    let records = polite_crawl(&site, "https://site.test/a", 5, Duration::ZERO, &[]).await;
    assert_that(&records.len()).is_equal_to(2);
}

#[tokio::test]
async fn crawl_stops_at_the_page_cap() {
    let mut site = StubSite::new();
    for n in 0..10 {
        let next = (n + 1) % 10;
        site = site.page(
            &format!("https://site.test/p{n}"),
            &format!(r#"<a href="/p{next}">next</a>"#),
        );
    }

    let records = polite_crawl(&site, "https://site.test/p0", 5, Duration::ZERO, &[]).await;
    assert_that(&records.len()).is_equal_to(5);
}

#[tokio::test]
async fn excluded_and_offsite_links_are_never_enqueued() {
    let site = StubSite::new()
        .page(
            "https://site.test",
            r##"<a href="/page?utm=1">tracked</a>
                <a href="/tag/old-news">tag</a>
                <a href="https://elsewhere.test/x">offsite</a>
                <a href="/team">team</a>"##,
        )
        .page("https://site.test/page?utm=1", "<title>Must not be visited</title>")
        .page("https://site.test/team", "<title>Team</title>");
    let excludes = vec!["?".to_string(), "/tag/".to_string()];

    let records = polite_crawl(&site, SEED, 10, Duration::ZERO, &excludes).await;

    assert_eq!(
        inventory_urls(&records),
        vec!["https://site.test", "https://site.test/team"]
    );
}

#[tokio::test]
async fn cache_returns_existing_inventory_without_refetching() {
    let site = StubSite::new()
        .xml(
            "https://site.test/sitemap.xml",
            &urlset(&["https://site.test/about"]),
        )
        .page("https://site.test/about", "<title>About</title>");
    let cache = InventoryCache::default();
    let key = InventoryKey {
        website: SEED.to_string(),
        max_pages: 10,
        excludes: Vec::new(),
    };

    let first = cache
        .get_or_build(&key, || {
            build_site_inventory(&site, SEED, 10, &[], Duration::ZERO)
        })
        .await;
    let requests_after_first = site.request_count();

    let second = cache
        .get_or_build(&key, || {
            build_site_inventory(&site, SEED, 10, &[], Duration::ZERO)
        })
        .await;

    assert_eq!(site.request_count(), requests_after_first);
    assert_eq!(first, second);

    let smaller_key = InventoryKey {
        max_pages: 5,
        ..key.clone()
    };
    let _rebuilt = cache
        .get_or_build(&smaller_key, || {
            build_site_inventory(&site, SEED, 5, &[], Duration::ZERO)
        })
        .await;
    assert!(site.request_count() > requests_after_first);
}
