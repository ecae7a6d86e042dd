use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use blogsmith::fetch::{Fetch, Fetched};

/// In-memory site serving canned responses. URLs without a route behave
/// like a network failure.
pub(crate) struct StubSite {
    routes: HashMap<String, Fetched>,
    requests: AtomicUsize,
}

impl StubSite {
    pub fn new() -> Self {
        StubSite {
            routes: HashMap::new(),
            requests: AtomicUsize::new(0),
        }
    }

    /// Registers an HTML page.
    pub fn page(self, url: &str, html: &str) -> Self {
        self.route(url, 200, Some("text/html; charset=utf-8"), html)
    }

    /// Registers an XML document (sitemaps).
    pub fn xml(self, url: &str, body: &str) -> Self {
        self.route(url, 200, Some("application/xml"), body)
    }

    /// Registers a plain-text document (robots.txt).
    pub fn text(self, url: &str, body: &str) -> Self {
        self.route(url, 200, Some("text/plain"), body)
    }

    /// Registers a bodyless response with the given status.
    pub fn status(self, url: &str, status: u16) -> Self {
        self.route(url, status, None, "")
    }

    fn route(mut self, url: &str, status: u16, content_type: Option<&str>, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Fetched {
                status,
                content_type: content_type.map(str::to_owned),
                body: body.as_bytes().to_vec(),
            },
        );
        self
    }

    /// Total GET requests served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for StubSite {
    async fn get(&self, url: &str) -> Result<Fetched> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.routes
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No route for {url}"))
    }
}
