//! The fetch module provides the HTTP GET capability used by sitemap
//! discovery, page metadata fetches and the fallback crawler.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::constants::{FETCH_TIMEOUT_SECS, USER_AGENT};

/// Raw result of a single GET request.
#[derive(Debug, Clone)]
pub struct Fetched {
    /// HTTP status code of the response.
    pub status: u16,
    /// Value of the Content-Type header, if the server sent one.
    pub content_type: Option<String>,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl Fetched {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the Content-Type header indicates an HTML document.
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.to_ascii_lowercase().contains("text/html"))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Minimal GET capability. The production implementation is [`HttpClient`];
/// tests substitute an in-memory site.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Performs a GET request against `url`.
    ///
    /// # Errors
    ///
    /// Returns an error on any transport-level failure (timeout, connection
    /// error, invalid URL). Non-success HTTP statuses are NOT errors; they
    /// come back as a [`Fetched`] with the corresponding status code.
    async fn get(&self, url: &str) -> Result<Fetched>;
}

/// reqwest-backed fetcher with a bounded per-request timeout and an
/// identifying user agent.
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Creates a client with the default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be constructed.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn get(&self, url: &str) -> Result<Fetched> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(Fetched {
            status,
            content_type,
            body,
        })
    }
}
