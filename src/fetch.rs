//! HTTP fetching with a fixed retry budget.
//!
//! Only transport failures (timeouts, DNS, resets, truncated bodies) are
//! retried. An error status is a completed exchange and is handed back to
//! the sweep that asked for it.

use crate::config::FetchOptions;
use crate::error::{AuditError, Result};
use reqwest::Method;
use std::time::Duration;

const USER_AGENT: &str = concat!("site-check/", env!("CARGO_PKG_VERSION"));

/// Per-request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,

    /// Overrides the client-wide per-attempt timeout
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            timeout: None,
        }
    }

    /// Lightweight existence probe
    pub fn head() -> Self {
        Self {
            method: Method::HEAD,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A completed HTTP exchange, whatever its status
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// Requested URL
    pub url: String,

    pub status: u16,

    /// Reason phrase for the status, empty when unknown
    pub status_text: String,

    /// Body text; empty for HEAD
    pub body: String,
}

/// HTTP client shared by every sweep of a run
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    options: FetchOptions,
}

impl Fetcher {
    /// Build a redirect-following client for the given options
    pub fn new(options: FetchOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(AuditError::Client)?;

        Ok(Self { client, options })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn options(&self) -> FetchOptions {
        self.options
    }

    /// Plain GET
    pub async fn get(&self, url: &str) -> Result<FetchResponse> {
        self.fetch(url, &RequestOptions::get()).await
    }

    /// Perform a request, retrying transport failures up to the budget
    pub async fn fetch(&self, url: &str, request: &RequestOptions) -> Result<FetchResponse> {
        let mut attempt = 0u32;

        loop {
            match self.attempt(url, request).await {
                Ok(response) => return Ok(response),
                Err(source) if attempt < self.options.retries => {
                    attempt += 1;
                    ::log::debug!(
                        "{} {} failed ({}), retry {} of {}",
                        request.method,
                        url,
                        source,
                        attempt,
                        self.options.retries
                    );
                    tokio::time::sleep(self.options.backoff).await;
                }
                Err(source) => {
                    ::log::warn!("{} {} failed: {}", request.method, url, source);
                    return Err(AuditError::Fetch {
                        url: url.to_string(),
                        source,
                    });
                }
            }
        }
    }

    async fn attempt(
        &self,
        url: &str,
        request: &RequestOptions,
    ) -> std::result::Result<FetchResponse, reqwest::Error> {
        let mut builder = self.client.request(request.method.clone(), url);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();

        let body = if request.method == Method::HEAD {
            String::new()
        } else {
            response.text().await?
        };

        ::log::trace!("{} {} -> {}", request.method, url, status.as_u16());

        Ok(FetchResponse {
            url: url.to_string(),
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
