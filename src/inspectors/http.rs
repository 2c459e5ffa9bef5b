use crate::fetch::{Fetcher, RequestOptions};
use crate::inspectors::HeaderSource;
use async_trait::async_trait;

/// Reads headers in-process with a HEAD request.
///
/// Only the final response of a redirect chain is rendered, as one
/// `HTTP/1.1 <status>` block of `name: value` lines.
#[derive(Debug, Clone)]
pub struct HttpInspector {
    client: reqwest::Client,
}

impl HttpInspector {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Share the client of a [`Fetcher`]
    pub fn from_fetcher(fetcher: &Fetcher) -> Self {
        Self::new(fetcher.client().clone())
    }
}

#[async_trait]
impl HeaderSource for HttpInspector {
    fn label(&self) -> &'static str {
        "HTTP HEAD"
    }

    async fn raw_headers(&self, url: &str) -> String {
        let request = RequestOptions::head();
        let response = match self.client.request(request.method, url).send().await {
            Ok(response) => response,
            Err(e) => {
                ::log::warn!("Header request to {} failed: {}", url, e);
                return String::new();
            }
        };

        let status = response.status();
        let mut raw = format!(
            "HTTP/1.1 {} {}\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        for (name, value) in response.headers() {
            raw.push_str(&format!(
                "{}: {}\n",
                name,
                String::from_utf8_lossy(value.as_bytes())
            ));
        }
        raw
    }
}
