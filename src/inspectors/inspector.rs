use async_trait::async_trait;

/// Capability to read the raw response headers of a URL
#[async_trait]
pub trait HeaderSource: Send + Sync {
    /// Short name used in log lines
    fn label(&self) -> &'static str;

    /// Raw `Name: value` header text after following redirects.
    ///
    /// Failures yield an empty string, which the header sweep reads as
    /// every header missing.
    async fn raw_headers(&self, url: &str) -> String;
}
