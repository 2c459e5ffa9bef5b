pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod inspectors;
pub mod parsers;
pub mod report;
pub mod results;
pub mod sweeps;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AuditConfig;
pub use error::{AuditError, Result};
pub use results::AuditResults;

use fetch::Fetcher;
use inspectors::{CurlInspector, HeaderSource};
use std::path::{Path, PathBuf};

/// Number of sweeps in a run
pub const SWEEP_COUNT: usize = 6;

/// Progress of a run, reported once before and once after each sweep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// A sweep is starting, `step` counts from 1
    Started { step: usize, label: &'static str },
    /// The sweep that just ran, summarised in one line
    Finished { summary: String },
}

fn summary(failures: usize, what: &str) -> String {
    if failures == 0 {
        "✅ OK".to_string()
    } else {
        format!("❌ {} {}", failures, what)
    }
}

/// Runs the six sweeps of a configuration and writes the report
pub struct Auditor {
    config: AuditConfig,
    fetcher: Fetcher,
    header_source: Box<dyn HeaderSource>,
}

impl Auditor {
    /// Create an auditor reading security headers through curl
    pub fn new(config: AuditConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch)?;
        let curl = CurlInspector::default().with_timeout(config.fetch.timeout);
        Ok(Self {
            config,
            fetcher,
            header_source: Box::new(curl),
        })
    }

    /// Replace the security header source
    pub fn with_header_source(mut self, source: Box<dyn HeaderSource>) -> Self {
        self.header_source = source;
        self
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }

    /// Run every sweep in order.
    ///
    /// Sweeps never fail: anything that goes wrong inside one becomes an
    /// issue record.
    pub async fn run(&self, mut progress: impl FnMut(Progress)) -> AuditResults {
        let config = &self.config;
        let mut results = AuditResults::default();

        progress(Progress::Started { step: 1, label: "Checking links" });
        results.links = sweeps::links::run(config, &self.fetcher).await;
        progress(Progress::Finished {
            summary: summary(results.links.len(), "issue(s)"),
        });

        progress(Progress::Started { step: 2, label: "Checking SEO tags" });
        results.seo = sweeps::seo::run(config, &self.fetcher).await;
        progress(Progress::Finished {
            summary: summary(results.seo.len(), "page(s) incomplete"),
        });

        progress(Progress::Started { step: 3, label: "Checking sitemaps" });
        results.sitemaps = sweeps::sitemaps::run(config, &self.fetcher).await;
        progress(Progress::Finished {
            summary: summary(results.sitemaps.len(), "problem(s)"),
        });

        progress(Progress::Started { step: 4, label: "Checking robots.txt" });
        results.robots = sweeps::robots::run(config, &self.fetcher).await;
        progress(Progress::Finished {
            summary: summary(results.robots.len(), "issue(s)"),
        });

        progress(Progress::Started { step: 5, label: "Checking security headers" });
        results.headers = sweeps::headers::run(config, self.header_source.as_ref()).await;
        progress(Progress::Finished {
            summary: summary(results.header_failures(), "missing set(s)"),
        });

        progress(Progress::Started { step: 6, label: "Checking static sizes" });
        results.sizes = sweeps::sizes::run(config);
        progress(Progress::Finished {
            summary: summary(results.size_failures(), "over limit or missing"),
        });

        ::log::info!(
            "Audit of {} complete, clean: {}",
            config.base_url,
            results.is_clean()
        );
        results
    }

    /// Write the Markdown report to the configured path
    pub fn write_report(&self, results: &AuditResults) -> Result<PathBuf> {
        report::write(&self.config, results)
    }

    /// Write the raw results as pretty JSON
    pub fn write_json(&self, results: &AuditResults, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(path, json).map_err(|source| AuditError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
