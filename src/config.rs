use crate::error::{AuditError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Production origin every sitemap entry and the robots sitemap line must use.
pub const CANONICAL_ORIGIN: &str = "https://www.creativeai-tools.fr";

/// Hosts under this suffix are deploy previews served without HSTS.
pub const PREVIEW_HOST_SUFFIX: &str = ".netlify.app";

/// Pages swept for broken links and SEO tags.
pub const PAGES: &[&str] = &[
    "/",
    "/blog.html",
    "/blog-Invideo.html",
    "/mentions-legales.html",
    "/politique-de-confidentialite.html",
    "/en/",
    "/en/blog.html",
    "/en/blog-Invideo.html",
    "/en/legal-notice.html",
    "/en/privacy-policy.html",
    "/404.html",
];

/// Supported locales; the first is served from the site root.
pub const LOCALES: &[&str] = &["fr", "en"];

/// Locale published under its own `/<locale>/` section.
pub const SECONDARY_LOCALE: &str = "en";

const SITEMAP_INDEX: &str = "/sitemap.xml";
const ROBOTS_PATH: &str = "/robots.txt";
const REPORT_ROW_LIMIT: usize = 500;

/// Network behaviour shared by every request of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Per-attempt timeout
    pub timeout: Duration,

    /// Extra attempts after a transport failure
    pub retries: u32,

    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retries: 2,
            backoff: Duration::from_millis(250),
        }
    }
}

/// A tracked static asset and the most bytes it may weigh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBudget {
    /// Path relative to the site root
    pub path: String,

    /// Size ceiling in bytes
    pub limit: u64,
}

impl AssetBudget {
    pub fn new(path: &str, limit: u64) -> Self {
        Self {
            path: path.to_string(),
            limit,
        }
    }
}

/// Where the audited site is deployed, which decides the header policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production or any other public host: every header is required
    Production,
    /// Deploy preview on a shared wildcard certificate: HSTS is not required
    Preview,
    /// Local dev server: the header sweep is skipped
    Loopback,
}

/// Everything an audit run needs, fixed once before the first sweep
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Name shown in the report title
    pub site_name: String,

    /// Canonical origin, without trailing slash
    pub canonical: String,

    /// Origin actually fetched, without trailing slash
    pub base_url: String,

    /// Page paths for the link and SEO sweeps
    pub pages: Vec<String>,

    /// Locale codes; each gets an hreflang marker and a child sitemap
    pub locales: Vec<String>,

    /// Locale whose section root must stay crawlable and carry headers
    pub secondary_locale: String,

    /// Path of the sitemap index
    pub sitemap_index: String,

    /// Path of the robots policy
    pub robots_path: String,

    /// Tracked assets with their size ceilings
    pub assets: Vec<AssetBudget>,

    /// Local checkout of the site, holding the assets
    pub root_dir: PathBuf,

    /// Report destination
    pub output: PathBuf,

    /// Most link-issue rows rendered before the table is cut
    pub report_row_limit: usize,

    pub fetch: FetchOptions,
}

impl AuditConfig {
    /// Build the configuration for a base URL override, falling back to the
    /// canonical origin when none (or an empty one) is given
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let base_url = match base_url.map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => CANONICAL_ORIGIN.to_string(),
        };

        Url::parse(&base_url).map_err(|source| AuditError::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;

        Ok(Self {
            site_name: "creativeai-tools".to_string(),
            canonical: CANONICAL_ORIGIN.to_string(),
            base_url,
            pages: PAGES.iter().map(|p| p.to_string()).collect(),
            locales: LOCALES.iter().map(|l| l.to_string()).collect(),
            secondary_locale: SECONDARY_LOCALE.to_string(),
            sitemap_index: SITEMAP_INDEX.to_string(),
            robots_path: ROBOTS_PATH.to_string(),
            assets: vec![
                AssetBudget::new("assets/styles.css", 120 * 1024),
                AssetBudget::new("assets/main.js", 80 * 1024),
            ],
            root_dir: PathBuf::from("."),
            output: PathBuf::from("tools/report.md"),
            report_row_limit: REPORT_ROW_LIMIT,
            fetch: FetchOptions::default(),
        })
    }

    /// Set the site checkout holding the static assets
    pub fn with_root_dir(mut self, root: impl AsRef<Path>) -> Self {
        self.root_dir = root.as_ref().to_path_buf();
        self
    }

    /// Set the report destination; relative paths are taken from the root
    pub fn with_output(mut self, output: impl AsRef<Path>) -> Self {
        self.output = output.as_ref().to_path_buf();
        self
    }

    /// Override the canonical origin
    pub fn with_canonical(mut self, canonical: &str) -> Self {
        self.canonical = canonical.trim_end_matches('/').to_string();
        self
    }

    pub fn with_fetch_options(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Absolute URL of a site path under the base URL
    pub fn page_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Paths of the per-locale child sitemaps, in locale order
    pub fn child_sitemaps(&self) -> Vec<String> {
        self.locales
            .iter()
            .map(|locale| format!("/sitemap-{}.xml", locale))
            .collect()
    }

    /// Root path of the secondary locale section, e.g. `/en/`
    pub fn secondary_root(&self) -> String {
        format!("/{}/", self.secondary_locale)
    }

    /// Paths whose response headers are audited
    pub fn header_paths(&self) -> Vec<String> {
        vec!["/".to_string(), self.secondary_root()]
    }

    /// Sitemap index URL under the canonical origin
    pub fn canonical_sitemap_url(&self) -> String {
        format!(
            "{}/{}",
            self.canonical,
            self.sitemap_index.trim_start_matches('/')
        )
    }

    /// Report destination resolved against the site root
    pub fn output_path(&self) -> PathBuf {
        if self.output.is_absolute() {
            self.output.clone()
        } else {
            self.root_dir.join(&self.output)
        }
    }

    /// Classify the base URL for the security header policy
    pub fn environment(&self) -> Environment {
        let Ok(url) = Url::parse(&self.base_url) else {
            return Environment::Production;
        };

        match url.host_str() {
            Some("localhost") | Some("127.0.0.1") if url.scheme() == "http" => {
                Environment::Loopback
            }
            Some(host) if host.to_ascii_lowercase().ends_with(PREVIEW_HOST_SUFFIX) => {
                Environment::Preview
            }
            _ => Environment::Production,
        }
    }
}
