use serde::Serialize;

/// Why a link (or the page carrying it) failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LinkOutcome {
    /// The server answered outside 2xx/3xx
    Status { code: u16, text: String },
    /// No answer at all
    Error { message: String },
}

/// A broken link, or a page whose links could not be checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkIssue {
    /// Page the link was found on
    pub page: String,

    /// Target link; `None` when the page itself could not be fetched
    pub link: Option<String>,

    pub outcome: LinkOutcome,
}

impl LinkIssue {
    /// Issue for a page that could not be fetched
    pub fn page_failed(page: &str, message: String) -> Self {
        Self {
            page: page.to_string(),
            link: None,
            outcome: LinkOutcome::Error { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SeoIssueKind {
    MissingTags { missing: Vec<String> },
    FetchFailed { error: String },
}

/// A page lacking required head markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoIssue {
    pub page: String,
    pub kind: SeoIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SitemapIssueKind {
    /// The index does not reference these child sitemaps
    IndexMissingChildren { missing: Vec<String> },
    /// Locations not rooted under the canonical origin
    NonCanonicalUrls { bad: Vec<String> },
    FetchFailed { error: String },
}

impl SitemapIssueKind {
    pub fn code(&self) -> &'static str {
        match self {
            SitemapIssueKind::IndexMissingChildren { .. } => "index-missing-children",
            SitemapIssueKind::NonCanonicalUrls { .. } => "non-canonical-urls",
            SitemapIssueKind::FetchFailed { .. } => "fetch-failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapIssue {
    /// Sitemap URL
    pub file: String,
    pub kind: SitemapIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RobotsIssueKind {
    /// The sitemap index is not advertised
    MissingSitemap,
    /// A disallow rule hides a locale section
    DisallowsLocale { locale: String },
    FetchFailed { error: String },
}

impl RobotsIssueKind {
    pub fn code(&self) -> String {
        match self {
            RobotsIssueKind::MissingSitemap => "robots-missing-sitemap".to_string(),
            RobotsIssueKind::DisallowsLocale { locale } => format!("robots-disallow-{}", locale),
            RobotsIssueKind::FetchFailed { .. } => "fetch-failed".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotsIssue {
    /// robots.txt URL
    pub file: String,
    pub kind: RobotsIssueKind,
}

/// Security headers missing from one audited URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFinding {
    pub url: String,

    /// Required header names absent from the response
    pub missing: Vec<String>,

    /// First lines of the raw headers, for diagnosis
    pub sample: String,
}

impl HeaderFinding {
    /// Finding with nothing missing and no sample
    pub fn clean(url: String) -> Self {
        Self {
            url,
            missing: Vec::new(),
            sample: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SizeStatus {
    Measured { size: u64, limit: u64 },
    Missing,
}

/// Byte size of one tracked asset against its ceiling
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeRecord {
    /// Path relative to the site root
    pub file: String,
    pub status: SizeStatus,
}

impl SizeRecord {
    /// True when the file exists and fits its ceiling
    pub fn is_ok(&self) -> bool {
        matches!(self.status, SizeStatus::Measured { size, limit } if size <= limit)
    }

    pub fn is_over_limit(&self) -> bool {
        matches!(self.status, SizeStatus::Measured { size, limit } if size > limit)
    }
}

/// Output of all six sweeps, in report order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditResults {
    pub links: Vec<LinkIssue>,
    pub seo: Vec<SeoIssue>,
    pub sitemaps: Vec<SitemapIssue>,
    pub robots: Vec<RobotsIssue>,
    pub headers: Vec<HeaderFinding>,
    pub sizes: Vec<SizeRecord>,
}

impl AuditResults {
    /// Number of audited URLs with at least one missing header
    pub fn header_failures(&self) -> usize {
        self.headers.iter().filter(|f| !f.missing.is_empty()).count()
    }

    /// Number of assets that are missing or over their ceiling
    pub fn size_failures(&self) -> usize {
        self.sizes.iter().filter(|s| !s.is_ok()).count()
    }

    /// True when no sweep found anything
    pub fn is_clean(&self) -> bool {
        self.links.is_empty()
            && self.seo.is_empty()
            && self.sitemaps.is_empty()
            && self.robots.is_empty()
            && self.header_failures() == 0
            && self.size_failures() == 0
    }
}
