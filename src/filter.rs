use crate::utils::dedup_preserving_order;
use regex::Regex;
use url::Url;

/// Configuration for deciding which hrefs are worth probing
#[derive(Debug, Clone)]
pub struct LinkFilterConfig {
    /// Regex patterns for raw hrefs that are never probed
    pub skip_patterns: Vec<String>,

    /// URL schemes that can be probed over HTTP
    pub allowed_schemes: Vec<String>,
}

impl Default for LinkFilterConfig {
    fn default() -> Self {
        Self {
            skip_patterns: vec![
                r"(?i)^mailto:".to_string(),
                r"(?i)^tel:".to_string(),
                r"(?i)^javascript:".to_string(),
                // Same-page fragments
                r"^#".to_string(),
            ],
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }
}

/// Turns the raw hrefs of a page into the absolute URLs to probe
#[derive(Debug)]
pub struct LinkFilter {
    config: LinkFilterConfig,
    skip_regexes: Vec<Regex>,
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self::new(LinkFilterConfig::default()).expect("Default regex patterns should be valid")
    }
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: LinkFilterConfig) -> Result<Self, regex::Error> {
        let skip_regexes = config
            .skip_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            skip_regexes,
        })
    }

    /// Resolve one href against the page it was found on.
    ///
    /// Returns `None` for skipped hrefs, unparseable ones and anything that
    /// does not resolve to an allowed scheme.
    pub fn resolve(&self, href: &str, page: &Url) -> Option<Url> {
        let href = href.trim();
        if href.is_empty() || self.skip_regexes.iter().any(|re| re.is_match(href)) {
            return None;
        }

        let resolved = match page.join(href) {
            Ok(url) => url,
            Err(e) => {
                ::log::debug!("Unresolvable href {:?} on {}: {}", href, page, e);
                return None;
            }
        };

        if !self
            .config
            .allowed_schemes
            .iter()
            .any(|scheme| scheme == resolved.scheme())
        {
            ::log::debug!("Skipping non-fetchable link: {}", resolved);
            return None;
        }

        Some(self.normalize_url(&resolved))
    }

    /// Resolve every href of a page, de-duplicated in first-seen order
    pub fn resolve_all(&self, hrefs: &[String], page: &Url) -> Vec<String> {
        dedup_preserving_order(
            hrefs
                .iter()
                .filter_map(|href| self.resolve(href, page))
                .map(String::from),
        )
    }

    /// Create a normalized version of the URL (fragment removed)
    pub fn normalize_url(&self, url: &Url) -> Url {
        let mut normalized = url.clone();
        normalized.set_fragment(None);
        normalized
    }
}
