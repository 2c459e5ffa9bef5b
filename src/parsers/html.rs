use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\b[^>]*href\s*=\s*["']([^"']+)["'][^>]*>"#)
        .expect("anchor pattern should be valid")
});

/// Extracts the raw `href` of every anchor tag, in document order
pub fn extract_links(html: &str) -> Vec<String> {
    let links = ANCHOR_HREF
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect::<Vec<_>>();

    ::log::debug!("HTML parser found {} links", links.len());
    links
}

/// A head marker every page must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    /// `<link rel="canonical">`
    Canonical,
    /// `<link rel="alternate" hreflang="…">` for one locale
    Hreflang(String),
    /// `<link rel="alternate" hreflang="x-default">`
    HreflangDefault,
    /// Any `og:` meta property
    OpenGraph,
    /// Any `twitter:` meta name
    Twitter,
}

impl Marker {
    /// Every required marker for the given locales, in report order
    pub fn required(locales: &[String]) -> Vec<Marker> {
        let mut markers = vec![Marker::Canonical];
        markers.extend(locales.iter().cloned().map(Marker::Hreflang));
        markers.push(Marker::HreflangDefault);
        markers.push(Marker::OpenGraph);
        markers.push(Marker::Twitter);
        markers
    }

    fn pattern(&self) -> String {
        match self {
            Marker::Canonical => r#"<link[^>]+rel=["']canonical["'][^>]+>"#.to_string(),
            Marker::Hreflang(locale) => hreflang_pattern(locale),
            Marker::HreflangDefault => hreflang_pattern("x-default"),
            Marker::OpenGraph => r#"<meta[^>]+property=["']og:"#.to_string(),
            Marker::Twitter => r#"<meta[^>]+name=["']twitter:"#.to_string(),
        }
    }

    /// Structural presence test; the attribute values are not checked
    pub fn is_present(&self, html: &str) -> bool {
        match Regex::new(&format!("(?i){}", self.pattern())) {
            Ok(re) => re.is_match(html),
            Err(e) => {
                ::log::warn!("Invalid pattern for marker {}: {}", self, e);
                false
            }
        }
    }
}

fn hreflang_pattern(code: &str) -> String {
    format!(
        r#"<link[^>]+rel=["']alternate["'][^>]+hreflang=["']{}["'][^>]*>"#,
        regex::escape(code)
    )
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Canonical => write!(f, "canonical"),
            Marker::Hreflang(locale) => write!(f, "hreflang {}", locale),
            Marker::HreflangDefault => write!(f, "hreflang x-default"),
            Marker::OpenGraph => write!(f, "Open Graph"),
            Marker::Twitter => write!(f, "Twitter"),
        }
    }
}

/// Names of the required markers absent from a page.
///
/// Every marker is tested; one missing marker never hides another.
pub fn missing_markers(html: &str, locales: &[String]) -> Vec<String> {
    Marker::required(locales)
        .into_iter()
        .filter(|marker| !marker.is_present(html))
        .map(|marker| marker.to_string())
        .collect()
}
