use regex::Regex;
use std::sync::LazyLock;

static LOC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<loc>([^<]+)</loc>").expect("loc pattern should be valid"));

/// Every `<loc>` value of a sitemap, untrimmed, in document order
pub fn extract_locations(xml: &str) -> Vec<String> {
    LOC.captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whether a sitemap index mentions a child sitemap file name anywhere
pub fn references_child(index: &str, file_name: &str) -> bool {
    Regex::new(&format!("(?i){}", regex::escape(file_name)))
        .map(|re| re.is_match(index))
        .unwrap_or(false)
}

/// Locations that are not rooted under `<canonical>/`
pub fn non_canonical<'a>(locations: &'a [String], canonical: &str) -> Vec<&'a str> {
    let prefix = format!("{}/", canonical);
    locations
        .iter()
        .map(String::as_str)
        .filter(|loc| !loc.starts_with(&prefix))
        .collect()
}
