use regex::Regex;
use std::sync::LazyLock;

static DISALLOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Disallow:\s*(\S+)").expect("disallow pattern should be valid")
});

/// Whether the policy has a `Sitemap:` line pointing at `sitemap_url`
pub fn advertises_sitemap(robots: &str, sitemap_url: &str) -> bool {
    Regex::new(&format!(r"(?i)Sitemap:\s*{}", regex::escape(sitemap_url)))
        .map(|re| re.is_match(robots))
        .unwrap_or(false)
}

/// Paths of every non-empty `Disallow:` directive
pub fn disallow_paths(robots: &str) -> Vec<String> {
    DISALLOW
        .captures_iter(robots)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whether any disallow path is exactly the section root, with or without
/// its trailing slash
pub fn blocks_section(disallows: &[String], section_root: &str) -> bool {
    let bare = section_root.trim_end_matches('/');
    let slashed = format!("{}/", bare);
    disallows.iter().any(|p| p == bare || *p == slashed)
}
