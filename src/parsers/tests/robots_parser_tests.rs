use crate::parsers::robots;

const SITEMAP: &str = "https://www.creativeai-tools.fr/sitemap.xml";

#[test]
fn test_advertises_sitemap() {
    let robots_txt = "User-agent: *\nAllow: /\n\nSitemap: https://www.creativeai-tools.fr/sitemap.xml\n";
    assert!(robots::advertises_sitemap(robots_txt, SITEMAP));

    let lower = "sitemap:https://www.creativeai-tools.fr/sitemap.xml";
    assert!(robots::advertises_sitemap(lower, SITEMAP));

    let wrong_origin = "Sitemap: https://creativeai-tools.netlify.app/sitemap.xml";
    assert!(!robots::advertises_sitemap(wrong_origin, SITEMAP));

    assert!(!robots::advertises_sitemap("", SITEMAP));
}

#[test]
fn test_disallow_paths() {
    let robots_txt = "User-agent: *\nDisallow: /drafts/\ndisallow: /tmp\nAllow: /\n";
    assert_eq!(robots::disallow_paths(robots_txt), vec!["/drafts/", "/tmp"]);
}

#[test]
fn test_blocks_section_exact_match_only() {
    let paths = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    assert!(robots::blocks_section(&paths(&["/en/"]), "/en/"));
    assert!(robots::blocks_section(&paths(&["/en"]), "/en/"));
    assert!(robots::blocks_section(&paths(&["/drafts/", "/en"]), "/en/"));

    // Unrelated or deeper paths are fine
    assert!(!robots::blocks_section(&paths(&["/en/drafts/"]), "/en/"));
    assert!(!robots::blocks_section(&paths(&["/english/"]), "/en/"));
    assert!(!robots::blocks_section(&paths(&["/"]), "/en/"));
    assert!(!robots::blocks_section(&[], "/en/"));
}
