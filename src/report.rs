//! Markdown report assembly.
//!
//! Rendering is a pure function of the config, the results and the
//! timestamp, so two runs over an unchanged site differ only in the
//! `Generated:` line.

use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::results::{
    AuditResults, HeaderFinding, LinkIssue, LinkOutcome, RobotsIssue, SeoIssue, SeoIssueKind,
    SitemapIssue, SitemapIssueKind, SizeRecord, SizeStatus,
};
use crate::utils::fmt_bytes;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::PathBuf;

/// Render the full report
pub fn render(config: &AuditConfig, results: &AuditResults, generated: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("# QA Report — {}", config.site_name),
        format!("Base URL checked: **{}**", config.base_url),
        format!(
            "Generated: {}",
            generated.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        String::new(),
    ];

    render_links(&mut lines, &results.links, config.report_row_limit);
    lines.push(String::new());
    render_seo(&mut lines, &results.seo, config);
    lines.push(String::new());
    render_sitemaps(&mut lines, &results.sitemaps, config);
    lines.push(String::new());
    render_robots(&mut lines, &results.robots, config);
    lines.push(String::new());
    render_headers(&mut lines, &results.headers);
    lines.push(String::new());
    render_sizes(&mut lines, &results.sizes);

    lines.push(String::new());
    lines.push("---".to_string());
    lines.push("_Tip:_ use `BASE_URL` to target a preview deploy, e.g.:".to_string());
    lines.push(
        "`BASE_URL=https://deploy-preview-123--creativeai-tools.netlify.app site-check`"
            .to_string(),
    );

    lines.join("\n")
}

/// Render and write the report, replacing any previous one
pub fn write(config: &AuditConfig, results: &AuditResults) -> Result<PathBuf> {
    let path = config.output_path();
    let text = render(config, results, Utc::now());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| AuditError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }

    fs::write(&path, text).map_err(|source| AuditError::Io {
        path: path.display().to_string(),
        source,
    })?;

    ::log::info!("Report written to {}", path.display());
    Ok(path)
}

fn render_links(lines: &mut Vec<String>, issues: &[LinkIssue], row_limit: usize) {
    lines.push("## 1) Link checker".to_string());
    if issues.is_empty() {
        lines.push("✅ All checked links on target pages returned 2xx/3xx.".to_string());
        return;
    }

    lines.push(format!("❌ Found {} problematic link(s):", issues.len()));
    lines.push(String::new());
    lines.push("| Page | Link | Status/Error |".to_string());
    lines.push("|------|------|--------------|".to_string());
    for issue in issues.iter().take(row_limit) {
        let status = match &issue.outcome {
            LinkOutcome::Status { code, text } => format!("{} {}", code, text).trim().to_string(),
            LinkOutcome::Error { message } => message.clone(),
        };
        lines.push(format!(
            "| {} | {} | {} |",
            escape_cell(&issue.page),
            escape_cell(issue.link.as_deref().unwrap_or("—")),
            escape_cell(&status)
        ));
    }
    if issues.len() > row_limit {
        lines.push(format!("_…and {} more_", issues.len() - row_limit));
    }
}

/// Keep an arbitrary message inside one table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn render_seo(lines: &mut Vec<String>, issues: &[SeoIssue], config: &AuditConfig) {
    let locales = config
        .locales
        .iter()
        .map(|l| l.to_uppercase())
        .collect::<Vec<_>>()
        .join("/");
    lines.push(format!(
        "## 2) SEO tags (canonical, hreflang {}/x-default, OG, Twitter)",
        locales
    ));
    if issues.is_empty() {
        lines.push("✅ All pages include the required tags.".to_string());
        return;
    }

    for issue in issues {
        match &issue.kind {
            SeoIssueKind::MissingTags { missing } => {
                lines.push(format!("- {}: missing → {}", issue.page, missing.join(", ")))
            }
            SeoIssueKind::FetchFailed { error } => {
                lines.push(format!("- {}: fetch failed → {}", issue.page, error))
            }
        }
    }
}

fn render_sitemaps(lines: &mut Vec<String>, issues: &[SitemapIssue], config: &AuditConfig) {
    lines.push("## 3) Sitemaps".to_string());
    if issues.is_empty() {
        let children = config
            .child_sitemaps()
            .iter()
            .map(|c| format!("**{}**", crate::parsers::file_name(c)))
            .collect::<Vec<_>>()
            .join(" & ");
        lines.push(format!(
            "✅ {} indexes {} and child sitemaps use canonical absolute URLs.",
            crate::parsers::file_name(&config.sitemap_index),
            children
        ));
        return;
    }

    for issue in issues {
        let detail = match &issue.kind {
            SitemapIssueKind::IndexMissingChildren { missing } => {
                format!(" → {}", missing.join(", "))
            }
            SitemapIssueKind::NonCanonicalUrls { bad } => format!(" → {}", bad.join(", ")),
            SitemapIssueKind::FetchFailed { error } => format!(" → {}", error),
        };
        lines.push(format!("- {}: {}{}", issue.file, issue.kind.code(), detail));
    }
}

fn render_robots(lines: &mut Vec<String>, issues: &[RobotsIssue], config: &AuditConfig) {
    lines.push("## 4) robots.txt".to_string());
    if issues.is_empty() {
        lines.push(format!(
            "✅ robots.txt exposes the sitemap index and does not block **{}**.",
            config.secondary_root()
        ));
        return;
    }

    for issue in issues {
        lines.push(format!("- {}: {}", issue.file, issue.kind.code()));
    }
}

fn render_headers(lines: &mut Vec<String>, findings: &[HeaderFinding]) {
    lines.push("## 5) Security headers".to_string());
    for finding in findings {
        if finding.missing.is_empty() {
            lines.push(format!("✅ {} — all required headers present.", finding.url));
        } else {
            lines.push(format!(
                "❌ {} — missing: {}",
                finding.url,
                finding.missing.join(", ")
            ));
            lines.push(format!(
                "<details><summary>Sample headers</summary>\n\n```\n{}\n```\n</details>",
                finding.sample.trim()
            ));
        }
    }
}

fn render_sizes(lines: &mut Vec<String>, records: &[SizeRecord]) {
    lines.push("## 6) Static sizes (raw bytes)".to_string());
    for record in records {
        match record.status {
            SizeStatus::Missing => lines.push(format!("- {}: ❌ file not found", record.file)),
            SizeStatus::Measured { size, limit } => {
                let mark = if record.is_ok() { "✅" } else { "❌" };
                lines.push(format!(
                    "- {}: {} {} (limit {})",
                    record.file,
                    mark,
                    fmt_bytes(size),
                    fmt_bytes(limit)
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::RobotsIssueKind;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn config() -> AuditConfig {
        AuditConfig::new(None).unwrap()
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn healthy() -> AuditResults {
        AuditResults {
            headers: vec![
                HeaderFinding::clean("https://www.creativeai-tools.fr/".to_string()),
                HeaderFinding::clean("https://www.creativeai-tools.fr/en/".to_string()),
            ],
            sizes: vec![
                SizeRecord {
                    file: "assets/styles.css".to_string(),
                    status: SizeStatus::Measured {
                        size: 40 * 1024,
                        limit: 120 * 1024,
                    },
                },
                SizeRecord {
                    file: "assets/main.js".to_string(),
                    status: SizeStatus::Measured {
                        size: 20 * 1024,
                        limit: 80 * 1024,
                    },
                },
            ],
            ..AuditResults::default()
        }
    }

    #[test]
    fn test_healthy_report() {
        let report = render(&config(), &healthy(), timestamp());

        assert!(report.starts_with("# QA Report — creativeai-tools\n"));
        assert!(report.contains("Base URL checked: **https://www.creativeai-tools.fr**"));
        assert!(report.contains("Generated: 2025-03-01T12:00:00.000Z"));
        assert!(report.contains("✅ All checked links on target pages returned 2xx/3xx."));
        assert!(report.contains("✅ All pages include the required tags."));
        assert!(report.contains(
            "✅ sitemap.xml indexes **sitemap-fr.xml** & **sitemap-en.xml** and child sitemaps use canonical absolute URLs."
        ));
        assert!(report.contains("does not block **/en/**."));
        assert!(report.contains("✅ https://www.creativeai-tools.fr/en/ — all required headers present."));
        assert!(report.contains("- assets/main.js: ✅ 20.0 KB (limit 80.0 KB)"));
        assert!(!report.contains('❌'));
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let report = render(&config(), &healthy(), timestamp());
        let positions: Vec<usize> = [
            "## 1) Link checker",
            "## 2) SEO tags",
            "## 3) Sitemaps",
            "## 4) robots.txt",
            "## 5) Security headers",
            "## 6) Static sizes",
        ]
        .iter()
        .map(|title| report.find(title).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_is_deterministic() {
        let results = healthy();
        assert_eq!(
            render(&config(), &results, timestamp()),
            render(&config(), &results, timestamp())
        );
    }

    #[test]
    fn test_link_table_is_truncated() {
        let mut config = config();
        config.report_row_limit = 2;
        let results = AuditResults {
            links: (0..5)
                .map(|i| LinkIssue {
                    page: "https://www.creativeai-tools.fr/".to_string(),
                    link: Some(format!("https://www.creativeai-tools.fr/{}.html", i)),
                    outcome: LinkOutcome::Status {
                        code: 404,
                        text: "Not Found".to_string(),
                    },
                })
                .collect(),
            ..healthy()
        };

        let report = render(&config, &results, timestamp());
        assert!(report.contains("❌ Found 5 problematic link(s):"));
        assert!(report.contains(
            "| https://www.creativeai-tools.fr/ | https://www.creativeai-tools.fr/1.html | 404 Not Found |"
        ));
        assert!(!report.contains("/2.html"));
        assert!(report.contains("_…and 3 more_"));
    }

    #[test]
    fn test_page_failure_row() {
        let results = AuditResults {
            links: vec![LinkIssue::page_failed(
                "https://www.creativeai-tools.fr/",
                "connection refused".to_string(),
            )],
            ..healthy()
        };

        let report = render(&config(), &results, timestamp());
        assert!(report.contains("| https://www.creativeai-tools.fr/ | — | connection refused |"));
    }

    #[test]
    fn test_pipes_in_links_stay_in_their_cell() {
        let results = AuditResults {
            links: vec![LinkIssue {
                page: "https://www.creativeai-tools.fr/a|b.html".to_string(),
                link: Some("https://www.creativeai-tools.fr/s?q=a|b".to_string()),
                outcome: LinkOutcome::Status {
                    code: 404,
                    text: "Not Found".to_string(),
                },
            }],
            ..healthy()
        };

        let report = render(&config(), &results, timestamp());
        let row = report
            .lines()
            .find(|line| line.contains("/s?q="))
            .unwrap();
        assert_eq!(
            row,
            "| https://www.creativeai-tools.fr/a\\|b.html | https://www.creativeai-tools.fr/s?q=a\\|b | 404 Not Found |"
        );
        assert_eq!(row.replace("\\|", "").matches('|').count(), 4);
    }

    #[test]
    fn test_failing_sections() {
        let results = AuditResults {
            seo: vec![SeoIssue {
                page: "https://www.creativeai-tools.fr/404.html".to_string(),
                kind: SeoIssueKind::MissingTags {
                    missing: vec!["canonical".to_string(), "Twitter".to_string()],
                },
            }],
            sitemaps: vec![SitemapIssue {
                file: "https://www.creativeai-tools.fr/sitemap-en.xml".to_string(),
                kind: SitemapIssueKind::NonCanonicalUrls {
                    bad: vec!["http://creativeai-tools.fr/en/".to_string()],
                },
            }],
            robots: vec![RobotsIssue {
                file: "https://www.creativeai-tools.fr/robots.txt".to_string(),
                kind: RobotsIssueKind::DisallowsLocale {
                    locale: "en".to_string(),
                },
            }],
            headers: vec![HeaderFinding {
                url: "https://www.creativeai-tools.fr/".to_string(),
                missing: vec!["Permissions-Policy".to_string()],
                sample: "HTTP/2 200\ncontent-type: text/html\n".to_string(),
            }],
            sizes: vec![
                SizeRecord {
                    file: "assets/styles.css".to_string(),
                    status: SizeStatus::Missing,
                },
                SizeRecord {
                    file: "assets/main.js".to_string(),
                    status: SizeStatus::Measured {
                        size: 90 * 1024,
                        limit: 80 * 1024,
                    },
                },
            ],
            ..AuditResults::default()
        };

        let report = render(&config(), &results, timestamp());
        assert!(report.contains(
            "- https://www.creativeai-tools.fr/404.html: missing → canonical, Twitter"
        ));
        assert!(report.contains(
            "- https://www.creativeai-tools.fr/sitemap-en.xml: non-canonical-urls → http://creativeai-tools.fr/en/"
        ));
        assert!(report.contains("- https://www.creativeai-tools.fr/robots.txt: robots-disallow-en"));
        assert!(report.contains("❌ https://www.creativeai-tools.fr/ — missing: Permissions-Policy"));
        assert!(report.contains("```\nHTTP/2 200\ncontent-type: text/html\n```"));
        assert!(report.contains("- assets/styles.css: ❌ file not found"));
        assert!(report.contains("- assets/main.js: ❌ 90.0 KB (limit 80.0 KB)"));
    }

    #[test]
    fn test_write_overwrites_previous_report() {
        let root = TempDir::new().unwrap();
        let config = config().with_root_dir(root.path());
        let path = config.output_path();

        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        let written = write(&config, &healthy()).unwrap();
        assert_eq!(written, root.path().join("tools/report.md"));

        let text = fs::read_to_string(&written).unwrap();
        assert!(text.starts_with("# QA Report"));
        assert!(!text.contains("stale"));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let root = TempDir::new().unwrap();
        let config = config()
            .with_root_dir(root.path())
            .with_output("out/nested/report.md");

        let written = write(&config, &healthy()).unwrap();
        assert!(written.exists());
    }
}
