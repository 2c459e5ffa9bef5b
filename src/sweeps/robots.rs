use crate::config::AuditConfig;
use crate::fetch::Fetcher;
use crate::parsers::robots;
use crate::results::{RobotsIssue, RobotsIssueKind};

/// Check robots.txt advertises the canonical sitemap index and leaves the
/// secondary locale section crawlable
pub async fn run(config: &AuditConfig, fetcher: &Fetcher) -> Vec<RobotsIssue> {
    let url = config.page_url(&config.robots_path);

    let text = match fetcher.get(&url).await {
        Ok(response) => response.body,
        Err(e) => {
            return vec![RobotsIssue {
                file: url,
                kind: RobotsIssueKind::FetchFailed {
                    error: e.to_string(),
                },
            }];
        }
    };

    let mut issues = Vec::new();

    if !robots::advertises_sitemap(&text, &config.canonical_sitemap_url()) {
        issues.push(RobotsIssue {
            file: url.clone(),
            kind: RobotsIssueKind::MissingSitemap,
        });
    }

    let disallows = robots::disallow_paths(&text);
    if robots::blocks_section(&disallows, &config.secondary_root()) {
        issues.push(RobotsIssue {
            file: url,
            kind: RobotsIssueKind::DisallowsLocale {
                locale: config.secondary_locale.clone(),
            },
        });
    }

    issues
}
