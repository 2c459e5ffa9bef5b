use crate::config::AuditConfig;
use crate::fetch::Fetcher;
use crate::parsers::{file_name, sitemap};
use crate::results::{SitemapIssue, SitemapIssueKind};

/// Check the sitemap index references every locale sitemap, and that every
/// child sitemap lists canonical URLs only
pub async fn run(config: &AuditConfig, fetcher: &Fetcher) -> Vec<SitemapIssue> {
    let mut issues = Vec::new();
    let children = config.child_sitemaps();

    let index_url = config.page_url(&config.sitemap_index);
    match fetcher.get(&index_url).await {
        Ok(response) => {
            let missing = children
                .iter()
                .map(|child| file_name(child))
                .filter(|name| !sitemap::references_child(&response.body, name))
                .map(str::to_string)
                .collect::<Vec<_>>();

            if !missing.is_empty() {
                issues.push(SitemapIssue {
                    file: index_url,
                    kind: SitemapIssueKind::IndexMissingChildren { missing },
                });
            }
        }
        Err(e) => issues.push(SitemapIssue {
            file: index_url,
            kind: SitemapIssueKind::FetchFailed {
                error: e.to_string(),
            },
        }),
    }

    for child in &children {
        let url = config.page_url(child);
        let body = match fetcher.get(&url).await {
            Ok(response) => response.body,
            Err(e) => {
                issues.push(SitemapIssue {
                    file: url,
                    kind: SitemapIssueKind::FetchFailed {
                        error: e.to_string(),
                    },
                });
                continue;
            }
        };

        let locations = sitemap::extract_locations(&body);
        let bad = sitemap::non_canonical(&locations, &config.canonical);
        ::log::debug!(
            "{}: {} locations, {} non-canonical",
            url,
            locations.len(),
            bad.len()
        );

        if !bad.is_empty() {
            issues.push(SitemapIssue {
                file: url,
                kind: SitemapIssueKind::NonCanonicalUrls {
                    bad: bad.into_iter().map(str::to_string).collect(),
                },
            });
        }
    }

    issues
}
