use crate::config::AuditConfig;
use crate::fetch::Fetcher;
use crate::parsers::html;
use crate::results::{SeoIssue, SeoIssueKind};

/// Check every configured page for its canonical, hreflang, Open Graph and
/// Twitter markers
pub async fn run(config: &AuditConfig, fetcher: &Fetcher) -> Vec<SeoIssue> {
    let mut issues = Vec::new();

    for path in &config.pages {
        let page_url = config.page_url(path);
        let body = match fetcher.get(&page_url).await {
            Ok(response) => response.body,
            Err(e) => {
                issues.push(SeoIssue {
                    page: page_url,
                    kind: SeoIssueKind::FetchFailed {
                        error: e.to_string(),
                    },
                });
                continue;
            }
        };

        let missing = html::missing_markers(&body, &config.locales);
        if !missing.is_empty() {
            ::log::debug!("{} is missing {:?}", page_url, missing);
            issues.push(SeoIssue {
                page: page_url,
                kind: SeoIssueKind::MissingTags { missing },
            });
        }
    }

    issues
}
