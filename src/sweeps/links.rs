use crate::config::AuditConfig;
use crate::fetch::{Fetcher, RequestOptions};
use crate::filter::LinkFilter;
use crate::parsers::html;
use crate::results::{LinkIssue, LinkOutcome};
use url::Url;

/// Whether a final status counts as a live link
pub fn is_reachable(status: u16) -> bool {
    (200..400).contains(&status)
}

/// Whether a HEAD answer is not trusted and needs a GET.
///
/// Some servers reject HEAD with 4xx/5xx; anything below 100 is not a
/// real HTTP status and is treated like no answer.
fn needs_fallback(status: u16) -> bool {
    !(100..400).contains(&status)
}

/// Check every link on every configured page
pub async fn run(config: &AuditConfig, fetcher: &Fetcher) -> Vec<LinkIssue> {
    let filter = LinkFilter::default();
    let mut issues = Vec::new();

    for path in &config.pages {
        let page_url = config.page_url(path);
        let page = match fetcher.get(&page_url).await {
            Ok(response) => response,
            Err(e) => {
                ::log::warn!("Skipping links of {}: {}", page_url, e);
                issues.push(LinkIssue::page_failed(&page_url, e.to_string()));
                continue;
            }
        };

        let base = match Url::parse(&page_url) {
            Ok(url) => url,
            Err(e) => {
                issues.push(LinkIssue::page_failed(&page_url, e.to_string()));
                continue;
            }
        };

        let links = filter.resolve_all(&html::extract_links(&page.body), &base);
        ::log::info!("Found {} links in {}", links.len(), page_url);

        for link in links {
            if let Some(outcome) = probe(fetcher, &link).await {
                ::log::debug!("Broken link on {}: {} ({:?})", page_url, link, outcome);
                issues.push(LinkIssue {
                    page: page_url.clone(),
                    link: Some(link),
                    outcome,
                });
            }
        }
    }

    issues
}

/// Probe one link: HEAD first, GET when HEAD is refused or fails.
///
/// Returns `None` for a live link.
pub async fn probe(fetcher: &Fetcher, link: &str) -> Option<LinkOutcome> {
    let head = fetcher.fetch(link, &RequestOptions::head()).await;

    let response = match head {
        Ok(response) if !needs_fallback(response.status) => response,
        _ => match fetcher.get(link).await {
            Ok(response) => response,
            Err(e) => {
                return Some(LinkOutcome::Error {
                    message: e.to_string(),
                });
            }
        },
    };

    if is_reachable(response.status) {
        None
    } else {
        Some(LinkOutcome::Status {
            code: response.status,
            text: response.status_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchOptions;
    use crate::sweeps::testing::{config_for, fetcher};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn page(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    async fn head(server: &MockServer, route: &str, status: u16) {
        Mock::given(method("HEAD"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(server)
            .await;
    }

    #[test]
    fn test_status_classification() {
        assert!(is_reachable(200));
        assert!(is_reachable(301));
        assert!(is_reachable(399));
        assert!(!is_reachable(400));
        assert!(!is_reachable(404));
        assert!(!is_reachable(199));

        assert!(needs_fallback(0));
        assert!(needs_fallback(405));
        assert!(needs_fallback(500));
        assert!(!needs_fallback(200));
        assert!(!needs_fallback(302));
    }

    #[tokio::test]
    async fn test_healthy_page_has_no_issues() {
        let server = MockServer::start().await;
        page(
            &server,
            "/",
            r##"<a href="/ok.html">ok</a><a href="mailto:a@b.c">mail</a><a href="#top">top</a>"##,
        )
        .await;
        head(&server, "/ok.html", 200).await;

        let issues = run(&config_for(&server.uri(), &["/"]), &fetcher()).await;
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[tokio::test]
    async fn test_broken_link_reports_one_row() {
        let server = MockServer::start().await;
        page(&server, "/", r#"<a href="/missing.html">gone</a><a href="/missing.html">again</a>"#)
            .await;
        // HEAD and the GET fallback both 404
        head(&server, "/missing.html", 404).await;
        Mock::given(method("GET"))
            .and(path("/missing.html"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let issues = run(&config_for(&server.uri(), &["/"]), &fetcher()).await;

        assert_eq!(
            issues,
            vec![LinkIssue {
                page: format!("{}/", server.uri()),
                link: Some(format!("{}/missing.html", server.uri())),
                outcome: LinkOutcome::Status {
                    code: 404,
                    text: "Not Found".to_string()
                },
            }]
        );
    }

    #[tokio::test]
    async fn test_rejected_head_falls_back_to_get() {
        let server = MockServer::start().await;
        page(&server, "/", r#"<a href="/no-head">x</a>"#).await;
        head(&server, "/no-head", 405).await;
        page(&server, "/no-head", "fine").await;

        let issues = run(&config_for(&server.uri(), &["/"]), &fetcher()).await;
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[tokio::test]
    async fn test_head_transport_failure_falls_back_to_get() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/slow-head"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/slow-head"))
            .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = Fetcher::new(FetchOptions {
            timeout: Duration::from_millis(200),
            retries: 0,
            backoff: Duration::from_millis(1),
        })
        .unwrap();

        let outcome = probe(&fetcher, &format!("{}/slow-head", server.uri())).await;
        assert_eq!(outcome, None);
    }

    #[tokio::test]
    async fn test_relative_links_resolve_against_page() {
        let server = MockServer::start().await;
        page(&server, "/en/", r#"<a href="privacy-policy.html">p</a>"#).await;
        head(&server, "/en/privacy-policy.html", 200).await;

        let issues = run(&config_for(&server.uri(), &["/en/"]), &fetcher()).await;
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);
    }

    #[tokio::test]
    async fn test_unreachable_link_records_error() {
        let server = MockServer::start().await;
        page(&server, "/", r#"<a href="http://127.0.0.1:9/dead">dead</a>"#).await;

        let issues = run(&config_for(&server.uri(), &["/"]), &fetcher()).await;

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].link.as_deref(), Some("http://127.0.0.1:9/dead"));
        assert!(matches!(issues[0].outcome, LinkOutcome::Error { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_page_is_one_issue() {
        let issues = run(&config_for("http://127.0.0.1:9", &["/", "/en/"]), &fetcher()).await;

        assert_eq!(issues.len(), 2);
        for issue in &issues {
            assert!(issue.link.is_none());
            assert!(matches!(issue.outcome, LinkOutcome::Error { .. }));
        }
        assert_eq!(issues[0].page, "http://127.0.0.1:9/");
        assert_eq!(issues[1].page, "http://127.0.0.1:9/en/");
    }
}
