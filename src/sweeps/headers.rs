use crate::config::{AuditConfig, Environment};
use crate::inspectors::HeaderSource;
use crate::parsers::headers::header_value;
use crate::results::HeaderFinding;
use crate::utils::head_lines;

/// Security headers every audited response must carry
pub const REQUIRED_HEADERS: &[&str] = &[
    "Content-Security-Policy",
    "Strict-Transport-Security",
    "Referrer-Policy",
    "Permissions-Policy",
    "X-Frame-Options",
    "X-Content-Type-Options",
];

const HSTS: &str = "Strict-Transport-Security";
const SAMPLE_LINES: usize = 12;

/// Headers required for a deployment environment
pub fn required_for(environment: Environment) -> Vec<&'static str> {
    REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|name| !(environment == Environment::Preview && *name == HSTS))
        .collect()
}

/// Audit the security headers of the site root and the secondary locale root
pub async fn run(config: &AuditConfig, source: &dyn HeaderSource) -> Vec<HeaderFinding> {
    let environment = config.environment();
    let paths = config.header_paths();

    if environment == Environment::Loopback {
        ::log::info!("Loopback target, skipping security headers");
        return paths
            .iter()
            .map(|path| HeaderFinding::clean(config.page_url(path)))
            .collect();
    }

    let required = required_for(environment);
    let mut findings = Vec::with_capacity(paths.len());

    for path in &paths {
        let url = config.page_url(path);
        let raw = source.raw_headers(&url).await;

        let missing = required
            .iter()
            .filter(|name| header_value(&raw, name).is_none())
            .map(|name| name.to_string())
            .collect::<Vec<_>>();

        ::log::debug!("{} via {}: missing {:?}", url, source.label(), missing);
        findings.push(HeaderFinding {
            url,
            missing,
            sample: head_lines(&raw, SAMPLE_LINES),
        });
    }

    findings
}
