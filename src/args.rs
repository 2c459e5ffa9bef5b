use clap::{Parser, ValueEnum};
use site_check::fetch::Fetcher;
use site_check::inspectors::{CurlInspector, HeaderSource, HttpInspector};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "site-check")]
#[command(about = "Pre-deployment QA sweep: links, SEO tags, sitemaps, robots.txt, security headers, asset sizes")]
#[command(version)]
pub struct Args {
    /// Base URL to audit (defaults to the canonical production origin)
    #[arg(long, env = "BASE_URL")]
    pub base_url: Option<String>,

    /// Site checkout holding the static assets
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Markdown report path, relative to the site root unless absolute
    #[arg(short, long, default_value = "tools/report.md")]
    pub output: PathBuf,

    /// Also write the raw results as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// How security headers are read
    #[arg(long, value_enum, default_value_t = HeaderSourceArg::Curl)]
    pub headers: HeaderSourceArg,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,

    /// Retries after a transport failure
    #[arg(long, default_value_t = 2)]
    pub retries: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum HeaderSourceArg {
    /// Shell out to `curl -s -I -L`
    Curl,
    /// In-process HEAD request
    Http,
}

/// Convert from CLI argument header source to the inspector used by the run
pub fn convert_header_source(arg: HeaderSourceArg, fetcher: &Fetcher) -> Box<dyn HeaderSource> {
    match arg {
        HeaderSourceArg::Curl => {
            Box::new(CurlInspector::default().with_timeout(fetcher.options().timeout))
        }
        HeaderSourceArg::Http => Box::new(HttpInspector::from_fetcher(fetcher)),
    }
}
