use clap::Parser;
use site_check::config::{AuditConfig, FetchOptions};
use site_check::{Auditor, Progress, SWEEP_COUNT};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

mod args;
use args::{Args, convert_header_source};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    match run(args).await {
        Ok(report) => {
            println!("\n📄 Report written to: {}", report.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("QA run aborted: {}", e);
            eprintln!("💥 QA run failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> site_check::Result<PathBuf> {
    let fetch = FetchOptions {
        timeout: Duration::from_secs(args.timeout),
        retries: args.retries,
        ..FetchOptions::default()
    };
    let config = AuditConfig::new(args.base_url.as_deref())?
        .with_root_dir(&args.root)
        .with_output(&args.output)
        .with_fetch_options(fetch);

    let auditor = Auditor::new(config)?;
    let header_source = convert_header_source(args.headers, auditor.fetcher());
    let auditor = auditor.with_header_source(header_source);

    println!("🔎 QA start — Base URL: {}", auditor.config().base_url);

    let results = auditor
        .run(|event| match event {
            Progress::Started { step, label } => {
                print!("{}/{} {}… ", step, SWEEP_COUNT, label);
                // Keep the label visible while the sweep runs
                let _ = std::io::stdout().flush();
            }
            Progress::Finished { summary } => println!("{}", summary),
        })
        .await;

    if let Some(json) = &args.json {
        auditor.write_json(&results, json)?;
        ::log::info!("JSON results written to {}", json.display());
    }

    auditor.write_report(&results)
}
