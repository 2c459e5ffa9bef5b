use crate::config::AuditConfig;
use crate::results::{SizeRecord, SizeStatus};
use std::fs;

/// Measure each tracked asset in the local checkout against its ceiling
pub fn run(config: &AuditConfig) -> Vec<SizeRecord> {
    config
        .assets
        .iter()
        .map(|asset| {
            let path = config.root_dir.join(&asset.path);
            let status = match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => SizeStatus::Measured {
                    size: meta.len(),
                    limit: asset.limit,
                },
                Ok(_) => SizeStatus::Missing,
                Err(e) => {
                    ::log::debug!("Cannot stat {}: {}", path.display(), e);
                    SizeStatus::Missing
                }
            };

            SizeRecord {
                file: asset.path.clone(),
                status,
            }
        })
        .collect()
}
