// src/file/export.rs

use std::path::Path;
use anyhow::{Result, Context};
use csv::Writer;
use log::info;
use crate::api::Finding;

/// Writes findings to a CSV file, one row per event.
pub fn save_findings_csv(path: &Path, findings: &[&Finding]) -> Result<()> {
    let mut writer = Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(["timestamp", "user", "ip", "status"])?;
    for finding in findings {
        writer.write_record([
            finding.timestamp.as_str(),
            finding.user_or_unknown(),
            finding.ip.as_str(),
            finding.status.as_str(),
        ])?;
    }
    writer.flush()?;

    info!("Exported {} findings to {}", findings.len(), path.display());
    Ok(())
}
