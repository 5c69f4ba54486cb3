use anyhow::{Context, Result};
use cellcheck_core::ScanSummary;
use std::path::Path;

/// Write the scan summary as pretty-printed JSON
pub fn write_report(summary: &ScanSummary, output_path: &Path) -> Result<()> {
    let json = summary.to_json()?;
    std::fs::write(output_path, json)
        .with_context(|| format!("failed to write report to {}", output_path.display()))?;
    println!("💾 Report saved to: {}", output_path.display());
    Ok(())
}
