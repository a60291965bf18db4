use std::path::Path;

use anyhow::{Context, Result};

use super::types::PackJob;

/// Save a job to a JSON file with pretty formatting.
pub fn save_job(job: &PackJob, path: &Path) -> Result<()> {
    let content =
        serde_json::to_string_pretty(job).with_context(|| "failed to serialize job to JSON")?;

    std::fs::write(path, content)
        .with_context(|| format!("failed to write job file: {}", path.display()))?;

    Ok(())
}
