use std::path::Path;

use anyhow::{Context, Result};

use super::JOB_VERSION;
use super::types::PackJob;
use crate::cli::{PackMode, PackingHeuristic};
use crate::error::PackError;

/// A parsed job with its names resolved.
#[derive(Debug, Clone)]
pub struct LoadedJob {
    /// The parsed job file
    pub job: PackJob,
    pub heuristic: PackingHeuristic,
    pub mode: PackMode,
}

impl LoadedJob {
    /// Load a job file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read job file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("failed to parse job file: {}", path.display()))
    }

    /// Parse a job from JSON text.
    pub fn parse(content: &str) -> Result<Self> {
        let job: PackJob = serde_json::from_str(content)?;

        if job.version != JOB_VERSION {
            return Err(PackError::UnsupportedVersion(job.version).into());
        }

        let heuristic = PackingHeuristic::from_name(&job.heuristic)
            .ok_or_else(|| PackError::UnknownHeuristic(job.heuristic.clone()))?;

        let mode =
            PackMode::from_name(&job.mode).ok_or_else(|| PackError::UnknownMode(job.mode.clone()))?;

        Ok(Self {
            job,
            heuristic,
            mode,
        })
    }
}
