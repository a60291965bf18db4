use serde::{Deserialize, Serialize};

use super::JOB_VERSION;
use crate::layout::Item;

/// Pack job file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackJob {
    /// Job file version (currently 1)
    pub version: u32,
    /// Container width
    pub width: u32,
    /// Container height
    pub height: u32,
    /// Allow items to be rotated by 90 degrees
    pub allow_rotate: bool,
    /// Packing heuristic to use, or "best" to try all of them
    pub heuristic: String,
    /// Insertion mode: "batch" or "sequential"
    pub mode: String,
    /// Items to pack; extra fields are passed through to the output
    pub items: Vec<Item>,
}

impl Default for PackJob {
    fn default() -> Self {
        Self {
            version: JOB_VERSION,
            width: 512,
            height: 512,
            allow_rotate: false,
            heuristic: "best-short-side-fit".to_string(),
            mode: "batch".to_string(),
            items: Vec::new(),
        }
    }
}
