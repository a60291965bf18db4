use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("Container size {width}x{height} is invalid, both sides must be non-zero")]
    InvalidContainer { width: u32, height: u32 },

    #[error("Item {index} has zero size ({width}x{height})")]
    EmptyItem { index: usize, width: u32, height: u32 },

    #[error("No items to pack")]
    NoItems,

    #[error("Unsupported job file version {0} (expected {expected})", expected = crate::config::JOB_VERSION)]
    UnsupportedVersion(u32),

    #[error(
        "Unknown heuristic '{0}'. Valid values: best-short-side-fit, best-long-side-fit, \
         best-area-fit, bottom-left, contact-point, best"
    )]
    UnknownHeuristic(String),

    #[error("Unknown pack mode '{0}'. Valid values: batch, sequential")]
    UnknownMode(String),

    #[error("{unplaced} of {total} items did not fit into {width}x{height}")]
    Unplaced {
        unplaced: usize,
        total: usize,
        width: u32,
        height: u32,
    },

    #[error("Failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
