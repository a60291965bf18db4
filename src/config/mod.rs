mod load;
mod save;
mod types;

pub use load::LoadedJob;
pub use save::save_job;
pub use types::PackJob;

/// Current job file version
pub const JOB_VERSION: u32 = 1;
