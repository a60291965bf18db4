use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use rects_bin_pack::cli::{CliArgs, Command, CommonArgs, PackMode, PackingHeuristic};
use rects_bin_pack::config::{LoadedJob, PackJob, save_job};
use rects_bin_pack::error::PackError;
use rects_bin_pack::layout::{Item, LayoutBuilder};
use rects_bin_pack::output::write_json;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        // (e.g., job loading fails before logger init)
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let args = match &cli.command {
        Command::Pack(args) | Command::Check(args) => args,
    };

    // Load job file if specified and merge with CLI args
    let merged = merge_job_with_args(args)?;

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if merged.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("rects-bin-pack v{}", env!("CARGO_PKG_VERSION"));

    if let Some(path) = &merged.save_job {
        save_job(&merged.to_job(), path)?;
        info!("Saved job to {}", path.display());
    }

    let total = merged.items.len();
    let layout = LayoutBuilder::new(merged.width, merged.height)
        .allow_rotate(merged.allow_rotate)
        .heuristic(merged.heuristic)
        .mode(merged.mode)
        .build(merged.items)?;

    match &cli.command {
        Command::Pack(_) => {
            if !layout.is_complete() {
                warn!("{} of {} items did not fit", layout.unplaced.len(), total);
            }
            write_json(&layout, merged.output.as_deref())?;
            if let Some(path) = &merged.output {
                info!("Wrote layout to {}", path.display());
            }
        }
        Command::Check(_) => {
            if !layout.is_complete() {
                return Err(PackError::Unplaced {
                    unplaced: layout.unplaced.len(),
                    total,
                    width: layout.width,
                    height: layout.height,
                }
                .into());
            }
            info!("All {} items fit", total);
        }
    }

    Ok(())
}

/// Merged configuration from CLI args and optional job file.
struct MergedConfig {
    items: Vec<Item>,
    width: u32,
    height: u32,
    allow_rotate: bool,
    heuristic: PackingHeuristic,
    mode: PackMode,
    output: Option<PathBuf>,
    save_job: Option<PathBuf>,
    verbose: bool,
}

impl MergedConfig {
    fn to_job(&self) -> PackJob {
        PackJob {
            width: self.width,
            height: self.height,
            allow_rotate: self.allow_rotate,
            heuristic: self.heuristic.name().to_string(),
            mode: self.mode.name().to_string(),
            items: self.items.clone(),
            ..PackJob::default()
        }
    }
}

/// Merge job file values with CLI arguments.
/// CLI arguments always take precedence over job values.
fn merge_job_with_args(args: &CommonArgs) -> Result<MergedConfig> {
    let loaded = if let Some(job_path) = &args.job {
        Some(
            LoadedJob::load(job_path)
                .with_context(|| format!("failed to load job: {}", job_path.display()))?,
        )
    } else {
        None
    };
    let defaults = PackJob::default();

    // Items: CLI args override job; CLI items get their input index as id
    let items = if !args.items.is_empty() {
        args.items
            .iter()
            .enumerate()
            .map(|(index, size)| Item::new(size.width, size.height).with_field("index", index))
            .collect()
    } else if let Some(ref lj) = loaded {
        lj.job.items.clone()
    } else {
        // This shouldn't happen due to clap's required_unless_present
        Vec::new()
    };

    // For numeric fields: CLI > job > default
    let width = args.width.unwrap_or_else(|| {
        loaded
            .as_ref()
            .map(|lj| lj.job.width)
            .unwrap_or(defaults.width)
    });

    let height = args.height.unwrap_or_else(|| {
        loaded
            .as_ref()
            .map(|lj| lj.job.height)
            .unwrap_or(defaults.height)
    });

    // Boolean flag: CLI presence sets it to true, otherwise use job
    let allow_rotate = if args.rotate {
        true
    } else if let Some(ref lj) = loaded {
        lj.job.allow_rotate
    } else {
        defaults.allow_rotate
    };

    // Heuristic and mode were validated while loading the job
    let heuristic = args
        .heuristic
        .or_else(|| loaded.as_ref().map(|lj| lj.heuristic))
        .unwrap_or_default();

    let mode = args
        .mode
        .or_else(|| loaded.as_ref().map(|lj| lj.mode))
        .unwrap_or_default();

    Ok(MergedConfig {
        items,
        width,
        height,
        allow_rotate,
        heuristic,
        mode,
        output: args.output.clone(),
        save_job: args.save_job.clone(),
        verbose: args.verbose,
    })
}
