use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::packing::Heuristic;

#[derive(Parser, Debug)]
#[command(name = "rects-bin-pack")]
#[command(version, about = "MaxRects rectangle packer", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Pack the items and write the layout as JSON
    Pack(CommonArgs),
    /// Pack the items and fail if any of them does not fit
    Check(CommonArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Item sizes as WIDTHxHEIGHT (e.g. 20x100)
    #[arg(required_unless_present = "job")]
    pub items: Vec<ItemSize>,

    /// Load settings and items from a JSON job file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub job: Option<PathBuf>,

    /// Container width [default: 512]
    #[arg(long)]
    pub width: Option<u32>,

    /// Container height [default: 512]
    #[arg(long)]
    pub height: Option<u32>,

    /// Allow items to be rotated by 90 degrees
    #[arg(short, long)]
    pub rotate: bool,

    /// Packing heuristic to use [default: best-short-side-fit]
    #[arg(long, value_enum)]
    pub heuristic: Option<PackingHeuristic>,

    /// Insertion mode [default: batch]
    #[arg(long, value_enum)]
    pub mode: Option<PackMode>,

    /// Write the layout to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Save the merged settings and items as a job file
    #[arg(long, value_name = "FILE")]
    pub save_job: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum PackMode {
    /// Repeatedly place whichever remaining item scores best
    #[default]
    Batch,
    /// Place items one at a time in input order
    Sequential,
}

impl PackMode {
    pub fn name(self) -> &'static str {
        match self {
            PackMode::Batch => "batch",
            PackMode::Sequential => "sequential",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "batch" => Some(PackMode::Batch),
            "sequential" => Some(PackMode::Sequential),
            _ => None,
        }
    }
}

/// An item size given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSize {
    pub width: u32,
    pub height: u32,
}

impl std::str::FromStr for ItemSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;

        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_e| format!("invalid width in '{}'", s))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_e| format!("invalid height in '{}'", s))?;

        if width == 0 || height == 0 {
            return Err(format!("item size must be non-zero, got {}", s));
        }

        Ok(ItemSize { width, height })
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum PackingHeuristic {
    /// Best Short Side Fit - minimizes the shorter leftover side
    #[default]
    #[value(name = "best-short-side-fit")]
    BestShortSideFit,
    /// Best Long Side Fit - minimizes the longer leftover side
    #[value(name = "best-long-side-fit")]
    BestLongSideFit,
    /// Best Area Fit - picks the smallest free rectangle
    #[value(name = "best-area-fit")]
    BestAreaFit,
    /// Bottom Left - Tetris-style packing
    #[value(name = "bottom-left")]
    BottomLeft,
    /// Contact Point - maximizes contact with placed rectangles and bin edges
    #[value(name = "contact-point")]
    ContactPoint,
    /// Best - tries all heuristics and picks the most efficient result
    #[value(name = "best")]
    Best,
}

impl PackingHeuristic {
    /// The concrete heuristic, or `None` for [`PackingHeuristic::Best`]
    pub fn fixed(self) -> Option<Heuristic> {
        match self {
            PackingHeuristic::BestShortSideFit => Some(Heuristic::BestShortSideFit),
            PackingHeuristic::BestLongSideFit => Some(Heuristic::BestLongSideFit),
            PackingHeuristic::BestAreaFit => Some(Heuristic::BestAreaFit),
            PackingHeuristic::BottomLeft => Some(Heuristic::BottomLeft),
            PackingHeuristic::ContactPoint => Some(Heuristic::ContactPoint),
            PackingHeuristic::Best => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.fixed().map_or("best", Heuristic::name)
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "best" => Some(PackingHeuristic::Best),
            other => Heuristic::from_name(other).map(PackingHeuristic::from),
        }
    }
}

impl From<Heuristic> for PackingHeuristic {
    fn from(heuristic: Heuristic) -> Self {
        match heuristic {
            Heuristic::BestShortSideFit => PackingHeuristic::BestShortSideFit,
            Heuristic::BestLongSideFit => PackingHeuristic::BestLongSideFit,
            Heuristic::BestAreaFit => PackingHeuristic::BestAreaFit,
            Heuristic::BottomLeft => PackingHeuristic::BottomLeft,
            Heuristic::ContactPoint => PackingHeuristic::ContactPoint,
        }
    }
}
