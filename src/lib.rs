pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod output;
pub mod packing;

pub use cli::{CliArgs, Command, CommonArgs, PackMode, PackingHeuristic};
pub use error::PackError;
pub use layout::{Item, Layout, LayoutBuilder};
pub use packing::{BatchOutcome, Heuristic, MaxRectsPacker, Packable, Rect};
