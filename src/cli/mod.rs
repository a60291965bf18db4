mod args;

pub use args::{CliArgs, Command, CommonArgs, ItemSize, PackMode, PackingHeuristic};
