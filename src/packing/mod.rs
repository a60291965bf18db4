mod heuristic;
mod maxrects;
mod rect;

pub use heuristic::{ALL_HEURISTICS, Heuristic};
pub use maxrects::{BatchOutcome, MaxRectsPacker, Packable};
pub use rect::Rect;
