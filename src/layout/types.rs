use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cli::PackMode;
use crate::packing::{Heuristic, Packable};

/// A rectangle to pack, plus any caller-defined fields.
///
/// Unknown JSON fields are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub width: u32,
    pub height: u32,
    /// Assigned x position, set once placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<u32>,
    /// Assigned y position, set once placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>,
    /// True if the item occupies (height, width)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rotated: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x: None,
            y: None,
            rotated: false,
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn is_placed(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }

    /// Forget any position or rotation carried over from the input
    pub fn clear_placement(&mut self) {
        self.x = None;
        self.y = None;
        self.rotated = false;
    }
}

impl Packable for Item {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_position(&mut self, x: u32, y: u32) {
        self.x = Some(x);
        self.y = Some(y);
    }

    fn set_rotated(&mut self, rotated: bool) {
        self.rotated = rotated;
    }
}

/// A finished packing of one container
#[derive(Debug, Clone)]
pub struct Layout {
    /// Container width
    pub width: u32,
    /// Container height
    pub height: u32,
    pub allow_rotate: bool,
    /// Heuristic that produced this layout
    pub heuristic: Heuristic,
    pub mode: PackMode,
    /// Placed items, in placement order
    pub placed: Vec<Item>,
    /// Items that did not fit, in input order
    pub unplaced: Vec<Item>,
    /// Right-most edge of any placed item
    pub used_width: u32,
    /// Bottom-most edge of any placed item
    pub used_height: u32,
    /// Placed area divided by container area
    pub occupancy: f64,
}

impl Layout {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.placed.len() + self.unplaced.len()
    }

    /// Returns true if this layout is better than another.
    /// Priority: 1) more items packed, 2) smaller used extent, 3) higher occupancy.
    pub(crate) fn is_better_than(&self, other: &Layout) -> bool {
        let self_packed = self.placed.len();
        let other_packed = other.placed.len();

        if self_packed != other_packed {
            return self_packed > other_packed;
        }

        // Same item count - prefer the tighter bounding box
        let self_area = u64::from(self.used_width) * u64::from(self.used_height);
        let other_area = u64::from(other.used_width) * u64::from(other.used_height);

        if self_area != other_area {
            return self_area < other_area;
        }

        self.occupancy > other.occupancy
    }
}
