use std::fmt;

use serde::{Deserialize, Serialize};

/// Rule used to score a candidate position inside a free rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// Positions the rectangle against the short side of the free rectangle it fits best
    BestShortSideFit,
    /// Positions the rectangle against the long side of the free rectangle it fits best
    BestLongSideFit,
    /// Positions the rectangle into the smallest free rectangle it fits
    BestAreaFit,
    /// Tetris-style placement, lowest top edge first, then leftmost
    BottomLeft,
    /// Picks the position touching the bin edges and placed rectangles the most
    ContactPoint,
}

/// All heuristics, in the order they are tried when searching for the best one
pub const ALL_HEURISTICS: [Heuristic; 5] = [
    Heuristic::BestShortSideFit,
    Heuristic::BestLongSideFit,
    Heuristic::BestAreaFit,
    Heuristic::BottomLeft,
    Heuristic::ContactPoint,
];

impl Heuristic {
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::BestShortSideFit => "best-short-side-fit",
            Heuristic::BestLongSideFit => "best-long-side-fit",
            Heuristic::BestAreaFit => "best-area-fit",
            Heuristic::BottomLeft => "bottom-left",
            Heuristic::ContactPoint => "contact-point",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        ALL_HEURISTICS.into_iter().find(|h| h.name() == name)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for heuristic in ALL_HEURISTICS {
            assert_eq!(Heuristic::from_name(heuristic.name()), Some(heuristic));
        }
        assert_eq!(Heuristic::from_name("best"), None);
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Heuristic::BottomLeft).unwrap();
        assert_eq!(json, "\"bottom-left\"");

        let parsed: Heuristic = serde_json::from_str("\"contact-point\"").unwrap();
        assert_eq!(parsed, Heuristic::ContactPoint);
    }
}
