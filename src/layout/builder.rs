use anyhow::Result;
use log::{debug, info};
use rayon::prelude::*;

use super::{Item, Layout};
use crate::cli::{PackMode, PackingHeuristic};
use crate::error::PackError;
use crate::packing::{ALL_HEURISTICS, BatchOutcome, Heuristic, MaxRectsPacker, Packable};

/// Configuration for packing a list of items into one container
pub struct LayoutBuilder {
    pub width: u32,
    pub height: u32,
    pub allow_rotate: bool,
    pub heuristic: PackingHeuristic,
    pub mode: PackMode,
}

impl LayoutBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            allow_rotate: false,
            heuristic: PackingHeuristic::BestShortSideFit,
            mode: PackMode::Batch,
        }
    }

    pub fn allow_rotate(mut self, allow_rotate: bool) -> Self {
        self.allow_rotate = allow_rotate;
        self
    }

    pub fn heuristic(mut self, heuristic: PackingHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn mode(mut self, mode: PackMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pack `items` into the container.
    ///
    /// Items that do not fit end up in [`Layout::unplaced`]; that is not an
    /// error here.
    pub fn build(&self, items: Vec<Item>) -> Result<Layout> {
        if self.width == 0 || self.height == 0 {
            return Err(PackError::InvalidContainer {
                width: self.width,
                height: self.height,
            }
            .into());
        }

        if items.is_empty() {
            return Err(PackError::NoItems.into());
        }

        if let Some((index, item)) = items
            .iter()
            .enumerate()
            .find(|(_, item)| item.width == 0 || item.height == 0)
        {
            return Err(PackError::EmptyItem {
                index,
                width: item.width,
                height: item.height,
            }
            .into());
        }

        let layout = match self.heuristic.fixed() {
            Some(heuristic) => self.try_pack(&items, heuristic),
            None => self.find_best_heuristic(&items),
        };

        info!(
            "Packed {}/{} items into {}x{} with {} ({} mode), occupancy {:.1}%",
            layout.placed.len(),
            layout.total_items(),
            self.width,
            self.height,
            layout.heuristic,
            self.mode.name(),
            layout.occupancy * 100.0
        );

        Ok(layout)
    }

    /// Pack with one heuristic on a fresh packer
    fn try_pack(&self, items: &[Item], heuristic: Heuristic) -> Layout {
        let mut packer = MaxRectsPacker::new(self.width, self.height, self.allow_rotate);

        let mut items = items.to_vec();
        items.iter_mut().for_each(Item::clear_placement);

        let outcome = match self.mode {
            PackMode::Batch => packer.pack_batch(items, heuristic),
            PackMode::Sequential => pack_sequential(&mut packer, items, heuristic),
        };

        let used_width = packer.used_rects().iter().map(|r| r.right()).max().unwrap_or(0);
        let used_height = packer
            .used_rects()
            .iter()
            .map(|r| r.bottom())
            .max()
            .unwrap_or(0);

        Layout {
            width: self.width,
            height: self.height,
            allow_rotate: self.allow_rotate,
            heuristic,
            mode: self.mode,
            placed: outcome.placed,
            unplaced: outcome.unplaced,
            used_width,
            used_height,
            occupancy: packer.occupancy(),
        }
    }

    /// Try every heuristic, each on its own packer, and keep the best layout.
    /// Ties go to the heuristic listed first in [`ALL_HEURISTICS`].
    fn find_best_heuristic(&self, items: &[Item]) -> Layout {
        let layouts: Vec<Layout> = ALL_HEURISTICS
            .par_iter()
            .map(|&heuristic| self.try_pack(items, heuristic))
            .collect();

        let mut best: Option<Layout> = None;
        for layout in layouts {
            debug!(
                "Heuristic {}: packed {}/{}, occupancy {:.1}%",
                layout.heuristic,
                layout.placed.len(),
                items.len(),
                layout.occupancy * 100.0
            );

            let dominated = best.as_ref().is_some_and(|b| !layout.is_better_than(b));
            if !dominated {
                best = Some(layout);
            }
        }

        // ALL_HEURISTICS is non-empty
        #[expect(clippy::expect_used, reason = "heuristics are non-empty")]
        best.expect("at least one heuristic should be tried")
    }
}

/// Insert items one by one in input order
fn pack_sequential<T: Packable>(
    packer: &mut MaxRectsPacker,
    items: Vec<T>,
    heuristic: Heuristic,
) -> BatchOutcome<T> {
    let mut placed = Vec::with_capacity(items.len());
    let mut unplaced = Vec::new();

    for mut item in items {
        let (width, height) = item.size();
        match packer.insert(width, height, heuristic) {
            Some(rect) => {
                item.set_position(rect.x, rect.y);
                item.set_rotated(rect.width != width);
                placed.push(item);
            }
            None => unplaced.push(item),
        }
    }

    BatchOutcome { placed, unplaced }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::Rect;

    fn reference_items() -> Vec<Item> {
        vec![
            Item::new(20, 100).with_field("id", "1"),
            Item::new(200, 70).with_field("id", "2"),
            Item::new(30, 70).with_field("id", "3"),
        ]
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items
            .iter()
            .map(|i| i.extra["id"].as_str().unwrap())
            .collect()
    }

    fn assert_no_overlap(layout: &Layout) {
        let rects: Vec<Rect> = layout
            .placed
            .iter()
            .map(|i| {
                let (w, h) = if i.rotated {
                    (i.height, i.width)
                } else {
                    (i.width, i.height)
                };
                Rect::new(i.x.unwrap(), i.y.unwrap(), w, h)
            })
            .collect();

        let bin = Rect::new(0, 0, layout.width, layout.height);
        for (n, a) in rects.iter().enumerate() {
            assert!(a.is_contained_in(&bin));
            for b in &rects[n + 1..] {
                assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_batch_layout_matches_reference() {
        let layout = LayoutBuilder::new(512, 256)
            .build(reference_items())
            .unwrap();

        assert!(layout.is_complete());
        assert_eq!(ids(&layout.placed), vec!["1", "2", "3"]);

        let positions: Vec<_> = layout
            .placed
            .iter()
            .map(|i| (i.x.unwrap(), i.y.unwrap()))
            .collect();
        assert_eq!(positions, vec![(0, 0), (0, 100), (0, 170)]);
        assert_eq!((layout.used_width, layout.used_height), (200, 240));
    }

    #[test]
    fn test_sequential_keeps_input_order() {
        let items = vec![
            Item::new(30, 70).with_field("id", "small"),
            Item::new(200, 70).with_field("id", "wide"),
        ];

        let layout = LayoutBuilder::new(512, 256)
            .mode(PackMode::Sequential)
            .build(items)
            .unwrap();

        assert_eq!(ids(&layout.placed), vec!["small", "wide"]);
        assert_eq!(layout.placed[0].x, Some(0));
        assert_eq!(layout.placed[0].y, Some(0));
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_unplaced_items_are_reported() {
        let items = vec![
            Item::new(60, 60).with_field("id", "a"),
            Item::new(70, 70).with_field("id", "b"),
            Item::new(50, 50).with_field("id", "c"),
            Item::new(30, 30).with_field("id", "d"),
        ];

        let layout = LayoutBuilder::new(100, 100).build(items).unwrap();

        assert!(!layout.is_complete());
        assert_eq!(ids(&layout.placed), vec!["b", "d"]);
        assert_eq!(ids(&layout.unplaced), vec!["a", "c"]);
        assert!(layout.unplaced.iter().all(|i| !i.is_placed()));
    }

    #[test]
    fn test_input_position_is_ignored() {
        let items: Vec<Item> = serde_json::from_str(
            r#"[
                {"width": 600, "height": 10, "x": 5, "y": 7, "rotated": true, "id": "wide"},
                {"width": 10, "height": 10, "x": 40, "y": 40, "rotated": true, "id": "fits"}
            ]"#,
        )
        .unwrap();

        for mode in [PackMode::Batch, PackMode::Sequential] {
            let layout = LayoutBuilder::new(100, 100)
                .mode(mode)
                .build(items.clone())
                .unwrap();

            assert_eq!(ids(&layout.unplaced), vec!["wide"]);
            let unplaced = &layout.unplaced[0];
            assert_eq!(unplaced.x, None);
            assert_eq!(unplaced.y, None);
            assert!(!unplaced.rotated);
            assert!(!unplaced.is_placed());

            let placed = &layout.placed[0];
            assert_eq!((placed.x, placed.y), (Some(0), Some(0)));
            assert!(!placed.rotated);
        }
    }

    #[test]
    fn test_rotation_marks_items() {
        let layout = LayoutBuilder::new(100, 50)
            .allow_rotate(true)
            .build(vec![Item::new(50, 100)])
            .unwrap();

        assert!(layout.is_complete());
        assert!(layout.placed[0].rotated);
        assert_no_overlap(&layout);
    }

    #[test]
    fn test_best_heuristic_packs_at_least_as_many() {
        let create_items = || {
            [(30, 20), (25, 15), (40, 10), (15, 35), (20, 20), (45, 30), (10, 50)]
                .iter()
                .map(|&(w, h)| Item::new(w, h))
                .collect::<Vec<_>>()
        };

        let best = LayoutBuilder::new(80, 80)
            .heuristic(PackingHeuristic::Best)
            .build(create_items())
            .unwrap();
        assert_no_overlap(&best);

        for heuristic in ALL_HEURISTICS {
            let layout = LayoutBuilder::new(80, 80)
                .heuristic(heuristic.into())
                .build(create_items())
                .unwrap();

            assert_no_overlap(&layout);
            assert!(
                best.placed.len() >= layout.placed.len(),
                "Best mode ({} packed) should be >= {} ({} packed)",
                best.placed.len(),
                heuristic,
                layout.placed.len()
            );
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        let err = LayoutBuilder::new(0, 10)
            .build(reference_items())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::InvalidContainer { .. })
        ));

        let err = LayoutBuilder::new(10, 10).build(Vec::new()).unwrap_err();
        assert!(matches!(err.downcast_ref::<PackError>(), Some(PackError::NoItems)));

        let err = LayoutBuilder::new(10, 10)
            .build(vec![Item::new(1, 1), Item::new(0, 4)])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackError>(),
            Some(PackError::EmptyItem { index: 1, .. })
        ));
    }

    #[test]
    fn test_is_better_than_prefers_more_items() {
        let base = LayoutBuilder::new(100, 100).build(vec![Item::new(10, 10)]).unwrap();

        let mut more = base.clone();
        more.placed.push(Item::new(5, 5));
        assert!(more.is_better_than(&base));
        assert!(!base.is_better_than(&more));

        let mut tighter = base.clone();
        tighter.used_width = 5;
        assert!(tighter.is_better_than(&base));
    }
}
