use log::{debug, trace};

use super::{Heuristic, Rect};
use crate::error::PackError;

/// An item that can be placed by [`MaxRectsPacker::insert_batch`].
///
/// Implementors keep whatever payload they like; the packer only reads the
/// requested size and writes the chosen position back.
pub trait Packable {
    /// Requested size as (width, height)
    fn size(&self) -> (u32, u32);

    /// Receives the top-left corner the item was placed at
    fn set_position(&mut self, x: u32, y: u32);

    /// Called once after placement. `rotated` is true when the item occupies
    /// (height, width) instead of its requested size.
    fn set_rotated(&mut self, _rotated: bool) {}
}

impl Packable for Rect {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_position(&mut self, x: u32, y: u32) {
        self.x = x;
        self.y = y;
    }

    fn set_rotated(&mut self, rotated: bool) {
        if rotated {
            std::mem::swap(&mut self.width, &mut self.height);
        }
    }
}

/// Result of [`MaxRectsPacker::pack_batch`]
#[derive(Debug, Clone)]
pub struct BatchOutcome<T> {
    /// Placed items in placement order, with positions filled in
    pub placed: Vec<T>,
    /// Items that never fit, in their original relative order
    pub unplaced: Vec<T>,
}

/// A scored placement. Lower scores are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    rect: Rect,
    score: (i64, i64),
}

impl Candidate {
    fn beats(&self, best: Option<&Candidate>) -> bool {
        best.is_none_or(|b| self.score < b.score)
    }
}

/// MaxRects bin packer implementation
#[derive(Debug, Clone)]
pub struct MaxRectsPacker {
    bin_width: u32,
    bin_height: u32,
    allow_rotate: bool,
    used_rects: Vec<Rect>,
    free_rects: Vec<Rect>,
}

impl MaxRectsPacker {
    /// Create a packer for a `width` x `height` container.
    ///
    /// The size is not validated; see [`MaxRectsPacker::try_new`].
    pub fn new(width: u32, height: u32, allow_rotate: bool) -> Self {
        let mut packer = Self {
            bin_width: 0,
            bin_height: 0,
            allow_rotate: false,
            used_rects: Vec::new(),
            free_rects: Vec::new(),
        };
        packer.reset(width, height, allow_rotate);
        packer
    }

    /// Create a packer, rejecting containers with a zero-length side
    pub fn try_new(width: u32, height: u32, allow_rotate: bool) -> Result<Self, PackError> {
        if width == 0 || height == 0 {
            return Err(PackError::InvalidContainer { width, height });
        }
        Ok(Self::new(width, height, allow_rotate))
    }

    /// Forget all placements and start over with a new container
    pub fn reset(&mut self, width: u32, height: u32, allow_rotate: bool) {
        self.bin_width = width;
        self.bin_height = height;
        self.allow_rotate = allow_rotate;

        self.used_rects.clear();
        self.free_rects.clear();
        self.free_rects.push(Rect::new(0, 0, width, height));
    }

    pub fn width(&self) -> u32 {
        self.bin_width
    }

    pub fn height(&self) -> u32 {
        self.bin_height
    }

    pub fn allow_rotate(&self) -> bool {
        self.allow_rotate
    }

    /// Committed placements, in placement order
    pub fn used_rects(&self) -> &[Rect] {
        &self.used_rects
    }

    /// Maximal free regions. Entries may overlap each other.
    pub fn free_rects(&self) -> &[Rect] {
        &self.free_rects
    }

    /// Try to insert a rectangle with the given dimensions.
    /// Returns the placed rectangle if successful; on `None` nothing changed.
    /// A zero width or zero height is always rejected with `None`.
    pub fn insert(&mut self, width: u32, height: u32, heuristic: Heuristic) -> Option<Rect> {
        let candidate = self.find_position(width, height, heuristic)?;
        self.place_rect(candidate.rect);
        Some(candidate.rect)
    }

    /// Check if a rectangle of the given size can fit, in either orientation
    /// when rotation is enabled
    pub fn can_fit(&self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.free_rects.iter().any(|r| {
            (width <= r.width && height <= r.height)
                || (self.allow_rotate && height <= r.width && width <= r.height)
        })
    }

    /// Greedily place `items`, each round committing the item whose best
    /// placement scores lowest. Items that never fit are dropped.
    ///
    /// The result is in placement order, not input order. Items with a zero
    /// width or zero height are always dropped.
    pub fn insert_batch<T: Packable>(&mut self, items: Vec<T>, heuristic: Heuristic) -> Vec<T> {
        self.pack_batch(items, heuristic).placed
    }

    /// Same as [`MaxRectsPacker::insert_batch`], but also hands back the
    /// items that did not fit. Items with a zero width or zero height never
    /// fit and always end up in `unplaced`.
    pub fn pack_batch<T: Packable>(&mut self, items: Vec<T>, heuristic: Heuristic) -> BatchOutcome<T> {
        let total = items.len();
        let mut remaining = items;
        let mut placed = Vec::with_capacity(total);

        while !remaining.is_empty() {
            let mut best: Option<(usize, Candidate)> = None;

            for (index, item) in remaining.iter().enumerate() {
                let (width, height) = item.size();
                if let Some(candidate) = self.find_position(width, height, heuristic)
                    && candidate.beats(best.as_ref().map(|(_, b)| b))
                {
                    best = Some((index, candidate));
                }
            }

            let Some((index, candidate)) = best else {
                break;
            };

            self.place_rect(candidate.rect);

            let mut item = remaining.remove(index);
            let (width, _) = item.size();
            item.set_position(candidate.rect.x, candidate.rect.y);
            item.set_rotated(candidate.rect.width != width);
            placed.push(item);
        }

        debug!(
            "Batch placed {}/{} items with {}, occupancy {:.1}%",
            placed.len(),
            total,
            heuristic,
            self.occupancy() * 100.0
        );

        BatchOutcome {
            placed,
            unplaced: remaining,
        }
    }

    /// Ratio of used area to container area (0.0 to 1.0)
    pub fn occupancy(&self) -> f64 {
        let total_area = u64::from(self.bin_width) * u64::from(self.bin_height);
        if total_area == 0 {
            return 0.0;
        }
        let used_area: u64 = self.used_rects.iter().map(Rect::area).sum();
        used_area as f64 / total_area as f64
    }

    fn find_position(&self, width: u32, height: u32, heuristic: Heuristic) -> Option<Candidate> {
        // A zero-sized placement would be indistinguishable from "no fit"
        if width == 0 || height == 0 {
            return None;
        }

        let mut best: Option<Candidate> = None;

        for free_rect in &self.free_rects {
            if width <= free_rect.width && height <= free_rect.height {
                let rect = Rect::new(free_rect.x, free_rect.y, width, height);
                let candidate = Candidate {
                    rect,
                    score: self.score_rect(free_rect, &rect, heuristic),
                };
                if candidate.beats(best.as_ref()) {
                    best = Some(candidate);
                }
            }

            if self.allow_rotate && height <= free_rect.width && width <= free_rect.height {
                let rect = Rect::new(free_rect.x, free_rect.y, height, width);
                let candidate = Candidate {
                    rect,
                    score: self.score_rect(free_rect, &rect, heuristic),
                };
                if candidate.beats(best.as_ref()) {
                    best = Some(candidate);
                }
            }
        }

        best
    }

    /// Score `placed` (already sized for its orientation) inside `free_rect`
    fn score_rect(&self, free_rect: &Rect, placed: &Rect, heuristic: Heuristic) -> (i64, i64) {
        let leftover_h = i64::from(free_rect.width - placed.width);
        let leftover_v = i64::from(free_rect.height - placed.height);
        let short = leftover_h.min(leftover_v);
        let long = leftover_h.max(leftover_v);

        match heuristic {
            Heuristic::BestShortSideFit => (short, long),
            Heuristic::BestLongSideFit => (long, short),
            Heuristic::BestAreaFit => {
                let area_fit = free_rect.area() - placed.area();
                (i64::try_from(area_fit).unwrap_or(i64::MAX), short)
            }
            Heuristic::BottomLeft => (i64::from(placed.bottom()), i64::from(free_rect.x)),
            // Higher contact is better, so negate it for minimization
            Heuristic::ContactPoint => (-self.contact_point_score(placed), 0),
        }
    }

    /// Length of `placed`'s perimeter touching the bin edges or used rectangles
    fn contact_point_score(&self, placed: &Rect) -> i64 {
        let mut score = 0;

        if placed.x == 0 || placed.right() == self.bin_width {
            score += i64::from(placed.height);
        }
        if placed.y == 0 || placed.bottom() == self.bin_height {
            score += i64::from(placed.width);
        }

        for used in &self.used_rects {
            if used.x == placed.right() || used.right() == placed.x {
                score += i64::from(common_interval_length(
                    used.y,
                    used.bottom(),
                    placed.y,
                    placed.bottom(),
                ));
            }
            if used.y == placed.bottom() || used.bottom() == placed.y {
                score += i64::from(common_interval_length(
                    used.x,
                    used.right(),
                    placed.x,
                    placed.right(),
                ));
            }
        }

        score
    }

    fn place_rect(&mut self, rect: Rect) {
        trace!(
            "Placing {}x{} at ({}, {}) against {} free rects",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            self.free_rects.len()
        );

        let mut new_rects = Vec::new();

        self.free_rects.retain(|free_rect| {
            if !rect.intersects(free_rect) {
                return true;
            }
            split_free_rect(free_rect, &rect, &mut new_rects);
            false
        });

        self.free_rects.extend(new_rects);
        self.prune_free_rects();
        self.used_rects.push(rect);
    }

    /// Remove free rectangles that are fully contained within others.
    /// Of several equal rectangles only the last one is kept.
    fn prune_free_rects(&mut self) {
        let free_rects = &self.free_rects;
        let redundant: Vec<bool> = free_rects
            .iter()
            .enumerate()
            .map(|(i, rect)| {
                free_rects.iter().enumerate().any(|(j, other)| {
                    i != j && rect.is_contained_in(other) && (rect != other || i < j)
                })
            })
            .collect();

        let before = self.free_rects.len();
        self.free_rects = self
            .free_rects
            .iter()
            .zip(&redundant)
            .filter(|(_, is_redundant)| !**is_redundant)
            .map(|(rect, _)| *rect)
            .collect();

        trace!(
            "Pruned {} of {} free rects",
            before - self.free_rects.len(),
            before
        );
    }
}

/// Push the parts of `free_rect` left uncovered by `used` (which must
/// intersect it) onto `out`: top, bottom, left, right.
fn split_free_rect(free_rect: &Rect, used: &Rect, out: &mut Vec<Rect>) {
    // Top portion
    if used.y > free_rect.y && used.y < free_rect.bottom() {
        out.push(Rect::new(
            free_rect.x,
            free_rect.y,
            free_rect.width,
            used.y - free_rect.y,
        ));
    }

    // Bottom portion
    if used.bottom() < free_rect.bottom() {
        out.push(Rect::new(
            free_rect.x,
            used.bottom(),
            free_rect.width,
            free_rect.bottom() - used.bottom(),
        ));
    }

    // Left portion
    if used.x > free_rect.x && used.x < free_rect.right() {
        out.push(Rect::new(
            free_rect.x,
            free_rect.y,
            used.x - free_rect.x,
            free_rect.height,
        ));
    }

    // Right portion
    if used.right() < free_rect.right() {
        out.push(Rect::new(
            used.right(),
            free_rect.y,
            free_rect.right() - used.right(),
            free_rect.height,
        ));
    }
}

/// Returns 0 if the two intervals are disjoint, or the length of their overlap
fn common_interval_length(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> u32 {
    if a_end < b_start || b_end < a_start {
        return 0;
    }
    a_end.min(b_end) - a_start.max(b_start)
}
