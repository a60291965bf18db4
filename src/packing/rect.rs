/// An axis-aligned rectangle used for both placements and free regions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Check if this rectangle intersects with another.
    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Check if this rectangle fully contains another
    pub fn contains(&self, other: &Rect) -> bool {
        other.is_contained_in(self)
    }

    /// Check if this rectangle lies entirely inside `other`
    pub fn is_contained_in(&self, other: &Rect) -> bool {
        self.x >= other.x
            && self.y >= other.y
            && self.right() <= other.right()
            && self.bottom() <= other.bottom()
    }

    /// Two-argument form of [`Rect::is_contained_in`]
    pub fn is_contained(inner: &Rect, outer: &Rect) -> bool {
        inner.is_contained_in(outer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(20, 20, 10, 10);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        let below = Rect::new(0, 10, 10, 10);

        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_contains() {
        let outer = Rect::new(0, 0, 20, 20);
        let inner = Rect::new(5, 5, 5, 5);
        let partial = Rect::new(15, 15, 10, 10);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&partial));
    }

    #[test]
    fn test_is_contained_in() {
        let outer = Rect::new(0, 0, 20, 20);
        let inner = Rect::new(5, 5, 5, 5);

        assert!(inner.is_contained_in(&outer));
        assert!(Rect::is_contained(&inner, &outer));
        assert!(!outer.is_contained_in(&inner));

        // Equal rectangles contain each other
        let copy = outer;
        assert!(copy.is_contained_in(&outer));
        assert!(outer.is_contained_in(&copy));
    }

    #[test]
    fn test_copy_is_independent() {
        let original = Rect::new(1, 2, 3, 4);
        let mut copy = original;
        copy.x = 10;

        assert_eq!(original.x, 1);
        assert_eq!(copy, Rect::new(10, 2, 3, 4));
    }

    #[test]
    fn test_edges_and_area() {
        let r = Rect::new(3, 4, 10, 20);
        assert_eq!(r.right(), 13);
        assert_eq!(r.bottom(), 24);
        assert_eq!(r.area(), 200);
    }
}
