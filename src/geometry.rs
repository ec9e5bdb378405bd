//! Axis-aligned rectangles and the collision predicate.

/// An axis-aligned rectangle in board coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Strict overlap on both axes. Rectangles that merely touch along an
    /// edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_intersection_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(100.0, 100.0, 1.0, 1.0);
        assert_eq!(a.intersects(&b), b.intersects(&a));
        assert_eq!(a.intersects(&c), c.intersects(&a));
    }

    #[test]
    fn test_identical_rects_intersect() {
        let a = Rect::new(3.0, -4.0, 7.5, 2.0);
        assert!(a.intersects(&a));
    }

    #[test]
    fn test_separated_on_one_axis_never_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Overlaps vertically, not horizontally
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        // Overlaps horizontally, not vertically
        let c = Rect::new(0.0, 20.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_edge_touching_does_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right_edge = Rect::new(10.0, 0.0, 10.0, 10.0);
        let bottom_edge = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right_edge));
        assert!(!a.intersects(&bottom_edge));
    }
}
