use super::Vec2;

/// Axis-aligned rectangle in logical pixels, top-left origin.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { origin: Vec2::new(x, y), size: Vec2::new(w, h) }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { origin: min, size: (max - min).max(Vec2::ZERO) }
    }

    /// Bottom-right corner.
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    pub fn is_empty(self) -> bool {
        self.size.cmple(Vec2::ZERO).any()
    }

    /// Left and top edges are inside, right and bottom edges are not.
    pub fn contains(self, p: Vec2) -> bool {
        p.cmpge(self.origin).all() && p.cmplt(self.max()).all()
    }

    /// Moves every edge inward by `d`, bottoming out at zero size.
    pub fn inset(self, d: f32) -> Rect {
        let d = Vec2::splat(d);
        Rect { origin: self.origin + d, size: (self.size - d * 2.0).max(Vec2::ZERO) }
    }

    /// Overlap of the two rectangles, or `None` when they only touch or are
    /// apart.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let min = self.origin.max(other.origin);
        let max = self.max().min(other.max());
        let overlap = Rect::from_min_max(min, max);
        (!overlap.is_empty()).then_some(overlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANEL: Rect = Rect::new(0.0, 0.0, 10.0, 10.0);

    #[test]
    fn containment_is_half_open() {
        assert!(PANEL.contains(Vec2::new(0.0, 0.0)));
        assert!(PANEL.contains(Vec2::new(9.99, 9.99)));
        assert!(!PANEL.contains(Vec2::new(10.0, 5.0)));
        assert!(!PANEL.contains(Vec2::new(5.0, 10.0)));
        assert!(!PANEL.contains(Vec2::new(-1.0, 5.0)));
    }

    #[test]
    fn inset_clamps_at_zero() {
        assert_eq!(Rect::new(0.0, 0.0, 100.0, 50.0).inset(5.0), Rect::new(5.0, 5.0, 90.0, 40.0));
        assert!(Rect::new(0.0, 0.0, 4.0, 4.0).inset(5.0).is_empty());
    }

    #[test]
    fn overlap_of_crossing_rects() {
        let other = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(PANEL.intersect(other), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
    }

    #[test]
    fn shared_edge_is_not_an_overlap() {
        assert_eq!(PANEL.intersect(Rect::new(10.0, 0.0, 10.0, 10.0)), None);
    }
}
