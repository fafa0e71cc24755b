//! Axis-aligned rectangle shared by transforms and collision shapes

/// A rectangle defined by position and size. No rotation.
///
/// Sizes are expected to be non-negative; nothing enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center X
    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Strict overlap test. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        let apart = other.right() <= self.x
            || self.right() <= other.x
            || other.bottom() <= self.y
            || self.bottom() <= other.y;
        !apart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center_x(), 25.0);
    }

    #[test]
    fn test_overlap_cases() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        // Corners touching only
        assert!(!a.overlaps(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        // Edge touching only
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 5.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(100.0, 100.0, 5.0, 5.0)));
        // Containment counts
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(5.0, 5.0, 10.0, 10.0),
            Rect::new(10.0, 10.0, 5.0, 5.0),
            Rect::new(-3.0, 4.0, 2.0, 20.0),
            Rect::new(100.0, 100.0, 5.0, 5.0),
            Rect::new(9.5, -1.0, 0.5, 0.5),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(a.overlaps(b), b.overlaps(a), "{:?} vs {:?}", a, b);
            }
        }
    }
}
