//! Transform Component
//!
//! Position and size of an entity. Pure data plus mutators; callers scale
//! velocities by elapsed time before calling `move_by`.

use super::Rect;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Transform {
    rect: Rect,
}

impl Transform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::from_rect(Rect::new(x, y, w, h))
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    /// Translate by a delta
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.rect.x += dx;
        self.rect.y += dy;
    }

    pub fn set_x(&mut self, x: f32) {
        self.rect.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.rect.y = y;
    }

    pub fn rectangle(&self) -> &Rect {
        &self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_by_is_relative() {
        let mut t = Transform::new(10.0, 20.0, 40.0, 40.0);
        t.move_by(5.0, -5.0);
        t.move_by(0.5, 0.0);
        assert_eq!(*t.rectangle(), Rect::new(15.5, 15.0, 40.0, 40.0));
    }

    #[test]
    fn test_setters_are_absolute() {
        let mut t = Transform::new(7.0, 7.0, 2.0, 3.0);
        t.set_x(3.0);
        t.set_y(-4.0);
        assert_eq!(*t.rectangle(), Rect::new(3.0, -4.0, 2.0, 3.0));
    }
}
