//! Input Behavior
//!
//! Player-only component that turns held keys into a movement delta and a
//! fire request. The player applies both through its own Transform and
//! Projectile.

use crate::backend::Backend;
use crate::input::Action;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBehavior {
    /// Horizontal speed in pixels per second
    speed: f32,
    /// Minimum time between shots
    fire_cooldown_ms: u64,
}

/// What the held keys ask for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputIntent {
    /// Horizontal displacement, already scaled by elapsed time
    pub dx: f32,
    pub fire: bool,
}

impl InputBehavior {
    pub fn new(speed: f32, fire_cooldown_ms: u64) -> Self {
        Self {
            speed,
            fire_cooldown_ms,
        }
    }

    pub fn fire_cooldown_ms(&self) -> u64 {
        self.fire_cooldown_ms
    }

    /// Sample key state. Left and right together cancel out.
    pub fn read(&self, backend: &dyn Backend, dt: f32) -> InputIntent {
        let mut direction = 0.0;
        if backend.key_held(Action::MoveRight) {
            direction += 1.0;
        }
        if backend.key_held(Action::MoveLeft) {
            direction -= 1.0;
        }
        InputIntent {
            dx: self.speed * direction * dt,
            fire: backend.key_held(Action::Fire),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;

    #[test]
    fn test_no_keys_no_intent() {
        let backend = HeadlessBackend::new();
        let intent = InputBehavior::new(300.0, 500).read(&backend, 0.5);
        assert_eq!(intent, InputIntent::default());
    }

    #[test]
    fn test_movement_scales_with_dt() {
        let mut backend = HeadlessBackend::new();
        let behavior = InputBehavior::new(300.0, 500);

        backend.hold(Action::MoveRight);
        assert_eq!(behavior.read(&backend, 0.5).dx, 150.0);

        backend.release(Action::MoveRight);
        backend.hold(Action::MoveLeft);
        assert_eq!(behavior.read(&backend, 0.1).dx, -30.0);

        backend.hold(Action::MoveRight);
        assert_eq!(behavior.read(&backend, 0.1).dx, 0.0);
    }

    #[test]
    fn test_fire_key() {
        let mut backend = HeadlessBackend::new();
        backend.hold(Action::Fire);
        assert!(InputBehavior::new(300.0, 500).read(&backend, 0.016).fire);
    }
}
