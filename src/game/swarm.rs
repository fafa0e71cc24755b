//! Swarm
//!
//! Group movement state shared by every enemy: one direction and one speed.
//! The `Application` owns the single `Swarm` and hands a copy to each enemy
//! through the frame context, so every enemy reads the same value within a
//! frame.
//!
//! Edge handling runs once per frame after all enemies have moved. If any
//! active enemy is past either bound (`x < left` or `x + w > right`), the
//! whole swarm reverses once and every active enemy steps down together.
//! The check ignores the current heading.

use macroquad::logging::{debug, warn};

use super::enemy::Enemy;
use super::entity::Entity;
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwarmDirection {
    Left,
    Right,
}

impl SwarmDirection {
    pub fn sign(self) -> f32 {
        match self {
            SwarmDirection::Left => -1.0,
            SwarmDirection::Right => 1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SwarmDirection::Left => SwarmDirection::Right,
            SwarmDirection::Right => SwarmDirection::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swarm {
    pub direction: SwarmDirection,
    /// Pixels per second
    pub speed: f32,
}

impl Swarm {
    /// A swarm heading right
    pub fn new(speed: f32) -> Self {
        Self {
            direction: SwarmDirection::Right,
            speed,
        }
    }

    /// Horizontal displacement for one frame
    pub fn step(&self, dt: f32) -> f32 {
        self.direction.sign() * self.speed * dt
    }

    pub fn reverse(&mut self) {
        self.direction = self.direction.reversed();
    }
}

/// Play-field edges and the drop applied on every reversal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwarmBounds {
    pub left: f32,
    pub right: f32,
    pub step_down: f32,
}

impl SwarmBounds {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            left: config.swarm_left_bound,
            right: config.swarm_right_bound,
            step_down: config.swarm_step_down,
        }
    }
}

/// Reverse and drop the swarm if any active enemy is past either edge.
/// Returns whether a reversal happened.
pub fn apply_edge_reversal(swarm: &mut Swarm, enemies: &mut [Enemy], bounds: &SwarmBounds) -> bool {
    let crossed = enemies
        .iter()
        .filter(|enemy| enemy.is_active())
        .filter_map(|enemy| enemy.core().rect())
        .any(|r| r.x < bounds.left || r.right() > bounds.right);
    if !crossed {
        return false;
    }

    swarm.reverse();
    debug!("Swarm reversed, now heading {:?}", swarm.direction);

    for enemy in enemies.iter_mut().filter(|enemy| enemy.is_active()) {
        if let Err(err) = enemy.core_mut().translate(0.0, bounds.step_down) {
            warn!("swarm descent skipped: {}", err);
        }
    }
    true
}
