//! Projectile
//!
//! A projectile is Idle (invisible, still, never collision-tested) until
//! `launch` arms it. Armed projectiles travel vertically and go back to Idle
//! when they leave [0, playfield height] or when a hit spends them.
//!
//! The entity's active flag *is* the firing flag.
//!
//! The cooldown clock starts at construction, so a shooter with a cooldown
//! cannot fire until that much time has passed since it was built.

use std::path::Path;

use macroquad::color::Color;
use macroquad::logging::warn;

use super::collision::CollisionShape;
use super::entity::{render_logged, Entity, EntityCore};
use super::runtime::FrameContext;
use super::transform::Transform;
use super::visual::Visual;
use crate::asset::ResourceCache;
use crate::backend::Backend;
use crate::config::GameConfig;

/// Vertical travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    /// Sign of travel along screen Y (which grows downward)
    pub fn sign(self) -> f32 {
        match self {
            Heading::Up => -1.0,
            Heading::Down => 1.0,
        }
    }
}

/// Everything needed to build a projectile
#[derive(Debug, Clone)]
pub struct ProjectileSpec<'a> {
    pub sprite: &'a str,
    pub width: f32,
    pub height: f32,
    /// Pixels per second
    pub speed: f32,
    pub playfield_height: f32,
    pub fallback: Color,
    /// Debug outline drawn around the shot while armed
    pub outline: Option<Color>,
}

impl<'a> ProjectileSpec<'a> {
    pub fn player(config: &'a GameConfig) -> Self {
        Self::from_config(config, config.player_projectile_speed)
    }

    pub fn enemy(config: &'a GameConfig) -> Self {
        Self::from_config(config, config.enemy_projectile_speed)
    }

    fn from_config(config: &'a GameConfig, speed: f32) -> Self {
        Self {
            sprite: &config.projectile_sprite,
            width: config.projectile_width,
            height: config.projectile_height,
            speed,
            playfield_height: config.playfield_height,
            fallback: config.fallback,
            outline: config.debug_outlines.then_some(config.shot_outline),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    core: EntityCore,
    heading: Heading,
    last_launch_ms: u64,
    speed: f32,
    playfield_height: f32,
    outline: Option<Color>,
}

impl Projectile {
    pub fn new(
        spec: &ProjectileSpec<'_>,
        cache: &mut ResourceCache,
        backend: &mut dyn Backend,
        now_ms: u64,
    ) -> Self {
        let mut core = EntityCore::new("Projectile");
        core.attach(Transform::new(0.0, 0.0, spec.width, spec.height));
        core.attach(CollisionShape::with_offset(0.0, 0.0, spec.width, spec.height));

        let mut visual = Visual::new(spec.fallback);
        if let Err(err) = visual.bind(cache, backend, Path::new(spec.sprite)) {
            warn!("Projectile sprite unavailable, drawing outline instead: {}", err);
        }
        core.attach(visual);

        // Inert until launched
        core.set_active(false);

        Self {
            core,
            heading: Heading::Up,
            last_launch_ms: now_ms,
            speed: spec.speed,
            playfield_height: spec.playfield_height,
            outline: spec.outline,
        }
    }

    pub fn is_firing(&self) -> bool {
        self.core.is_active()
    }

    #[cfg(test)]
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Arm the projectile at (x, y) unless the previous launch was less than
    /// `min_cooldown_ms` ago. Returns whether it launched.
    ///
    /// A launch while already armed re-fires the same projectile from the
    /// new position; a shooter never has two shots in flight.
    pub fn launch(&mut self, x: f32, y: f32, heading: Heading, min_cooldown_ms: u64, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_launch_ms) < min_cooldown_ms {
            return false;
        }
        if let Err(err) = self.core.place(x, y) {
            warn!("launch skipped: {}", err);
            return false;
        }
        self.heading = heading;
        self.core.set_active(true);
        self.last_launch_ms = now_ms;
        true
    }

    /// Back to Idle
    pub fn deactivate(&mut self) {
        self.core.set_active(false);
    }

    fn out_of_bounds(&self) -> bool {
        self.core
            .rect()
            .map_or(true, |r| r.y < 0.0 || r.y > self.playfield_height)
    }
}

impl Entity for Projectile {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.is_firing() {
            return;
        }
        // translate also advances the collision shape
        let dy = self.heading.sign() * self.speed * ctx.dt;
        if let Err(err) = self.core.translate(0.0, dy) {
            warn!("projectile update skipped: {}", err);
        }
        if self.out_of_bounds() {
            self.deactivate();
        }
    }

    fn render(&self, backend: &mut dyn Backend) {
        if !self.is_firing() {
            return;
        }
        render_logged(&self.core, backend);
        if let (Some(color), Some(rect)) = (self.outline, self.core.rect()) {
            backend.draw_outline_rect(rect, color);
        }
    }
}
