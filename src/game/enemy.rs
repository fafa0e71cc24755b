//! Enemy
//!
//! Moves with the swarm and fires on its own timer: the first shot lands
//! 1-3 s after spawn, later ones 1-4 s apart (see `GameConfig`). Each
//! enemy owns one Projectile. A shot already in flight keeps flying after
//! its enemy is destroyed.

use macroquad::logging::warn;
use rand::rngs::StdRng;
use rand::Rng;

use super::collision::CollisionShape;
use super::entity::{render_logged, Entity, EntityAllocator, EntityCore};
use super::projectile::{Heading, Projectile, ProjectileSpec};
use super::runtime::FrameContext;
use super::transform::Transform;
use super::visual::Visual;
use crate::asset::ResourceCache;
use crate::backend::Backend;
use crate::config::GameConfig;

#[derive(Debug, Clone)]
pub struct Enemy {
    core: EntityCore,
    projectile: Projectile,
    next_fire_ms: u64,
    refire_ms: (u64, u64),
}

/// Uniform delay in an inclusive millisecond window
fn roll_delay(rng: &mut StdRng, (lo, hi): (u64, u64)) -> u64 {
    rng.gen_range(lo..=hi.max(lo))
}

impl Enemy {
    pub fn new(
        x: f32,
        y: f32,
        config: &GameConfig,
        cache: &mut ResourceCache,
        backend: &mut dyn Backend,
        now_ms: u64,
        rng: &mut StdRng,
    ) -> Self {
        let (w, h) = config.enemy_size;
        let mut core = EntityCore::new("Enemy");
        core.attach(Transform::new(x, y, w, h));

        let mut visual = Visual::new(config.fallback);
        if let Err(err) = visual.bind(cache, backend, &config.enemy_sprite) {
            warn!("Enemy sprite unavailable, drawing outline instead: {}", err);
        }
        core.attach(visual);
        core.attach(CollisionShape::with_offset(0.0, 0.0, w, h));
        core.sync_components();

        let projectile = Projectile::new(&ProjectileSpec::enemy(config), cache, backend, now_ms);
        Self {
            core,
            projectile,
            next_fire_ms: now_ms + roll_delay(rng, config.enemy_first_fire_ms),
            refire_ms: config.enemy_refire_ms,
        }
    }

    pub fn next_fire_ms(&self) -> u64 {
        self.next_fire_ms
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn projectile_mut(&mut self) -> &mut Projectile {
        &mut self.projectile
    }

    /// Fire downward from the bottom-center if the timer is due
    fn try_fire(&mut self, ctx: &mut FrameContext<'_>) {
        if ctx.now_ms < self.next_fire_ms {
            return;
        }
        let Some(rect) = self.core.rect() else {
            return;
        };
        let shot_w = self.projectile.core().rect().map_or(0.0, |r| r.w);
        self.projectile.launch(
            rect.center_x() - shot_w * 0.5,
            rect.bottom(),
            Heading::Down,
            0,
            ctx.now_ms,
        );
        self.next_fire_ms = ctx.now_ms + roll_delay(ctx.rng, self.refire_ms);
    }
}

impl Entity for Enemy {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }

    fn finalize(&mut self, ids: &mut EntityAllocator) {
        self.core.finalize(ids.allocate());
        self.projectile.finalize(ids);
    }

    /// Move with the swarm, advance the shot in flight, then fire if due.
    /// A fresh shot starts at the launch point on the frame it is fired.
    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if self.is_active() {
            let dx = ctx.swarm.step(ctx.dt);
            if let Err(err) = self.core.translate(dx, 0.0) {
                warn!("enemy move skipped: {}", err);
            }
        }
        self.projectile.update(ctx);
        if self.is_active() {
            self.try_fire(ctx);
        }
    }

    fn render(&self, backend: &mut dyn Backend) {
        if self.is_active() {
            render_logged(&self.core, backend);
        }
        self.projectile.render(backend);
    }
}
