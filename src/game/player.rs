//! Player ship
//!
//! Transform, Visual, CollisionShape and InputBehavior, plus exactly one
//! Projectile the ship owns outright.

use macroquad::logging::warn;

use super::collision::CollisionShape;
use super::controller::InputBehavior;
use super::entity::{render_logged, Entity, EntityAllocator, EntityCore};
use super::projectile::{Heading, Projectile, ProjectileSpec};
use super::runtime::FrameContext;
use super::transform::Transform;
use super::visual::Visual;
use crate::asset::ResourceCache;
use crate::backend::Backend;
use crate::config::GameConfig;

/// Gap between the ship's top edge and a fresh shot
pub const LAUNCH_GAP: f32 = 5.0;

#[derive(Debug, Clone)]
pub struct Player {
    core: EntityCore,
    projectile: Projectile,
}

impl Player {
    pub fn new(
        config: &GameConfig,
        cache: &mut ResourceCache,
        backend: &mut dyn Backend,
        now_ms: u64,
    ) -> Self {
        let start = config.player_start;
        let mut core = EntityCore::new("Player");
        core.attach(Transform::from_rect(start));

        let mut visual = Visual::new(config.fallback);
        if let Err(err) = visual.bind(cache, backend, &config.player_sprite) {
            warn!("Player sprite unavailable, drawing outline instead: {}", err);
        }
        core.attach(visual);
        core.attach(CollisionShape::matching(&start));
        core.attach(InputBehavior::new(config.player_speed, config.fire_cooldown_ms));

        let projectile = Projectile::new(&ProjectileSpec::player(config), cache, backend, now_ms);
        Self { core, projectile }
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn projectile_mut(&mut self) -> &mut Projectile {
        &mut self.projectile
    }

    /// Apply held keys: move horizontally, and fire if asked.
    /// No clamping; the ship may leave the visible area.
    pub fn handle_input(&mut self, backend: &dyn Backend, dt: f32, now_ms: u64) {
        if !self.is_active() {
            return;
        }
        let behavior = match self.core.owned::<InputBehavior>() {
            Ok(behavior) => *behavior,
            Err(err) => {
                warn!("input skipped: {}", err);
                return;
            }
        };

        let intent = behavior.read(backend, dt);
        if intent.dx != 0.0 {
            if let Err(err) = self.core.translate(intent.dx, 0.0) {
                warn!("player move skipped: {}", err);
            }
        }

        if intent.fire {
            let Some(rect) = self.core.rect() else {
                return;
            };
            let shot_w = self.projectile.core().rect().map_or(0.0, |r| r.w);
            self.projectile.launch(
                rect.center_x() - shot_w * 0.5,
                rect.y - LAUNCH_GAP,
                Heading::Up,
                behavior.fire_cooldown_ms(),
                now_ms,
            );
        }
    }
}

impl Entity for Player {
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

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if self.is_active() {
            self.core.sync_components();
        }
        self.projectile.update(ctx);
    }

    fn render(&self, backend: &mut dyn Backend) {
        if self.is_active() {
            render_logged(&self.core, backend);
        }
        self.projectile.render(backend);
    }
}
