//! Collision
//!
//! `CollisionShape` is the rectangle used for overlap tests. It has the same
//! layout as `Transform` but its own size, and follows the transform at a
//! fixed offset.
//!
//! `resolve_collisions` applies the per-frame hit policy once every entity
//! has been updated:
//! 1. The player's shot is tested against active enemies in roster order.
//!    The first hit destroys that enemy and spends the shot.
//! 2. Every enemy shot in flight is tested against the player, whether or
//!    not the player is still active. A shot that lands is spent.

use macroquad::logging::{debug, warn};

use super::enemy::Enemy;
use super::entity::{Entity, EntityCore};
use super::player::Player;
use super::Rect;
use crate::error::GameError;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionShape {
    rect: Rect,
    /// Offset of the shape's origin from the transform's origin
    offset: (f32, f32),
}

impl CollisionShape {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            offset: (0.0, 0.0),
        }
    }

    /// Shape of its own size, placed at an offset from the transform
    pub fn with_offset(dx: f32, dy: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(dx, dy, w, h),
            offset: (dx, dy),
        }
    }

    /// Shape covering exactly `rect`
    pub fn matching(rect: &Rect) -> Self {
        Self::new(rect.x, rect.y, rect.w, rect.h)
    }

    /// Re-anchor to the owner's transform rectangle. Size is kept.
    pub fn follow(&mut self, anchor: &Rect) {
        self.rect.x = anchor.x + self.offset.0;
        self.rect.y = anchor.y + self.offset.1;
    }

    pub fn rectangle(&self) -> &Rect {
        &self.rect
    }
}

/// Overlap test between two entities' collision shapes
pub fn check_collision(a: &EntityCore, b: &EntityCore) -> Result<bool, GameError> {
    let a = a.require::<CollisionShape>()?;
    let b = b.require::<CollisionShape>()?;
    Ok(a.rectangle().overlaps(b.rectangle()))
}

/// Outcome of one frame's collision pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Roster index of the enemy the player's shot destroyed
    pub enemy_hit: Option<usize>,
    pub player_hit: bool,
}

pub fn resolve_collisions(player: &mut Player, enemies: &mut [Enemy]) -> CollisionReport {
    let mut report = CollisionReport::default();

    if player.projectile().is_firing() {
        for (index, enemy) in enemies.iter_mut().enumerate() {
            if !enemy.is_active() {
                continue;
            }
            match check_collision(player.projectile().core(), enemy.core()) {
                Ok(true) => {
                    debug!("Player shot hit enemy #{}", index);
                    enemy.core_mut().set_active(false);
                    player.projectile_mut().deactivate();
                    report.enemy_hit = Some(index);
                    break;
                }
                Ok(false) => {}
                Err(err) => warn!("collision check skipped: {}", err),
            }
        }
    }

    for (index, enemy) in enemies.iter_mut().enumerate() {
        if !enemy.projectile().is_firing() {
            continue;
        }
        match check_collision(enemy.projectile().core(), player.core()) {
            Ok(true) => {
                debug!("Enemy #{} shot hit the player", index);
                player.core_mut().set_active(false);
                enemy.projectile_mut().deactivate();
                report.player_hit = true;
            }
            Ok(false) => {}
            Err(err) => warn!("collision check skipped: {}", err),
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::ResourceCache;
    use crate::backend::HeadlessBackend;
    use crate::config::GameConfig;
    use crate::game::entity::EntityAllocator;
    use crate::game::projectile::Heading;
    use crate::game::transform::Transform;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Scene {
        player: Player,
        enemies: Vec<Enemy>,
    }

    fn scene(enemy_positions: &[(f32, f32)]) -> Scene {
        let config = GameConfig::default();
        let mut backend = HeadlessBackend::new();
        let mut cache = ResourceCache::new();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ids = EntityAllocator::new();

        let mut player = Player::new(&config, &mut cache, &mut backend, 0);
        player.finalize(&mut ids);
        let enemies = enemy_positions
            .iter()
            .map(|&(x, y)| {
                let mut enemy = Enemy::new(x, y, &config, &mut cache, &mut backend, 0, &mut rng);
                enemy.finalize(&mut ids);
                enemy
            })
            .collect();
        Scene { player, enemies }
    }

    fn core_with_shape(x: f32, y: f32, w: f32, h: f32) -> EntityCore {
        let mut core = EntityCore::new("Box");
        core.attach(Transform::new(x, y, w, h));
        core.attach(CollisionShape::new(x, y, w, h));
        core
    }

    #[test]
    fn test_check_collision_literal_cases() {
        let a = core_with_shape(0.0, 0.0, 10.0, 10.0);
        assert!(check_collision(&a, &core_with_shape(5.0, 5.0, 10.0, 10.0)).unwrap());
        assert!(!check_collision(&a, &core_with_shape(10.0, 10.0, 5.0, 5.0)).unwrap());
        assert!(!check_collision(&a, &core_with_shape(100.0, 100.0, 5.0, 5.0)).unwrap());
    }

    #[test]
    fn test_check_collision_uses_shape_not_transform() {
        let mut a = EntityCore::new("Box");
        a.attach(Transform::new(0.0, 0.0, 100.0, 100.0));
        a.attach(CollisionShape::with_offset(40.0, 40.0, 20.0, 20.0));
        a.sync_components();

        assert!(!check_collision(&a, &core_with_shape(0.0, 0.0, 10.0, 10.0)).unwrap());
        assert!(check_collision(&a, &core_with_shape(45.0, 45.0, 1.0, 1.0)).unwrap());
    }

    #[test]
    fn test_missing_shape_is_an_error_not_a_crash() {
        let mut bare = EntityCore::new("Bare");
        bare.attach(Transform::new(0.0, 0.0, 10.0, 10.0));
        let shaped = core_with_shape(0.0, 0.0, 10.0, 10.0);

        assert!(matches!(
            check_collision(&shaped, &bare),
            Err(GameError::MissingComponent { .. })
        ));
    }

    #[test]
    fn test_player_shot_credits_first_enemy_only() {
        // Two enemies on top of each other
        let mut s = scene(&[(100.0, 100.0), (100.0, 100.0)]);
        s.player
            .projectile_mut()
            .launch(110.0, 110.0, Heading::Up, 0, 0);

        let report = resolve_collisions(&mut s.player, &mut s.enemies);

        assert_eq!(report.enemy_hit, Some(0));
        assert!(!s.enemies[0].is_active());
        assert!(s.enemies[1].is_active());
        assert!(!s.player.projectile().is_firing());
    }

    #[test]
    fn test_inactive_enemies_are_skipped() {
        let mut s = scene(&[(100.0, 100.0), (100.0, 100.0)]);
        s.enemies[0].core_mut().set_active(false);
        s.player
            .projectile_mut()
            .launch(110.0, 110.0, Heading::Up, 0, 0);

        let report = resolve_collisions(&mut s.player, &mut s.enemies);
        assert_eq!(report.enemy_hit, Some(1));
    }

    #[test]
    fn test_idle_shot_hits_nothing() {
        let mut s = scene(&[(100.0, 100.0)]);
        // Park the idle projectile inside the enemy
        s.player.projectile_mut().core_mut().place(110.0, 110.0).unwrap();

        let report = resolve_collisions(&mut s.player, &mut s.enemies);
        assert_eq!(report, CollisionReport::default());
        assert!(s.enemies[0].is_active());
    }

    #[test]
    fn test_enemy_shot_downs_player() {
        let mut s = scene(&[(100.0, 100.0), (300.0, 100.0)]);
        let target = s.player.core().rect().unwrap();
        s.enemies[1]
            .projectile_mut()
            .launch(target.x + 10.0, target.y + 10.0, Heading::Down, 0, 0);

        let report = resolve_collisions(&mut s.player, &mut s.enemies);

        assert!(report.player_hit);
        assert!(!s.player.is_active());
        assert!(!s.enemies[1].projectile().is_firing());
        // Shooter itself is untouched
        assert!(s.enemies[1].is_active());
    }

    #[test]
    fn test_enemy_shot_is_spent_on_downed_player() {
        let mut s = scene(&[(100.0, 100.0), (300.0, 100.0)]);
        s.player.core_mut().set_active(false);
        let target = s.player.core().rect().unwrap();
        for enemy in s.enemies.iter_mut() {
            enemy
                .projectile_mut()
                .launch(target.x + 10.0, target.y + 10.0, Heading::Down, 0, 0);
        }

        let report = resolve_collisions(&mut s.player, &mut s.enemies);

        assert!(report.player_hit);
        assert!(!s.player.is_active());
        assert!(s.enemies.iter().all(|e| !e.projectile().is_firing()));
    }
}
