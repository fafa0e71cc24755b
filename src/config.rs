//! Fixed game parameters
//!
//! Everything tunable lives in `GameConfig`. The shipped game always runs
//! with `GameConfig::default()`; tests build smaller variants.

use macroquad::color::{Color, BLACK, RED, YELLOW};
use macroquad::window::Conf;

use crate::game::Rect;

/// Sprite locations, relative to the working directory
pub const PLAYER_SPRITE: &str = "assets/Spaceship.bmp";
pub const ENEMY_SPRITE: &str = "assets/Alien.bmp";
/// Shared by the player's and the enemies' shots
pub const PROJECTILE_SPRITE: &str = "assets/Projectile.bmp";

/// Seed used when nobody supplies one
pub const DEFAULT_RNG_SEED: u64 = 0x5157_4152_4d00_0001;

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,

    // Player
    pub player_start: Rect,
    pub player_speed: f32,
    pub fire_cooldown_ms: u64,

    // Projectiles
    pub projectile_width: f32,
    pub projectile_height: f32,
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    /// Projectiles go idle once their Y leaves [0, playfield_height]
    pub playfield_height: f32,

    // Enemy grid
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_origin: (f32, f32),
    pub enemy_spacing: (f32, f32),
    pub enemy_size: (f32, f32),
    /// First shot lands somewhere in this window (ms after spawn)
    pub enemy_first_fire_ms: (u64, u64),
    /// Later shots are spaced by this window (ms)
    pub enemy_refire_ms: (u64, u64),

    // Swarm
    pub swarm_speed: f32,
    pub swarm_step_down: f32,
    pub swarm_left_bound: f32,
    pub swarm_right_bound: f32,

    // Rendering
    pub player_sprite: String,
    pub enemy_sprite: String,
    pub projectile_sprite: String,
    pub background: Color,
    /// Drawn in place of a sprite that failed to load
    pub fallback: Color,
    /// Outline around every armed projectile
    pub shot_outline: Color,
    pub debug_outlines: bool,

    pub rng_seed: u64,
}

impl GameConfig {
    /// Target frame time in milliseconds
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.target_fps.max(1))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Space Game".to_string(),
            window_width: 800,
            window_height: 600,
            target_fps: 60,

            player_start: Rect::new(350.0, 500.0, 40.0, 40.0),
            player_speed: 300.0,
            fire_cooldown_ms: 500,

            projectile_width: 6.0,
            projectile_height: 20.0,
            player_projectile_speed: 200.0,
            enemy_projectile_speed: 200.0,
            playfield_height: 600.0,

            enemy_rows: 3,
            enemy_cols: 8,
            enemy_origin: (60.0, 60.0),
            enemy_spacing: (80.0, 60.0),
            enemy_size: (40.0, 40.0),
            enemy_first_fire_ms: (1000, 3000),
            enemy_refire_ms: (1000, 4000),

            swarm_speed: 100.0,
            swarm_step_down: 10.0,
            swarm_left_bound: 10.0,
            swarm_right_bound: 790.0,

            player_sprite: PLAYER_SPRITE.to_string(),
            enemy_sprite: ENEMY_SPRITE.to_string(),
            projectile_sprite: PROJECTILE_SPRITE.to_string(),
            background: BLACK,
            fallback: RED,
            shot_outline: YELLOW,
            debug_outlines: true,

            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

/// Window configuration for macroquad
pub fn window_conf() -> Conf {
    let config = GameConfig::default();
    Conf {
        window_title: config.title,
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: false,
        high_dpi: false,
        ..Default::default()
    }
}
