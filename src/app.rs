//! Application
//!
//! Owns the backend, the player, the enemy roster and the swarm, and drives
//! Input -> Update -> Render every frame.
//!
//! Lifecycle: Uninitialized -> Running -> ShuttingDown -> Terminated.
//! Within Update: player, then every enemy, then swarm edge handling, then
//! collision resolution.

use macroquad::logging::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::asset::ResourceCache;
use crate::backend::Backend;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::{
    apply_edge_reversal, resolve_collisions, Enemy, Entity, EntityAllocator, FrameContext,
    FrameTimer, Player, Swarm, SwarmBounds,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Uninitialized,
    Running,
    ShuttingDown,
    Terminated,
}

impl AppState {
    pub fn label(&self) -> &'static str {
        match self {
            AppState::Uninitialized => "Uninitialized",
            AppState::Running => "Running",
            AppState::ShuttingDown => "ShuttingDown",
            AppState::Terminated => "Terminated",
        }
    }
}

/// Where the round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Every enemy is down
    Won,
    /// The player is down
    Lost,
}

pub struct Application<B: Backend> {
    config: GameConfig,
    backend: B,
    state: AppState,
    status: GameStatus,

    cache: ResourceCache,
    ids: EntityAllocator,
    player: Option<Player>,
    enemies: Vec<Enemy>,
    swarm: Swarm,
    bounds: SwarmBounds,

    rng: StdRng,
    timer: FrameTimer,
}

impl<B: Backend> Application<B> {
    pub fn new(config: GameConfig, backend: B) -> Self {
        Self {
            swarm: Swarm::new(config.swarm_speed),
            bounds: SwarmBounds::from_config(&config),
            rng: StdRng::seed_from_u64(config.rng_seed),
            timer: FrameTimer::new(config.frame_interval_ms()),
            config,
            backend,
            state: AppState::Uninitialized,
            status: GameStatus::Playing,
            cache: ResourceCache::new(),
            ids: EntityAllocator::new(),
            player: None,
            enemies: Vec::new(),
        }
    }

    fn transition(&mut self, to: AppState) {
        info!("Application {} -> {}", self.state.label(), to.label());
        self.state = to;
    }

    /// Bring up the backend and build the player and the enemy roster.
    /// Backend failure is fatal and leaves the application Uninitialized.
    pub fn start_up(&mut self) -> Result<(), GameError> {
        if self.state != AppState::Uninitialized {
            return Err(GameError::InvalidState {
                from: self.state.label(),
                to: AppState::Running.label(),
            });
        }

        self.backend.create_surface(
            &self.config.title,
            self.config.window_width,
            self.config.window_height,
        )?;

        let now = self.backend.now_millis();
        let mut player = Player::new(&self.config, &mut self.cache, &mut self.backend, now);
        player.finalize(&mut self.ids);
        self.player = Some(player);

        self.spawn_roster();

        info!(
            "Started: {} enemies, {} images cached, {} entities",
            self.enemies.len(),
            self.cache.len(),
            self.ids.alive_count()
        );
        self.transition(AppState::Running);
        Ok(())
    }

    fn spawn_roster(&mut self) {
        let now = self.backend.now_millis();
        let (origin_x, origin_y) = self.config.enemy_origin;
        let (spacing_x, spacing_y) = self.config.enemy_spacing;

        self.enemies.clear();
        self.enemies.reserve(self.config.enemy_rows * self.config.enemy_cols);
        for row in 0..self.config.enemy_rows {
            for col in 0..self.config.enemy_cols {
                let x = origin_x + col as f32 * spacing_x;
                let y = origin_y + row as f32 * spacing_y;
                let mut enemy = Enemy::new(
                    x,
                    y,
                    &self.config,
                    &mut self.cache,
                    &mut self.backend,
                    now,
                    &mut self.rng,
                );
                // Finalize in place, under the roster
                enemy.finalize(&mut self.ids);
                self.enemies.push(enemy);
            }
        }
    }

    /// One paced frame: poll quit, step, then sleep out the rest of the
    /// target interval. Returns false once quit was requested.
    pub fn run_frame(&mut self) -> Result<bool, GameError> {
        if self.state != AppState::Running {
            return Err(GameError::InvalidState {
                from: self.state.label(),
                to: AppState::Running.label(),
            });
        }
        if self.backend.poll_quit_requested() {
            info!("Quit requested");
            return Ok(false);
        }

        let dt = self.timer.begin_frame(self.backend.now_millis());
        self.step(dt);

        let remaining = self.timer.remaining_ms(self.backend.now_millis());
        if remaining > 0 {
            self.backend.sleep_millis(remaining);
        }
        Ok(true)
    }

    /// Input, Update, Render for a given dt, with no pacing
    pub fn step(&mut self, dt: f32) {
        self.input(dt);
        self.update(dt);
        self.render();
    }

    pub fn input(&mut self, dt: f32) {
        let now = self.backend.now_millis();
        if let Some(player) = self.player.as_mut() {
            player.handle_input(&self.backend, dt, now);
        }
    }

    pub fn update(&mut self, dt: f32) {
        let mut ctx = FrameContext {
            dt,
            now_ms: self.backend.now_millis(),
            swarm: self.swarm,
            rng: &mut self.rng,
        };

        if let Some(player) = self.player.as_mut() {
            player.update(&mut ctx);
        }
        for enemy in self.enemies.iter_mut() {
            enemy.update(&mut ctx);
        }

        apply_edge_reversal(&mut self.swarm, &mut self.enemies, &self.bounds);

        if let Some(player) = self.player.as_mut() {
            let report = resolve_collisions(player, &mut self.enemies);
            if report.enemy_hit.is_some() || report.player_hit {
                debug!("Collisions: {:?}", report);
            }
        }

        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        let status = match &self.player {
            Some(player) if !player.is_active() => GameStatus::Lost,
            _ if !self.enemies.is_empty() && self.enemies.iter().all(|e| !e.is_active()) => {
                GameStatus::Won
            }
            _ => GameStatus::Playing,
        };
        if status != self.status {
            info!("Game status {:?} -> {:?}", self.status, status);
            self.status = status;
        }
    }

    pub fn render(&mut self) {
        self.backend.clear_frame(self.config.background);
        if let Some(player) = &self.player {
            player.render(&mut self.backend);
        }
        for enemy in &self.enemies {
            enemy.render(&mut self.backend);
        }
        self.backend.present_frame();
    }

    /// Release the backend. Safe to call any number of times.
    pub fn shut_down(&mut self) {
        if self.state != AppState::Running {
            return;
        }
        self.transition(AppState::ShuttingDown);
        self.player = None;
        self.enemies.clear();
        self.ids.clear();
        self.backend.destroy_surface();
        self.transition(AppState::Terminated);
    }
}

/// Inspection helpers for tests
#[cfg(test)]
impl<B: Backend> Application<B> {
    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

impl<B: Backend> Drop for Application<B> {
    fn drop(&mut self) {
        self.shut_down();
    }
}
