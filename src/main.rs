//! GRID INVADERS: a small fixed-screen shooter
//!
//! A player ship at the bottom, a grid of enemies drifting side to side
//! above it, one shot in flight per shooter.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod asset;
mod backend;
mod config;
mod error;
mod game;
mod input;

use macroquad::logging::{error, info};
use macroquad::prelude::next_frame;

use app::Application;
use backend::MacroquadBackend;
use config::{window_conf, GameConfig};

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    info!("Grid Invaders v{}", VERSION);

    let config = GameConfig {
        rng_seed: (macroquad::miniquad::date::now() * 1000.0) as u64,
        ..GameConfig::default()
    };

    let mut app = Application::new(config, MacroquadBackend::new());
    if let Err(err) = app.start_up() {
        error!("Start-up failed: {}", err);
        if err.is_fatal() {
            std::process::exit(1);
        }
        return;
    }

    loop {
        match app.run_frame() {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => {
                error!("Frame failed: {}", err);
                break;
            }
        }
        next_frame().await;
    }

    app.shut_down();
    info!("Goodbye");
}
