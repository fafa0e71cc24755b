//! Graphics/Input Backend
//!
//! The game core only ever talks to a `Backend`. It owns the window, the
//! loaded textures, keyboard state and the clock. The real implementation
//! is `MacroquadBackend`; tests drive the core with `HeadlessBackend`.
//!
//! The trait stays object-safe: entities render through `&mut dyn Backend`.

mod macroquad_backend;
#[cfg(test)]
mod headless;

pub use macroquad_backend::MacroquadBackend;
#[cfg(test)]
pub use headless::{DrawCall, HeadlessBackend};

use std::path::Path;

use macroquad::color::Color;

use crate::error::GameError;
use crate::game::Rect;
use crate::input::Action;

/// Opaque handle to an image the backend has loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(u32);

impl ImageHandle {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u32 {
        self.0
    }
}

pub trait Backend {
    /// Bring up the window/renderer. Failure is fatal for the game.
    fn create_surface(&mut self, title: &str, width: u32, height: u32) -> Result<(), GameError>;

    /// Release the window/renderer and every loaded image
    fn destroy_surface(&mut self);

    /// True once the user asked to close the game
    fn poll_quit_requested(&mut self) -> bool;

    /// Instantaneous state of a logical key
    fn key_held(&self, action: Action) -> bool;

    fn clear_frame(&mut self, color: Color);

    /// Finish the frame's draw commands
    fn present_frame(&mut self);

    /// Decode an image from disk and make it drawable.
    /// Callers go through `ResourceCache` so each path loads once.
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, GameError>;

    fn draw_image(&mut self, image: ImageHandle, dest: Rect);

    fn draw_outline_rect(&mut self, rect: Rect, color: Color);

    /// Monotonic clock in milliseconds
    fn now_millis(&self) -> u64;

    fn sleep_millis(&mut self, ms: u64);
}
