//! Windowless backend for tests
//!
//! The clock only moves when a test moves it, keys are held by hand, and
//! every draw call is recorded for inspection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use macroquad::color::Color;

use super::{Backend, ImageHandle};
use crate::error::GameError;
use crate::game::Rect;
use crate::input::Action;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Image(ImageHandle, Rect),
    Outline(Rect, Color),
}

#[derive(Debug, Default)]
pub struct HeadlessBackend {
    pub now_ms: u64,
    pub held: HashSet<Action>,
    pub quit_requested: bool,
    /// Paths whose loads fail
    pub missing_images: HashSet<PathBuf>,
    /// Every load that reached the backend, in order
    pub loads: Vec<PathBuf>,
    pub draws: Vec<DrawCall>,
    pub fail_surface: bool,
    pub surfaces_created: u32,
    pub surfaces_destroyed: u32,
    pub frames_presented: u32,
    pub slept_ms: Vec<u64>,
    /// Advance the clock by this much every time the backend sleeps
    pub sleep_advances_clock: bool,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            sleep_advances_clock: true,
            ..Default::default()
        }
    }

    pub fn hold(&mut self, action: Action) {
        self.held.insert(action);
    }

    pub fn release(&mut self, action: Action) {
        self.held.remove(&action);
    }

    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
    }

    /// Image draws recorded since the last clear
    pub fn image_draws(&self) -> Vec<(ImageHandle, Rect)> {
        self.draws
            .iter()
            .filter_map(|call| match call {
                DrawCall::Image(handle, rect) => Some((*handle, *rect)),
                _ => None,
            })
            .collect()
    }

    pub fn outline_draws(&self) -> Vec<(Rect, Color)> {
        self.draws
            .iter()
            .filter_map(|call| match call {
                DrawCall::Outline(rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Backend for HeadlessBackend {
    fn create_surface(&mut self, _title: &str, width: u32, height: u32) -> Result<(), GameError> {
        if self.fail_surface || width == 0 || height == 0 {
            return Err(GameError::BackendInit("headless surface refused".to_string()));
        }
        self.surfaces_created += 1;
        Ok(())
    }

    fn destroy_surface(&mut self) {
        self.surfaces_destroyed += 1;
    }

    fn poll_quit_requested(&mut self) -> bool {
        self.quit_requested || self.held.contains(&Action::Quit)
    }

    fn key_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn clear_frame(&mut self, color: Color) {
        self.draws.clear();
        self.draws.push(DrawCall::Clear(color));
    }

    fn present_frame(&mut self) {
        self.frames_presented += 1;
    }

    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, GameError> {
        self.loads.push(path.to_path_buf());
        if self.missing_images.contains(path) {
            return Err(GameError::ImageLoad {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "missing",
                )),
            });
        }
        Ok(ImageHandle::new(self.loads.len() as u32 - 1))
    }

    fn draw_image(&mut self, image: ImageHandle, dest: Rect) {
        self.draws.push(DrawCall::Image(image, dest));
    }

    fn draw_outline_rect(&mut self, rect: Rect, color: Color) {
        self.draws.push(DrawCall::Outline(rect, color));
    }

    fn now_millis(&self) -> u64 {
        self.now_ms
    }

    fn sleep_millis(&mut self, ms: u64) {
        self.slept_ms.push(ms);
        if self.sleep_advances_clock {
            self.now_ms += ms;
        }
    }
}
