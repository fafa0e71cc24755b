//! macroquad implementation of the backend
//!
//! macroquad creates the window before `main` runs (see `window_conf`), so
//! `create_surface` only sizes it and takes over the close button. Buffers
//! are swapped by `next_frame().await` in the main loop, right after
//! `Application::run_frame` returns.

use std::path::Path;

use macroquad::logging::{info, warn};
use macroquad::prelude::*;

use super::{Backend, ImageHandle};
use crate::asset::decode_image;
use crate::error::GameError;
use crate::game::Rect as GameRect;
use crate::input::Action;

/// Keyboard bindings for each logical action
const KEY_BINDINGS: [(Action, &[KeyCode]); 4] = [
    (Action::MoveLeft, &[KeyCode::Left, KeyCode::A]),
    (Action::MoveRight, &[KeyCode::Right, KeyCode::D]),
    (Action::Fire, &[KeyCode::Space]),
    (Action::Quit, &[KeyCode::Escape]),
];

/// Outline thickness in pixels
const OUTLINE_THICKNESS: f32 = 1.0;

pub struct MacroquadBackend {
    /// Loaded textures, indexed by `ImageHandle`
    textures: Vec<Texture2D>,
    surface_open: bool,
    frames_presented: u64,
}

impl MacroquadBackend {
    pub fn new() -> Self {
        Self {
            textures: Vec::new(),
            surface_open: false,
            frames_presented: 0,
        }
    }
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MacroquadBackend {
    fn create_surface(&mut self, title: &str, width: u32, height: u32) -> Result<(), GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::BackendInit(format!(
                "invalid surface size {}x{}",
                width, height
            )));
        }
        if self.surface_open {
            return Err(GameError::BackendInit("surface already created".to_string()));
        }

        request_new_screen_size(width as f32, height as f32);
        // Close button goes through poll_quit_requested so shutdown runs in order
        prevent_quit();
        self.surface_open = true;

        info!("Surface \"{}\" ready at {}x{}", title, width, height);
        for (action, keys) in KEY_BINDINGS.iter() {
            info!("  {}: {:?}", action.label(), keys);
        }
        Ok(())
    }

    fn destroy_surface(&mut self) {
        if !self.surface_open {
            return;
        }
        info!(
            "Releasing {} textures after {} frames",
            self.textures.len(),
            self.frames_presented
        );
        self.textures.clear();
        self.surface_open = false;
    }

    fn poll_quit_requested(&mut self) -> bool {
        is_quit_requested() || self.key_held(Action::Quit)
    }

    fn key_held(&self, action: Action) -> bool {
        KEY_BINDINGS
            .iter()
            .filter(|(bound, _)| *bound == action)
            .flat_map(|(_, keys)| keys.iter())
            .any(|key| is_key_down(*key))
    }

    fn clear_frame(&mut self, color: Color) {
        clear_background(color);
    }

    fn present_frame(&mut self) {
        self.frames_presented += 1;
    }

    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, GameError> {
        let image = decode_image(path)?;
        let (width, height) = image.dimensions();
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(GameError::ImageTooLarge {
                path: path.to_path_buf(),
                width,
                height,
            });
        };

        let texture = Texture2D::from_rgba8(w, h, image.as_raw());
        texture.set_filter(FilterMode::Nearest);

        let handle = ImageHandle::new(self.textures.len() as u32);
        self.textures.push(texture);
        Ok(handle)
    }

    fn draw_image(&mut self, image: ImageHandle, dest: GameRect) {
        let Some(texture) = self.textures.get(image.index() as usize) else {
            warn!("draw_image: unknown image handle {}", image.index());
            return;
        };
        draw_texture_ex(
            texture,
            dest.x,
            dest.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.w, dest.h)),
                ..Default::default()
            },
        );
    }

    fn draw_outline_rect(&mut self, rect: GameRect, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, OUTLINE_THICKNESS, color);
    }

    fn now_millis(&self) -> u64 {
        (get_time() * 1000.0) as u64
    }

    fn sleep_millis(&mut self, ms: u64) {
        // Native: real sleep
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(ms));
        }
        // WASM: no thread::sleep available, spin until the deadline
        #[cfg(target_arch = "wasm32")]
        {
            let deadline = get_time() + ms as f64 / 1000.0;
            while get_time() < deadline {
                std::hint::spin_loop();
            }
        }
    }
}
