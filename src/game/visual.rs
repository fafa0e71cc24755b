//! Visual Component
//!
//! Ties an entity to a backend image. Position and size always come from
//! the owner's Transform. If no image could be bound the entity is still
//! drawn in its fallback color. The backend only offers outline rectangles,
//! so the fallback is an outline rather than a filled box.

use std::path::Path;

use macroquad::color::Color;

use super::entity::EntityCore;
use super::transform::Transform;
use crate::asset::ResourceCache;
use crate::backend::{Backend, ImageHandle};
use crate::error::GameError;

#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    image: Option<ImageHandle>,
    fallback: Color,
}

impl Visual {
    pub fn new(fallback: Color) -> Self {
        Self {
            image: None,
            fallback,
        }
    }

    /// Look the image up in the cache (loading it on first use).
    /// On failure the Visual stays unbound and renders its fallback.
    pub fn bind(
        &mut self,
        cache: &mut ResourceCache,
        backend: &mut dyn Backend,
        path: impl AsRef<Path>,
    ) -> Result<(), GameError> {
        self.image = None;
        self.image = Some(cache.get_or_load_image(backend, path)?);
        Ok(())
    }

    #[cfg(test)]
    pub fn image(&self) -> Option<ImageHandle> {
        self.image
    }

    /// Draw at the owner's transform. Fails if the owner has no Transform.
    pub fn render(&self, owner: &EntityCore, backend: &mut dyn Backend) -> Result<(), GameError> {
        let rect = *owner.require::<Transform>()?.rectangle();
        match self.image {
            Some(image) => backend.draw_image(image, rect),
            None => backend.draw_outline_rect(rect, self.fallback),
        }
        Ok(())
    }
}
