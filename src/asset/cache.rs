//! Resource cache
//!
//! One cache is built by the `Application` and lent to whoever binds a
//! Visual. Entries are inserted once per path and never evicted or replaced.
//! Failed loads are not cached, so the next bind retries.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use macroquad::logging::debug;

use crate::backend::{Backend, ImageHandle};
use crate::error::GameError;

/// Decode an image file to RGBA8
pub fn decode_image(path: &Path) -> Result<RgbaImage, GameError> {
    let image = image::open(path).map_err(|source| GameError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

#[derive(Debug, Default)]
pub struct ResourceCache {
    images: HashMap<PathBuf, ImageHandle>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `path`, loading it through the backend on first use
    pub fn get_or_load_image(
        &mut self,
        backend: &mut dyn Backend,
        path: impl AsRef<Path>,
    ) -> Result<ImageHandle, GameError> {
        let path = path.as_ref();
        if let Some(handle) = self.images.get(path) {
            return Ok(*handle);
        }

        let handle = backend.load_image(path)?;
        debug!("Loaded image {:?} as #{}", path, handle.index());
        self.images.insert(path.to_path_buf(), handle);
        Ok(handle)
    }

    /// Number of images cached
    pub fn len(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;

    #[test]
    fn test_same_path_loads_once() {
        let mut backend = HeadlessBackend::new();
        let mut cache = ResourceCache::new();

        let a = cache.get_or_load_image(&mut backend, "sprites/shot.png").unwrap();
        let b = cache.get_or_load_image(&mut backend, "sprites/shot.png").unwrap();
        let c = cache.get_or_load_image(&mut backend, "sprites/ship.png").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(backend.loads.len(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let mut backend = HeadlessBackend::new();
        backend.missing_images.insert(PathBuf::from("gone.png"));
        let mut cache = ResourceCache::new();

        assert!(cache.get_or_load_image(&mut backend, "gone.png").is_err());
        assert_eq!(cache.len(), 0);

        backend.missing_images.clear();
        assert!(cache.get_or_load_image(&mut backend, "gone.png").is_ok());
        assert_eq!(backend.loads.len(), 2);
    }

    #[test]
    fn test_decode_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(1, 1, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");

        match decode_image(&path) {
            Err(GameError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected ImageLoad, got {:?}", other),
        }
    }
}
