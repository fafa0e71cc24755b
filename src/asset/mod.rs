//! Image assets
//!
//! - `decode_image`: file on disk to RGBA pixels
//! - `ResourceCache`: path-keyed, load-once cache of backend image handles

mod cache;

pub use cache::{decode_image, ResourceCache};
