//! Error taxonomy
//!
//! Only `BackendInit` is fatal. Everything else is reported by whoever owns
//! the current frame, logged, and the operation is skipped for that frame.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::component::ComponentKind;

#[derive(Debug, Error)]
pub enum GameError {
    /// An operation needed a capability the entity does not carry
    #[error("{entity} has no {kind} component")]
    MissingComponent {
        entity: String,
        kind: ComponentKind,
    },

    /// A component was used before its entity was finalized
    #[error("{kind} component used before its owner was finalized")]
    NotFinalized { kind: ComponentKind },

    #[error("failed to load image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("image {path:?} is {width}x{height}, larger than a texture can hold")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// Window/renderer could not be brought up. Fatal.
    #[error("backend initialization failed: {0}")]
    BackendInit(String),

    #[error("invalid application transition from {from} to {to}")]
    InvalidState {
        from: &'static str,
        to: &'static str,
    },
}

impl GameError {
    /// Fatal errors end the process; everything else is local to a frame.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::BackendInit(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_backend_init_is_fatal() {
        assert!(GameError::BackendInit("no display".into()).is_fatal());
        assert!(!GameError::NotFinalized { kind: ComponentKind::Visual }.is_fatal());
        assert!(!GameError::MissingComponent {
            entity: "Enemy".into(),
            kind: ComponentKind::CollisionShape,
        }
        .is_fatal());
    }

    #[test]
    fn test_missing_component_message() {
        let err = GameError::MissingComponent {
            entity: "Projectile".into(),
            kind: ComponentKind::CollisionShape,
        };
        assert_eq!(err.to_string(), "Projectile has no CollisionShape component");
    }
}
