//! Game Foundation Module
//!
//! A small component-based entity model and the pieces of the arcade game
//! built on it.
//!
//! Key concepts:
//! - Entity: a set of components (at most one per kind) plus an active flag
//! - Component: Transform, Visual, CollisionShape, InputBehavior
//! - Two-phase construction: build, then `finalize` once the entity is owned
//! - Swarm: the enemies' shared direction and speed
//!
//! Design philosophy:
//! - Each shooter owns exactly one projectile, no pools
//! - Ownership is a tree (Application -> Player/Enemy -> Projectile);
//!   components point back to their entity by id only

pub mod rect;
pub mod entity;
pub mod component;
pub mod transform;
pub mod collision;
pub mod visual;
pub mod controller;
pub mod projectile;
pub mod player;
pub mod enemy;
pub mod swarm;
pub mod runtime;

// Re-export main types
pub use rect::Rect;
pub use entity::{Entity, EntityAllocator};
pub use collision::resolve_collisions;
pub use player::Player;
pub use enemy::Enemy;
pub use swarm::{apply_edge_reversal, Swarm, SwarmBounds};
pub use runtime::{FrameContext, FrameTimer};
