//! Entities
//!
//! An entity is a set of components plus an active flag. `Player`, `Enemy`
//! and `Projectile` each embed an `EntityCore` and implement `Entity`.
//!
//! Construction is two-phase:
//! 1. The concrete constructor builds the core and attaches its components.
//!    Nothing has an owner yet.
//! 2. Once the entity sits in its final container, `Entity::finalize` hands
//!    it an `EntityId` and wires every component back to it.
//!
//! Operations that need a component's owner (`EntityCore::owned`) report
//! `GameError::NotFinalized` until step 2 has run. The entity is fully
//! usable afterwards.
//!
//! Identity is an index plus a generation. Ids are handed out in order;
//! `EntityAllocator::clear` starts a new generation, so an id kept from
//! before a clear never matches one issued after it.

use std::fmt;

use macroquad::logging::{debug, warn};

use super::collision::CollisionShape;
use super::component::{Component, ComponentKind, Components};
use super::runtime::FrameContext;
use super::transform::Transform;
use super::visual::Visual;
use super::Rect;
use crate::backend::Backend;
use crate::error::GameError;

/// A unique identifier for a game entity.
///
/// Consists of an index (which slot) and a generation (which allocator
/// epoch issued it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

impl EntityId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Allocates entity ids.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    next_index: u32,
    generation: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId::new(self.next_index, self.generation);
        self.next_index += 1;
        id
    }

    #[cfg(test)]
    pub fn is_alive(&self, id: EntityId) -> bool {
        id.generation == self.generation && id.index < self.next_index
    }

    pub fn alive_count(&self) -> u32 {
        self.next_index
    }

    /// Release every id at once
    pub fn clear(&mut self) {
        self.generation += 1;
        self.next_index = 0;
    }
}

/// State shared by every entity: identity, active flag, components
#[derive(Debug, Clone)]
pub struct EntityCore {
    /// Type name for diagnostics
    name: &'static str,
    id: Option<EntityId>,
    active: bool,
    components: Components,
}

impl EntityCore {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            id: None,
            active: true,
            components: Components::new(),
        }
    }

    #[cfg(test)]
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    #[cfg(test)]
    pub fn is_finalized(&self) -> bool {
        self.id.is_some()
    }

    /// Active entities update, render and take part in collisions
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Second construction phase: take an id and wire components back to it.
    /// Finalizing again re-wires to the new id.
    pub fn finalize(&mut self, id: EntityId) {
        self.id = Some(id);
        self.components.set_owner(id);
        debug!("{} finalized as {}", self.name, id);
    }

    /// Attach a component. Replaces (and returns) one of the same kind.
    /// Attaching after finalize wires the new component immediately.
    pub fn attach<T: Component>(&mut self, component: T) -> Option<T> {
        self.components.insert(component, self.id)
    }

    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.contains(kind)
    }

    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components.get::<T>()
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components.get_mut::<T>()
    }

    /// Like `get`, but a missing component is an error
    pub fn require<T: Component>(&self) -> Result<&T, GameError> {
        self.get::<T>().ok_or_else(|| self.missing(T::KIND))
    }

    pub fn require_mut<T: Component>(&mut self) -> Result<&mut T, GameError> {
        let name = self.name;
        self.get_mut::<T>().ok_or_else(|| GameError::MissingComponent {
            entity: name.to_string(),
            kind: T::KIND,
        })
    }

    /// A component whose back-reference resolves to this entity.
    /// Fails before finalize.
    pub fn owned<T: Component>(&self) -> Result<&T, GameError> {
        let component = self.require::<T>()?;
        match (self.components.owner(T::KIND), self.id) {
            (Some(owner), Some(id)) if owner == id => Ok(component),
            _ => Err(GameError::NotFinalized { kind: T::KIND }),
        }
    }

    fn missing(&self, kind: ComponentKind) -> GameError {
        GameError::MissingComponent {
            entity: self.name.to_string(),
            kind,
        }
    }

    /// Current transform rectangle, if the entity has a Transform
    pub fn rect(&self) -> Option<Rect> {
        self.get::<Transform>().map(|t| *t.rectangle())
    }

    /// Move the transform by a delta and bring dependent components along
    pub fn translate(&mut self, dx: f32, dy: f32) -> Result<(), GameError> {
        self.require_mut::<Transform>()?.move_by(dx, dy);
        self.sync_components();
        Ok(())
    }

    /// Place the transform at an absolute position
    pub fn place(&mut self, x: f32, y: f32) -> Result<(), GameError> {
        let transform = self.require_mut::<Transform>()?;
        transform.set_x(x);
        transform.set_y(y);
        self.sync_components();
        Ok(())
    }

    /// Per-frame component step: collision shapes follow the transform
    pub fn sync_components(&mut self) {
        let Some(anchor) = self.rect() else {
            return;
        };
        if let Some(shape) = self.get_mut::<CollisionShape>() {
            shape.follow(&anchor);
        }
    }

    /// Draw the entity's Visual at its Transform
    pub fn render_components(&self, backend: &mut dyn Backend) -> Result<(), GameError> {
        if !self.has(ComponentKind::Visual) {
            return Ok(());
        }
        self.owned::<Visual>()?.render(self, backend)
    }
}

/// Behavior shared by Player, Enemy and Projectile
pub trait Entity {
    fn core(&self) -> &EntityCore;
    fn core_mut(&mut self) -> &mut EntityCore;

    fn update(&mut self, ctx: &mut FrameContext<'_>);
    fn render(&self, backend: &mut dyn Backend);

    /// Second construction phase. Entities that own other entities
    /// finalize those too.
    fn finalize(&mut self, ids: &mut EntityAllocator) {
        let id = ids.allocate();
        self.core_mut().finalize(id);
    }

    fn is_active(&self) -> bool {
        self.core().is_active()
    }
}

/// Render an entity's own components, reporting (not propagating) failures
pub(crate) fn render_logged(core: &EntityCore, backend: &mut dyn Backend) {
    if let Err(err) = core.render_components(backend) {
        warn!("{} render skipped: {}", core.name, err);
    }
}
