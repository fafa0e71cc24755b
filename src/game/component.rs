//! Component Storage
//!
//! An entity holds at most one component per `ComponentKind`. Components are
//! stored as a tagged enum in a fixed slot array indexed by kind, so a typed
//! lookup is a match on the tag rather than a runtime downcast.
//!
//! Each slot also carries the owner back-reference. It is an `EntityId`, not
//! a pointer: it never keeps the entity alive and stays valid when the
//! entity moves. It is `None` until the entity is finalized.

use std::fmt;

use super::collision::CollisionShape;
use super::controller::InputBehavior;
use super::entity::EntityId;
use super::transform::Transform;
use super::visual::Visual;

/// Capability kinds an entity can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Transform = 0,
    Visual = 1,
    CollisionShape = 2,
    InputBehavior = 3,
}

impl ComponentKind {
    pub const COUNT: usize = 4;

    #[cfg(test)]
    pub const ALL: [ComponentKind; Self::COUNT] = [
        ComponentKind::Transform,
        ComponentKind::Visual,
        ComponentKind::CollisionShape,
        ComponentKind::InputBehavior,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Transform => "Transform",
            ComponentKind::Visual => "Visual",
            ComponentKind::CollisionShape => "CollisionShape",
            ComponentKind::InputBehavior => "InputBehavior",
        };
        f.write_str(name)
    }
}

/// Any component, tagged by kind
#[derive(Debug, Clone)]
pub enum AnyComponent {
    Transform(Transform),
    Visual(Visual),
    CollisionShape(CollisionShape),
    InputBehavior(InputBehavior),
}

/// A concrete component type. Each type registers exactly one kind.
pub trait Component: Sized {
    const KIND: ComponentKind;

    fn into_any(self) -> AnyComponent;
    fn from_any(any: AnyComponent) -> Option<Self>;
    fn from_any_ref(any: &AnyComponent) -> Option<&Self>;
    fn from_any_mut(any: &mut AnyComponent) -> Option<&mut Self>;
}

macro_rules! register_component {
    ($ty:ident) => {
        impl Component for $ty {
            const KIND: ComponentKind = ComponentKind::$ty;

            fn into_any(self) -> AnyComponent {
                AnyComponent::$ty(self)
            }

            fn from_any(any: AnyComponent) -> Option<Self> {
                match any {
                    AnyComponent::$ty(c) => Some(c),
                    _ => None,
                }
            }

            fn from_any_ref(any: &AnyComponent) -> Option<&Self> {
                match any {
                    AnyComponent::$ty(c) => Some(c),
                    _ => None,
                }
            }

            fn from_any_mut(any: &mut AnyComponent) -> Option<&mut Self> {
                match any {
                    AnyComponent::$ty(c) => Some(c),
                    _ => None,
                }
            }
        }
    };
}

register_component!(Transform);
register_component!(Visual);
register_component!(CollisionShape);
register_component!(InputBehavior);

#[derive(Debug, Clone)]
struct Slot {
    /// Non-owning back-reference, set on finalize
    owner: Option<EntityId>,
    component: AnyComponent,
}

/// Per-entity component set, one slot per kind
#[derive(Debug, Clone, Default)]
pub struct Components {
    slots: [Option<Slot>; ComponentKind::COUNT],
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a component, replacing any existing one of the same kind.
    /// Returns the replaced component.
    pub fn insert<T: Component>(&mut self, component: T, owner: Option<EntityId>) -> Option<T> {
        let previous = self.slots[T::KIND.slot()].replace(Slot {
            owner,
            component: component.into_any(),
        });
        previous.and_then(|slot| T::from_any(slot.component))
    }

    pub fn get<T: Component>(&self) -> Option<&T> {
        self.slots[T::KIND.slot()]
            .as_ref()
            .and_then(|slot| T::from_any_ref(&slot.component))
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.slots[T::KIND.slot()]
            .as_mut()
            .and_then(|slot| T::from_any_mut(&mut slot.component))
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.slots[kind.slot()].is_some()
    }

    /// Owner back-reference of the component of `kind`, if attached and wired
    pub fn owner(&self, kind: ComponentKind) -> Option<EntityId> {
        self.slots[kind.slot()].as_ref().and_then(|slot| slot.owner)
    }

    /// Wire every attached component back to `owner`
    pub fn set_owner(&mut self, owner: EntityId) {
        for slot in self.slots.iter_mut().flatten() {
            slot.owner = Some(owner);
        }
    }

    /// Number of attached components
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}
