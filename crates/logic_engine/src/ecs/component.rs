//! Component trait and per-entity component storage
//!
//! A component is a unit of per-entity behavior with lifecycle hooks and an
//! enable flag. Each entity holds at most one component of every concrete
//! type, iterated in insertion order.

use crate::foundation::collections::EntityHandle;
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// State shared by every component: the owner back-reference and the
/// enable flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentBase {
    owner: Option<EntityHandle>,
    enabled: bool,
}

impl ComponentBase {
    /// Create an unattached, enabled base
    pub const fn new() -> Self {
        Self {
            owner: None,
            enabled: true,
        }
    }

    /// Handle of the owning entity, once attached
    pub const fn owner(&self) -> Option<EntityHandle> {
        self.owner
    }

    /// Whether the owning entity should update this component
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable updates
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Bind to the owning entity. Components never migrate between entities.
    pub(crate) fn attach(&mut self, owner: EntityHandle) {
        debug_assert!(
            self.owner.is_none() || self.owner == Some(owner),
            "component attached to a second entity"
        );
        self.owner = Some(owner);
    }
}

impl Default for ComponentBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Behavior attachable to an entity
///
/// Implementors embed a [`ComponentBase`] and expose it through
/// [`base`](Component::base) / [`base_mut`](Component::base_mut); the owner
/// and enable accessors are provided on top of it.
pub trait Component: Any {
    /// Shared component state
    fn base(&self) -> &ComponentBase;

    /// Mutable shared component state
    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Short type name for debug output
    fn type_name(&self) -> &'static str {
        "Component"
    }

    /// Called once, right after the component is attached to its entity
    fn initialize(&mut self) {}

    /// Advance the component by `delta_time` seconds
    ///
    /// `siblings` holds the other components of the same entity. The
    /// component being updated is not reachable through it.
    fn update(&mut self, _delta_time: f32, _siblings: &mut Components) {}

    /// Called when the component is removed or its entity is destroyed
    fn destroy(&mut self) {}

    /// Human-readable state dump
    fn debug_info(&self) -> String {
        String::from("Base component")
    }

    /// Handle of the owning entity, once attached
    fn owner(&self) -> Option<EntityHandle> {
        self.base().owner()
    }

    /// Whether the owning entity should update this component
    fn is_enabled(&self) -> bool {
        self.base().is_enabled()
    }

    /// Enable or disable updates
    fn set_enabled(&mut self, enabled: bool) {
        self.base_mut().set_enabled(enabled);
    }
}

/// Ordered, type-indexed component collection owned by an entity
///
/// Slots are `Option` so a component can be lifted out while it updates and
/// still see its siblings through `&mut Components`.
#[derive(Default)]
pub struct Components {
    slots: Vec<Option<Box<dyn Component>>>,
    index: HashMap<TypeId, usize>,
}

impl Components {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attached components
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when no component is attached
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a component of type `T` is attached
    pub fn contains<T: Component>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<T>())
    }

    /// Borrow the component of type `T`
    pub fn get<T: Component>(&self) -> Option<&T> {
        let slot = *self.index.get(&TypeId::of::<T>())?;
        let component: &(dyn Component + 'static) = self.slots.get(slot)?.as_deref()?;
        (component as &dyn Any).downcast_ref::<T>()
    }

    /// Mutably borrow the component of type `T`
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        let slot = *self.index.get(&TypeId::of::<T>())?;
        let component: &mut (dyn Component + 'static) = self.slots.get_mut(slot)?.as_deref_mut()?;
        (component as &mut dyn Any).downcast_mut::<T>()
    }

    /// Iterate components in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Component + 'static)> + '_ {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }

    /// Append a component, returning its slot. The caller guarantees no
    /// component of this type is present.
    pub(crate) fn insert<T: Component>(&mut self, component: T) -> usize {
        let slot = self.slots.len();
        self.slots.push(Some(Box::new(component)));
        self.index.insert(TypeId::of::<T>(), slot);
        slot
    }

    /// Detach the component of type `T`, preserving the order of the rest
    pub(crate) fn remove<T: Component>(&mut self) -> Option<Box<dyn Component>> {
        let slot = self.index.remove(&TypeId::of::<T>())?;
        let removed = self.slots.remove(slot);

        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        removed
    }

    /// Lift a component out of its slot for the duration of its update
    pub(crate) fn take(&mut self, slot: usize) -> Option<Box<dyn Component>> {
        self.slots.get_mut(slot)?.take()
    }

    /// Put a component lifted by [`take`](Self::take) back
    pub(crate) fn restore(&mut self, slot: usize, component: Box<dyn Component>) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = Some(component);
        }
    }

    /// Mutable access to every component, in insertion order
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Component>> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Drop every component
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|component| component.type_name()))
            .finish()
    }
}
