//! Entity implementation
//!
//! An entity is an id, a name, an active flag, and an ordered set of
//! components holding at most one instance per concrete type. Entities are
//! created by a [`Scene`](super::Scene), which owns them in an arena and
//! hands out [`EntityHandle`]s.

use super::component::{Component, Components};
use crate::foundation::collections::EntityHandle;
use std::fmt;

/// Scene-unique entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u32);

impl EntityId {
    /// Wrap a raw id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Game object composed from components
#[derive(Debug)]
pub struct Entity {
    handle: EntityHandle,
    id: EntityId,
    name: String,
    active: bool,
    components: Components,
}

impl Entity {
    /// Create an entity; empty names become `Entity_<id>`
    pub(crate) fn new(handle: EntityHandle, id: EntityId, name: &str) -> Self {
        let name = if name.is_empty() {
            format!("Entity_{}", id)
        } else {
            name.to_string()
        };

        Self {
            handle,
            id,
            name,
            active: true,
            components: Components::new(),
        }
    }

    /// Arena handle of this entity within its scene
    pub const fn handle(&self) -> EntityHandle {
        self.handle
    }

    /// Get the entity ID
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the entity takes part in updates
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Activate or deactivate. An inactive entity is swept from its scene at
    /// the end of the next scene update.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Attach `component` unless a component of type `T` already exists
    ///
    /// Returns the attached component, or the existing one unchanged, in
    /// which case `component` is dropped.
    pub fn add_component<T: Component>(&mut self, component: T) -> &mut T {
        self.add_component_with(|| component)
    }

    /// Attach a component built by `create`, which runs only when no
    /// component of type `T` exists yet
    pub fn add_component_with<T: Component>(&mut self, create: impl FnOnce() -> T) -> &mut T {
        if !self.components.contains::<T>() {
            let mut component = create();
            component.base_mut().attach(self.handle);
            component.initialize();

            log::trace!(
                "Entity {} ({}): attached {}",
                self.id,
                self.name,
                component.type_name()
            );
            self.components.insert(component);
        }

        self.components
            .get_mut::<T>()
            .expect("component of this type was attached above")
    }

    /// Borrow the component of type `T`, if attached
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components.get::<T>()
    }

    /// Mutably borrow the component of type `T`, if attached
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components.get_mut::<T>()
    }

    /// Whether a component of type `T` is attached
    pub fn has_component<T: Component>(&self) -> bool {
        self.components.contains::<T>()
    }

    /// Destroy and detach the component of type `T`
    ///
    /// Returns `false` when no such component was attached.
    pub fn remove_component<T: Component>(&mut self) -> bool {
        match self.components.remove::<T>() {
            Some(mut component) => {
                component.destroy();
                log::trace!(
                    "Entity {} ({}): removed {}",
                    self.id,
                    self.name,
                    component.type_name()
                );
                true
            }
            None => false,
        }
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// All attached components, in insertion order
    pub const fn components(&self) -> &Components {
        &self.components
    }

    /// Advance every enabled component, in insertion order
    ///
    /// No-op for inactive entities.
    pub fn update(&mut self, delta_time: f32) {
        if !self.active {
            return;
        }

        for slot in 0..self.components.len() {
            let Some(mut component) = self.components.take(slot) else {
                continue;
            };

            if component.is_enabled() {
                component.update(delta_time, &mut self.components);
            }

            self.components.restore(slot, component);
        }
    }

    /// Destroy every component, drop them, and deactivate the entity
    ///
    /// The entity stays in its scene until the scene sweeps or removes it.
    pub fn destroy(&mut self) {
        for component in self.components.iter_mut() {
            component.destroy();
        }
        self.components.clear();
        self.active = false;
    }

    /// Human-readable state dump
    pub fn debug_info(&self) -> String {
        let mut info = format!("Entity: {} (ID: {})\n", self.name, self.id);
        info += &format!("Active: {}\n", self.active);
        info += &format!("Components ({}):\n", self.components.len());

        for component in self.components.iter() {
            info += &format!(
                "  - {} (Enabled: {})\n",
                component.type_name(),
                component.is_enabled()
            );
        }

        info
    }
}
