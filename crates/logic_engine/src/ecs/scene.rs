//! Scene: an ordered collection of entities
//!
//! Entities are stored in a generation-checked arena and updated in
//! creation order. Entities that deactivate themselves are swept after the
//! full update pass, never mid-iteration.

use super::entity::{Entity, EntityId};
use crate::foundation::collections::{EntityHandle, HandleMap};

/// Owner of a set of entities
#[derive(Debug)]
pub struct Scene {
    name: String,
    active: bool,
    entities: HandleMap<Entity>,
    /// Creation order of live entities
    order: Vec<EntityHandle>,
    next_entity_id: u32,
}

impl Scene {
    /// Create an empty, active scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            entities: HandleMap::with_key(),
            order: Vec::new(),
            next_entity_id: 1,
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the scene
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the scene updates
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Activate or deactivate the scene
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Create a new entity with the next free id
    pub fn create_entity(&mut self, name: &str) -> &mut Entity {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        self.spawn(id, name)
    }

    /// Create a new entity with an explicit id
    ///
    /// Later automatically assigned ids continue above `id`. Duplicate ids
    /// are accepted; the allocator saturates at `u32::MAX`.
    pub fn create_entity_with_id(&mut self, id: EntityId, name: &str) -> &mut Entity {
        if id.get() >= self.next_entity_id {
            self.next_entity_id = id.get().saturating_add(1);
        }
        self.spawn(id, name)
    }

    fn spawn(&mut self, id: EntityId, name: &str) -> &mut Entity {
        let handle = self
            .entities
            .insert_with_key(|handle| Entity::new(handle, id, name));
        self.order.push(handle);
        &mut self.entities[handle]
    }

    /// Destroy and remove the entity behind `handle`
    ///
    /// Returns `false` if the handle no longer resolves.
    pub fn remove_entity(&mut self, handle: EntityHandle) -> bool {
        let Some(mut entity) = self.entities.remove(handle) else {
            return false;
        };

        entity.destroy();
        self.order.retain(|&h| h != handle);
        log::debug!("Scene '{}': removed entity {} ({})", self.name, entity.id(), entity.name());
        true
    }

    /// Destroy and remove every entity with `id`
    ///
    /// Returns whether anything was removed; unknown ids are a silent no-op.
    pub fn remove_entity_by_id(&mut self, id: EntityId) -> bool {
        let matches: Vec<_> = self
            .order
            .iter()
            .copied()
            .filter(|&handle| self.entities.get(handle).is_some_and(|e| e.id() == id))
            .collect();

        let mut removed = false;
        for handle in matches {
            removed |= self.remove_entity(handle);
        }
        removed
    }

    /// Look up an entity by handle
    pub fn entity(&self, handle: EntityHandle) -> Option<&Entity> {
        self.entities.get(handle)
    }

    /// Mutably look up an entity by handle
    pub fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.entities.get_mut(handle)
    }

    /// Mutably borrow two distinct entities at once
    ///
    /// Returns `None` if either handle is stale or both are the same.
    pub fn entity_pair_mut(
        &mut self,
        a: EntityHandle,
        b: EntityHandle,
    ) -> Option<(&mut Entity, &mut Entity)> {
        self.entities
            .get_disjoint_mut([a, b])
            .map(|[first, second]| (first, second))
    }

    fn find_handle(&self, id: EntityId) -> Option<EntityHandle> {
        self.order
            .iter()
            .copied()
            .find(|&handle| self.entities.get(handle).is_some_and(|e| e.id() == id))
    }

    /// Find an entity by id
    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.find_handle(id).and_then(|handle| self.entities.get(handle))
    }

    /// Mutably find an entity by id
    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let handle = self.find_handle(id)?;
        self.entities.get_mut(handle)
    }

    /// Find the first entity, in creation order, with `name`
    pub fn find_entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities().find(|entity| entity.name() == name)
    }

    /// Mutably find the first entity, in creation order, with `name`
    pub fn find_entity_by_name_mut(&mut self, name: &str) -> Option<&mut Entity> {
        let handle = self.find_entity_by_name(name)?.handle();
        self.entities.get_mut(handle)
    }

    /// Entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.order
            .iter()
            .filter_map(|&handle| self.entities.get(handle))
    }

    /// Handles of all entities in creation order
    pub fn handles(&self) -> &[EntityHandle] {
        &self.order
    }

    /// Number of entities in the scene
    pub fn entity_count(&self) -> usize {
        self.order.len()
    }

    /// Update every active entity, then sweep out inactive ones
    ///
    /// No-op when the scene itself is inactive.
    pub fn update(&mut self, delta_time: f32) {
        if !self.active {
            return;
        }

        for &handle in &self.order {
            if let Some(entity) = self.entities.get_mut(handle) {
                if entity.is_active() {
                    entity.update(delta_time);
                }
            }
        }

        self.sweep_inactive();
    }

    fn sweep_inactive(&mut self) {
        let entities = &mut self.entities;
        self.order.retain(|&handle| {
            let alive = entities.get(handle).is_some_and(Entity::is_active);
            if !alive {
                entities.remove(handle);
            }
            alive
        });
    }

    /// Destroy every entity, empty the scene, and deactivate it
    pub fn destroy(&mut self) {
        for &handle in &self.order {
            if let Some(entity) = self.entities.get_mut(handle) {
                entity.destroy();
            }
        }
        self.entities.clear();
        self.order.clear();
        self.active = false;
    }

    /// Human-readable state dump
    pub fn debug_info(&self) -> String {
        let mut info = format!("Scene: {}\n", self.name);
        info += &format!("Active: {}\n", self.active);
        info += &format!("Entities ({}):\n", self.entity_count());

        for entity in self.entities() {
            info += &format!(
                "  - {} (ID: {}, Components: {})\n",
                entity.name(),
                entity.id(),
                entity.component_count()
            );
        }

        info
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Untitled Scene")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::TransformComponent;

    #[test]
    fn test_scene_creation() {
        let scene = Scene::default();
        assert_eq!(scene.name(), "Untitled Scene");
        assert!(scene.is_active());
        assert_eq!(scene.entity_count(), 0);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut scene = Scene::new("ids");
        let a = scene.create_entity("a").id();
        let b = scene.create_entity("b").id();
        scene.remove_entity_by_id(a);
        let c = scene.create_entity("c").id();

        assert_eq!(a, EntityId::new(1));
        assert_eq!(b, EntityId::new(2));
        assert_eq!(c, EntityId::new(3));
    }

    #[test]
    fn test_explicit_id_bumps_allocator() {
        let mut scene = Scene::new("ids");
        scene.create_entity_with_id(EntityId::new(10), "boss");
        let next = scene.create_entity("minion").id();
        assert_eq!(next, EntityId::new(11));
    }

    #[test]
    fn test_explicit_max_id_saturates_allocator() {
        let mut scene = Scene::new("ids");
        let max = scene.create_entity_with_id(EntityId::new(u32::MAX), "max").id();
        let next = scene.create_entity("after").id();

        assert_eq!(max, EntityId::new(u32::MAX));
        assert_eq!(next, EntityId::new(u32::MAX));
        assert_eq!(scene.entity_count(), 2);
    }

    #[test]
    fn test_remove_by_id_removes_all_duplicates() {
        let mut scene = Scene::new("dupes");
        scene.create_entity_with_id(EntityId::new(5), "first");
        scene.create_entity("other");
        scene.create_entity_with_id(EntityId::new(5), "second");

        assert!(scene.remove_entity_by_id(EntityId::new(5)));

        let names: Vec<_> = scene.entities().map(Entity::name).collect();
        assert_eq!(names, vec!["other"]);
        assert!(scene.find_entity(EntityId::new(5)).is_none());
    }

    #[test]
    fn test_find_entity() {
        let mut scene = Scene::new("find");
        let id = scene.create_entity("player").id();
        scene.create_entity("enemy");

        assert_eq!(scene.find_entity(id).unwrap().name(), "player");
        assert_eq!(scene.find_entity_by_name("enemy").unwrap().id(), EntityId::new(2));
        assert!(scene.find_entity(EntityId::new(99)).is_none());
        assert!(scene.find_entity_by_name("nobody").is_none());
    }

    #[test]
    fn test_remove_entity() {
        let mut scene = Scene::new("remove");
        let entity = scene.create_entity("doomed");
        entity.add_component(TransformComponent::default());
        let (id, handle) = (entity.id(), entity.handle());

        assert!(scene.remove_entity_by_id(id));
        assert_eq!(scene.entity_count(), 0);
        assert!(scene.entity(handle).is_none());

        // Unknown ids and stale handles are silent no-ops
        assert!(!scene.remove_entity_by_id(id));
        assert!(!scene.remove_entity(handle));
    }

    #[test]
    fn test_sweep_after_deactivation() {
        let mut scene = Scene::new("sweep");
        let keep = scene.create_entity("keep").handle();
        scene.create_entity("leave").set_active(false);

        scene.update(0.016);

        let names: Vec<_> = scene.entities().map(Entity::name).collect();
        assert_eq!(names, vec!["keep"]);
        assert_eq!(scene.handles(), &[keep]);
    }

    #[test]
    fn test_inactive_scene_does_not_update_or_sweep() {
        let mut scene = Scene::new("paused");
        scene.create_entity("sleeping").set_active(false);
        scene.set_active(false);

        scene.update(0.016);

        assert_eq!(scene.entity_count(), 1);
    }

    #[test]
    fn test_entities_iterate_in_creation_order() {
        let mut scene = Scene::new("order");
        for name in ["first", "second", "third"] {
            scene.create_entity(name);
        }
        scene.remove_entity_by_id(EntityId::new(2));
        scene.create_entity("fourth");

        let names: Vec<_> = scene.entities().map(Entity::name).collect();
        assert_eq!(names, vec!["first", "third", "fourth"]);
    }

    #[test]
    fn test_entity_pair_mut() {
        let mut scene = Scene::new("pair");
        let a = scene.create_entity("a").handle();
        let b = scene.create_entity("b").handle();

        let (first, second) = scene.entity_pair_mut(a, b).unwrap();
        assert_eq!(first.name(), "a");
        assert_eq!(second.name(), "b");

        assert!(scene.entity_pair_mut(a, a).is_none());
    }

    #[test]
    fn test_destroy() {
        let mut scene = Scene::new("level");
        scene.create_entity("a");
        scene.create_entity("b");

        scene.destroy();

        assert_eq!(scene.entity_count(), 0);
        assert!(!scene.is_active());
    }

    #[test]
    fn test_debug_info() {
        let mut scene = Scene::new("level");
        scene.create_entity("hero").add_component(TransformComponent::default());

        let info = scene.debug_info();
        assert!(info.contains("Scene: level"));
        assert!(info.contains("hero (ID: 1, Components: 1)"));
    }
}
