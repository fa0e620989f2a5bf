//! Core collision detection and resolution system
//!
//! Exhaustive pairwise narrow phase over the registered entities of one
//! scene. Each pass clears the previous results, stores every contact on
//! both sides of the pair, and resolves non-trigger contacts with positional
//! correction followed by an impulse.

use super::collision::check_collision;
use crate::config::CollisionConfig;
use crate::ecs::components::{CollisionComponent, CollisionInfo, SimplePhysicsComponent, TransformComponent};
use crate::ecs::{Entity, Scene};
use crate::foundation::collections::EntityHandle;
use crate::foundation::math::{xy, Vec2, Vec3};

/// Registry of collidable entities and the per-frame collision pass
///
/// Handles are scene-local, so a system serves a single scene.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    /// Registration order, which is also pair-check order
    entities: Vec<EntityHandle>,
    config: CollisionConfig,
}

impl CollisionSystem {
    /// Create an empty system with default tuning
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty system with custom tuning
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            entities: Vec::new(),
            config,
        }
    }

    /// Resolution tuning in use
    pub const fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Register an entity carrying a [`CollisionComponent`]
    ///
    /// Returns `false` if the entity has no collider or is already registered.
    pub fn register_entity(&mut self, entity: &Entity) -> bool {
        if !entity.has_component::<CollisionComponent>() || self.is_registered(entity.handle()) {
            return false;
        }

        self.entities.push(entity.handle());
        log::debug!("Collision: registered entity {} ({})", entity.id(), entity.name());
        true
    }

    /// Stop checking `handle`; returns whether it was registered
    pub fn unregister_entity(&mut self, handle: EntityHandle) -> bool {
        let before = self.entities.len();
        self.entities.retain(|&h| h != handle);
        self.entities.len() != before
    }

    /// Unregister everything
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Number of registered entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Whether `handle` is registered
    pub fn is_registered(&self, handle: EntityHandle) -> bool {
        self.entities.contains(&handle)
    }

    /// Run one collision pass over `scene`
    ///
    /// Handles whose entity has left the scene are dropped first. Results
    /// of the previous pass are cleared on every active registered entity,
    /// then each pair `(i, j)` with `i < j` in registration order is tested.
    pub fn update(&mut self, scene: &mut Scene, _delta_time: f32) {
        self.prune_stale(scene);

        for &handle in &self.entities {
            let Some(entity) = scene.entity_mut(handle) else {
                continue;
            };
            if !entity.is_active() {
                continue;
            }
            if let Some(collider) = entity.get_component_mut::<CollisionComponent>() {
                collider.clear_collisions();
            }
        }

        for i in 0..self.entities.len() {
            for j in (i + 1)..self.entities.len() {
                let (handle_a, handle_b) = (self.entities[i], self.entities[j]);
                let Some((a, b)) = scene.entity_pair_mut(handle_a, handle_b) else {
                    continue;
                };
                if !a.is_active() || !b.is_active() {
                    continue;
                }

                let mut info = Self::check_entities(a, b);
                if !info.has_collision {
                    continue;
                }
                info.other_entity = Some(handle_b);

                let Some(collider_a) = a.get_component_mut::<CollisionComponent>() else {
                    continue;
                };
                collider_a.add_collision(info);
                let trigger_a = collider_a.is_trigger();

                let Some(collider_b) = b.get_component_mut::<CollisionComponent>() else {
                    continue;
                };
                collider_b.add_collision(info.mirrored(handle_a));
                let trigger_b = collider_b.is_trigger();

                log::trace!(
                    "Collision: {} <-> {} (penetration {:.3})",
                    a.name(),
                    b.name(),
                    info.penetration
                );

                if !trigger_a && !trigger_b {
                    Self::resolve_collision(&info, a, b, &self.config);
                }
            }
        }
    }

    fn prune_stale(&mut self, scene: &Scene) {
        self.entities.retain(|&handle| {
            let alive = scene.entity(handle).is_some();
            if !alive {
                log::debug!("Collision: dropping handle of removed entity");
            }
            alive
        });
    }

    /// Narrow-phase test between the colliders of two entities
    ///
    /// The normal points from `a` toward `b`. Entities without a collider
    /// never collide.
    pub fn check_entities(a: &Entity, b: &Entity) -> CollisionInfo {
        let (Some(collider_a), Some(collider_b)) = (
            a.get_component::<CollisionComponent>(),
            b.get_component::<CollisionComponent>(),
        ) else {
            return CollisionInfo::none();
        };

        check_collision(&collider_a.world_shape(a), &collider_b.world_shape(b))
    }

    /// Separate two overlapping bodies and exchange momentum
    ///
    /// `info.normal` must point from `a` toward `b`. Static bodies never
    /// move. Velocities change only when both entities carry a
    /// [`SimplePhysicsComponent`] and are approaching along the normal.
    pub fn resolve_collision(info: &CollisionInfo, a: &mut Entity, b: &mut Entity, config: &CollisionConfig) {
        if !info.has_collision {
            return;
        }

        let (Some(static_a), Some(static_b)) = (
            a.get_component::<CollisionComponent>().map(CollisionComponent::is_static),
            b.get_component::<CollisionComponent>().map(CollisionComponent::is_static),
        ) else {
            return;
        };

        if info.penetration > config.slop {
            let correction = info.normal * ((info.penetration - config.slop) * config.correction_percent);

            match (static_a, static_b) {
                (false, false) => {
                    shift(a, -correction * 0.5);
                    shift(b, correction * 0.5);
                }
                (false, true) => shift(a, -correction),
                (true, false) => shift(b, correction),
                (true, true) => {}
            }
        }

        let (Some(body_a), Some(body_b)) = (
            a.get_component::<SimplePhysicsComponent>().map(Body::of),
            b.get_component::<SimplePhysicsComponent>().map(Body::of),
        ) else {
            return;
        };

        let velocity_along_normal = (body_b.velocity - body_a.velocity).dot(&info.normal);
        if velocity_along_normal > 0.0 {
            return;
        }

        let restitution = body_a.bounce.min(body_b.bounce);
        let impulse = -(1.0 + restitution) * velocity_along_normal;

        match (static_a, static_b) {
            (false, false) => {
                let weighted = info.normal * (impulse / (body_a.mass + body_b.mass));
                set_planar_velocity(a, body_a.velocity - weighted * body_b.mass);
                set_planar_velocity(b, body_b.velocity + weighted * body_a.mass);
            }
            (false, true) => set_planar_velocity(a, body_a.velocity - info.normal * impulse),
            (true, false) => set_planar_velocity(b, body_b.velocity + info.normal * impulse),
            (true, true) => {}
        }
    }

    /// Human-readable state dump
    pub fn debug_info(&self, scene: &Scene) -> String {
        let mut active_colliders = 0;
        let mut total_collisions = 0;

        for entity in self.entities.iter().filter_map(|&h| scene.entity(h)) {
            if !entity.is_active() {
                continue;
            }
            active_colliders += 1;
            if let Some(collider) = entity.get_component::<CollisionComponent>() {
                total_collisions += collider.collisions().len();
            }
        }

        format!(
            "=== Collision System ===\nRegistered Entities: {}\nActive Colliders: {}\nTotal Collisions: {}",
            self.entities.len(),
            active_colliders,
            total_collisions
        )
    }
}

/// Planar physics state read once per resolution
#[derive(Clone, Copy)]
struct Body {
    velocity: Vec2,
    mass: f32,
    bounce: f32,
}

impl Body {
    fn of(physics: &SimplePhysicsComponent) -> Self {
        Self {
            velocity: xy(&physics.velocity()),
            mass: physics.mass(),
            bounce: physics.bounce_damping(),
        }
    }
}

/// Move an entity's transform in the XY plane
fn shift(entity: &mut Entity, delta: Vec2) {
    if let Some(transform) = entity.get_component_mut::<TransformComponent>() {
        transform.translate(Vec3::new(delta.x, delta.y, 0.0));
    }
}

/// Replace the XY velocity, keeping Z
fn set_planar_velocity(entity: &mut Entity, velocity: Vec2) {
    if let Some(physics) = entity.get_component_mut::<SimplePhysicsComponent>() {
        let z = physics.velocity().z;
        physics.set_velocity(Vec3::new(velocity.x, velocity.y, z));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spawn(scene: &mut Scene, name: &str, position: Vec3, collider: CollisionComponent) -> EntityHandle {
        let entity = scene.create_entity(name);
        entity.add_component(TransformComponent::from_position(position));
        entity.add_component(collider);
        entity.handle()
    }

    fn give_body(scene: &mut Scene, handle: EntityHandle, physics: SimplePhysicsComponent) {
        scene.entity_mut(handle).unwrap().add_component(physics);
    }

    fn register_all(system: &mut CollisionSystem, scene: &Scene) {
        for entity in scene.entities() {
            system.register_entity(entity);
        }
    }

    fn position(scene: &Scene, handle: EntityHandle) -> Vec3 {
        scene
            .entity(handle)
            .unwrap()
            .get_component::<TransformComponent>()
            .unwrap()
            .position()
    }

    fn velocity(scene: &Scene, handle: EntityHandle) -> Vec3 {
        scene
            .entity(handle)
            .unwrap()
            .get_component::<SimplePhysicsComponent>()
            .unwrap()
            .velocity()
    }

    fn collisions(scene: &Scene, handle: EntityHandle) -> Vec<CollisionInfo> {
        scene
            .entity(handle)
            .unwrap()
            .get_component::<CollisionComponent>()
            .unwrap()
            .collisions()
            .to_vec()
    }

    #[test]
    fn test_register_requires_collider_and_deduplicates() {
        let mut scene = Scene::new("register");
        let plain = scene.create_entity("plain").handle();
        let ball = spawn(&mut scene, "ball", Vec3::zeros(), CollisionComponent::default());

        let mut system = CollisionSystem::new();
        assert!(!system.register_entity(scene.entity(plain).unwrap()));
        assert!(system.register_entity(scene.entity(ball).unwrap()));
        assert!(!system.register_entity(scene.entity(ball).unwrap()));
        assert_eq!(system.entity_count(), 1);

        assert!(system.unregister_entity(ball));
        assert!(!system.unregister_entity(ball));
        assert!(!system.is_registered(ball));
    }

    #[test]
    fn test_results_are_symmetric() {
        let mut scene = Scene::new("symmetry");
        let a = spawn(&mut scene, "a", Vec3::zeros(), CollisionComponent::circle(1.0, Vec2::zeros()).as_trigger());
        let b = spawn(&mut scene, "b", Vec3::new(1.5, 0.0, 0.0), CollisionComponent::circle(1.0, Vec2::zeros()));

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        let (info_a, info_b) = (collisions(&scene, a), collisions(&scene, b));
        assert_eq!(info_a.len(), 1);
        assert_eq!(info_b.len(), 1);
        assert_eq!(info_a[0].normal, -info_b[0].normal);
        assert_relative_eq!(info_a[0].normal, Vec2::new(1.0, 0.0), epsilon = 1e-6);
        assert_eq!(info_a[0].other_entity, Some(b));
        assert_eq!(info_b[0].other_entity, Some(a));
    }

    #[test]
    fn test_trigger_is_reported_but_not_resolved() {
        let mut scene = Scene::new("trigger");
        let zone = spawn(&mut scene, "zone", Vec3::zeros(), CollisionComponent::circle(1.0, Vec2::zeros()).as_trigger());
        let ball = spawn(&mut scene, "ball", Vec3::new(1.5, 0.0, 0.0), CollisionComponent::circle(1.0, Vec2::zeros()));

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        assert!(!collisions(&scene, zone).is_empty());
        assert_eq!(position(&scene, zone), Vec3::zeros());
        assert_eq!(position(&scene, ball), Vec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_results_are_cleared_every_pass() {
        let mut scene = Scene::new("clear");
        let a = spawn(&mut scene, "a", Vec3::zeros(), CollisionComponent::circle(1.0, Vec2::zeros()).as_trigger());
        let b = spawn(&mut scene, "b", Vec3::new(1.5, 0.0, 0.0), CollisionComponent::circle(1.0, Vec2::zeros()));

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);
        system.update(&mut scene, 0.016);
        assert_eq!(collisions(&scene, a).len(), 1);

        scene
            .entity_mut(b)
            .unwrap()
            .get_component_mut::<TransformComponent>()
            .unwrap()
            .set_position(Vec3::new(10.0, 0.0, 0.0));
        system.update(&mut scene, 0.016);

        assert!(collisions(&scene, a).is_empty());
        assert!(collisions(&scene, b).is_empty());
    }

    #[test]
    fn test_static_body_does_not_move() {
        let mut scene = Scene::new("static");
        let wall = spawn(&mut scene, "wall", Vec3::zeros(), CollisionComponent::aabb(Vec2::new(2.0, 2.0), Vec2::zeros()).as_static());
        let crate_ = spawn(&mut scene, "crate", Vec3::new(1.5, 0.2, 0.0), CollisionComponent::aabb(Vec2::new(2.0, 2.0), Vec2::zeros()));
        give_body(&mut scene, wall, SimplePhysicsComponent::new(1.0, false));
        give_body(
            &mut scene,
            crate_,
            SimplePhysicsComponent::new(1.0, false).with_velocity(Vec3::new(-1.0, 0.0, 0.0)),
        );

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        assert_eq!(position(&scene, wall), Vec3::zeros());
        assert_eq!(velocity(&scene, wall), Vec3::zeros());

        // Penetration 0.5 along +X, corrected by (0.5 - 0.01) * 0.8
        assert_relative_eq!(position(&scene, crate_), Vec3::new(1.892, 0.2, 0.0), epsilon = 1e-5);
        assert_relative_eq!(velocity(&scene, crate_), Vec3::new(0.7, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_restitution_against_static_line() {
        let mut scene = Scene::new("bounce");
        let ball = spawn(&mut scene, "ball", Vec3::new(0.0, 0.8, 0.0), CollisionComponent::circle(1.0, Vec2::zeros()));
        give_body(
            &mut scene,
            ball,
            SimplePhysicsComponent::new(1.0, true)
                .with_velocity(Vec3::new(0.0, -5.0, 0.0))
                .with_bounce_damping(0.5),
        );

        let ground = scene.create_entity("ground");
        ground.add_component(CollisionComponent::line(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0), 0.1).as_static());
        ground.add_component(SimplePhysicsComponent::new(1.0, false));

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        assert_relative_eq!(velocity(&scene, ball).y, 2.5, epsilon = 1e-5);
        // Penetration 0.3, pushed up by (0.3 - 0.01) * 0.8
        assert_relative_eq!(position(&scene, ball).y, 1.032, epsilon = 1e-5);
    }

    #[test]
    fn test_restitution_with_line_registered_first() {
        let mut scene = Scene::new("bounce");
        let ground = scene.create_entity("ground");
        ground.add_component(CollisionComponent::line(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 0.0), 0.1).as_static());
        ground.add_component(SimplePhysicsComponent::new(1.0, false));

        let ball = spawn(&mut scene, "ball", Vec3::new(0.0, 0.8, 0.0), CollisionComponent::circle(1.0, Vec2::zeros()));
        give_body(
            &mut scene,
            ball,
            SimplePhysicsComponent::new(1.0, true)
                .with_velocity(Vec3::new(0.0, -5.0, 0.0))
                .with_bounce_damping(0.5),
        );

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        // Ball-side copy still points from the ball toward the line
        let contacts = collisions(&scene, ball);
        assert_eq!(contacts.len(), 1);
        assert_relative_eq!(contacts[0].normal, Vec2::new(0.0, -1.0), epsilon = 1e-6);

        assert_relative_eq!(velocity(&scene, ball), Vec3::new(0.0, 2.5, 0.0), epsilon = 1e-5);
        assert_relative_eq!(position(&scene, ball).y, 1.032, epsilon = 1e-5);
    }

    #[test]
    fn test_dynamic_pair_splits_correction_and_swaps_velocity() {
        let mut scene = Scene::new("billiards");
        let a = spawn(&mut scene, "a", Vec3::zeros(), CollisionComponent::circle(1.0, Vec2::zeros()));
        let b = spawn(&mut scene, "b", Vec3::new(1.5, 0.0, 0.0), CollisionComponent::circle(1.0, Vec2::zeros()));
        give_body(
            &mut scene,
            a,
            SimplePhysicsComponent::new(1.0, false)
                .with_velocity(Vec3::new(1.0, 0.0, 0.3))
                .with_bounce_damping(1.0),
        );
        give_body(
            &mut scene,
            b,
            SimplePhysicsComponent::new(1.0, false)
                .with_velocity(Vec3::new(-1.0, 0.0, 0.0))
                .with_bounce_damping(1.0),
        );

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        assert_relative_eq!(position(&scene, a).x, -0.196, epsilon = 1e-5);
        assert_relative_eq!(position(&scene, b).x, 1.696, epsilon = 1e-5);
        assert_relative_eq!(velocity(&scene, a), Vec3::new(-1.0, 0.0, 0.3), epsilon = 1e-5);
        assert_relative_eq!(velocity(&scene, b), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_separating_bodies_keep_velocity() {
        let mut scene = Scene::new("separating");
        let a = spawn(&mut scene, "a", Vec3::zeros(), CollisionComponent::circle(1.0, Vec2::zeros()));
        let b = spawn(&mut scene, "b", Vec3::new(1.5, 0.0, 0.0), CollisionComponent::circle(1.0, Vec2::zeros()));
        give_body(&mut scene, a, SimplePhysicsComponent::new(1.0, false).with_velocity(Vec3::new(-1.0, 0.0, 0.0)));
        give_body(&mut scene, b, SimplePhysicsComponent::new(1.0, false).with_velocity(Vec3::new(1.0, 0.0, 0.0)));

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        assert_eq!(velocity(&scene, a), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(velocity(&scene, b), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_two_static_bodies_stay_put() {
        let mut scene = Scene::new("statics");
        let a = spawn(&mut scene, "a", Vec3::zeros(), CollisionComponent::aabb(Vec2::new(2.0, 2.0), Vec2::zeros()).as_static());
        let b = spawn(&mut scene, "b", Vec3::new(1.0, 0.0, 0.0), CollisionComponent::aabb(Vec2::new(2.0, 2.0), Vec2::zeros()).as_static());

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        assert_eq!(collisions(&scene, a).len(), 1);
        assert_eq!(position(&scene, a), Vec3::zeros());
        assert_eq!(position(&scene, b), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_inactive_entities_are_skipped() {
        let mut scene = Scene::new("inactive");
        let a = spawn(&mut scene, "a", Vec3::zeros(), CollisionComponent::default());
        let b = spawn(&mut scene, "b", Vec3::new(0.5, 0.0, 0.0), CollisionComponent::default());

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        scene.entity_mut(b).unwrap().set_active(false);
        system.update(&mut scene, 0.016);

        assert!(collisions(&scene, a).is_empty());
        assert_eq!(position(&scene, a), Vec3::zeros());
    }

    #[test]
    fn test_removed_entities_are_pruned() {
        let mut scene = Scene::new("prune");
        let a = spawn(&mut scene, "a", Vec3::zeros(), CollisionComponent::default());
        let b = spawn(&mut scene, "b", Vec3::new(0.5, 0.0, 0.0), CollisionComponent::default());

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        scene.remove_entity(b);
        system.update(&mut scene, 0.016);

        assert_eq!(system.entity_count(), 1);
        assert!(system.is_registered(a));
        assert!(collisions(&scene, a).is_empty());
    }

    #[test]
    fn test_debug_info() {
        let mut scene = Scene::new("debug");
        spawn(&mut scene, "a", Vec3::zeros(), CollisionComponent::default().as_trigger());
        spawn(&mut scene, "b", Vec3::new(0.5, 0.0, 0.0), CollisionComponent::default());

        let mut system = CollisionSystem::new();
        register_all(&mut system, &scene);
        system.update(&mut scene, 0.016);

        let info = system.debug_info(&scene);
        assert!(info.contains("Registered Entities: 2"));
        assert!(info.contains("Active Colliders: 2"));
        assert!(info.contains("Total Collisions: 2"));
    }
}
