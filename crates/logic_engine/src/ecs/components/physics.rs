//! Simple physics component for entities that move under gravity
//!
//! Integrates velocity into the sibling transform every frame and applies a
//! standalone floor/world-box response. That boundary model does not read
//! collider data; it coexists with the collision system.

use super::transform::TransformComponent;
use crate::config::PhysicsConfig;
use crate::ecs::component::{Component, ComponentBase, Components};
use crate::foundation::math::Vec3;

/// Velocity/acceleration integration with a built-in floor and world box
#[derive(Debug, Clone)]
pub struct SimplePhysicsComponent {
    base: ComponentBase,

    /// Linear velocity in units per second
    velocity: Vec3,

    /// Constant acceleration in units per second squared
    acceleration: Vec3,

    mass: f32,

    /// Energy retained on bounce, in [0, 1]
    bounce_damping: f32,

    affected_by_gravity: bool,

    config: PhysicsConfig,
}

impl Component for SimplePhysicsComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "SimplePhysicsComponent"
    }

    fn update(&mut self, delta_time: f32, siblings: &mut Components) {
        let Some(transform) = siblings.get_mut::<TransformComponent>() else {
            return;
        };

        let mut position = transform.position();

        if self.affected_by_gravity {
            self.velocity += self.acceleration * delta_time;
        }

        position += self.velocity * delta_time;

        self.apply_floor(&mut position);
        self.apply_world_box(&mut position);

        transform.set_position(position);
    }

    fn debug_info(&self) -> String {
        let v = self.velocity;
        format!(
            "Velocity: ({:.2}, {:.2}, {:.2})\nMass: {:.2}\nGravity: {}\nBounce Damping: {:.2}",
            v.x,
            v.y,
            v.z,
            self.mass,
            if self.affected_by_gravity { "ON" } else { "OFF" },
            self.bounce_damping
        )
    }
}

impl Default for SimplePhysicsComponent {
    fn default() -> Self {
        Self::new(1.0, true)
    }
}

impl SimplePhysicsComponent {
    /// Create a body at rest with default world settings
    pub fn new(mass: f32, affected_by_gravity: bool) -> Self {
        let config = PhysicsConfig::default();
        Self {
            base: ComponentBase::new(),
            velocity: Vec3::zeros(),
            acceleration: config.gravity,
            mass,
            bounce_damping: 0.7,
            affected_by_gravity,
            config,
        }
    }

    /// Builder pattern: Use `config` for gravity and the floor/world box
    #[must_use]
    pub fn with_config(mut self, config: PhysicsConfig) -> Self {
        self.acceleration = config.gravity;
        self.config = config;
        self
    }

    /// Builder pattern: Set initial velocity
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder pattern: Set bounce damping
    #[must_use]
    pub fn with_bounce_damping(mut self, damping: f32) -> Self {
        self.set_bounce_damping(damping);
        self
    }

    /// Linear velocity
    pub const fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Set velocity
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Add to velocity
    pub fn add_velocity(&mut self, delta_velocity: Vec3) {
        self.velocity += delta_velocity;
    }

    /// Constant acceleration
    pub const fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Set acceleration
    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.acceleration = acceleration;
    }

    /// Body mass
    pub const fn mass(&self) -> f32 {
        self.mass
    }

    /// Set mass
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass;
    }

    /// Energy retained on bounce
    pub const fn bounce_damping(&self) -> f32 {
        self.bounce_damping
    }

    /// Set bounce damping, clamped to [0, 1]
    pub fn set_bounce_damping(&mut self, damping: f32) {
        self.bounce_damping = damping.clamp(0.0, 1.0);
    }

    /// Whether acceleration is integrated
    pub const fn is_affected_by_gravity(&self) -> bool {
        self.affected_by_gravity
    }

    /// Enable or disable acceleration
    pub fn set_affected_by_gravity(&mut self, affected: bool) {
        self.affected_by_gravity = affected;
    }

    /// World settings in use
    pub const fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Apply an instantaneous force: `velocity += force / mass`
    pub fn apply_force(&mut self, force: Vec3) {
        self.velocity += force / self.mass;
    }

    /// Apply an impulse directly to velocity
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse;
    }

    /// Bounce off the floor plane with damping and horizontal friction
    fn apply_floor(&mut self, position: &mut Vec3) {
        if position.y >= self.config.floor_height || self.velocity.y >= 0.0 {
            return;
        }

        position.y = self.config.floor_height;
        self.velocity.y = -self.velocity.y * self.bounce_damping;

        self.velocity.x *= self.config.floor_friction;
        self.velocity.z *= self.config.floor_friction;

        // Stop tiny bounces
        if self.velocity.y.abs() < self.config.rest_velocity_threshold {
            self.velocity.y = 0.0;
        }
    }

    /// Reflect off the X and Z sides of the world box
    fn apply_world_box(&mut self, position: &mut Vec3) {
        let limit = self.config.world_half_extent;

        if position.x.abs() > limit {
            self.velocity.x = -self.velocity.x * self.config.wall_restitution;
            position.x = position.x.clamp(-limit, limit);
        }
        if position.z.abs() > limit {
            self.velocity.z = -self.velocity.z * self.config.wall_restitution;
            position.z = position.z.clamp(-limit, limit);
        }
    }
}
