//! # Logic Engine
//!
//! Entity-component runtime with a 2D collision detection and resolution
//! engine.
//!
//! ## Features
//!
//! - **Entities and components**: at most one component per concrete type,
//!   updated in insertion order with access to their siblings
//! - **Scenes**: creation-ordered entity arenas with deferred removal and
//!   deferred scene switching
//! - **Collision**: circle, box, and line-segment colliders with positional
//!   correction and restitution
//!
//! ## Quick Start
//!
//! ```rust
//! use logic_engine::prelude::*;
//!
//! let mut simulation = Simulation::new(SimulationConfig::default())?;
//!
//! let mut scene = Scene::new("level");
//! let ball = scene.create_entity("ball");
//! ball.add_component(TransformComponent::from_position(Vec3::new(0.0, 5.0, 0.0)));
//! ball.add_component(SimplePhysicsComponent::default());
//! ball.add_component(CollisionComponent::circle(0.5, Vec2::zeros()));
//!
//! simulation.register_scene("level", scene);
//! simulation.register_all_colliders("level");
//! simulation.load_scene("level");
//!
//! for _ in 0..60 {
//!     simulation.step(1.0 / 60.0);
//! }
//! # Ok::<(), ConfigError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;

mod simulation;

pub use foundation::collections::EntityHandle;
pub use simulation::Simulation;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError, PhysicsConfig, SimulationConfig},
        ecs::components::{
            CollisionComponent, CollisionInfo, ColliderShape, PrimitiveType, RenderComponent,
            SimplePhysicsComponent, TransformComponent,
        },
        ecs::{Component, ComponentBase, Components, Entity, EntityId, Scene, SceneManager},
        foundation::math::{Mat4, Vec2, Vec3},
        physics::CollisionSystem,
        EntityHandle, Simulation,
    };
}
