//! ECS Components module
//!
//! Built-in components: spatial transform, 2D collider, simple physics body,
//! and render description.

pub mod transform;
pub mod collision;
pub mod physics;
pub mod render;

pub use transform::TransformComponent;
pub use collision::{
    AabbCollider, CircleCollider, ColliderShape, CollisionComponent, CollisionInfo, LineCollider,
};
pub use physics::SimplePhysicsComponent;
pub use render::{PrimitiveType, RenderComponent};
