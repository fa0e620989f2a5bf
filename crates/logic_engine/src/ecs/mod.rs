//! Entity-Component implementation
//!
//! Entities own at most one component per concrete type; scenes own
//! entities and sweep the inactive ones after every update.

pub mod component;
pub mod components;
pub mod entity;
pub mod scene;
pub mod scene_manager;

#[cfg(test)]
mod tests;

pub use component::{Component, ComponentBase, Components};
pub use entity::{Entity, EntityId};
pub use scene::Scene;
pub use scene_manager::SceneManager;
