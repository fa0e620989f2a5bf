//! Physics module for 2D collision detection and response
//!
//! Exhaustive pairwise narrow phase over circles, boxes, and line segments
//! in the XY plane, with positional correction and impulse resolution.

pub mod collision;
pub mod collision_system;

pub use collision::{check_collision, closest_point_on_segment, WorldShape};
pub use collision_system::CollisionSystem;
