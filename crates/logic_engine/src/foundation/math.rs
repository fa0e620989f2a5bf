//! Math utilities and types
//!
//! Provides the vector and matrix aliases shared by the transform and
//! collision layers. Collision runs in the XY plane, so most of the physics
//! code works with [`Vec2`] while transforms stay fully 3D.

pub use nalgebra::{Matrix4, Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Common math constants
pub mod constants {
    /// Standard gravity along -Y in units per second squared
    pub const GRAVITY: f32 = -9.81;

    /// Lengths below this are treated as zero when normalizing
    pub const LENGTH_EPSILON: f32 = 0.001;
}

/// Project a 3D vector onto the XY plane
#[inline]
pub fn xy(v: &Vec3) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Normalize a 2D vector, returning zero for vectors shorter than
/// [`constants::LENGTH_EPSILON`]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let length = v.magnitude();
    if length > constants::LENGTH_EPSILON {
        v / length
    } else {
        Vec2::zeros()
    }
}
