//! Transform component for the ECS system
//!
//! Position, Euler rotation, and scale with a lazily recomputed world
//! matrix. All coordinates follow Y-up right-handed conventions with the
//! camera looking down -Z.

use crate::ecs::component::{Component, ComponentBase};
use crate::foundation::math::{Mat4, Vec3};
use std::cell::Cell;

/// Spatial transformation of an entity
///
/// The cached matrix is valid iff no position/rotation/scale mutation has
/// happened since it was last computed. Every mutator marks it dirty.
#[derive(Debug, Clone)]
pub struct TransformComponent {
    base: ComponentBase,

    /// World space position (Y-up right-handed)
    position: Vec3,

    /// Euler rotation in radians, applied X then Y then Z
    rotation: Vec3,

    /// Per-axis scale factors
    scale: Vec3,

    matrix: Cell<Mat4>,
    dirty: Cell<bool>,
    recompute_count: Cell<u64>,
}

impl Component for TransformComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "TransformComponent"
    }

    fn debug_info(&self) -> String {
        let p = self.position;
        let r = self.rotation;
        let s = self.scale;
        format!(
            "Position: ({:.2}, {:.2}, {:.2})\nRotation: ({:.2}, {:.2}, {:.2})\nScale: ({:.2}, {:.2}, {:.2})",
            p.x, p.y, p.z, r.x, r.y, r.z, s.x, s.y, s.z
        )
    }
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::new(Vec3::zeros(), Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }
}

impl TransformComponent {
    /// Create from position, rotation, and scale
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self {
            base: ComponentBase::new(),
            position,
            rotation,
            scale,
            matrix: Cell::new(Mat4::identity()),
            dirty: Cell::new(true),
            recompute_count: Cell::new(0),
        }
    }

    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
    }

    /// Builder pattern: Set rotation from Euler angles (radians, XYZ order)
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.set_rotation(rotation);
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    /// World space position
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Set position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.mark_dirty();
    }

    /// Move by `delta`
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.mark_dirty();
    }

    /// Euler rotation in radians
    pub const fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Set Euler rotation in radians
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.mark_dirty();
    }

    /// Add `delta` radians to the Euler rotation
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
        self.mark_dirty();
    }

    /// Per-axis scale
    pub const fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set scale (non-uniform)
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.mark_dirty();
    }

    /// Set scale (uniform)
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.set_scale(Vec3::new(scale, scale, scale));
    }

    /// World matrix, `T * Rx * Ry * Rz * S`
    ///
    /// Recomputed only on the first call after a mutation.
    pub fn transform_matrix(&self) -> Mat4 {
        if self.dirty.get() {
            self.matrix.set(self.compose());
            self.dirty.set(false);
            self.recompute_count.set(self.recompute_count.get() + 1);
        }
        self.matrix.get()
    }

    /// How many times the matrix has been rebuilt
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count.get()
    }

    /// Whether the next matrix access will rebuild it
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Local -Z axis in world space
    pub fn forward(&self) -> Vec3 {
        -self.basis_column(2)
    }

    /// Local +X axis in world space
    pub fn right(&self) -> Vec3 {
        self.basis_column(0)
    }

    /// Local +Y axis in world space
    pub fn up(&self) -> Vec3 {
        self.basis_column(1)
    }

    fn basis_column(&self, column: usize) -> Vec3 {
        let matrix = self.transform_matrix();
        let axis = Vec3::new(matrix[(0, column)], matrix[(1, column)], matrix[(2, column)]);
        axis.try_normalize(f32::EPSILON).unwrap_or(axis)
    }

    fn compose(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * Mat4::from_axis_angle(&Vec3::x_axis(), self.rotation.x)
            * Mat4::from_axis_angle(&Vec3::y_axis(), self.rotation.y)
            * Mat4::from_axis_angle(&Vec3::z_axis(), self.rotation.z)
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    fn mark_dirty(&self) {
        self.dirty.set(true);
    }
}
