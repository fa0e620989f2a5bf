//! Collision components for ECS
//!
//! A [`CollisionComponent`] describes one 2D shape riding on the owning
//! entity's transform (XY plane) and carries the contacts the
//! [`CollisionSystem`](crate::physics::CollisionSystem) found for it during
//! its most recent pass.

use super::transform::TransformComponent;
use crate::ecs::component::{Component, ComponentBase};
use crate::ecs::Entity;
use crate::foundation::collections::EntityHandle;
use crate::foundation::math::{xy, Vec2};
use crate::physics::collision::WorldShape;

/// Circle collider, centered at the entity position plus `offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCollider {
    /// Circle radius
    pub radius: f32,
    /// Offset from entity position
    pub offset: Vec2,
}

impl Default for CircleCollider {
    fn default() -> Self {
        Self {
            radius: 1.0,
            offset: Vec2::zeros(),
        }
    }
}

/// Axis-aligned box collider, centered at the entity position plus `offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AabbCollider {
    /// Full width and height of the box
    pub size: Vec2,
    /// Offset from entity position
    pub offset: Vec2,
}

impl AabbCollider {
    /// Half of [`size`](Self::size) on each axis
    pub fn half_size(&self) -> Vec2 {
        self.size * 0.5
    }
}

impl Default for AabbCollider {
    fn default() -> Self {
        Self {
            size: Vec2::new(1.0, 1.0),
            offset: Vec2::zeros(),
        }
    }
}

/// Line segment collider for walls and boundaries
///
/// Endpoints are absolute world coordinates; the owning transform is never
/// applied to them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCollider {
    /// First endpoint (world space)
    pub start: Vec2,
    /// Second endpoint (world space)
    pub end: Vec2,
    /// Extra radius around the segment counted as contact
    pub thickness: f32,
}

impl Default for LineCollider {
    fn default() -> Self {
        Self {
            start: Vec2::zeros(),
            end: Vec2::new(1.0, 0.0),
            thickness: 0.1,
        }
    }
}

/// The single shape a collider uses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Circle relative to the entity
    Circle(CircleCollider),
    /// Axis-aligned box relative to the entity
    Aabb(AabbCollider),
    /// Segment in absolute world coordinates
    LineSegment(LineCollider),
}

impl ColliderShape {
    /// Short label for debug output
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Circle(_) => "Circle",
            Self::Aabb(_) => "AABB",
            Self::LineSegment(_) => "Line",
        }
    }
}

impl Default for ColliderShape {
    fn default() -> Self {
        Self::Circle(CircleCollider::default())
    }
}

/// Result of one narrow-phase test, seen from one side of the pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Whether the shapes overlap
    pub has_collision: bool,
    /// World-space contact point
    pub contact_point: Vec2,
    /// Unit separation normal pointing from this side toward the other
    pub normal: Vec2,
    /// Overlap depth along `normal`, never negative
    pub penetration: f32,
    /// The other entity of the pair
    pub other_entity: Option<EntityHandle>,
}

impl CollisionInfo {
    /// A positive result with no other entity assigned yet
    pub const fn new(contact_point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            has_collision: true,
            contact_point,
            normal,
            penetration,
            other_entity: None,
        }
    }

    /// The "no collision" result
    pub fn none() -> Self {
        Self {
            has_collision: false,
            contact_point: Vec2::zeros(),
            normal: Vec2::zeros(),
            penetration: 0.0,
            other_entity: None,
        }
    }

    /// The same contact seen from the other side: normal negated and the
    /// other entity set to `other`
    #[must_use]
    pub fn mirrored(&self, other: EntityHandle) -> Self {
        Self {
            normal: -self.normal,
            other_entity: Some(other),
            ..*self
        }
    }
}

impl Default for CollisionInfo {
    fn default() -> Self {
        Self::none()
    }
}

/// Component giving an entity a 2D collision shape
#[derive(Debug, Clone)]
pub struct CollisionComponent {
    base: ComponentBase,

    shape: ColliderShape,

    /// Trigger volumes report contacts but are never resolved
    is_trigger: bool,

    /// Static bodies are never moved by resolution
    is_static: bool,

    /// Collision layer label (not consulted for filtering)
    layer: String,

    /// Contacts from the most recent collision pass
    collisions: Vec<CollisionInfo>,
}

impl Component for CollisionComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "CollisionComponent"
    }

    fn debug_info(&self) -> String {
        let mut info = format!(
            "Shape: {}\nLayer: {}\nTrigger: {}\nStatic: {}\n",
            self.shape.label(),
            self.layer,
            self.is_trigger,
            self.is_static
        );

        match &self.shape {
            ColliderShape::Circle(circle) => {
                info += &format!(
                    "Radius: {:.2}\nOffset: ({:.2}, {:.2})",
                    circle.radius, circle.offset.x, circle.offset.y
                );
            }
            ColliderShape::Aabb(aabb) => {
                info += &format!(
                    "Size: ({:.2}, {:.2})\nOffset: ({:.2}, {:.2})",
                    aabb.size.x, aabb.size.y, aabb.offset.x, aabb.offset.y
                );
            }
            ColliderShape::LineSegment(line) => {
                info += &format!(
                    "Start: ({:.2}, {:.2})\nEnd: ({:.2}, {:.2})\nThickness: {:.2}",
                    line.start.x, line.start.y, line.end.x, line.end.y, line.thickness
                );
            }
        }

        info += &format!("\nCollisions: {}", self.collisions.len());
        info
    }
}

impl Default for CollisionComponent {
    fn default() -> Self {
        Self::new(ColliderShape::default())
    }
}

impl CollisionComponent {
    /// Create a dynamic, non-trigger collider on the `default` layer
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            base: ComponentBase::new(),
            shape,
            is_trigger: false,
            is_static: false,
            layer: String::from("default"),
            collisions: Vec::new(),
        }
    }

    /// Circle collider
    pub fn circle(radius: f32, offset: Vec2) -> Self {
        Self::new(ColliderShape::Circle(CircleCollider { radius, offset }))
    }

    /// Box collider of full `size`
    pub fn aabb(size: Vec2, offset: Vec2) -> Self {
        Self::new(ColliderShape::Aabb(AabbCollider { size, offset }))
    }

    /// Segment collider with world-space endpoints
    pub fn line(start: Vec2, end: Vec2, thickness: f32) -> Self {
        Self::new(ColliderShape::LineSegment(LineCollider {
            start,
            end,
            thickness,
        }))
    }

    /// Builder pattern: Mark this as a trigger volume
    #[must_use]
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Builder pattern: Mark this as an immovable body
    #[must_use]
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Builder pattern: Set the layer label
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// Active shape
    pub const fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Switch to a circle
    pub fn set_circle(&mut self, radius: f32, offset: Vec2) {
        self.shape = ColliderShape::Circle(CircleCollider { radius, offset });
    }

    /// Switch to a box of full `size`
    pub fn set_aabb(&mut self, size: Vec2, offset: Vec2) {
        self.shape = ColliderShape::Aabb(AabbCollider { size, offset });
    }

    /// Switch to a world-space segment
    pub fn set_line(&mut self, start: Vec2, end: Vec2, thickness: f32) {
        self.shape = ColliderShape::LineSegment(LineCollider {
            start,
            end,
            thickness,
        });
    }

    /// Whether contacts are reported without resolution
    pub const fn is_trigger(&self) -> bool {
        self.is_trigger
    }

    /// Set trigger mode
    pub fn set_trigger(&mut self, trigger: bool) {
        self.is_trigger = trigger;
    }

    /// Whether resolution leaves this body in place
    pub const fn is_static(&self) -> bool {
        self.is_static
    }

    /// Set static mode
    pub fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
    }

    /// Layer label
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Set the layer label
    pub fn set_layer(&mut self, layer: impl Into<String>) {
        self.layer = layer.into();
    }

    /// Contacts from the most recent collision pass
    pub fn collisions(&self) -> &[CollisionInfo] {
        &self.collisions
    }

    /// Whether the most recent pass found any contact
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Forget all contacts
    pub fn clear_collisions(&mut self) {
        self.collisions.clear();
    }

    /// Record a contact
    pub fn add_collision(&mut self, collision: CollisionInfo) {
        self.collisions.push(collision);
    }

    /// XY of the owning entity's transform, or the origin without one
    pub fn world_position(&self, owner: &Entity) -> Vec2 {
        debug_assert!(self.owner().is_none_or(|handle| handle == owner.handle()));

        owner
            .get_component::<TransformComponent>()
            .map_or_else(Vec2::zeros, |transform| xy(&transform.position()))
    }

    /// Shape center in world space
    ///
    /// Circles and boxes add their offset to the world position; segments
    /// report their midpoint, which is already in world space.
    pub fn world_center(&self, owner: &Entity) -> Vec2 {
        match &self.shape {
            ColliderShape::Circle(circle) => self.world_position(owner) + circle.offset,
            ColliderShape::Aabb(aabb) => self.world_position(owner) + aabb.offset,
            ColliderShape::LineSegment(line) => (line.start + line.end) * 0.5,
        }
    }

    /// Resolve the shape into world space for narrow-phase tests
    pub fn world_shape(&self, owner: &Entity) -> WorldShape {
        let center = self.world_center(owner);
        match &self.shape {
            ColliderShape::Circle(circle) => WorldShape::Circle {
                center,
                radius: circle.radius,
            },
            ColliderShape::Aabb(aabb) => WorldShape::Aabb {
                center,
                half_size: aabb.half_size(),
            },
            ColliderShape::LineSegment(line) => WorldShape::LineSegment {
                start: line.start,
                end: line.end,
                thickness: line.thickness,
            },
        }
    }
}
