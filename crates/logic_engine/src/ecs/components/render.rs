//! Render component for entities drawn by the renderer
//!
//! Pure data: the renderer reads the primitive type, color, and visibility
//! every frame alongside the entity's transform matrix. Nothing here calls
//! into the renderer.

use crate::ecs::component::{Component, ComponentBase};
use crate::foundation::math::Vec3;

/// Built-in shapes the renderer knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveType {
    /// Unit cube
    #[default]
    Cube,
    /// Unit sphere
    Sphere,
    /// Flat quad
    Plane,
    /// Flat disc
    Circle,
    /// Mesh loaded from [`RenderComponent::mesh_path`]
    CustomMesh,
}

impl PrimitiveType {
    /// Short label for debug output
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cube => "Cube",
            Self::Sphere => "Sphere",
            Self::Plane => "Plane",
            Self::Circle => "Circle",
            Self::CustomMesh => "Custom Mesh",
        }
    }
}

/// Component for entities that can be rendered
#[derive(Debug, Clone)]
pub struct RenderComponent {
    base: ComponentBase,

    /// Shape to draw
    pub primitive_type: PrimitiveType,

    /// RGB color in [0, 1]
    pub color: Vec3,

    /// Whether this object is visible
    pub visible: bool,

    /// Mesh file for [`PrimitiveType::CustomMesh`]
    pub mesh_path: Option<String>,
}

impl Component for RenderComponent {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn type_name(&self) -> &'static str {
        "RenderComponent"
    }

    fn debug_info(&self) -> String {
        let mut info = format!(
            "Type: {}\nColor: ({:.2}, {:.2}, {:.2})\nVisible: {}",
            self.primitive_type.label(),
            self.color.x,
            self.color.y,
            self.color.z,
            self.visible
        );
        if let Some(path) = &self.mesh_path {
            info += &format!("\nMesh: {}", path);
        }
        info
    }
}

impl Default for RenderComponent {
    fn default() -> Self {
        Self::new(PrimitiveType::Cube, Vec3::new(1.0, 1.0, 1.0))
    }
}

impl RenderComponent {
    /// Create a visible render component
    pub fn new(primitive_type: PrimitiveType, color: Vec3) -> Self {
        Self {
            base: ComponentBase::new(),
            primitive_type,
            color,
            visible: true,
            mesh_path: None,
        }
    }

    /// Create a render component for a mesh file
    pub fn custom_mesh(path: impl Into<String>, color: Vec3) -> Self {
        Self {
            mesh_path: Some(path.into()),
            ..Self::new(PrimitiveType::CustomMesh, color)
        }
    }

    /// Set visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Check if this component should be rendered
    pub const fn should_render(&self) -> bool {
        self.visible
    }
}
