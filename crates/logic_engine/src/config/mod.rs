//! Configuration system
//!
//! Every tunable constant of the simulation lives here with defaults equal
//! to the values the runtime was tuned against. Configurations load from
//! `.toml` or `.ron` files chosen by extension.

pub use serde::{Deserialize, Serialize};

use crate::foundation::math::{constants, Vec3};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        let config = if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        log::info!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its valid range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tuning for collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Penetration tolerated without positional correction
    pub slop: f32,

    /// Fraction of the penetration beyond `slop` corrected per step
    pub correction_percent: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            slop: 0.01,
            correction_percent: 0.8,
        }
    }
}

/// Tuning for the standalone floor and boundary model of
/// [`SimplePhysicsComponent`](crate::ecs::components::SimplePhysicsComponent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Default constant acceleration for new bodies
    pub gravity: Vec3,

    /// Lowest Y a body may rest at
    pub floor_height: f32,

    /// Horizontal velocity multiplier applied on each floor bounce
    pub floor_friction: f32,

    /// Vertical speed below which a floor bounce comes to rest
    pub rest_velocity_threshold: f32,

    /// Half size of the X/Z world box
    pub world_half_extent: f32,

    /// Velocity retained when reflecting off the world box sides
    pub wall_restitution: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, constants::GRAVITY, 0.0),
            floor_height: 0.5,
            floor_friction: 0.9,
            rest_velocity_threshold: 0.1,
            world_half_extent: 10.0,
            wall_restitution: 0.5,
        }
    }
}

/// Top-level configuration for a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Collision resolution settings
    pub collision: CollisionConfig,

    /// Simple physics settings
    pub physics: PhysicsConfig,
}

impl Config for SimulationConfig {}

impl SimulationConfig {
    /// Check that every value lies in its meaningful range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = 0.0_f32..=1.0;

        let gravity = self.physics.gravity;
        let values = [
            ("collision.slop", self.collision.slop),
            ("collision.correction_percent", self.collision.correction_percent),
            ("physics.gravity.x", gravity.x),
            ("physics.gravity.y", gravity.y),
            ("physics.gravity.z", gravity.z),
            ("physics.floor_height", self.physics.floor_height),
            ("physics.floor_friction", self.physics.floor_friction),
            ("physics.rest_velocity_threshold", self.physics.rest_velocity_threshold),
            ("physics.world_half_extent", self.physics.world_half_extent),
            ("physics.wall_restitution", self.physics.wall_restitution),
        ];
        if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be finite, got {value}")));
        }

        if self.collision.slop < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "collision.slop must be non-negative, got {}",
                self.collision.slop
            )));
        }
        if !unit.contains(&self.collision.correction_percent) {
            return Err(ConfigError::Invalid(format!(
                "collision.correction_percent must be in [0, 1], got {}",
                self.collision.correction_percent
            )));
        }
        if self.physics.world_half_extent <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "physics.world_half_extent must be positive, got {}",
                self.physics.world_half_extent
            )));
        }
        if !unit.contains(&self.physics.floor_friction) {
            return Err(ConfigError::Invalid(format!(
                "physics.floor_friction must be in [0, 1], got {}",
                self.physics.floor_friction
            )));
        }
        if !unit.contains(&self.physics.wall_restitution) {
            return Err(ConfigError::Invalid(format!(
                "physics.wall_restitution must be in [0, 1], got {}",
                self.physics.wall_restitution
            )));
        }
        Ok(())
    }
}
