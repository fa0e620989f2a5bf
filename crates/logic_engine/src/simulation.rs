//! Frame driver
//!
//! Runs the fixed per-frame sequence: apply any pending scene transition,
//! update the current scene, then run the collision pass for that scene.

use crate::config::{Config, ConfigError, SimulationConfig};
use crate::ecs::{Scene, SceneManager};
use crate::foundation::collections::EntityHandle;
use crate::physics::CollisionSystem;
use std::collections::HashMap;

/// Scene registry plus one collision system per scene
#[derive(Debug)]
pub struct Simulation {
    scenes: SceneManager,
    collision: HashMap<String, CollisionSystem>,
    config: SimulationConfig,
    frame: u64,
}

impl Simulation {
    /// Create an empty simulation after validating `config`
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("Initializing simulation...");

        Ok(Self {
            scenes: SceneManager::new(),
            collision: HashMap::new(),
            config,
            frame: 0,
        })
    }

    /// Create a simulation from a `.toml` or `.ron` configuration file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Self::new(SimulationConfig::load_from_file(path)?)
    }

    /// Tuning in use
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of completed steps
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Scene registry
    pub const fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    /// Mutable scene registry
    pub fn scenes_mut(&mut self) -> &mut SceneManager {
        &mut self.scenes
    }

    /// Register `scene` under `name` with a fresh collision system
    pub fn register_scene(&mut self, name: &str, scene: Scene) {
        self.scenes.register_scene(name, scene);
        self.collision
            .insert(name.to_string(), CollisionSystem::with_config(self.config.collision));
    }

    /// Request a switch to `name`; see [`SceneManager::load_scene`]
    pub fn load_scene(&mut self, name: &str) -> bool {
        self.scenes.load_scene(name)
    }

    /// Collision system bound to the scene `name`
    pub fn collision_system(&self, name: &str) -> Option<&CollisionSystem> {
        self.collision.get(name)
    }

    /// Mutable collision system bound to the scene `name`
    pub fn collision_system_mut(&mut self, name: &str) -> Option<&mut CollisionSystem> {
        self.collision.get_mut(name)
    }

    /// Register one entity of scene `name` for collision checks
    pub fn register_collider(&mut self, name: &str, handle: EntityHandle) -> bool {
        let (Some(scene), Some(system)) = (self.scenes.scene(name), self.collision.get_mut(name)) else {
            return false;
        };

        scene
            .entity(handle)
            .is_some_and(|entity| system.register_entity(entity))
    }

    /// Register every collider-bearing entity of scene `name`, in creation
    /// order; returns how many were newly registered
    pub fn register_all_colliders(&mut self, name: &str) -> usize {
        let (Some(scene), Some(system)) = (self.scenes.scene(name), self.collision.get_mut(name)) else {
            return 0;
        };

        scene
            .entities()
            .filter(|entity| system.register_entity(entity))
            .count()
    }

    /// Advance one frame
    pub fn step(&mut self, delta_time: f32) {
        self.scenes.process_scene_transition();
        self.frame += 1;

        let Some(name) = self.scenes.current_scene_name().map(str::to_owned) else {
            return;
        };
        let Some(scene) = self.scenes.current_scene_mut() else {
            return;
        };
        if !scene.is_active() {
            return;
        }

        scene.update(delta_time);

        if let Some(system) = self.collision.get_mut(&name) {
            system.update(scene, delta_time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{CollisionComponent, SimplePhysicsComponent, TransformComponent};
    use crate::foundation::math::{Vec2, Vec3};
    use approx::assert_relative_eq;

    fn falling_ball_scene() -> Scene {
        let mut scene = Scene::default();
        let ball = scene.create_entity("ball");
        ball.add_component(TransformComponent::from_position(Vec3::new(0.0, 3.0, 0.0)));
        ball.add_component(SimplePhysicsComponent::new(1.0, false).with_velocity(Vec3::new(0.0, -1.0, 0.0)));
        ball.add_component(CollisionComponent::circle(0.5, Vec2::zeros()));

        let ground = scene.create_entity("ground");
        ground.add_component(CollisionComponent::line(Vec2::new(-5.0, 2.0), Vec2::new(5.0, 2.0), 0.0).as_static());
        scene
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SimulationConfig::default();
        config.collision.correction_percent = 2.0;
        assert!(matches!(Simulation::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let result = Simulation::from_file("/nonexistent/simulation.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_step_without_scene_is_harmless() {
        let mut simulation = Simulation::new(SimulationConfig::default()).unwrap();
        simulation.step(0.016);
        assert_eq!(simulation.frame(), 1);
        assert!(simulation.scenes().current_scene().is_none());
    }

    #[test]
    fn test_register_all_colliders() {
        let mut simulation = Simulation::new(SimulationConfig::default()).unwrap();
        simulation.register_scene("level", falling_ball_scene());

        assert_eq!(simulation.register_all_colliders("level"), 2);
        assert_eq!(simulation.register_all_colliders("level"), 0);
        assert_eq!(simulation.register_all_colliders("missing"), 0);
        assert_eq!(simulation.collision_system("level").unwrap().entity_count(), 2);
    }

    #[test]
    fn test_step_runs_transition_update_and_collision() {
        let mut simulation = Simulation::new(SimulationConfig::default()).unwrap();
        simulation.register_scene("level", falling_ball_scene());
        simulation.register_all_colliders("level");
        assert!(simulation.load_scene("level"));

        // Ball at y = 3 moves to 2.4 and overlaps the line at y = 2 by 0.1
        simulation.step(0.6);

        let scene = simulation.scenes().current_scene().unwrap();
        let ball = scene.find_entity_by_name("ball").unwrap();
        let collider = ball.get_component::<CollisionComponent>().unwrap();
        assert_eq!(collider.collisions().len(), 1);

        // Ground has no physics body: position is corrected, velocity kept
        let position = ball.get_component::<TransformComponent>().unwrap().position();
        assert_relative_eq!(position.y, 2.472, epsilon = 1e-5);
        let velocity = ball.get_component::<SimplePhysicsComponent>().unwrap().velocity();
        assert_eq!(velocity, Vec3::new(0.0, -1.0, 0.0));
    }
}
