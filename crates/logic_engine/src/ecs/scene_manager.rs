//! # Scene Manager
//!
//! Named registry of scenes with deferred transitions. [`SceneManager::load_scene`]
//! only records the requested target; the switch takes effect in
//! [`SceneManager::process_scene_transition`], which the frame loop calls
//! before updating the current scene. A scene is therefore never swapped out
//! in the middle of its own update.

use super::scene::Scene;
use std::collections::HashMap;

/// Registry of named scenes and the current/pending selection
#[derive(Debug, Default)]
pub struct SceneManager {
    /// Registered scenes by name
    scenes: HashMap<String, Scene>,

    /// Name of the scene currently running
    current: Option<String>,

    /// Target of the outstanding transition; a newer request overwrites it
    next: Option<String>,
}

impl SceneManager {
    /// Create an empty manager with no current scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `scene` under `name`, renaming the scene to match
    ///
    /// An existing scene with the same name is replaced and returned.
    pub fn register_scene(&mut self, name: &str, mut scene: Scene) -> Option<Scene> {
        scene.set_name(name);
        log::info!("Registered scene '{name}'");
        self.scenes.insert(name.to_string(), scene)
    }

    /// Request a switch to the scene registered as `name`
    ///
    /// Returns `false` for unknown names. Nothing changes until the next
    /// [`process_scene_transition`](Self::process_scene_transition).
    pub fn load_scene(&mut self, name: &str) -> bool {
        if !self.scenes.contains_key(name) {
            log::warn!("Scene '{name}' not found");
            return false;
        }

        if let Some(previous) = self.next.replace(name.to_string()) {
            log::debug!("Pending transition to '{previous}' replaced by '{name}'");
        }
        true
    }

    /// Apply the pending transition, if any
    ///
    /// Deactivates the outgoing scene and activates the incoming one.
    pub fn process_scene_transition(&mut self) {
        let Some(next) = self.next.take() else {
            return;
        };

        if let Some(outgoing) = self.current_scene_mut() {
            outgoing.set_active(false);
        }

        match self.scenes.get_mut(&next) {
            Some(incoming) => {
                incoming.set_active(true);
                log::info!("Switched to scene '{next}'");
                self.current = Some(next);
            }
            // Unregistered since the request was made
            None => {
                log::warn!("Scene '{next}' vanished before the transition");
                self.current = None;
            }
        }
    }

    /// Deactivate the current scene and clear the selection
    ///
    /// The scene stays registered.
    pub fn unload_current_scene(&mut self) {
        if let Some(scene) = self.current_scene_mut() {
            scene.set_active(false);
        }
        self.current = None;
    }

    /// Remove a scene from the registry, returning it
    ///
    /// Clears the current or pending selection when either names it.
    pub fn unregister_scene(&mut self, name: &str) -> Option<Scene> {
        if self.current.as_deref() == Some(name) {
            self.current = None;
        }
        if self.next.as_deref() == Some(name) {
            self.next = None;
        }
        self.scenes.remove(name)
    }

    /// Scene currently running
    pub fn current_scene(&self) -> Option<&Scene> {
        self.current.as_ref().and_then(|name| self.scenes.get(name))
    }

    /// Mutable access to the scene currently running
    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        self.current.as_ref().and_then(|name| self.scenes.get_mut(name))
    }

    /// Name of the scene currently running
    pub fn current_scene_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Look up a registered scene
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Mutably look up a registered scene
    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    /// Whether a scene is registered under `name`
    pub fn has_scene(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    /// Registered scene names, sorted
    pub fn available_scenes(&self) -> Vec<String> {
        let mut names: Vec<_> = self.scenes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether a transition is waiting to be processed
    pub const fn is_transition_pending(&self) -> bool {
        self.next.is_some()
    }

    /// Update the current scene, if any
    pub fn update(&mut self, delta_time: f32) {
        if let Some(scene) = self.current_scene_mut() {
            scene.update(delta_time);
        }
    }

    /// Human-readable state dump
    pub fn debug_info(&self) -> String {
        let mut info = String::from("Scene Manager\n");
        info += &format!(
            "Current: {}\n",
            self.current.as_deref().unwrap_or("<none>")
        );
        if let Some(next) = &self.next {
            info += &format!("Pending: {next}\n");
        }
        info += &format!("Scenes ({}):\n", self.scenes.len());
        for name in self.available_scenes() {
            info += &format!("  - {name}\n");
        }
        info
    }
}
