//! Specialized collection types
//!
//! Entities live in a generation-checked arena so that handles held by
//! components, collision results, and systems can never dangle: once an
//! entity is removed its handle simply stops resolving.

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Generation-checked handle to an entity stored in a scene's arena
    pub struct EntityHandle;
}

/// Arena storing values addressed by [`EntityHandle`]
pub type HandleMap<T> = SlotMap<EntityHandle, T>;
