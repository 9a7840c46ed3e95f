//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use genesis::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine facade
pub use crate::engine::{build_game, Engine, EngineBuilder};

// Configuration and game loop
pub use crate::core::config::GameConfig;
pub use crate::core::game::{Game, GameError, GameState, TickControl};
pub use crate::core::globals::GameContext;

// Entities
pub use crate::core::entity::{Collidable, EntityId, GameObject, Killable, Movable, ObjectContext, Role};

// Input
pub use crate::core::input::{InputEvent, KeyCode, KeyPhase};

// Scenes and scripting
pub use crate::core::scene::{ObjectDescription, Params, Registry, Scene, SceneDescription, SceneError, Value};

// Rendering
pub use crate::core::render::{Color, DrawList, Surface};
