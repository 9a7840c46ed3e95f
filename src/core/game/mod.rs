//=========================================================================
// Game Loop
//=========================================================================
//
// The game state machine and scene transitions.
//
// Architecture:
//   Game
//     ├─ scenes:  name → SceneDescription (loaded fresh on transition)
//     ├─ current: Scene
//     └─ world:   GameContext
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Module Declarations =================================================

mod game_loop;
mod transition;

//=== Public API ==========================================================

pub use game_loop::{Game, GameState, TickControl};
pub use transition::SceneTransition;

use crate::core::scene::SceneError;

//=== GameError ===========================================================

#[derive(Debug, Error)]
pub enum GameError {
    #[error("no scene named '{0}'")]
    UnknownScene(String),

    #[error("the game was already started")]
    AlreadyStarted,

    #[error(transparent)]
    Scene(#[from] SceneError),
}
