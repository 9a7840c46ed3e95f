//=========================================================================
// Scene Transitions
//=========================================================================
//
// What happens after a scene stops.
//
// The outcome (`game_over` when the game-over flag is set, otherwise
// `end_scene`) selects an entry of the stopped scene's `next_scene`
// map. A missing entry ends the game.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::globals::GameContext;
use crate::core::scene::{Outcome, Scene};

//=== SceneTransition =====================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneTransition {
    /// Load the named scene next.
    Next(String),

    /// No next scene: the game stops.
    Stop,
}

impl SceneTransition {
    /// Resolves the transition of a stopped scene and clears the
    /// game-over flag.
    pub fn after(scene: &Scene, world: &mut GameContext) -> (Outcome, Self) {
        let outcome = if world.is_game_over() { Outcome::GameOver } else { Outcome::EndScene };
        world.clear_game_over();
        let transition = match scene.next(outcome) {
            Some(name) => Self::Next(name.to_string()),
            None => Self::Stop,
        };
        (outcome, transition)
    }
}
