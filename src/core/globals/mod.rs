//=========================================================================
// Global Game State
//=========================================================================
//
// State shared by every scene of a run.
//
// Architecture:
//   Game (state machine) owns GameContext
//   GameContext: bounds, variables, bindings, mixer, shelf, rng, timers
//
//=========================================================================

//=== Module Declarations =================================================

mod game_context;
mod timers;

//=== Public API ==========================================================

pub use game_context::{GameContext, SharedObject};
pub use timers::GameTimers;
