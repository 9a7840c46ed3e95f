//=========================================================================
// Input System
//
// Engine-side representation of player input.
//
// Responsibilities:
// - Portable key and event types produced by the platform layer
// - The game-wide key-binding table consulted by the game loop
//
// Notes:
// Events reach the game loop in delivery order, one batch per platform
// flush. The loop dispatches every event of a batch before running the
// collision and update passes of the same tick.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod bindings;
pub mod event;

//=== Public Re-exports ===================================================

pub use bindings::{BoundKey, KeyBinding, KeyBindings, KeyPhase};
pub use event::{InputEvent, KeyCode};
