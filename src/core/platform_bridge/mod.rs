//=========================================================================
// Platform Bridge
//=========================================================================
//
// Contract between the platform layer (winit) and the game loop.
//
// The game loop never touches winit types: it receives `PlatformEvent`s
// and answers with `CoreEvent`s, so the windowing backend can change
// without touching game code.
//
// Components:
// - `interface`: message and error types (the contract)
// - `event_collector`: game-loop side event collection
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::EventCollector;
pub use interface::{CoreEvent, PlatformError, PlatformEvent};
