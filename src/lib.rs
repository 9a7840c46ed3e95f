//=========================================================================
// Genesis Library Root
//
// A 2D arcade shooter on a scene-scripted mini engine.
//
// Responsibilities:
// - Expose the engine facade (`EngineBuilder`, `Engine`, `build_game`)
// - Expose the engine core and the game objects for scripting and tests
// - Keep the windowing layer (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use genesis::EngineBuilder;
//
// fn main() {
//     let engine = EngineBuilder::from_config_file("assets/genesis.ron").unwrap().build();
//     engine.run().unwrap();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine: scenes, scripting, entities, collisions,
// input bindings and the game loop.
//
// `objects` holds the game's entity classes (player, enemies, score...)
// and registers them with a scene registry.
//
pub mod core;
pub mod objects;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit window and event loop and is kept
// private. `engine` wires the platform to the logic thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{build_game, Engine, EngineBuilder};
