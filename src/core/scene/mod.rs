//=========================================================================
// Scene System
//=========================================================================
//
// Data-driven scenes: descriptions loaded from RON, a class registry,
// the timed event queue and the scene runtime.
//
// Architecture:
//   SceneDescription (RON)
//     └─ Scene::load(desc, Registry, GameContext)
//          ├─ objects:  name → lazy description | pre-built object
//          ├─ events:   EventQueue (before + timed)
//          ├─ bus:      NotificationBus → script calls
//          └─ keys:     bound into GameContext::bindings
//
// Flow:
//   ScriptCall → Action::parse() → Scene::run() → spawn / object / call ...
//
//=========================================================================

//=== Module Declarations =================================================

mod action;
mod description;
mod error;
mod params;
mod registry;
mod runtime;
mod scheduler;
mod value;

//=== Public API ==========================================================

pub use action::Action;
pub use description::{
    AudioCue, KeyAction, ObjectSpec, Outcome, SceneDescription, ScriptCall, Subscription, TimedEvent,
};
pub use error::{InvokeError, ParamError, SceneError};
pub use params::Params;
pub use registry::{BuildContext, ControllerFactory, ObjectFactory, Registry, ScriptFunction};
pub use runtime::{Scene, SceneState};
pub use scheduler::EventQueue;
pub use value::{ObjectDescription, Value};
