//=========================================================================
// Scene Description
//=========================================================================
//
// Declarative scene format, one RON file per scene.
//
// ```ron
// (
//     name: "intro",
//     objects: {
//         "background": Class(class: "Starfield", init: {"size": Game("canvas_size")}),
//         "score": Shared("score"),
//     },
//     audio: {"music": (filename: "media/sound/music.ogg", loop: true, autostart: true)},
//     before: [("spawn", [List([Str("background"), Str("score")])])],
//     events: [(350, 350, ("object", [Str("press_space"), Str("blink")]))],
//     on_key: [(key: Space, call: ("end_scene", []))],
//     next_scene: {"end_scene": "stage1"},
// )
// ```
//
// Parsing validates syntax only. Action names, classes and markers are
// checked when the scene loads.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::error::SceneError;
use super::value::{ObjectDescription, Value};
use crate::core::input::{KeyCode, KeyPhase};
use crate::core::message_bus::LifecycleEvent;

//=== ScriptCall ==========================================================

/// A named action with its arguments: `("spawn", [Str("ufo")])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptCall(String, Vec<Value>);

impl ScriptCall {
    pub fn new(action: impl Into<String>, args: Vec<Value>) -> Self {
        Self(action.into(), args)
    }

    pub fn action(&self) -> &str {
        &self.0
    }

    pub fn args(&self) -> &[Value] {
        &self.1
    }
}

//=== TimedEvent ==========================================================

/// `(delay_ms, recurrence_ms, call)`. A recurrence of 0 fires once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent(pub i64, pub i64, pub ScriptCall);

//=== KeyAction ===========================================================

/// Scene key binding. Fires on key release unless `phase` says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyAction {
    pub key: KeyCode,
    #[serde(default)]
    pub phase: KeyPhase,
    pub call: ScriptCall,
}

//=== AudioCue ============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioCue {
    pub filename: String,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub autostart: bool,
}

//=== Subscription ========================================================

/// Runs `calls` when the object named `source` (or `*`) publishes `event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub source: String,
    pub event: LifecycleEvent,
    pub calls: Vec<ScriptCall>,
}

//=== ObjectSpec ==========================================================

/// Entry of a scene's object table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectSpec {
    /// Built from its description each time it is spawned.
    Class {
        class: String,
        #[serde(default)]
        init: BTreeMap<String, Value>,
    },

    /// Borrowed from the game's shared-object shelf for the scene's life.
    Shared(String),
}

impl From<ObjectDescription> for ObjectSpec {
    fn from(d: ObjectDescription) -> Self {
        Self::Class { class: d.class, init: d.init }
    }
}

//=== Outcome =============================================================

/// How a scene ended. Selects the entry of `next_scene`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    EndScene,
    GameOver,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EndScene => "end_scene",
            Self::GameOver => "game_over",
        }
    }
}

//=== SceneDescription ====================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    pub name: String,
    #[serde(default)]
    pub objects: BTreeMap<String, ObjectSpec>,
    /// Named controller descriptions, referenced with `Behavior(name)`.
    #[serde(default)]
    pub behaviors: BTreeMap<String, ObjectDescription>,
    #[serde(default)]
    pub audio: BTreeMap<String, AudioCue>,
    #[serde(default)]
    pub before: Vec<ScriptCall>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
    #[serde(default)]
    pub on_key: Vec<KeyAction>,
    /// Outcome name (`end_scene` / `game_over`) to scene name.
    #[serde(default)]
    pub next_scene: BTreeMap<String, String>,
    #[serde(default)]
    pub notifications: Vec<Subscription>,
}

impl SceneDescription {
    /// Empty description named `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn from_ron_str(source: &str, origin: &str) -> Result<Self, SceneError> {
        ron::from_str(source).map_err(|source| SceneError::Parse { origin: origin.to_string(), source })
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| SceneError::Io { path: path.to_path_buf(), source })?;
        Self::from_ron_str(&contents, &path.display().to_string())
    }

    /// Scene to run after ending with `outcome`.
    pub fn next(&self, outcome: Outcome) -> Option<&str> {
        self.next_scene.get(outcome.as_str()).map(String::as_str)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
