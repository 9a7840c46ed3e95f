//=========================================================================
// Key Bindings
//=========================================================================
//
// Game-wide table mapping key events to their handlers.
//
// Architecture:
//   (key, phase) → HashMap → KeyBinding
//
// A binding either queues a scripted action on the current scene or
// feeds a keyboard controller's accumulator. Scenes bind keys while they
// load and unbind them when they end; the table itself lives on the game
// context so it outlives any one scene.
//
// Escape is reserved for quitting and can never be bound.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};
use crate::core::controller::AxisHandle;
use crate::core::scene::ScriptCall;

//=== KeyPhase ============================================================

/// Which edge of a key press a binding reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum KeyPhase {
    Down,
    #[default]
    Up,
}

//=== KeyBinding ==========================================================

/// Handler attached to a `(key, phase)` pair.
#[derive(Debug, Clone)]
pub enum KeyBinding {
    /// Queue a scripted action on the running scene.
    Script(ScriptCall),

    /// Add (`Down`) or remove (`Up`) `delta` from a shared accumulator.
    Axis { axis: AxisHandle, delta: (f32, f32) },
}

/// A binding made by an object's factory. Objects carry these between
/// scenes so whoever borrows them can bind the keys again.
#[derive(Debug, Clone)]
pub struct BoundKey {
    pub key: KeyCode,
    pub phase: KeyPhase,
    pub binding: KeyBinding,
}

//=== KeyBindings =========================================================

/// Maps key events to bindings. Escape is never bindable.
#[derive(Debug, Default)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyPhase), KeyBinding>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Binding API ------------------------------------------------------

    /// Binds `key` in `phase`, replacing any earlier binding.
    ///
    /// Returns `false` (and binds nothing) for Escape.
    pub fn bind(&mut self, key: KeyCode, phase: KeyPhase, binding: KeyBinding) -> bool {
        if key == KeyCode::Escape {
            warn!(target: "game", "Escape is reserved for quitting; binding ignored");
            return false;
        }
        if self.bindings.insert((key, phase), binding).is_some() {
            debug!(target: "game", "Rebound {key:?} ({phase:?})");
        }
        true
    }

    /// Removes the bindings of `key` for both phases.
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&(key, KeyPhase::Down));
        self.bindings.remove(&(key, KeyPhase::Up));
    }

    /// Drops every binding.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    //--- Queries ----------------------------------------------------------

    pub fn lookup(&self, key: KeyCode, phase: KeyPhase) -> Option<&KeyBinding> {
        self.bindings.get(&(key, phase))
    }

    pub fn is_bound(&self, key: KeyCode) -> bool {
        self.lookup(key, KeyPhase::Down).is_some() || self.lookup(key, KeyPhase::Up).is_some()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    //--- Event Dispatch ---------------------------------------------------

    /// Applies the binding matching `event`.
    ///
    /// Axis bindings update their accumulator in place; script bindings
    /// are returned for the caller to run on the current scene.
    pub fn dispatch(&self, event: &InputEvent) -> Option<ScriptCall> {
        let (key, phase) = match *event {
            InputEvent::KeyDown(key) => (key, KeyPhase::Down),
            InputEvent::KeyUp(key) => (key, KeyPhase::Up),
            InputEvent::Quit => return None,
        };
        match self.lookup(key, phase)? {
            KeyBinding::Script(call) => Some(call.clone()),
            KeyBinding::Axis { axis, delta } => {
                match phase {
                    KeyPhase::Down => axis.press(key, *delta),
                    KeyPhase::Up => axis.release(key, *delta),
                }
                None
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
