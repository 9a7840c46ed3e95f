//=========================================================================
// Input Event Types
//
// Defines the internal representation of low-level input events.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// unified, engine-friendly format consumed by the game loop.
//
// Responsibilities:
// - Represent keyboard input in a stable, portable way
// - Provide equality and hashing for deduplication in the platform buffer
// - Make key names usable from scene descriptions (serde)
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    KeyBindings (game-wide table)
//         ↓
//    Scene actions / keyboard controllers
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// For example, `KeyA` is always the same physical key regardless of
/// keyboard layout (QWERTY vs AZERTY).
///
/// Scene descriptions refer to keys by variant name (`Space`, `ArrowUp`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key. Always bound to quitting the game.
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Fallback for keys not explicitly mapped by the input layer.
    Unidentified
}

//=== InputEvent ==========================================================

/// Low-level input event delivered by the platform layer.
///
/// Events are dispatched by the game loop in delivery order.
///
/// # Event Types
///
/// - **KeyDown/KeyUp**: Discrete keyboard events
/// - **Quit**: Window closed or the OS asked the application to exit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down (auto-repeat is filtered by the platform).
    KeyDown(KeyCode),

    /// Key released.
    KeyUp(KeyCode),

    /// Quit requested.
    Quit,
}

impl InputEvent {
    /// Returns the key carried by the event, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => Some(*key),
            Self::Quit => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn key_down_and_key_up_are_distinct() {
        assert_ne!(InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyUp(KeyCode::KeyA));
    }

    #[test]
    fn hashset_deduplicates_identical_events() {
        let mut set = HashSet::new();
        set.insert(InputEvent::KeyDown(KeyCode::Space));
        set.insert(InputEvent::KeyDown(KeyCode::Space));
        set.insert(InputEvent::KeyUp(KeyCode::Space));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn key_accessor() {
        assert_eq!(InputEvent::KeyUp(KeyCode::Enter).key(), Some(KeyCode::Enter));
        assert_eq!(InputEvent::Quit.key(), None);
    }

    #[test]
    fn key_codes_parse_from_ron_by_name() {
        let key: KeyCode = ron::from_str("ArrowUp").unwrap();
        assert_eq!(key, KeyCode::ArrowUp);
    }
}
