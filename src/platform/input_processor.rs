//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit keyboard events into engine `InputEvent`s.
//
// Architecture:
//   winit KeyEvent → InputProcessor → InputEvent → InputBuffer
//
// OS auto-repeat is dropped: a held key produces one KeyDown and one
// KeyUp. Keys the engine has no name for are filtered out.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

#[derive(Debug, Default)]
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Converts a winit key event (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        self.translate(key_event.physical_key, key_event.state, key_event.repeat)
    }

    fn translate(&self, key: PhysicalKey, state: ElementState, repeat: bool) -> Option<InputEvent> {
        if repeat {
            return None;
        }
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        let key = KeyCode::from(code);
        if key == KeyCode::Unidentified {
            return None;
        }
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown(key),
            ElementState::Released => InputEvent::KeyUp(key),
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Maps digits, letters, arrows and the common special keys. Everything
/// else becomes `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            W::Digit0 => Self::Digit0, W::Digit1 => Self::Digit1, W::Digit2 => Self::Digit2,
            W::Digit3 => Self::Digit3, W::Digit4 => Self::Digit4, W::Digit5 => Self::Digit5,
            W::Digit6 => Self::Digit6, W::Digit7 => Self::Digit7, W::Digit8 => Self::Digit8,
            W::Digit9 => Self::Digit9,

            W::KeyA => Self::KeyA, W::KeyB => Self::KeyB, W::KeyC => Self::KeyC, W::KeyD => Self::KeyD,
            W::KeyE => Self::KeyE, W::KeyF => Self::KeyF, W::KeyG => Self::KeyG, W::KeyH => Self::KeyH,
            W::KeyI => Self::KeyI, W::KeyJ => Self::KeyJ, W::KeyK => Self::KeyK, W::KeyL => Self::KeyL,
            W::KeyM => Self::KeyM, W::KeyN => Self::KeyN, W::KeyO => Self::KeyO, W::KeyP => Self::KeyP,
            W::KeyQ => Self::KeyQ, W::KeyR => Self::KeyR, W::KeyS => Self::KeyS, W::KeyT => Self::KeyT,
            W::KeyU => Self::KeyU, W::KeyV => Self::KeyV, W::KeyW => Self::KeyW, W::KeyX => Self::KeyX,
            W::KeyY => Self::KeyY, W::KeyZ => Self::KeyZ,

            W::ArrowUp => Self::ArrowUp,
            W::ArrowDown => Self::ArrowDown,
            W::ArrowLeft => Self::ArrowLeft,
            W::ArrowRight => Self::ArrowRight,

            W::Space => Self::Space,
            W::Enter => Self::Enter,
            W::Escape => Self::Escape,
            W::Tab => Self::Tab,
            W::Backspace => Self::Backspace,
            W::Delete => Self::Delete,

            _ => Self::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_map_to_down_and_up() {
        let processor = InputProcessor::new();
        let space = PhysicalKey::Code(WinitKeyCode::Space);
        assert_eq!(processor.translate(space, ElementState::Pressed, false), Some(InputEvent::KeyDown(KeyCode::Space)));
        assert_eq!(processor.translate(space, ElementState::Released, false), Some(InputEvent::KeyUp(KeyCode::Space)));
    }

    #[test]
    fn repeats_are_dropped() {
        let processor = InputProcessor::new();
        let key = PhysicalKey::Code(WinitKeyCode::ArrowUp);
        assert_eq!(processor.translate(key, ElementState::Pressed, true), None);
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(processor.translate(PhysicalKey::Code(WinitKeyCode::F13), ElementState::Pressed, false), None);
    }
}
