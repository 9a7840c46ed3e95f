//=========================================================================
// Keyboard Controller
//=========================================================================
//
// Movement driven by held keys.
//
// The controller and the key bindings share one accumulator through an
// `AxisHandle`. Key-down adds the key's delta, key-up removes it, and
// the controller yields whatever the accumulator holds each tick.
//
// Architecture:
// ```text
// KeyBindings ──(KeyDown/KeyUp)──→ AxisHandle ←── KeyboardController
//                                  (dx, dy)         advance() each tick
// ```
//
// Repeated key-down events for a key already held are ignored, as are
// key-up events for keys that were never pressed, so the accumulator
// cannot drift when the platform drops or duplicates events.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::Controller;
use crate::core::input::KeyCode;

//=== AxisState ===========================================================

#[derive(Debug, Default)]
struct AxisState {
    delta: (f32, f32),
    held: BTreeSet<KeyCode>,
}

//=== AxisHandle ==========================================================

/// Shared `(dx, dy)` accumulator.
///
/// Cloning the handle shares the same accumulator. The game loop is
/// single-threaded, so the handle is `Rc`-based.
#[derive(Debug, Clone, Default)]
pub struct AxisHandle(Rc<RefCell<AxisState>>);

impl AxisHandle {
    /// Adds `delta` unless `key` is already held.
    pub fn press(&self, key: KeyCode, delta: (f32, f32)) {
        let mut state = self.0.borrow_mut();
        if state.held.insert(key) {
            state.delta.0 += delta.0;
            state.delta.1 += delta.1;
        }
    }

    /// Removes `delta` if `key` was held.
    pub fn release(&self, key: KeyCode, delta: (f32, f32)) {
        let mut state = self.0.borrow_mut();
        if state.held.remove(&key) {
            state.delta.0 -= delta.0;
            state.delta.1 -= delta.1;
        }
    }

    /// Current accumulated movement.
    pub fn value(&self) -> (f32, f32) {
        self.0.borrow().delta
    }

    /// True when both handles share one accumulator.
    pub fn same_as(&self, other: &AxisHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

//=== KeyboardController ==================================================

/// Yields the shared accumulator on every tick. Never exhausts.
#[derive(Debug, Clone)]
pub struct KeyboardController {
    axis: AxisHandle,
}

impl KeyboardController {
    pub fn new(axis: AxisHandle) -> Self {
        Self { axis }
    }

    pub fn axis(&self) -> &AxisHandle {
        &self.axis
    }
}

impl Controller for KeyboardController {
    fn advance(&mut self) -> Option<(f32, f32)> {
        Some(self.axis.value())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
