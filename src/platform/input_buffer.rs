//=========================================================================
// Input Buffer
//
// Holds the input gathered between two redraws. Order is preserved and
// identical consecutive events are collapsed.
//
//=========================================================================

//=== Internal Modules ====================================================
use crate::core::input::InputEvent;

//=== InputBuffer Struct ==================================================

pub(crate) struct InputBuffer {
    events: Vec<InputEvent>,
}

impl InputBuffer {
    pub(crate) fn new() -> Self {
        Self { events: Vec::with_capacity(32) }
    }

    //--- Push -------------------------------------------------------------
    //
    // Appends an event unless it repeats the previous one.
    //
    pub(crate) fn push(&mut self, event: InputEvent) {
        if self.events.last() != Some(&event) {
            self.events.push(event);
        }
    }

    //--- Drain ------------------------------------------------------------
    //
    // Returns the buffered events, or `None` when there are none.
    //
    pub(crate) fn drain(&mut self) -> Option<Vec<InputEvent>> {
        if self.events.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.events))
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.events.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;

    #[test]
    fn consecutive_duplicates_collapse() {
        let mut buffer = InputBuffer::new();
        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        buffer.push(InputEvent::KeyUp(KeyCode::KeyA));
        buffer.push(InputEvent::KeyDown(KeyCode::KeyA));
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn drain_empties_and_keeps_order() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.drain().is_none());

        buffer.push(InputEvent::KeyDown(KeyCode::Space));
        buffer.push(InputEvent::KeyUp(KeyCode::Space));
        assert_eq!(
            buffer.drain(),
            Some(vec![InputEvent::KeyDown(KeyCode::Space), InputEvent::KeyUp(KeyCode::Space)])
        );
        assert!(buffer.is_empty());
    }
}
