//=========================================================================
// Event Collector
//=========================================================================
//
// Game-loop side of the platform channel.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → events → TickControl
//
// Polling is bounded so a flood of input cannot starve the tick. Input
// batches are flattened in arrival order.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::game::TickControl;
use crate::core::input::InputEvent;

//=== EventCollector ======================================================

/// Collects platform events once per tick.
pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    events: Vec<InputEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self { receiver, events: Vec::with_capacity(16) }
    }

    /// Drains pending platform events (bounded to prevent starvation).
    ///
    /// Returns `Exit` when the window closed or the platform went away.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        const MAX_EVENTS_PER_FRAME: usize = 100;

        self.events.clear();
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::Inputs(batch)) => {
                    self.events.extend(batch);
                    drained += 1;
                }
                Ok(PlatformEvent::WindowClosed) => {
                    info!(target: "platform", "Window closed");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {drained} batches this frame");
        }
        TickControl::Continue
    }

    /// Input collected this frame.
    pub(crate) fn events(&self) -> &[InputEvent] {
        &self.events
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::KeyCode;
    use crossbeam_channel::unbounded;

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn collect_flattens_batches_in_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::KeyA)])).unwrap();
        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyUp(KeyCode::KeyA), InputEvent::KeyDown(KeyCode::Space)]))
            .unwrap();

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(
            collector.events(),
            &[InputEvent::KeyDown(KeyCode::KeyA), InputEvent::KeyUp(KeyCode::KeyA), InputEvent::KeyDown(KeyCode::Space)]
        );
    }

    #[test]
    fn collect_clears_previous_events() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::Space)])).unwrap();
        collector.collect_frame();
        assert_eq!(collector.events().len(), 1);

        collector.collect_frame();
        assert!(collector.events().is_empty());
    }

    #[test]
    fn collect_returns_exit_on_window_closed() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);
        tx.send(PlatformEvent::WindowClosed).unwrap();
        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<PlatformEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);
        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }
}
