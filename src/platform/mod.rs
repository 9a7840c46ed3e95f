//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the game loop thread over
// crossbeam channels.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  Game loop       │
//  │   ↓                      │    │   ↓              │
//  │  InputProcessor          │    │  Scene tick      │
//  │   ↓                      │    │   ↓              │
//  │  InputBuffer             │    │  DrawList        │
//  │   ↓ (RedrawRequested)    │    │                  │
//  │  PlatformEvent ──────────┼───▶│                  │
//  │  CoreEvent ◀─────────────┼────┤                  │
//  └──────────────────────────┘    └──────────────────┘
// ```
//
// RedrawRequested is the frame boundary: buffered input is sent as one
// batch, then finished frames are drained. `CoreEvent::Exit` closes the
// event loop.
//
// Frames are not presented. The platform counts each `DrawList` and drops
// it; nothing rasterises draw commands, so the window stays blank.
//
// Winit requires the main thread on macOS/iOS, so this runs on the
// thread that called `Engine::run()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowSettings ======================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

//=== Platform ============================================================

/// Window owner and input aggregator.
///
/// Not Send: it stays on the main thread and talks to the game loop only
/// through its channels. The window is created lazily in `resumed()`.
pub(crate) struct Platform {
    window: Option<Window>,
    settings: WindowSettings,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    frames: Receiver<CoreEvent>,
    input_processor: InputProcessor,
    last_frame: u64,
    core_finished: bool,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub fn new(event_sender: Sender<PlatformEvent>, frames: Receiver<CoreEvent>, settings: WindowSettings) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            buffer: InputBuffer::new(),
            event_sender,
            frames,
            input_processor: InputProcessor::new(),
            last_frame: 0,
            core_finished: false,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes or the game exits.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] when the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop.run_app(&mut self).map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the game loop. Empty buffers are not sent,
    /// and nothing is sent once the game loop has finished.
    fn flush_input_buffer(&mut self) {
        if self.core_finished {
            return;
        }
        if let Some(events) = self.buffer.drain() {
            let count = events.len();
            trace!(target: "platform::input", "Flushing {count} input events");

            if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
                warn!(target: "platform::input", "Channel disconnected, dropping {count} events");
            }
        }
    }

    /// Drains finished frames without drawing them. Returns `true` once
    /// the game loop is done.
    fn drain_core_events(&mut self) -> bool {
        loop {
            match self.frames.try_recv() {
                Ok(CoreEvent::Frame(frame)) => {
                    trace!(
                        target: "platform::render",
                        "Frame {} with {} draw commands",
                        frame.number,
                        frame.commands.len()
                    );
                    self.last_frame = frame.number;
                }
                Ok(CoreEvent::Exit) => {
                    info!(target: "platform", "Game loop finished after frame {}", self.last_frame);
                    self.core_finished = true;
                    return true;
                }
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    self.core_finished = true;
                    return true;
                }
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_resizable(false)
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {e}");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: winit::window::WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                if !self.core_finished {
                    let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                }
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.input_processor.process_key_event(key_event) {
                    self.buffer.push(event);
                } else {
                    trace!(target: "platform::input", "Key ignored");
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();
                if self.drain_core_events() {
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
