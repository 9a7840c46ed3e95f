//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages crossing the thread boundary, and platform errors.
//
//   platform ── PlatformEvent ──▶ game loop
//   platform ◀── CoreEvent ───── game loop
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;
use crate::core::render::Frame;

//=== PlatformEvent =======================================================

/// Events sent from the platform to the game loop.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// Input gathered since the previous redraw, in delivery order.
    Inputs(Vec<InputEvent>),

    /// Window close requested.
    WindowClosed,
}

//=== CoreEvent ===========================================================

/// Events sent from the game loop back to the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// A finished frame, ready to be shown.
    Frame(Frame),

    /// The game stopped; the platform should close the window.
    Exit,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),
}
