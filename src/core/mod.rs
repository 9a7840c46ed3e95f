//=========================================================================
// Core Systems Orchestrator
//
// Runs the game on the logic (non-platform) thread.
//
// Responsibilities:
// - Build the game on the logic thread (scenes and entities never cross
//   threads)
// - Receive platform input through the bridge channel
// - Tick the game at a fixed frame rate
// - Send finished frames, and the final exit, back to the platform
//
// Notes:
// The orchestrator runs independently from the platform layer. The only
// communication is message passing over crossbeam channels.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::thread;
use std::time::{Duration, Instant};

//=== External Crates =====================================================
use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{error, info, trace};

//=== Modules =============================================================
pub mod audio;
pub mod collision;
pub mod config;
pub mod controller;
pub mod entity;
pub mod game;
pub mod globals;
pub mod input;
pub mod message_bus;
pub mod platform_bridge;
pub mod render;
pub mod scene;

//=== Internal Modules ====================================================
use game::{Game, GameError, TickControl};
use platform_bridge::{CoreEvent, EventCollector, PlatformEvent};
use render::DrawList;

//=== GameFactory =========================================================
//
// Builds the game on the logic thread. Only the factory crosses the
// thread boundary.
//
pub type GameFactory = Box<dyn FnOnce() -> Result<Game, GameError> + Send>;

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator {
    factory: GameFactory,
    surface_size: (u32, u32),
}

impl CoreSystemsOrchestrator {
    //--- Construction -----------------------------------------------------

    pub fn new(factory: GameFactory, surface_size: (u32, u32)) -> Self {
        Self { factory, surface_size }
    }

    //--- spawn_core_thread() ---------------------------------------------
    //
    // Spawns the logic thread. Each tick:
    //  1. Collects input from the platform (exit on window close)
    //  2. Ticks the game
    //  3. Hands the presented frame to the platform
    //  4. Sleeps to keep the frame rate
    //
    // `CoreEvent::Exit` is always the last message sent.
    //
    pub fn spawn_core_thread(
        self,
        receiver: Receiver<PlatformEvent>,
        presenter: Sender<CoreEvent>,
    ) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            let (width, height) = self.surface_size;
            match (self.factory)() {
                Ok(game) => Self::run_game(game, receiver, &presenter, DrawList::new(width, height)),
                Err(e) => error!(target: "game", "Could not start the game: {e}"),
            }
            let _ = presenter.send(CoreEvent::Exit);
            info!(target: "game", "Core thread exiting.");
        })
    }

    fn run_game(mut game: Game, receiver: Receiver<PlatformEvent>, presenter: &Sender<CoreEvent>, mut surface: DrawList) {
        let frame_duration = Duration::from_millis(game.frame_ms());
        let mut collector = EventCollector::new(receiver);

        loop {
            let frame_start = Instant::now();

            //--- Step 1: Gather platform events ------------------------
            if collector.collect_frame() == TickControl::Exit {
                game.stop();
                break;
            }

            //--- Step 2: Tick ------------------------------------------
            match game.tick(collector.events(), &mut surface) {
                Ok(TickControl::Continue) => {}
                Ok(TickControl::Exit) => break,
                Err(e) => {
                    error!(target: "game", "Game stopped on error: {e}");
                    game.stop();
                    break;
                }
            }

            //--- Step 3: Present ---------------------------------------
            if let Some(frame) = surface.take_presented() {
                match presenter.try_send(CoreEvent::Frame(frame)) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => trace!(target: "game", "Platform behind, frame dropped"),
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }

            //--- Step 4: Maintain pacing -------------------------------
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            }
        }
        info!(target: "game", "Game finished after {} frames", game.frames());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
