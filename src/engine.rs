//=========================================================================
// Genesis Engine
//
// Main entry point and coordinator for the game.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ from_config_file()      └─ spawns the logic thread
//         └─ with_channel_capacity()    runs the platform
//                                       blocks until exit
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

//=== Internal Dependencies ===============================================

use crate::core::audio::CueMixer;
use crate::core::config::{ConfigError, GameConfig};
use crate::core::game::{Game, GameError};
use crate::core::globals::GameContext;
use crate::core::platform_bridge::{CoreEvent, PlatformError, PlatformEvent};
use crate::core::scene::{Registry, SceneDescription};
use crate::core::{CoreSystemsOrchestrator, GameFactory};
use crate::objects;
use crate::platform::{Platform, WindowSettings};

/// Frames the logic thread may run ahead of the window.
const FRAME_BUFFER: usize = 2;

//=== build_game ==========================================================

/// Builds a ready-to-tick game from `config`.
///
/// Registers the built-in classes and the game objects, seeds the
/// generator, loads every scene file, shelves the shared objects and
/// enters `first_scene`.
pub fn build_game(config: &GameConfig) -> Result<Game, GameError> {
    let mut registry = Registry::with_builtins();
    objects::register(&mut registry);

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut world = GameContext::new(config.width, config.height, Box::new(CueMixer::new(config.mute)), rng);
    for (name, value) in &config.variables {
        world.set_variable(name, value.clone());
    }

    let mut game = Game::new(registry, world, config.fps);
    for path in &config.scenes {
        game.add_scene(SceneDescription::load_from_file(path)?);
    }
    for (name, desc) in &config.shared {
        game.add_shared(name, desc)?;
    }
    game.start(&config.first_scene)?;
    Ok(game)
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Configuration**: [`GameConfig::default`]
/// - **Channel capacity**: 128 input batches
///
/// # Examples
///
/// ```no_run
/// use genesis::EngineBuilder;
///
/// EngineBuilder::from_config_file("assets/genesis.ron")
///     .expect("configuration")
///     .build()
///     .run()
///     .expect("platform");
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    channel_capacity: usize,
}

impl EngineBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self { config, channel_capacity: 128 }
    }

    /// Loads the configuration from a RON file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::new(GameConfig::load_from_file(path)?))
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn build(self) -> Engine {
        info!(
            target: "game",
            "Building engine ({}x{} @ {} fps, channel: {})",
            self.config.width, self.config.height, self.config.fps, self.channel_capacity
        );
        Engine { config: self.config, channel_capacity: self.channel_capacity }
    }
}

//=== Engine ==============================================================

/// Genesis runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ fps)
///   │     └─► Game: scenes, entities, collisions
///   │
///   └─► Platform (Event Loop)
///         └─► Window, keyboard
///
/// Communication: crossbeam channels (PlatformEvent / CoreEvent)
/// ```
pub struct Engine {
    config: GameConfig,
    channel_capacity: usize,
}

impl Engine {
    /// Starts the game and blocks until the window closes or the game
    /// ends.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the input and frame channels
    /// 2. Spawns the logic thread, which builds the game from the config
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Joins the logic thread
    pub fn run(self) -> Result<(), PlatformError> {
        info!(target: "game", "Starting '{}'", self.config.title);

        //--- 1. Create communication channels ----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(self.channel_capacity);
        let (frame_tx, frame_rx): (Sender<CoreEvent>, Receiver<CoreEvent>) = bounded(FRAME_BUFFER);

        //--- 2. Spawn the core logic thread -------------------------------
        let config = self.config.clone();
        let factory: GameFactory = Box::new(move || build_game(&config));
        let orchestrator = CoreSystemsOrchestrator::new(factory, (self.config.width, self.config.height));
        let core_handle = orchestrator.spawn_core_thread(rx, frame_tx);
        info!(target: "game", "Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let settings = WindowSettings {
            title: self.config.title.clone(),
            width: self.config.width,
            height: self.config.height,
        };
        let result = Platform::new(tx, frame_rx, settings).run();
        if let Err(e) = &result {
            error!(target: "platform", "Platform error: {e}");
        }
        info!(target: "platform", "Platform event loop exited");

        //--- 4. Cleanup: wait for the logic thread ------------------------
        match core_handle.join() {
            Ok(()) => info!(target: "game", "Core thread terminated cleanly"),
            Err(e) => error!(target: "game", "Core thread panicked: {e:?}"),
        }

        info!(target: "game", "Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game::GameState;
    use crate::core::scene::{ObjectDescription, Value};
    use std::io::Write;

    fn scene_file(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(format!("{name}.ron"));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{body}").unwrap();
        path
    }

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new(GameConfig::default());
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.config().fps, 60);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let engine = EngineBuilder::new(GameConfig::default()).with_channel_capacity(256).build();
        assert_eq!(engine.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new(GameConfig::default()).with_channel_capacity(0);
    }

    #[test]
    fn missing_config_file_is_reported() {
        assert!(matches!(EngineBuilder::from_config_file("/nonexistent/genesis.ron"), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn build_game_loads_scenes_shared_objects_and_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = scene_file(dir.path(), "title", r#"(name: "title", objects: {"score": Shared("score")})"#);
        let mut config = GameConfig {
            seed: Some(1),
            scenes: vec![path],
            first_scene: "title".into(),
            ..GameConfig::default()
        };
        config.shared.insert("score".into(), ObjectDescription::new("Score"));
        config.variables.insert("difficulty".into(), Value::Int(2));

        let game = build_game(&config).unwrap();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.scene().map(|s| s.name()), Some("title"));
        assert_eq!(game.world().variable("difficulty"), Some(&Value::Int(2)));
        // Borrowed from the shelf by the running scene.
        assert!(!game.world().has_shared("score"));
    }

    #[test]
    fn unknown_first_scene_fails() {
        let config = GameConfig { first_scene: "nowhere".into(), ..GameConfig::default() };
        assert!(matches!(build_game(&config), Err(GameError::UnknownScene(_))));
    }
}
