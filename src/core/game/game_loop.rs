//=========================================================================
// Game
//=========================================================================
//
// Owns the current scene and drives it one fixed tick at a time.
//
// States:
//   Idle → Running(scene) → … → Stopped
//
// Tick order:
//   1. scene.frame()          advance scene clock, fire due events
//   2. input                  quit / Escape / key bindings, game timers
//   3. verify_collisions()
//   4. update_objects()
//   5. clear, draw, present
//   6. scene stopped?         load the next scene or stop the game
//
// The tick is independent of wall-clock time: every frame advances the
// scene by `1000 / fps` milliseconds. Pacing is the caller's concern.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::transition::SceneTransition;
use super::GameError;
use crate::core::entity::EntityId;
use crate::core::globals::GameContext;
use crate::core::input::{InputEvent, KeyCode};
use crate::core::render::Surface;
use crate::core::scene::{ObjectDescription, Registry, Scene, SceneDescription};

//=== GameState ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Idle,
    Running,
    Stopped,
}

//=== TickControl =========================================================

/// Whether the caller should keep ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== Game ================================================================

pub struct Game {
    state: GameState,
    registry: Rc<Registry>,
    scenes: HashMap<String, SceneDescription>,
    current: Option<Scene>,
    world: GameContext,
    frame_ms: u64,
    frames: u64,
}

impl Game {
    //--- Construction -----------------------------------------------------

    /// Creates an idle game ticking at `fps` frames per second.
    pub fn new(registry: Registry, world: GameContext, fps: u32) -> Self {
        Self {
            state: GameState::Idle,
            registry: Rc::new(registry),
            scenes: HashMap::new(),
            current: None,
            world,
            frame_ms: u64::from((1000 / fps.max(1)).max(1)),
            frames: 0,
        }
    }

    /// Makes `desc` available for transitions, replacing any scene with
    /// the same name.
    pub fn add_scene(&mut self, desc: SceneDescription) {
        if self.scenes.contains_key(&desc.name) {
            warn!(target: "game", "Scene '{}' was already added and has been replaced", desc.name);
        }
        debug!(target: "game", "Added scene '{}'", desc.name);
        self.scenes.insert(desc.name.clone(), desc);
    }

    /// Builds `desc` and places it on the shared shelf as `name`.
    pub fn add_shared(&mut self, name: &str, desc: &ObjectDescription) -> Result<EntityId, GameError> {
        let mut scratch = Scene::load(SceneDescription::named("shared"), Rc::clone(&self.registry), &mut self.world)?;
        let shared = scratch.build_detached(desc, &mut self.world)?;
        scratch.end_scene(&mut self.world);
        let id = shared.id;
        self.world.shelve(name, shared);
        Ok(id)
    }

    /// Loads `first` and enters the running state.
    pub fn start(&mut self, first: &str) -> Result<(), GameError> {
        if self.state != GameState::Idle {
            return Err(GameError::AlreadyStarted);
        }
        self.current = Some(self.load_scene(first)?);
        self.state = GameState::Running;
        info!(target: "game", "Game started with scene '{first}'");
        Ok(())
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.current.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.current.as_mut()
    }

    pub fn world(&self) -> &GameContext {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut GameContext {
        &mut self.world
    }

    /// Milliseconds each tick advances the scene by.
    pub fn frame_ms(&self) -> u64 {
        self.frame_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one frame with the input gathered since the previous one.
    pub fn tick(&mut self, events: &[InputEvent], surface: &mut dyn Surface) -> Result<TickControl, GameError> {
        if self.state != GameState::Running {
            return Ok(TickControl::Exit);
        }
        let Some(scene) = self.current.as_mut() else {
            self.stop();
            return Ok(TickControl::Exit);
        };
        let world = &mut self.world;
        self.frames += 1;
        trace!(target: "game", "Tick {}", self.frames);

        scene.frame(self.frame_ms, world)?;

        for event in events {
            match event {
                InputEvent::Quit | InputEvent::KeyUp(KeyCode::Escape) => {
                    info!(target: "game", "Quit requested");
                    self.stop();
                    return Ok(TickControl::Exit);
                }
                _ => {
                    if let Some(call) = world.bindings.dispatch(event) {
                        scene.run(&call, world)?;
                    }
                }
            }
        }
        for call in world.timers.advance(self.frame_ms) {
            if scene.is_stopped() {
                break;
            }
            scene.run(&call, world)?;
        }

        scene.verify_collisions(world.bounds());
        scene.update_objects(world)?;

        surface.clear();
        scene.draw(surface);
        surface.present();

        if scene.is_stopped() {
            let (outcome, transition) = SceneTransition::after(scene, world);
            debug!(target: "game", "Scene '{}' stopped with '{}'", scene.name(), outcome.as_str());
            match transition {
                SceneTransition::Next(name) => {
                    self.current = None;
                    self.current = Some(self.load_scene(&name)?);
                }
                SceneTransition::Stop => {
                    info!(target: "game", "No scene follows '{}'", outcome.as_str());
                    self.stop();
                    return Ok(TickControl::Exit);
                }
            }
        }
        Ok(TickControl::Continue)
    }

    /// Stops the game, ending the current scene.
    pub fn stop(&mut self) {
        if let Some(scene) = self.current.as_mut() {
            scene.end_scene(&mut self.world);
        }
        self.current = None;
        self.state = GameState::Stopped;
    }

    fn load_scene(&mut self, name: &str) -> Result<Scene, GameError> {
        let desc = self
            .scenes
            .get(name)
            .cloned()
            .ok_or_else(|| GameError::UnknownScene(name.to_string()))?;
        Ok(Scene::load(desc, Rc::clone(&self.registry), &mut self.world)?)
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("scene", &self.current.as_ref().map(Scene::name))
            .field("frame_ms", &self.frame_ms)
            .field("frames", &self.frames)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::audio::CueMixer;
    use crate::core::input::KeyPhase;
    use crate::core::render::DrawList;
    use crate::core::scene::{KeyAction, ScriptCall, TimedEvent};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn game() -> Game {
        let world = GameContext::new(640, 480, Box::new(CueMixer::new(true)), StdRng::seed_from_u64(1));
        Game::new(Registry::with_builtins(), world, 50)
    }

    fn scene(name: &str, end_after: i64, next: &[(&str, &str)]) -> SceneDescription {
        let mut desc = SceneDescription::named(name);
        desc.events.push(TimedEvent(end_after, 0, ScriptCall::new("end_scene", vec![])));
        for (outcome, target) in next {
            desc.next_scene.insert(outcome.to_string(), target.to_string());
        }
        desc
    }

    #[test]
    fn frame_time_follows_fps() {
        let game = game();
        assert_eq!(game.frame_ms(), 20);
        assert_eq!(game.state(), GameState::Idle);
    }

    #[test]
    fn scene_clock_advances_at_any_rate() {
        let world = GameContext::new(640, 480, Box::new(CueMixer::new(true)), StdRng::seed_from_u64(1));
        let game = Game::new(Registry::with_builtins(), world, 5000);
        assert_eq!(game.frame_ms(), 1);
    }

    #[test]
    fn start_requires_a_known_scene() {
        let mut game = game();
        assert!(matches!(game.start("nowhere"), Err(GameError::UnknownScene(_))));
        game.add_scene(scene("a", 1000, &[]));
        game.start("a").unwrap();
        assert!(matches!(game.start("a"), Err(GameError::AlreadyStarted)));
    }

    #[test]
    fn stopped_scene_moves_to_its_next_scene() {
        let mut game = game();
        game.add_scene(scene("a", 40, &[("end_scene", "b")]));
        game.add_scene(scene("b", 10_000, &[]));
        game.start("a").unwrap();

        let mut surface = DrawList::new(640, 480);
        assert_eq!(game.tick(&[], &mut surface).unwrap(), TickControl::Continue);
        assert_eq!(game.scene().unwrap().name(), "a");
        assert_eq!(game.tick(&[], &mut surface).unwrap(), TickControl::Continue);
        assert_eq!(game.scene().unwrap().name(), "b");
        assert_eq!(surface.frames_presented(), 2);
    }

    #[test]
    fn game_over_outcome_selects_its_entry() {
        let mut game = game();
        let mut a = SceneDescription::named("a");
        a.before.push(ScriptCall::new("game_over", vec![]));
        a.next_scene.insert("end_scene".into(), "wrong".into());
        a.next_scene.insert("game_over".into(), "over".into());
        game.add_scene(a);
        game.add_scene(scene("over", 10_000, &[]));
        game.start("a").unwrap();

        game.tick(&[], &mut DrawList::new(640, 480)).unwrap();
        assert_eq!(game.scene().unwrap().name(), "over");
        assert!(!game.world().is_game_over());
    }

    #[test]
    fn missing_next_scene_stops_the_game() {
        let mut game = game();
        game.add_scene(scene("only", 0, &[]));
        game.start("only").unwrap();
        assert_eq!(game.tick(&[], &mut DrawList::new(640, 480)).unwrap(), TickControl::Exit);
        assert_eq!(game.state(), GameState::Stopped);
        assert_eq!(game.tick(&[], &mut DrawList::new(640, 480)).unwrap(), TickControl::Exit);
    }

    #[test]
    fn escape_and_quit_always_stop() {
        for event in [InputEvent::KeyUp(KeyCode::Escape), InputEvent::Quit] {
            let mut game = game();
            game.add_scene(scene("a", 10_000, &[]));
            game.start("a").unwrap();
            let control = game.tick(&[event], &mut DrawList::new(640, 480)).unwrap();
            assert_eq!(control, TickControl::Exit);
            assert!(!game.is_running());
        }
    }

    #[test]
    fn bound_keys_run_scene_calls() {
        let mut game = game();
        let mut a = scene("a", 10_000, &[("end_scene", "b")]);
        a.on_key.push(KeyAction { key: KeyCode::Space, phase: KeyPhase::Up, call: ScriptCall::new("end_scene", vec![]) });
        game.add_scene(a);
        game.add_scene(scene("b", 10_000, &[]));
        game.start("a").unwrap();

        let mut surface = DrawList::new(640, 480);
        game.tick(&[InputEvent::KeyDown(KeyCode::Space)], &mut surface).unwrap();
        assert_eq!(game.scene().unwrap().name(), "a");
        game.tick(&[InputEvent::KeyUp(KeyCode::Space)], &mut surface).unwrap();
        assert_eq!(game.scene().unwrap().name(), "b");
        assert!(!game.world().bindings.is_bound(KeyCode::Space));
    }

    #[test]
    fn game_timers_run_on_the_current_scene() {
        let mut game = game();
        game.add_scene(scene("a", 10_000, &[("end_scene", "b")]));
        game.add_scene(scene("b", 10_000, &[]));
        game.start("a").unwrap();
        game.world_mut().timers.add("leave", 40, ScriptCall::new("end_scene", vec![]));

        let mut surface = DrawList::new(640, 480);
        game.tick(&[], &mut surface).unwrap();
        assert_eq!(game.scene().unwrap().name(), "a");
        game.tick(&[], &mut surface).unwrap();
        assert_eq!(game.scene().unwrap().name(), "b");
    }
}
