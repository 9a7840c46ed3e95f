//=========================================================================
// Game Context
//=========================================================================
//
// World state that outlives any one scene.
//
// Passed explicitly to scene loading, object resolution and scripted
// actions. Contains:
// - world bounds and game variables (`Game(name)` markers)
// - the game-wide key-binding table
// - the audio mixer
// - the shared-object shelf (objects lent to scenes with `Shared(name)`)
// - the random number generator behind `RandInt` / `Choice`
// - game timers and the game-over flag
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::{debug, warn};
use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use super::timers::GameTimers;
use crate::core::audio::Mixer;
use crate::core::collision::Rect;
use crate::core::entity::{EntityId, GameObject};
use crate::core::input::{BoundKey, KeyBindings};
use crate::core::scene::Value;

//=== SharedObject ========================================================

/// An object on the shelf, with the id it keeps across scenes and the
/// keys its factory bound.
pub struct SharedObject {
    pub id: EntityId,
    pub object: Box<dyn GameObject>,
    pub keys: Vec<BoundKey>,
}

//=== GameContext =========================================================

pub struct GameContext {
    bounds: Rect,

    /// Game-wide key bindings. Escape is never bound here.
    pub bindings: KeyBindings,

    pub mixer: Box<dyn Mixer>,

    pub rng: StdRng,

    pub timers: GameTimers,

    variables: BTreeMap<String, Value>,
    shelf: BTreeMap<String, SharedObject>,
    game_over: bool,
    next_id: u64,
}

impl GameContext {
    /// Creates a context for a `width` x `height` world.
    ///
    /// Variables `width`, `height` and `canvas_size` are predefined.
    pub fn new(width: u32, height: u32, mixer: Box<dyn Mixer>, rng: StdRng) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert("width".to_string(), Value::Int(i64::from(width)));
        variables.insert("height".to_string(), Value::Int(i64::from(height)));
        variables.insert("canvas_size".to_string(), Value::Point(width as f32, height as f32));

        Self {
            bounds: Rect::new(0.0, 0.0, width as f32, height as f32),
            bindings: KeyBindings::new(),
            mixer,
            rng,
            timers: GameTimers::new(),
            variables,
            shelf: BTreeMap::new(),
            game_over: false,
            next_id: 1,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Next unused entity id.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }

    //--- Variables --------------------------------------------------------

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    //--- Shared Objects ---------------------------------------------------

    /// Places `object` on the shelf under `name`, replacing any earlier
    /// object.
    pub fn put_shared(&mut self, name: &str, object: Box<dyn GameObject>) -> EntityId {
        let id = self.allocate_id();
        if self.shelf.insert(name.to_string(), SharedObject { id, object, keys: Vec::new() }).is_some() {
            warn!(target: "game", "Shared object '{name}' replaced");
        }
        id
    }

    pub fn has_shared(&self, name: &str) -> bool {
        self.shelf.contains_key(name)
    }

    pub fn shared(&self, name: &str) -> Option<&dyn GameObject> {
        self.shelf.get(name).map(|s| s.object.as_ref())
    }

    /// Lends a shared object to a scene.
    pub fn take_shared(&mut self, name: &str) -> Option<SharedObject> {
        let taken = self.shelf.remove(name);
        if taken.is_some() {
            debug!(target: "game", "Shared object '{name}' lent out");
        }
        taken
    }

    /// Places an already identified object on the shelf. Used when a
    /// scene returns what it borrowed.
    pub fn shelve(&mut self, name: &str, shared: SharedObject) {
        debug!(target: "game", "Shared object '{name}' shelved as {}", shared.id);
        self.shelf.insert(name.to_string(), shared);
    }

    //--- Game Over --------------------------------------------------------

    pub fn set_game_over(&mut self) {
        self.game_over = true;
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub(crate) fn clear_game_over(&mut self) {
        self.game_over = false;
    }
}

impl std::fmt::Debug for GameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameContext")
            .field("bounds", &self.bounds)
            .field("variables", &self.variables)
            .field("shelf", &self.shelf.keys().collect::<Vec<_>>())
            .field("game_over", &self.game_over)
            .finish()
    }
}
