//=========================================================================
// Scene Runtime
//=========================================================================
//
// A loaded scene: live objects, lazy object descriptions, the event
// queue and the notification bus.
//
// Lifecycle:
//   Loading  → validate calls and classes, register audio, borrow shared
//              objects, bind keys, queue `before` and `events`
//   Running  → frame / collisions / update / draw, driven by the game
//   Ending   → keys unbound, audio stopped, shared objects returned
//
// Per tick (driven by `Game`):
//   frame() → [input] → verify_collisions() → update_objects() → draw()
//
// Objects are instantiated when spawned. Marker values in their
// parameters (`Object`, `Property`, `Behavior`, `Class`, `RandInt`,
// `Choice`, `Game`, `Add`, `Sub`) are resolved at that moment against
// the scene and the game context.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use log::{debug, info, trace, warn};
use rand::seq::SliceRandom;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::action::Action;
use super::description::{AudioCue, ObjectSpec, Outcome, SceneDescription, ScriptCall};
use super::error::SceneError;
use super::params::Params;
use super::registry::{BuildContext, Registry};
use super::scheduler::EventQueue;
use super::value::{ObjectDescription, Value};
use crate::core::audio::AudioError;
use crate::core::collision::{CollisionTable, Rect};
use crate::core::controller::Controller;
use crate::core::entity::{Contact, EntityId, GameObject, ObjectContext};
use crate::core::globals::{GameContext, SharedObject};
use crate::core::input::{BoundKey, KeyBinding, KeyCode};
use crate::core::message_bus::{LifecycleEvent, Notification, NotificationBus};
use crate::core::render::Surface;

//=== SceneState ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Loading,
    Running,
    Ending,
}

//=== Scene Objects =======================================================

/// A built object, either live in the scene or waiting to be spawned.
struct SceneObject {
    name: String,
    id: EntityId,
    object: Box<dyn GameObject>,
    /// Shelf name when borrowed from the game.
    shelf: Option<String>,
    /// Keys bound while the object was built.
    keys: Vec<BoundKey>,
}

//=== Scene ===============================================================

pub struct Scene {
    name: String,
    state: SceneState,
    registry: Rc<Registry>,
    collisions: CollisionTable,

    specs: BTreeMap<String, ObjectSpec>,
    behaviors: BTreeMap<String, ObjectDescription>,
    audio: BTreeMap<String, AudioCue>,
    next_scene: BTreeMap<String, String>,

    /// Spawn order, kept sorted by priority.
    live: Vec<SceneObject>,
    /// Built objects not yet spawned (shared or inserted).
    prebuilt: BTreeMap<String, SceneObject>,

    events: EventQueue,
    bus: NotificationBus,
    bound_keys: BTreeSet<KeyCode>,
    /// Bindings made by the factory currently running.
    granted: Vec<BoundKey>,

    frames: u64,
    time_ms: u64,
}

impl Scene {
    //--- Loading ----------------------------------------------------------

    /// Builds a running scene from `desc`.
    ///
    /// Every script call and class name is checked before anything
    /// touches `world`, so a faulty description leaves the game as it
    /// was.
    pub fn load(desc: SceneDescription, registry: Rc<Registry>, world: &mut GameContext) -> Result<Self, SceneError> {
        debug!(target: "scene", "Loading scene '{}'", desc.name);
        Self::validate(&desc, &registry, world)?;

        let mut scene = Self {
            name: desc.name,
            state: SceneState::Loading,
            registry,
            collisions: CollisionTable::standard(),
            specs: desc.objects,
            behaviors: desc.behaviors,
            audio: desc.audio,
            next_scene: desc.next_scene,
            live: Vec::new(),
            prebuilt: BTreeMap::new(),
            events: EventQueue::new(),
            bus: NotificationBus::new(),
            bound_keys: BTreeSet::new(),
            granted: Vec::new(),
            frames: 0,
            time_ms: 0,
        };

        for (name, cue) in &scene.audio {
            world.mixer.add(name, &cue.filename);
        }

        for (name, spec) in &scene.specs {
            if let ObjectSpec::Shared(shelf) = spec {
                let SharedObject { id, object, keys } = world
                    .take_shared(shelf)
                    .ok_or_else(|| SceneError::SharedUnavailable(shelf.clone()))?;
                for bound in &keys {
                    if world.bindings.bind(bound.key, bound.phase, bound.binding.clone()) {
                        scene.bound_keys.insert(bound.key);
                    }
                }
                scene.prebuilt.insert(
                    name.clone(),
                    SceneObject { name: name.clone(), id, object, shelf: Some(shelf.clone()), keys },
                );
            }
        }

        for key_action in desc.on_key {
            if world.bindings.bind(key_action.key, key_action.phase, KeyBinding::Script(key_action.call)) {
                scene.bound_keys.insert(key_action.key);
            }
        }

        for call in desc.before {
            scene.events.push_before(call);
        }
        for event in desc.events {
            scene.events.push(event.0, event.1, event.2);
        }

        for sub in desc.notifications {
            scene.bus.subscribe(&sub.source, sub.event, sub.calls);
        }

        let autostart: Vec<(String, bool)> = scene
            .audio
            .iter()
            .filter(|(_, cue)| cue.autostart)
            .map(|(name, cue)| (name.clone(), cue.looping))
            .collect();
        for (name, looping) in autostart {
            if looping {
                world.mixer.play_loop(&name)?;
            } else {
                world.mixer.play(&name)?;
            }
        }

        scene.state = SceneState::Running;
        info!(target: "scene", "Scene '{}' running ({} object descriptions, {} queued events)",
            scene.name, scene.specs.len(), scene.events.len());
        Ok(scene)
    }

    fn validate(desc: &SceneDescription, registry: &Registry, world: &GameContext) -> Result<(), SceneError> {
        let calls = desc
            .before
            .iter()
            .chain(desc.events.iter().map(|e| &e.2))
            .chain(desc.on_key.iter().map(|k| &k.call))
            .chain(desc.notifications.iter().flat_map(|n| n.calls.iter()));
        for call in calls {
            Action::parse(call)?;
        }

        for spec in desc.objects.values() {
            match spec {
                ObjectSpec::Class { class, .. } if !registry.is_object_class(class) => {
                    return Err(SceneError::UnknownClass(class.clone()));
                }
                ObjectSpec::Shared(shelf) if !world.has_shared(shelf) => {
                    return Err(SceneError::SharedUnavailable(shelf.clone()));
                }
                _ => {}
            }
        }

        for behavior in desc.behaviors.values() {
            if !registry.is_controller_class(&behavior.class) {
                return Err(SceneError::UnknownClass(behavior.class.clone()));
            }
        }
        Ok(())
    }

    /// Builds an object outside the scene's object table, with a fresh id.
    pub fn build_detached(&mut self, desc: &ObjectDescription, world: &mut GameContext) -> Result<SharedObject, SceneError> {
        let id = world.allocate_id();
        let (object, keys) = self.build_object(&desc.class, &desc.init, id, world)?;
        Ok(SharedObject { id, object, keys })
    }

    /// Adds a pre-built object, spawned later by name like any other.
    pub fn insert_object(&mut self, name: &str, object: Box<dyn GameObject>, world: &mut GameContext) -> EntityId {
        let id = world.allocate_id();
        self.prebuilt.insert(name.to_string(), SceneObject { name: name.to_string(), id, object, shelf: None, keys: Vec::new() });
        id
    }

    //--- Queries ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == SceneState::Ending
    }

    /// `(frames, time_ms)` since the scene started.
    pub fn elapsed(&self) -> (u64, u64) {
        (self.frames, self.time_ms)
    }

    pub fn next(&self, outcome: Outcome) -> Option<&str> {
        self.next_scene.get(outcome.as_str()).map(String::as_str)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Names of live objects in update order.
    pub fn names(&self) -> Vec<&str> {
        self.live.iter().map(|o| o.name.as_str()).collect()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Notification bus, for subscribing handlers from code.
    pub fn notifications(&mut self) -> &mut NotificationBus {
        &mut self.bus
    }

    //--- Object Lookup ----------------------------------------------------

    fn find(&self, name: &str) -> Result<Option<usize>, SceneError> {
        let mut matches = self.live.iter().enumerate().filter(|(_, o)| o.name == name).map(|(i, _)| i);
        let first = matches.next();
        if matches.next().is_some() {
            return Err(SceneError::AmbiguousObject(name.to_string()));
        }
        Ok(first)
    }

    fn require(&self, name: &str) -> Result<usize, SceneError> {
        self.find(name)?.ok_or_else(|| SceneError::ObjectNotFound(name.to_string()))
    }

    /// The live object called `name`, if exactly one exists.
    pub fn get_object(&self, name: &str) -> Result<Option<&dyn GameObject>, SceneError> {
        Ok(self.find(name)?.map(|i| self.live[i].object.as_ref()))
    }

    pub fn get_object_mut(&mut self, name: &str) -> Result<Option<&mut dyn GameObject>, SceneError> {
        match self.find(name)? {
            Some(i) => Ok(Some(self.live[i].object.as_mut())),
            None => Ok(None),
        }
    }

    pub fn require_object(&self, name: &str) -> Result<&dyn GameObject, SceneError> {
        let i = self.require(name)?;
        Ok(self.live[i].object.as_ref())
    }

    pub fn id_of(&self, name: &str) -> Result<Option<EntityId>, SceneError> {
        Ok(self.find(name)?.map(|i| self.live[i].id))
    }

    //--- Frame ------------------------------------------------------------

    /// Advances the scene clock and runs the events that came due.
    pub fn frame(&mut self, elapsed_ms: u64, world: &mut GameContext) -> Result<(), SceneError> {
        self.frames += 1;
        self.time_ms += elapsed_ms;
        let due = self.events.advance(elapsed_ms as i64);
        if !due.is_empty() {
            trace!(target: "scene", "Frame {}: {} event(s) due", self.frames, due.len());
        }
        self.run_all(due, world)
    }

    fn run_all(&mut self, calls: Vec<ScriptCall>, world: &mut GameContext) -> Result<(), SceneError> {
        for call in calls {
            if self.is_stopped() {
                break;
            }
            self.run(&call, world)?;
        }
        Ok(())
    }

    //--- Collisions -------------------------------------------------------

    /// Tests every pair once (`i < j`) and notifies both sides.
    ///
    /// `should_collide` is read as the scan goes, so an object that
    /// turned its collisions off earlier in the pass is skipped for the
    /// remaining pairs.
    pub fn verify_collisions(&mut self, bounds: Rect) {
        let now = self.time_ms;
        let count = self.live.len();
        for i in 0..count {
            for j in i + 1..count {
                let (head, tail) = self.live.split_at_mut(j);
                let (a, b) = (&mut head[i], &mut tail[0]);

                let (Some(ca), Some(cb)) = (a.object.as_collidable(), b.object.as_collidable()) else {
                    continue;
                };
                if !ca.should_collide() || !cb.should_collide() {
                    continue;
                }
                if !self.collisions.collides(&ca.shape(), &cb.shape()) {
                    continue;
                }

                let contact_a = Contact { id: a.id, role: ca.role() };
                let contact_b = Contact { id: b.id, role: cb.role() };
                trace!(target: "scene", "Collision: {} {} / {} {}", a.name, a.id, b.name, b.id);

                if let Some(c) = a.object.as_collidable_mut() {
                    let mut ctx = ObjectContext::new(a.id, &a.name, now, bounds, &mut self.bus);
                    c.collide_with(&contact_b, &mut ctx);
                }
                if let Some(c) = b.object.as_collidable_mut() {
                    let mut ctx = ObjectContext::new(b.id, &b.name, now, bounds, &mut self.bus);
                    c.collide_with(&contact_a, &mut ctx);
                }
            }
        }
    }

    //--- Update -----------------------------------------------------------

    /// Updates every live object, sweeps the invisible ones, then runs
    /// the calls triggered by lifecycle notifications.
    pub fn update_objects(&mut self, world: &mut GameContext) -> Result<(), SceneError> {
        let bounds = world.bounds();
        let now = self.time_ms;
        for entry in &mut self.live {
            let mut ctx = ObjectContext::new(entry.id, &entry.name, now, bounds, &mut self.bus);
            entry.object.update(&mut ctx);
        }

        let (kept, swept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.live)
            .into_iter()
            .partition(|o| o.shelf.is_some() || o.object.persistent() || o.object.visible());
        self.live = kept;
        for gone in swept {
            debug!(target: "scene", "Removing '{}' {}", gone.name, gone.id);
            self.bus.publish(Notification { id: gone.id, source: gone.name, event: LifecycleEvent::Destroyed });
        }

        let calls = self.bus.resolve();
        self.run_all(calls, world)
    }

    //--- Draw -------------------------------------------------------------

    /// Draws visible objects, highest priority value first.
    pub fn draw(&self, surface: &mut dyn Surface) {
        for entry in self.live.iter().rev() {
            if entry.object.visible() {
                entry.object.draw(surface);
            }
        }
    }

    //--- Scripted Actions -------------------------------------------------

    /// Executes one script call.
    pub fn run(&mut self, call: &ScriptCall, world: &mut GameContext) -> Result<(), SceneError> {
        trace!(target: "scene", "[{}] {}{:?}", self.name, call.action(), call.args());
        match Action::parse(call)? {
            Action::Spawn { names, overrides } => self.spawn(&names, &overrides, world),
            Action::PlayAudio(name) => self.play_audio(&name, world),
            Action::Object { name, method, args } => {
                let args = self.resolve_all(&args, world)?;
                self.invoke(&name, &method, &args, world)
            }
            Action::Call { function, args } => {
                let f = self
                    .registry
                    .function(&function)
                    .ok_or_else(|| SceneError::UnknownFunction(function.clone()))?;
                let args = self.resolve_all(&args, world)?;
                f(self, world, &args)
            }
            Action::EndScene => {
                self.end_scene(world);
                Ok(())
            }
            Action::GameOver => {
                world.set_game_over();
                self.end_scene(world);
                Ok(())
            }
            Action::Queue { delay, recurrence, call } => {
                self.events.push(delay, recurrence, call);
                Ok(())
            }
        }
    }

    /// Spawns objects by name. `overrides` replace entries of each
    /// object's `init` for this spawn only.
    pub fn spawn(
        &mut self,
        names: &[String],
        overrides: &BTreeMap<String, Value>,
        world: &mut GameContext,
    ) -> Result<(), SceneError> {
        for name in names {
            let entry = if let Some(prebuilt) = self.prebuilt.remove(name) {
                if !overrides.is_empty() {
                    warn!(target: "scene", "'{name}' is already built; spawn overrides ignored");
                }
                prebuilt
            } else {
                match self.specs.get(name).cloned() {
                    Some(ObjectSpec::Class { class, mut init }) => {
                        init.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
                        let id = world.allocate_id();
                        let (object, keys) = self.build_object(&class, &init, id, world)?;
                        SceneObject { name: name.clone(), id, object, shelf: None, keys }
                    }
                    Some(ObjectSpec::Shared(_)) => {
                        warn!(target: "scene", "Shared object '{name}' is already live");
                        continue;
                    }
                    None => return Err(SceneError::UnknownObject(name.clone())),
                }
            };

            debug!(target: "scene", "Spawned '{}' {}", entry.name, entry.id);
            self.bus.publish(Notification {
                id: entry.id,
                source: entry.name.clone(),
                event: LifecycleEvent::Spawned,
            });
            self.live.push(entry);
        }
        self.live.sort_by_key(|o| o.object.priority());
        Ok(())
    }

    fn play_audio(&mut self, name: &str, world: &mut GameContext) -> Result<(), SceneError> {
        let cue = self.audio.get(name).ok_or_else(|| AudioError::UnknownCue(name.to_string()))?;
        if cue.looping {
            world.mixer.play_loop(name)?;
        } else {
            world.mixer.play(name)?;
        }
        Ok(())
    }

    fn invoke(&mut self, name: &str, method: &str, args: &[Value], world: &GameContext) -> Result<(), SceneError> {
        let i = self.require(name)?;
        let now = self.time_ms;
        let entry = &mut self.live[i];
        let mut ctx = ObjectContext::new(entry.id, &entry.name, now, world.bounds(), &mut self.bus);
        entry.object.invoke(method, args, &mut ctx).map_err(|source| SceneError::Invoke {
            object: name.to_string(),
            method: method.to_string(),
            source,
        })
    }

    /// Unbinds the scene's keys, stops audio and returns shared objects.
    pub fn end_scene(&mut self, world: &mut GameContext) {
        if self.is_stopped() {
            return;
        }
        for key in std::mem::take(&mut self.bound_keys) {
            world.bindings.unbind(key);
        }
        world.mixer.stop();

        let (shared, owned): (Vec<_>, Vec<_>) = std::mem::take(&mut self.live)
            .into_iter()
            .partition(|o| o.shelf.is_some());
        self.live = owned;
        let waiting = std::mem::take(&mut self.prebuilt).into_values().filter(|o| o.shelf.is_some());
        for entry in shared.into_iter().chain(waiting) {
            if let Some(shelf) = entry.shelf {
                world.shelve(&shelf, SharedObject { id: entry.id, object: entry.object, keys: entry.keys });
            }
        }

        self.state = SceneState::Ending;
        info!(target: "scene", "Scene '{}' ended after {} frames", self.name, self.frames);
    }

    //--- Instantiation ----------------------------------------------------

    /// Instantiates an object and collects the keys bound while building
    /// it, nested controllers included.
    fn build_object(
        &mut self,
        class: &str,
        init: &BTreeMap<String, Value>,
        id: EntityId,
        world: &mut GameContext,
    ) -> Result<(Box<dyn GameObject>, Vec<BoundKey>), SceneError> {
        let mark = self.granted.len();
        let built = self.instantiate(class, init, id, world);
        let keys = self.granted.split_off(mark);
        self.bound_keys.extend(keys.iter().map(|b| b.key));
        Ok((built?, keys))
    }

    fn instantiate(
        &mut self,
        class: &str,
        init: &BTreeMap<String, Value>,
        id: EntityId,
        world: &mut GameContext,
    ) -> Result<Box<dyn GameObject>, SceneError> {
        let factory = self
            .registry
            .object_factory(class)
            .ok_or_else(|| SceneError::UnknownClass(class.to_string()))?;
        let mut params = self.resolve_params(class, init, id, world)?;
        let mut ctx = BuildContext::new(id, world.bounds(), self.time_ms, &mut world.rng, &mut world.bindings, &mut self.granted);
        factory(&mut params, &mut ctx).map_err(|source| SceneError::Instantiate { class: class.to_string(), source })
    }

    fn build_controller(
        &mut self,
        class: &str,
        init: &BTreeMap<String, Value>,
        owner: EntityId,
        world: &mut GameContext,
    ) -> Result<Box<dyn Controller>, SceneError> {
        let factory = self
            .registry
            .controller_factory(class)
            .ok_or_else(|| SceneError::UnknownClass(class.to_string()))?;
        let mut params = self.resolve_params(class, init, owner, world)?;
        let mut ctx = BuildContext::new(owner, world.bounds(), self.time_ms, &mut world.rng, &mut world.bindings, &mut self.granted);
        factory(&mut params, &mut ctx).map_err(|source| SceneError::Instantiate { class: class.to_string(), source })
    }

    /// Resolves an `init` map into factory parameters.
    ///
    /// `Behavior` and `Class` values become controllers or objects; they
    /// are only accepted as direct parameters.
    fn resolve_params(
        &mut self,
        class: &str,
        init: &BTreeMap<String, Value>,
        id: EntityId,
        world: &mut GameContext,
    ) -> Result<Params, SceneError> {
        let mut params = Params::new(class);
        for (key, value) in init {
            match value {
                Value::Behavior(name) => {
                    let desc = self
                        .behaviors
                        .get(name)
                        .cloned()
                        .ok_or_else(|| SceneError::UnknownBehavior(name.clone()))?;
                    let controller = self.build_controller(&desc.class, &desc.init, id, world)?;
                    params.insert_controller(key, controller);
                }
                Value::Class { class: inner, init } if self.registry.is_controller_class(inner) => {
                    let controller = self.build_controller(inner, init, id, world)?;
                    params.insert_controller(key, controller);
                }
                Value::Class { class: inner, init } if self.registry.is_object_class(inner) => {
                    let child = world.allocate_id();
                    let object = self.instantiate(inner, init, child, world)?;
                    params.insert_object(key, object);
                }
                Value::Class { class: inner, .. } => return Err(SceneError::UnknownClass(inner.clone())),
                other => params.insert_value(key, self.resolve_value(other, world)?),
            }
        }
        Ok(params)
    }

    fn resolve_all(&self, values: &[Value], world: &mut GameContext) -> Result<Vec<Value>, SceneError> {
        values.iter().map(|v| self.resolve_value(v, world)).collect()
    }

    /// Substitutes markers with concrete values.
    pub fn resolve_value(&self, value: &Value, world: &mut GameContext) -> Result<Value, SceneError> {
        match value {
            Value::Object(name) => Ok(Value::Entity(self.live[self.require(name)?].id)),
            Value::Property(name, property) => {
                let object = self.require_object(name)?;
                object.property(property).or_else(|| capability_property(object, property)).ok_or_else(|| {
                    SceneError::UnknownProperty {
                        object: name.clone(),
                        property: property.clone(),
                    }
                })
            }
            Value::Game(var) => world
                .variable(var)
                .cloned()
                .ok_or_else(|| SceneError::UnknownVariable(var.clone())),
            Value::RandInt(a, b) => Ok(Value::Int(world.rng.gen_range(*a.min(b)..=*a.max(b)))),
            Value::Choice(options) => {
                let chosen = options
                    .choose(&mut world.rng)
                    .cloned()
                    .ok_or(SceneError::Unresolvable { found: "choice", reason: "no options to choose from" })?;
                self.resolve_value(&chosen, world)
            }
            Value::Add(terms) => self.fold_terms(terms, 1.0, world),
            Value::Sub(terms) => self.fold_terms(terms, -1.0, world),
            Value::List(items) => Ok(Value::List(self.resolve_all(items, world)?)),
            Value::Map(map) => {
                let mut resolved = BTreeMap::new();
                for (k, v) in map {
                    resolved.insert(k.clone(), self.resolve_value(v, world)?);
                }
                Ok(Value::Map(resolved))
            }
            Value::Behavior(_) | Value::Class { .. } => Err(SceneError::Unresolvable {
                found: value.type_name(),
                reason: "descriptions are only allowed as direct parameters",
            }),
            literal => Ok(literal.clone()),
        }
    }

    /// Folds `terms` left to right: `a + b + ...` or `a - b - ...`.
    fn fold_terms(&self, terms: &[Value], sign: f32, world: &mut GameContext) -> Result<Value, SceneError> {
        let mut resolved = self.resolve_all(terms, world)?.into_iter();
        let mut acc = resolved
            .next()
            .ok_or(SceneError::Unresolvable { found: "sum", reason: "no terms" })?;
        for term in resolved {
            acc = match (&acc, &term) {
                (Value::Int(a), Value::Int(b)) => {
                    let sum = if sign < 0.0 { a.checked_sub(*b) } else { a.checked_add(*b) };
                    Value::Int(sum.ok_or(SceneError::Unresolvable { found: "integer", reason: "sum overflows" })?)
                }
                (Value::Point(ax, ay), Value::Point(bx, by)) => Value::Point(ax + sign * bx, ay + sign * by),
                (a, b) => match (a.as_f32(), b.as_f32()) {
                    (Some(a), Some(b)) => Value::Float(a + sign * b),
                    _ => {
                        return Err(SceneError::Unresolvable {
                            found: b.type_name(),
                            reason: "only numbers and points can be added",
                        })
                    }
                },
            };
        }
        Ok(acc)
    }
}

/// Properties answered through an entity's capabilities when the entity
/// does not name them itself.
fn capability_property(object: &dyn GameObject, property: &str) -> Option<Value> {
    match property {
        "position" => object.as_movable().map(|m| m.position().into()),
        "center" => object.as_movable().map(|m| m.bounds().center().into()),
        "alive" => object.as_killable().map(|k| Value::Bool(k.should_update())),
        "dying" => object.as_killable().map(|k| Value::Bool(k.is_dying())),
        "visible" => Some(Value::Bool(object.visible())),
        _ => None,
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("live", &self.names())
            .field("events", &self.events.len())
            .field("elapsed", &self.elapsed())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
