//=========================================================================
// Class Registry
//=========================================================================
//
// Maps class names used in scene descriptions to factory functions, and
// function names to script functions for the `call` action.
//
// The registry is filled explicitly at startup:
//
// ```rust
// use genesis::core::scene::Registry;
//
// let mut registry = Registry::with_builtins();   // controllers + functions
// genesis::objects::register(&mut registry);     // game entities
// assert!(registry.is_object_class("Player"));
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{info, warn};
use rand::rngs::StdRng;

//=== Internal Dependencies ===============================================

use super::action::Action;
use super::description::ScriptCall;
use super::error::{ParamError, SceneError};
use super::params::Params;
use super::runtime::Scene;
use super::value::Value;
use crate::core::collision::Rect;
use crate::core::controller::{self, Controller};
use crate::core::entity::{EntityId, GameObject};
use crate::core::globals::GameContext;
use crate::core::input::{BoundKey, KeyBinding, KeyBindings, KeyCode, KeyPhase};

//=== Factory Types =======================================================

pub type ObjectFactory = fn(&mut Params, &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError>;

pub type ControllerFactory = fn(&mut Params, &mut BuildContext<'_>) -> Result<Box<dyn Controller>, ParamError>;

pub type ScriptFunction = fn(&mut Scene, &mut GameContext, &[Value]) -> Result<(), SceneError>;

//=== BuildContext ========================================================

/// World access granted to factories.
pub struct BuildContext<'a> {
    /// Id of the entity being built (or owning the controller).
    pub id: EntityId,
    pub bounds: Rect,
    /// Scene time in milliseconds.
    pub now: u64,
    pub rng: &'a mut StdRng,
    bindings: &'a mut KeyBindings,
    bound: &'a mut Vec<BoundKey>,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        id: EntityId,
        bounds: Rect,
        now: u64,
        rng: &'a mut StdRng,
        bindings: &'a mut KeyBindings,
        bound: &'a mut Vec<BoundKey>,
    ) -> Self {
        Self { id, bounds, now, rng, bindings, bound }
    }

    /// Binds a key and records it for the object being built, which keeps
    /// the binding when it moves between scenes.
    pub fn bind_key(&mut self, key: KeyCode, phase: KeyPhase, binding: KeyBinding) {
        if self.bindings.bind(key, phase, binding.clone()) {
            self.bound.push(BoundKey { key, phase, binding });
        }
    }
}

//=== Registry ============================================================

#[derive(Clone, Copy)]
enum ClassFactory {
    Object(ObjectFactory),
    Controller(ControllerFactory),
}

#[derive(Default)]
pub struct Registry {
    classes: HashMap<String, ClassFactory>,
    functions: HashMap<String, ScriptFunction>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the engine's controllers and script functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_controller("ConstantController", controller::build_constant);
        registry.register_controller("SinController", controller::build_sin);
        registry.register_controller("SigmoidController", controller::build_sigmoid);
        registry.register_controller("SigmoidPrimeController", controller::build_sigmoid_prime);
        registry.register_controller("InvertedSigmoidController", controller::build_inverted_sigmoid);
        registry.register_controller("KeyboardController", controller::build_keyboard);
        registry.register_controller("FiniteController", controller::build_finite);
        registry.register_function("set_variable", set_variable);
        registry.register_function("log", log_message);
        registry.register_function("add_timer", add_timer);
        registry.register_function("remove_timer", remove_timer);
        registry
    }

    //--- Registration -----------------------------------------------------

    pub fn register_object(&mut self, class: &str, factory: ObjectFactory) {
        self.classes.insert(class.to_string(), ClassFactory::Object(factory));
    }

    pub fn register_controller(&mut self, class: &str, factory: ControllerFactory) {
        self.classes.insert(class.to_string(), ClassFactory::Controller(factory));
    }

    pub fn register_function(&mut self, name: &str, function: ScriptFunction) {
        self.functions.insert(name.to_string(), function);
    }

    //--- Lookup -----------------------------------------------------------

    pub fn is_object_class(&self, class: &str) -> bool {
        matches!(self.classes.get(class), Some(ClassFactory::Object(_)))
    }

    pub fn is_controller_class(&self, class: &str) -> bool {
        matches!(self.classes.get(class), Some(ClassFactory::Controller(_)))
    }

    pub fn object_factory(&self, class: &str) -> Option<ObjectFactory> {
        match self.classes.get(class)? {
            ClassFactory::Object(f) => Some(*f),
            ClassFactory::Controller(_) => None,
        }
    }

    pub fn controller_factory(&self, class: &str) -> Option<ControllerFactory> {
        match self.classes.get(class)? {
            ClassFactory::Controller(f) => Some(*f),
            ClassFactory::Object(_) => None,
        }
    }

    pub fn function(&self, name: &str) -> Option<ScriptFunction> {
        self.functions.get(name).copied()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut classes: Vec<_> = self.classes.keys().collect();
        classes.sort();
        let mut functions: Vec<_> = self.functions.keys().collect();
        functions.sort();
        f.debug_struct("Registry")
            .field("classes", &classes)
            .field("functions", &functions)
            .finish()
    }
}

//=== Built-in Functions ==================================================

/// `("call", [Str("set_variable"), Str(name), value])`
fn set_variable(_scene: &mut Scene, world: &mut GameContext, args: &[Value]) -> Result<(), SceneError> {
    match args {
        [Value::Str(name), value] => {
            world.set_variable(name, value.clone());
            Ok(())
        }
        _ => Err(SceneError::BadArguments {
            action: "set_variable".into(),
            reason: "expected a variable name and a value".into(),
        }),
    }
}

/// `("call", [Str("log"), args...])`
fn log_message(scene: &mut Scene, _world: &mut GameContext, args: &[Value]) -> Result<(), SceneError> {
    info!(target: "scene", "[{}] {:?}", scene.name(), args);
    Ok(())
}

/// `("call", [Str("add_timer"), Str(name), Int(interval), Str(action), args...])`
fn add_timer(_scene: &mut Scene, world: &mut GameContext, args: &[Value]) -> Result<(), SceneError> {
    let bad = |reason: &str| SceneError::BadArguments { action: "add_timer".into(), reason: reason.into() };
    let [Value::Str(name), interval, Value::Str(action), rest @ ..] = args else {
        return Err(bad("expected a timer name, an interval and an action"));
    };
    let interval = interval
        .as_i64()
        .filter(|ms| *ms > 0)
        .ok_or_else(|| bad("interval must be a positive integer"))?;
    let call = ScriptCall::new(action.clone(), rest.to_vec());
    Action::parse(&call)?;
    world.timers.add(name, interval as u64, call);
    Ok(())
}

/// `("call", [Str("remove_timer"), Str(name)])`
fn remove_timer(_scene: &mut Scene, world: &mut GameContext, args: &[Value]) -> Result<(), SceneError> {
    match args {
        [Value::Str(name)] => {
            if !world.timers.remove(name) {
                warn!(target: "scene", "No timer named '{name}'");
            }
            Ok(())
        }
        _ => Err(SceneError::BadArguments {
            action: "remove_timer".into(),
            reason: "expected a timer name".into(),
        }),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn builtins_register_controllers_and_functions() {
        let registry = Registry::with_builtins();
        assert!(registry.is_controller_class("SinController"));
        assert!(!registry.is_object_class("SinController"));
        assert!(registry.function("set_variable").is_some());
        assert!(registry.function("nope").is_none());
    }

    #[test]
    fn factories_are_looked_up_by_kind() {
        let registry = Registry::with_builtins();
        assert!(registry.controller_factory("ConstantController").is_some());
        assert!(registry.object_factory("ConstantController").is_none());
        assert!(registry.controller_factory("Unknown").is_none());
    }

    #[test]
    fn controller_factory_builds_from_params() {
        let registry = Registry::with_builtins();
        let factory = registry.controller_factory("ConstantController").unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let mut bindings = KeyBindings::new();
        let mut bound = Vec::new();
        let mut ctx = BuildContext::new(EntityId::new(1), Rect::default(), 0, &mut rng, &mut bindings, &mut bound);

        let mut params = Params::new("ConstantController").with("dx", -1_i64).with("dy", 0_i64).with("speed", 2_i64);
        let mut c = factory(&mut params, &mut ctx).unwrap();
        assert_eq!(c.advance(), Some((-2.0, 0.0)));

        let mut missing = Params::new("ConstantController");
        assert!(matches!(factory(&mut missing, &mut ctx), Err(ParamError::Missing(_))));
    }

    #[test]
    fn keyboard_factory_binds_keys() {
        let registry = Registry::with_builtins();
        let factory = registry.controller_factory("KeyboardController").unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let mut bindings = KeyBindings::new();
        let mut bound = Vec::new();
        let mut params = Params::new("KeyboardController").with("up", Value::Key(KeyCode::KeyW));
        let mut c = {
            let mut ctx = BuildContext::new(EntityId::new(1), Rect::default(), 0, &mut rng, &mut bindings, &mut bound);
            factory(&mut params, &mut ctx).unwrap()
        };

        let keys: Vec<KeyCode> = bound.iter().map(|b| b.key).collect();
        assert!(keys.contains(&KeyCode::KeyW));
        assert!(keys.contains(&KeyCode::ArrowLeft));
        assert!(!keys.contains(&KeyCode::ArrowUp));
        // Four keys, each bound for both phases.
        assert_eq!(bound.len(), 8);

        bindings.dispatch(&crate::core::input::InputEvent::KeyDown(KeyCode::KeyW));
        assert_eq!(c.advance(), Some((0.0, -1.0)));
    }
}
