//=========================================================================
// Factory Parameters
//=========================================================================
//
// Resolved constructor parameters handed to registry factories.
//
// By the time a factory sees them, every marker has been substituted:
// plain values are literals (or `Entity` ids), nested descriptions have
// become controllers or objects. Typed getters convert and report
// mismatches as `ParamError`s naming the parameter.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

//=== Internal Dependencies ===============================================

use super::error::ParamError;
use super::value::Value;
use crate::core::collision::Vec2;
use crate::core::controller::Controller;
use crate::core::entity::{EntityId, GameObject};
use crate::core::input::KeyCode;
use crate::core::render::Color;

//=== Params ==============================================================

#[derive(Default)]
pub struct Params {
    class: String,
    values: BTreeMap<String, Value>,
    controllers: BTreeMap<String, Box<dyn Controller>>,
    objects: BTreeMap<String, Box<dyn GameObject>>,
}

impl Params {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into(), ..Self::default() }
    }

    /// Builder-style literal setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert_value(key, value.into());
        self
    }

    /// Builder-style controller setter.
    pub fn with_controller(mut self, key: &str, controller: Box<dyn Controller>) -> Self {
        self.insert_controller(key, controller);
        self
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    //--- Insertion --------------------------------------------------------

    pub fn insert_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn insert_controller(&mut self, key: &str, controller: Box<dyn Controller>) {
        self.controllers.insert(key.to_string(), controller);
    }

    pub fn insert_object(&mut self, key: &str, object: Box<dyn GameObject>) {
        self.objects.insert(key.to_string(), object);
    }

    //--- Raw Access -------------------------------------------------------

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key) || self.controllers.contains_key(key) || self.objects.contains_key(key)
    }

    fn require(&self, key: &str) -> Result<&Value, ParamError> {
        self.get(key).ok_or_else(|| ParamError::missing(key))
    }

    //--- Typed Getters ----------------------------------------------------

    pub fn float(&self, key: &str) -> Result<f32, ParamError> {
        let value = self.require(key)?;
        value.as_f32().ok_or_else(|| ParamError::wrong_type(key, "number", value))
    }

    pub fn float_or(&self, key: &str, default: f32) -> Result<f32, ParamError> {
        if self.get(key).is_some() { self.float(key) } else { Ok(default) }
    }

    /// A strictly positive number.
    pub fn positive(&self, key: &str) -> Result<f32, ParamError> {
        let value = self.float(key)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ParamError::invalid(key, "must be positive"))
        }
    }

    pub fn int(&self, key: &str) -> Result<i64, ParamError> {
        let value = self.require(key)?;
        value.as_i64().ok_or_else(|| ParamError::wrong_type(key, "integer", value))
    }

    pub fn int_or(&self, key: &str, default: i64) -> Result<i64, ParamError> {
        if self.get(key).is_some() { self.int(key) } else { Ok(default) }
    }

    pub fn bool_or(&self, key: &str, default: bool) -> Result<bool, ParamError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(ParamError::wrong_type(key, "bool", other)),
        }
    }

    pub fn string(&self, key: &str) -> Result<String, ParamError> {
        let value = self.require(key)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ParamError::wrong_type(key, "string", value))
    }

    pub fn string_or(&self, key: &str, default: &str) -> Result<String, ParamError> {
        if self.get(key).is_some() { self.string(key) } else { Ok(default.to_string()) }
    }

    pub fn point(&self, key: &str) -> Result<Vec2, ParamError> {
        let value = self.require(key)?;
        value.as_point().ok_or_else(|| ParamError::wrong_type(key, "point", value))
    }

    pub fn point_or(&self, key: &str, default: Vec2) -> Result<Vec2, ParamError> {
        if self.get(key).is_some() { self.point(key) } else { Ok(default) }
    }

    pub fn color_or(&self, key: &str, default: Color) -> Result<Color, ParamError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) => value.as_color().ok_or_else(|| ParamError::wrong_type(key, "color", value)),
        }
    }

    pub fn key_or(&self, key: &str, default: KeyCode) -> Result<KeyCode, ParamError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Key(code)) => Ok(*code),
            Some(other) => Err(ParamError::wrong_type(key, "key", other)),
        }
    }

    /// A resolved object reference, if the parameter is present.
    pub fn entity(&self, key: &str) -> Result<Option<EntityId>, ParamError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Entity(id)) => Ok(Some(*id)),
            Some(other) => Err(ParamError::wrong_type(key, "object reference", other)),
        }
    }

    //--- Owned Parameters -------------------------------------------------

    pub fn take_controller(&mut self, key: &str) -> Option<Box<dyn Controller>> {
        self.controllers.remove(key)
    }

    pub fn take_object(&mut self, key: &str) -> Option<Box<dyn GameObject>> {
        self.objects.remove(key)
    }
}

impl std::fmt::Debug for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Params")
            .field("class", &self.class)
            .field("values", &self.values)
            .field("controllers", &self.controllers.keys().collect::<Vec<_>>())
            .field("objects", &self.objects.keys().collect::<Vec<_>>())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
