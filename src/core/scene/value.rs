//=========================================================================
// Scene Values
//=========================================================================
//
// Parameter values as written in scene descriptions.
//
// Literal variants carry data directly. Marker variants stand for values
// that only exist once the scene runs and are substituted when an object
// is instantiated or an action executes, never while parsing:
//
// | Marker              | Resolves to                                  |
// |---------------------|----------------------------------------------|
// | `Object(name)`      | id of the single live object named `name`    |
// | `Property(obj, p)`  | property `p` of that live object             |
// | `Behavior(name)`    | controller built from the scene's behaviors  |
// | `Class{..}`         | nested object or controller                  |
// | `RandInt(a, b)`     | uniform integer in `a..=b`                   |
// | `Choice([...])`     | one element, itself resolved                 |
// | `Game(var)`         | game variable                                |
// | `Add([...])`        | sum of the resolved numbers                  |
// | `Sub([...])`        | first resolved number minus the others       |
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::collision::Vec2;
use crate::core::entity::EntityId;
use crate::core::input::KeyCode;
use crate::core::render::Color;

//=== Value ===============================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    //--- Literals ---------------------------------------------------------
    Bool(bool),
    Int(i64),
    Float(f32),
    Str(String),
    Point(f32, f32),
    Color(u8, u8, u8),
    Key(KeyCode),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),

    //--- Markers ----------------------------------------------------------
    Object(String),
    Property(String, String),
    Behavior(String),
    Class {
        class: String,
        #[serde(default)]
        init: BTreeMap<String, Value>,
    },
    RandInt(i64, i64),
    Choice(Vec<Value>),
    Game(String),
    Add(Vec<Value>),
    Sub(Vec<Value>),

    //--- Resolved only ----------------------------------------------------
    /// A live entity. Produced by resolving `Object`.
    #[serde(skip)]
    Entity(EntityId),
}

impl Value {
    /// Short variant name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Point(..) => "point",
            Self::Color(..) => "color",
            Self::Key(_) => "key",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(_) => "object reference",
            Self::Property(..) => "property reference",
            Self::Behavior(_) => "behavior reference",
            Self::Class { .. } => "class description",
            Self::RandInt(..) => "random int",
            Self::Choice(_) => "choice",
            Self::Game(_) => "game variable",
            Self::Add(_) => "sum",
            Self::Sub(_) => "difference",
            Self::Entity(_) => "entity",
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            Self::Int(i) => Some(i as f32),
            Self::Float(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Int(i) => Some(i),
            Self::Float(f) if f.fract() == 0.0 => Some(f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Points, or two-element numeric lists.
    pub fn as_point(&self) -> Option<Vec2> {
        match self {
            Self::Point(x, y) => Some(Vec2::new(*x, *y)),
            Self::List(items) if items.len() == 2 => {
                Some(Vec2::new(items[0].as_f32()?, items[1].as_f32()?))
            }
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match *self {
            Self::Color(r, g, b) => Some(Color(r, g, b)),
            _ => None,
        }
    }

    /// True for variants that must be substituted before use.
    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            Self::Object(_)
                | Self::Property(..)
                | Self::Behavior(_)
                | Self::Class { .. }
                | Self::RandInt(..)
                | Self::Choice(_)
                | Self::Game(_)
                | Self::Add(_)
                | Self::Sub(_)
        )
    }
}

impl From<Vec2> for Value {
    fn from(v: Vec2) -> Self {
        Self::Point(v.x, v.y)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

//=== ObjectDescription ===================================================

/// Lazy description of an object or controller: class name plus
/// constructor parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub class: String,
    #[serde(default)]
    pub init: BTreeMap<String, Value>,
}

impl ObjectDescription {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into(), init: BTreeMap::new() }
    }

    /// Builder-style parameter setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.init.insert(key.to_string(), value.into());
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_coerce() {
        assert_eq!(Value::Int(3).as_f32(), Some(3.0));
        assert_eq!(Value::Float(2.0).as_i64(), Some(2));
        assert_eq!(Value::Float(2.5).as_i64(), None);
        assert_eq!(Value::Str("x".into()).as_f32(), None);
    }

    #[test]
    fn points_from_lists() {
        let list = Value::List(vec![Value::Int(1), Value::Float(2.5)]);
        assert_eq!(list.as_point(), Some(Vec2::new(1.0, 2.5)));
        assert_eq!(Value::List(vec![Value::Int(1)]).as_point(), None);
    }

    #[test]
    fn markers_parse_from_ron() {
        let v: Value = ron::from_str(r#"Property("player", "gun")"#).unwrap();
        assert_eq!(v, Value::Property("player".into(), "gun".into()));
        assert!(v.is_marker());

        let v: Value = ron::from_str(r#"Class(class: "ConstantController", init: {"dx": Int(-1)})"#).unwrap();
        assert!(matches!(v, Value::Class { ref class, .. } if class == "ConstantController"));

        let v: Value = ron::from_str("RandInt(50, 550)").unwrap();
        assert_eq!(v, Value::RandInt(50, 550));
        assert!(!Value::Int(1).is_marker());
    }

    #[test]
    fn description_defaults_to_empty_init() {
        let d: ObjectDescription = ron::from_str(r#"(class: "Starfield")"#).unwrap();
        assert_eq!(d, ObjectDescription::new("Starfield"));
    }
}
