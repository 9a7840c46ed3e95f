//=========================================================================
// Scripted Actions
//=========================================================================
//
// Typed form of a `ScriptCall`.
//
// | Action       | Arguments                                         |
// |--------------|---------------------------------------------------|
// | `spawn`      | name or list of names, optional override map      |
// | `play_audio` | cue name                                          |
// | `object`     | object name, method name, method arguments...     |
// | `call`       | function name, function arguments...              |
// | `end_scene`  | none                                              |
// | `game_over`  | none                                              |
// | `queue`      | delay ms, recurrence ms, action name, arguments...  |
//
// Scenes parse every call they carry when they load, so an unknown
// action name fails the load instead of surfacing mid-game.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

//=== Internal Dependencies ===============================================

use super::description::ScriptCall;
use super::error::SceneError;
use super::value::Value;

//=== Action ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Spawn { names: Vec<String>, overrides: BTreeMap<String, Value> },
    PlayAudio(String),
    Object { name: String, method: String, args: Vec<Value> },
    Call { function: String, args: Vec<Value> },
    EndScene,
    GameOver,
    Queue { delay: i64, recurrence: i64, call: ScriptCall },
}

impl Action {
    pub fn parse(call: &ScriptCall) -> Result<Self, SceneError> {
        let action = call.action();
        let args = call.args();
        let bad = |reason: &str| SceneError::BadArguments {
            action: action.to_string(),
            reason: reason.to_string(),
        };
        let string_at = |i: usize, what: &str| -> Result<String, SceneError> {
            match args.get(i) {
                Some(Value::Str(s)) => Ok(s.clone()),
                _ => Err(bad(&format!("argument {} must be the {what}", i + 1))),
            }
        };

        match action {
            "spawn" => {
                let names = match args.first() {
                    Some(Value::Str(name)) => vec![name.clone()],
                    Some(Value::List(items)) => items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| bad("object list must contain names"))?,
                    _ => return Err(bad("expected an object name or a list of names")),
                };
                let overrides = match args.get(1) {
                    None => BTreeMap::new(),
                    Some(Value::Map(map)) => map.clone(),
                    Some(_) => return Err(bad("overrides must be a map")),
                };
                if args.len() > 2 {
                    return Err(bad("too many arguments"));
                }
                Ok(Self::Spawn { names, overrides })
            }
            "play_audio" => Ok(Self::PlayAudio(string_at(0, "cue name")?)),
            "object" => Ok(Self::Object {
                name: string_at(0, "object name")?,
                method: string_at(1, "method name")?,
                args: args.get(2..).unwrap_or_default().to_vec(),
            }),
            "call" => Ok(Self::Call {
                function: string_at(0, "function name")?,
                args: args.get(1..).unwrap_or_default().to_vec(),
            }),
            "end_scene" => Ok(Self::EndScene),
            "game_over" => Ok(Self::GameOver),
            "queue" => {
                let delay = args.first().and_then(Value::as_i64).ok_or_else(|| bad("delay must be an integer"))?;
                let recurrence = args.get(1).and_then(Value::as_i64).ok_or_else(|| bad("recurrence must be an integer"))?;
                let inner = ScriptCall::new(string_at(2, "action name")?, args.get(3..).unwrap_or_default().to_vec());
                // Validate the queued call now rather than when it fires.
                Self::parse(&inner)?;
                Ok(Self::Queue { delay, recurrence, call: inner })
            }
            other => Err(SceneError::UnknownAction(other.to_string())),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
