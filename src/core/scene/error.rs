//=========================================================================
// Scene Errors
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::value::Value;
use crate::core::audio::AudioError;

//=== ParamError ==========================================================

/// A factory could not build its object from the given parameters.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("missing parameter '{0}'")]
    Missing(String),

    #[error("parameter '{key}' should be {expected}, found {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid parameter '{key}': {reason}")]
    Invalid { key: String, reason: String },

    #[error("could not read image '{path}': {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

impl ParamError {
    pub fn missing(key: &str) -> Self {
        Self::Missing(key.to_string())
    }

    pub fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid { key: key.to_string(), reason: reason.into() }
    }

    pub fn wrong_type(key: &str, expected: &'static str, found: &Value) -> Self {
        Self::WrongType { key: key.to_string(), expected, found: found.type_name() }
    }
}

//=== InvokeError =========================================================

/// A scripted method call on an object failed.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("no such method")]
    UnknownMethod,

    #[error(transparent)]
    Param(#[from] ParamError),
}

//=== SceneError ==========================================================

#[derive(Debug, Error)]
pub enum SceneError {
    //--- Loading ----------------------------------------------------------
    #[error("could not read scene file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse scene '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: ron::error::SpannedError,
    },

    //--- Scripting --------------------------------------------------------
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("bad arguments for '{action}': {reason}")]
    BadArguments { action: String, reason: String },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    //--- Objects ----------------------------------------------------------
    #[error("no object named '{0}'")]
    ObjectNotFound(String),

    #[error("requested one object named '{0}', found many")]
    AmbiguousObject(String),

    #[error("'{0}' is not described in this scene")]
    UnknownObject(String),

    #[error("unknown class '{0}'")]
    UnknownClass(String),

    #[error("unknown behavior '{0}'")]
    UnknownBehavior(String),

    #[error("shared object '{0}' is not available")]
    SharedUnavailable(String),

    #[error("unknown game variable '{0}'")]
    UnknownVariable(String),

    #[error("object '{object}' has no property '{property}'")]
    UnknownProperty { object: String, property: String },

    #[error("cannot resolve {found} here: {reason}")]
    Unresolvable { found: &'static str, reason: &'static str },

    #[error("error instantiating '{class}': {source}")]
    Instantiate {
        class: String,
        #[source]
        source: ParamError,
    },

    #[error("calling '{method}' on '{object}' failed: {source}")]
    Invoke {
        object: String,
        method: String,
        #[source]
        source: InvokeError,
    },

    //--- Audio ------------------------------------------------------------
    #[error(transparent)]
    Audio(#[from] AudioError),
}
