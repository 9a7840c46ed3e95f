//=========================================================================
// Game Configuration
//=========================================================================
//
// Run-wide settings loaded from a RON file.
//
// ```ron
// (
//     title: "Genesis",
//     width: 800,
//     height: 600,
//     fps: 60,
//     mute: false,
//     seed: Some(42),
//     scenes: ["scenes/intro.ron", "scenes/stage1.ron"],
//     first_scene: "intro",
//     shared: {"score": (class: "Score", init: {"position": Point(10.0, 10.0)})},
//     variables: {"difficulty": Int(1)},
// )
// ```
//
// Relative scene paths are resolved against the directory of the
// configuration file.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::scene::{ObjectDescription, Value};

/// Highest frame rate that still leaves a whole millisecond per frame.
pub const MAX_FPS: u32 = 1000;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse configuration '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames per second, at most `MAX_FPS`. Each frame advances scenes
    /// by `1000 / fps` ms.
    pub fps: u32,
    pub mute: bool,
    /// Fixed seed for deterministic runs.
    pub seed: Option<u64>,
    pub scenes: Vec<PathBuf>,
    pub first_scene: String,
    /// Objects placed on the shared shelf before the first scene loads.
    pub shared: BTreeMap<String, ObjectDescription>,
    /// Extra game variables, readable with `Game(name)`.
    pub variables: BTreeMap<String, Value>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Genesis".to_string(),
            width: 800,
            height: 600,
            fps: 60,
            mute: false,
            seed: None,
            scenes: Vec::new(),
            first_scene: "intro".to_string(),
            shared: BTreeMap::new(),
            variables: BTreeMap::new(),
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(source: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self =
            ron::from_str(source).map_err(|source| ConfigError::Parse { origin: origin.to_string(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file. Relative scene paths
    /// become relative to the file's directory.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let mut config = Self::from_ron_str(&contents, &path.display().to_string())?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for scene in &mut config.scenes {
            if scene.is_relative() {
                *scene = base.join(&*scene);
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(ConfigError::Invalid(format!("fps must be between 1 and {MAX_FPS}, got {}", self.fps)));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!("window size {}x{} is empty", self.width, self.height)));
        }
        if self.first_scene.is_empty() {
            return Err(ConfigError::Invalid("first_scene is not set".into()));
        }
        Ok(())
    }

    /// Milliseconds per frame.
    pub fn frame_ms(&self) -> u64 {
        u64::from(1000 / self.fps.max(1))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_fields_take_defaults() {
        let config = GameConfig::from_ron_str("(fps: 50, seed: Some(3))", "inline").unwrap();
        assert_eq!(config.fps, 50);
        assert_eq!(config.frame_ms(), 20);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.width, 800);
        assert_eq!(config.first_scene, "intro");
    }

    #[test]
    fn shared_objects_and_variables_parse() {
        let config = GameConfig::from_ron_str(
            r#"(
                shared: {"score": (class: "Score", init: {"position": Point(10.0, 10.0)})},
                variables: {"lives": Int(3)},
            )"#,
            "inline",
        )
        .unwrap();
        assert_eq!(config.shared["score"].class, "Score");
        assert_eq!(config.variables["lives"], Value::Int(3));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(GameConfig::from_ron_str("(fps: 0)", "inline"), Err(ConfigError::Invalid(_))));
        assert!(matches!(GameConfig::from_ron_str("(fps: 1001)", "inline"), Err(ConfigError::Invalid(_))));
        assert_eq!(GameConfig::from_ron_str("(fps: 1000)", "inline").unwrap().frame_ms(), 1);
        assert!(matches!(GameConfig::from_ron_str("(width: 0)", "inline"), Err(ConfigError::Invalid(_))));
        assert!(matches!(GameConfig::from_ron_str("(fps: \"fast\")", "inline"), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn scene_paths_are_relative_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ron");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"(scenes: ["scenes/intro.ron"])"#).unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.scenes, vec![dir.path().join("scenes/intro.ron")]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(GameConfig::load_from_file("/nonexistent/genesis.ron"), Err(ConfigError::Io { .. })));
    }
}
