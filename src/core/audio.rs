//=========================================================================
// Audio Mixer
//=========================================================================
//
// Seam for scene audio.
//
// Scenes register named cues (`add`) while loading, trigger them from
// scripted actions (`play`, `play_loop`) and silence everything when they
// end (`stop`). Decoding and mixing belong to the implementation.
//
// `CueMixer` is the built-in implementation: it validates cue names,
// tracks what is playing and logs every request. Muting keeps the
// bookkeeping but skips playback.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::{debug, info};
use thiserror::Error;

//=== AudioError ==========================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("Could not play audio '{0}': no such cue")]
    UnknownCue(String),
}

//=== Mixer Trait =========================================================

pub trait Mixer {
    /// Registers `filename` under `name`, replacing an earlier cue.
    fn add(&mut self, name: &str, filename: &str);

    /// Plays a cue once.
    fn play(&mut self, name: &str) -> Result<(), AudioError>;

    /// Plays a cue repeatedly until `stop`.
    fn play_loop(&mut self, name: &str) -> Result<(), AudioError>;

    /// Stops all playback.
    fn stop(&mut self);
}

//=== CueMixer ============================================================

/// Playback state of one cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Once,
    Looping,
}

#[derive(Debug, Default)]
pub struct CueMixer {
    cues: BTreeMap<String, String>,
    playing: BTreeMap<String, Playback>,
    muted: bool,
}

impl CueMixer {
    pub fn new(muted: bool) -> Self {
        Self { muted, ..Self::default() }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.playing.clear();
        }
    }

    /// File registered for a cue.
    pub fn cue(&self, name: &str) -> Option<&str> {
        self.cues.get(name).map(String::as_str)
    }

    pub fn playback(&self, name: &str) -> Option<Playback> {
        self.playing.get(name).copied()
    }

    pub fn is_playing(&self, name: &str) -> bool {
        self.playing.contains_key(name)
    }

    fn start(&mut self, name: &str, playback: Playback) -> Result<(), AudioError> {
        let filename = self
            .cues
            .get(name)
            .ok_or_else(|| AudioError::UnknownCue(name.to_string()))?;
        if self.muted {
            debug!(target: "game", "Muted: skipping audio '{name}'");
            return Ok(());
        }
        info!(target: "game", "Playing audio '{name}' ({filename}, {playback:?})");
        self.playing.insert(name.to_string(), playback);
        Ok(())
    }
}

impl Mixer for CueMixer {
    fn add(&mut self, name: &str, filename: &str) {
        self.cues.insert(name.to_string(), filename.to_string());
    }

    fn play(&mut self, name: &str) -> Result<(), AudioError> {
        self.start(name, Playback::Once)
    }

    fn play_loop(&mut self, name: &str) -> Result<(), AudioError> {
        self.start(name, Playback::Looping)
    }

    fn stop(&mut self) {
        if !self.playing.is_empty() {
            debug!(target: "game", "Stopping {} audio cue(s)", self.playing.len());
        }
        self.playing.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_registered_cue() {
        let mut mixer = CueMixer::new(false);
        mixer.add("music", "media/sound/music.ogg");
        mixer.play_loop("music").unwrap();
        assert_eq!(mixer.playback("music"), Some(Playback::Looping));
        assert_eq!(mixer.cue("music"), Some("media/sound/music.ogg"));
    }

    #[test]
    fn unknown_cue_is_an_error() {
        let mut mixer = CueMixer::new(false);
        assert_eq!(mixer.play("nope"), Err(AudioError::UnknownCue("nope".into())));
    }

    #[test]
    fn muted_mixer_validates_but_does_not_play() {
        let mut mixer = CueMixer::new(true);
        mixer.add("shot", "laser.ogg");
        assert!(mixer.play("shot").is_ok());
        assert!(!mixer.is_playing("shot"));
        assert!(mixer.play("missing").is_err());
    }

    #[test]
    fn stop_silences_everything() {
        let mut mixer = CueMixer::new(false);
        mixer.add("a", "a.ogg");
        mixer.add("b", "b.ogg");
        mixer.play("a").unwrap();
        mixer.play_loop("b").unwrap();
        mixer.stop();
        assert!(!mixer.is_playing("a"));
        assert!(!mixer.is_playing("b"));
    }
}
