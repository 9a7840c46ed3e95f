//=========================================================================
// Game Timers
//=========================================================================
//
// Named repeating timers owned by the game rather than a scene.
//
// Timers are checked during the input phase of each tick. A due timer
// yields its call once (however late the tick is) and re-arms to its
// interval. The calls run on whichever scene is current.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::scene::ScriptCall;

//=== Timer ===============================================================

#[derive(Debug, Clone)]
struct Timer {
    name: String,
    interval: u64,
    remaining: u64,
    call: ScriptCall,
}

//=== GameTimers ==========================================================

#[derive(Debug, Default)]
pub struct GameTimers {
    timers: Vec<Timer>,
}

impl GameTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the timer `name`, firing every `interval_ms`
    /// (at least 1).
    pub fn add(&mut self, name: &str, interval_ms: u64, call: ScriptCall) {
        let interval = interval_ms.max(1);
        self.remove(name);
        debug!(target: "game", "Timer '{name}' every {interval} ms");
        self.timers.push(Timer { name: name.to_string(), interval, remaining: interval, call });
    }

    /// Removes the timer `name`. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.name != name);
        self.timers.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.timers.iter().any(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advances all timers and returns the calls that came due, in
    /// registration order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<ScriptCall> {
        let mut due = Vec::new();
        for timer in &mut self.timers {
            if elapsed_ms >= timer.remaining {
                due.push(timer.call.clone());
                timer.remaining = timer.interval;
            } else {
                timer.remaining -= elapsed_ms;
            }
        }
        due
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str) -> ScriptCall {
        ScriptCall::new(name, vec![])
    }

    #[test]
    fn timer_fires_every_interval() {
        let mut timers = GameTimers::new();
        timers.add("t", 100, call("spawn"));
        assert!(timers.advance(60).is_empty());
        assert_eq!(timers.advance(60).len(), 1);
        assert!(timers.advance(60).is_empty());
        assert_eq!(timers.advance(40).len(), 1);
    }

    #[test]
    fn late_tick_fires_once() {
        let mut timers = GameTimers::new();
        timers.add("t", 10, call("x"));
        assert_eq!(timers.advance(1000).len(), 1);
    }

    #[test]
    fn add_replaces_and_remove_reports() {
        let mut timers = GameTimers::new();
        timers.add("t", 10, call("a"));
        timers.add("t", 20, call("b"));
        assert_eq!(timers.len(), 1);
        assert!(timers.remove("t"));
        assert!(!timers.remove("t"));
        assert!(timers.is_empty());
    }
}
