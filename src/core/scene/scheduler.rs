//=========================================================================
// Event Scheduler
//=========================================================================
//
// Time-ordered queue of scripted actions.
//
// Each entry counts down by the frame's elapsed milliseconds. An entry
// fires once when it reaches zero or below, then re-arms to its
// recurrence, or leaves the queue when the recurrence is zero.
//
// Ordering within a frame:
// 1. one-shot `before` entries, in the order they were queued
// 2. timed entries by ascending remaining time, ties by insertion order
//
// Example, `(1000, 500, X)` with 400 ms frames:
// ```text
// frame 1: 600   frame 2: 200   frame 3: fires, 500   frame 4: 100
// ```
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::description::ScriptCall;

//=== ScheduledEvent ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Phase {
    Before,
    Timed,
}

#[derive(Debug, Clone)]
struct ScheduledEvent {
    phase: Phase,
    remaining: i64,
    recurrence: i64,
    seq: u64,
    call: ScriptCall,
}

//=== EventQueue ==========================================================

#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<ScheduledEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_event(&mut self, phase: Phase, remaining: i64, recurrence: i64, call: ScriptCall) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.events.push(ScheduledEvent { phase, remaining, recurrence, seq, call });
    }

    /// Queues a one-shot call that fires on the next frame ahead of every
    /// timed entry.
    pub fn push_before(&mut self, call: ScriptCall) {
        self.push_event(Phase::Before, 0, 0, call);
    }

    /// Queues `call` to fire after `delay` ms, then every `recurrence` ms.
    ///
    /// Negative recurrences are treated as zero.
    pub fn push(&mut self, delay: i64, recurrence: i64, call: ScriptCall) {
        self.push_event(Phase::Timed, delay, recurrence.max(0), call);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remaining time of every timed entry, in firing order.
    pub fn remaining(&self) -> Vec<i64> {
        let mut timed: Vec<_> = self.events.iter().filter(|e| e.phase == Phase::Timed).collect();
        timed.sort_by_key(|e| (e.remaining, e.seq));
        timed.into_iter().map(|e| e.remaining).collect()
    }

    /// Advances every entry by `elapsed` ms and returns the calls that
    /// fired, in execution order.
    pub fn advance(&mut self, elapsed: i64) -> Vec<ScriptCall> {
        self.events.sort_by_key(|e| (e.phase, e.remaining, e.seq));

        let mut fired = Vec::new();
        for event in &mut self.events {
            event.remaining -= elapsed;
            if event.phase == Phase::Before || event.remaining <= 0 {
                fired.push(event.call.clone());
                event.remaining = event.recurrence;
            }
        }
        self.events.retain(|e| e.remaining > 0);
        fired
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

    fn names(calls: &[ScriptCall]) -> Vec<&str> {
        calls.iter().map(ScriptCall::action).collect()
    }

    //=== Recurrence ======================================================

    #[test]
    fn recurring_event_fires_and_rearms() {
        let mut queue = EventQueue::new();
        queue.push(1000, 500, call("x"));

        assert!(queue.advance(400).is_empty());
        assert_eq!(queue.remaining(), vec![600]);
        assert!(queue.advance(400).is_empty());
        assert_eq!(queue.remaining(), vec![200]);
        assert_eq!(names(&queue.advance(400)), vec!["x"]);
        assert_eq!(queue.remaining(), vec![500]);
        assert!(queue.advance(400).is_empty());
        assert_eq!(queue.remaining(), vec![100]);
    }

    #[test]
    fn one_shot_event_is_dropped_after_firing() {
        let mut queue = EventQueue::new();
        queue.push(100, 0, call("once"));
        assert_eq!(names(&queue.advance(100)), vec!["once"]);
        assert!(queue.is_empty());
        assert!(queue.advance(100).is_empty());
    }

    #[test]
    fn fires_at_most_once_per_frame() {
        let mut queue = EventQueue::new();
        queue.push(10, 10, call("x"));
        assert_eq!(queue.advance(1000).len(), 1);
        assert_eq!(queue.remaining(), vec![10]);
    }

    //=== Ordering ========================================================

    #[test]
    fn before_runs_first_in_order() {
        let mut queue = EventQueue::new();
        queue.push(0, 0, call("timed_zero"));
        queue.push(-50, 0, call("timed_negative"));
        queue.push_before(call("first"));
        queue.push_before(call("second"));

        let fired = queue.advance(16);
        assert_eq!(names(&fired), vec!["first", "second", "timed_negative", "timed_zero"]);
    }

    #[test]
    fn same_frame_firings_are_time_ordered_and_stable() {
        let mut queue = EventQueue::new();
        queue.push(30, 0, call("c"));
        queue.push(10, 0, call("a"));
        queue.push(30, 0, call("d"));
        queue.push(20, 0, call("b"));
        assert_eq!(names(&queue.advance(50)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn before_entries_fire_once() {
        let mut queue = EventQueue::new();
        queue.push_before(call("setup"));
        assert_eq!(queue.advance(0).len(), 1);
        assert!(queue.advance(0).is_empty());
    }
}
