//=========================================================================
// Notification Bus
//=========================================================================
//
// Lifecycle notifications from entities to scene scripts.
//
// Architecture:
//   Entities / Scene → publish() → pending: Vec<Notification>
//                                       ↓
//   Scene (end of update pass) → resolve() → matching subscriptions
//                                       ↓
//                                 Vec<ScriptCall> (run by the scene)
//
// Pattern: publish → resolve (drains) → run calls → repeat
//
// Subscriptions come from the scene description's `notifications` list or
// from Rust closures registered with `subscribe_fn`. A subscription's
// source is an object name, or `*` for every object.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::entity::EntityId;
use crate::core::scene::ScriptCall;

//=== LifecycleEvent ======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Added to the scene's live list.
    Spawned,
    /// Entered its dying sequence.
    Died,
    /// Swept from the live list.
    Destroyed,
    /// Lost its last life.
    OutOfLives,
    /// Came back after dying.
    Respawned,
}

//=== Notification ========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: EntityId,
    pub source: String,
    pub event: LifecycleEvent,
}

//=== Subscribers =========================================================

/// Source name matching every object.
pub const ANY_SOURCE: &str = "*";

pub type NotificationHandler = Box<dyn FnMut(&Notification) -> Vec<ScriptCall>>;

enum Handler {
    Script(Vec<ScriptCall>),
    Closure(NotificationHandler),
}

struct Subscriber {
    source: String,
    event: LifecycleEvent,
    handler: Handler,
}

impl Subscriber {
    fn matches(&self, n: &Notification) -> bool {
        self.event == n.event && (self.source == ANY_SOURCE || self.source == n.source)
    }
}

//=== NotificationBus =====================================================

#[derive(Default)]
pub struct NotificationBus {
    pending: Vec<Notification>,
    subscribers: Vec<Subscriber>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Subscription API -------------------------------------------------

    /// Runs `calls` whenever `source` publishes `event`.
    pub fn subscribe(&mut self, source: &str, event: LifecycleEvent, calls: Vec<ScriptCall>) {
        self.subscribers.push(Subscriber {
            source: source.to_string(),
            event,
            handler: Handler::Script(calls),
        });
    }

    /// Runs the calls returned by `handler` whenever `source` publishes
    /// `event`.
    pub fn subscribe_fn<F>(&mut self, source: &str, event: LifecycleEvent, handler: F)
    where
        F: FnMut(&Notification) -> Vec<ScriptCall> + 'static,
    {
        self.subscribers.push(Subscriber {
            source: source.to_string(),
            event,
            handler: Handler::Closure(Box::new(handler)),
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    //--- Message Operations -----------------------------------------------

    pub fn publish(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    /// Notifications published since the last `resolve`.
    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }

    /// Drains pending notifications and collects the calls of every
    /// matching subscription, in publish order then subscription order.
    pub fn resolve(&mut self) -> Vec<ScriptCall> {
        let mut calls = Vec::new();
        for notification in std::mem::take(&mut self.pending) {
            for subscriber in self.subscribers.iter_mut().filter(|s| s.matches(&notification)) {
                match &mut subscriber.handler {
                    Handler::Script(script) => calls.extend(script.iter().cloned()),
                    Handler::Closure(f) => calls.extend(f(&notification)),
                }
            }
        }
        calls
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("pending", &self.pending)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn note(source: &str, event: LifecycleEvent) -> Notification {
        Notification { id: EntityId::new(1), source: source.into(), event }
    }

    fn call(action: &str) -> ScriptCall {
        ScriptCall::new(action, vec![])
    }

    #[test]
    fn resolve_matches_source_and_event() {
        let mut bus = NotificationBus::new();
        bus.subscribe("player", LifecycleEvent::Died, vec![call("a")]);
        bus.subscribe("ufo", LifecycleEvent::Died, vec![call("b")]);

        bus.publish(note("player", LifecycleEvent::Died));
        bus.publish(note("player", LifecycleEvent::Spawned));

        let calls = bus.resolve();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].action(), "a");
        assert!(bus.pending().is_empty());
    }

    #[test]
    fn wildcard_source_matches_everything() {
        let mut bus = NotificationBus::new();
        bus.subscribe(ANY_SOURCE, LifecycleEvent::Destroyed, vec![call("x")]);
        bus.publish(note("a", LifecycleEvent::Destroyed));
        bus.publish(note("b", LifecycleEvent::Destroyed));
        assert_eq!(bus.resolve().len(), 2);
    }

    #[test]
    fn closures_receive_the_notification() {
        let mut bus = NotificationBus::new();
        bus.subscribe_fn("ufo", LifecycleEvent::Died, |n| {
            vec![ScriptCall::new("object", vec![n.source.as_str().into()])]
        });
        bus.publish(note("ufo", LifecycleEvent::Died));
        let calls = bus.resolve();
        assert_eq!(calls[0].args(), &[crate::core::scene::Value::Str("ufo".into())]);
    }

    #[test]
    fn resolve_without_pending_is_empty() {
        let mut bus = NotificationBus::new();
        bus.subscribe("p", LifecycleEvent::Died, vec![call("a")]);
        assert!(bus.resolve().is_empty());
    }
}
