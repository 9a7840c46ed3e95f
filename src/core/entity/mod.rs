//=========================================================================
// Entity System
//=========================================================================
//
// Capability interfaces for everything that lives in a scene.
//
// Entities are composed from independent components (`components`) and
// expose each capability through its own trait:
//
// | Trait        | Capability                                        |
// |--------------|---------------------------------------------------|
// | `GameObject` | update, draw, visibility, scripting hooks         |
// | `Movable`    | position, bounds, `move_by`, `offlimits`          |
// | `Collidable` | shape, role, collision gate and response          |
// | `Killable`   | dying state and the `die` transition              |
//
// The scene holds `Box<dyn GameObject>` and reaches the other
// capabilities through the `as_*` accessors, which return `None` for
// entities without that capability.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod components;
pub mod sprite;

//=== Public Re-exports ===================================================

pub use components::{Body, DeathSequence, ExplosionEffect, Motion, Visibility};
pub use sprite::Sprite;

//=== Internal Dependencies ===============================================

use crate::core::collision::{Rect, Shape, Vec2};
use crate::core::message_bus::{LifecycleEvent, Notification, NotificationBus};
use crate::core::render::Surface;
use crate::core::scene::{InvokeError, Value};

//=== EntityId ============================================================

/// Unique identity of an entity within a game run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== Priorities ==========================================================

/// Draw/update priorities. Lists are sorted ascending and drawn in
/// reverse, so lower numbers end up on top.
pub mod priority {
    pub const UI: i32 = 0;
    pub const PROJECTILE: i32 = 10;
    pub const PLAYER: i32 = 20;
    pub const ENEMY: i32 = 30;
    pub const BOSS: i32 = 40;
    pub const DEFAULT: i32 = 50;
    pub const BACKGROUND: i32 = 100;
}

//=== ObjectContext =======================================================

/// What an entity sees while updating, colliding or running a scripted
/// method.
pub struct ObjectContext<'a> {
    /// The entity being called.
    pub id: EntityId,
    /// Its name in the scene's object table.
    pub name: &'a str,
    /// Scene time in milliseconds.
    pub now: u64,
    /// World bounds.
    pub bounds: Rect,
    bus: &'a mut NotificationBus,
}

impl<'a> ObjectContext<'a> {
    pub fn new(id: EntityId, name: &'a str, now: u64, bounds: Rect, bus: &'a mut NotificationBus) -> Self {
        Self { id, name, now, bounds, bus }
    }

    /// Publishes a lifecycle notification on behalf of the entity.
    pub fn publish(&mut self, event: LifecycleEvent) {
        self.bus.publish(Notification {
            id: self.id,
            source: self.name.to_string(),
            event,
        });
    }
}

//=== Collision Contact ===================================================

/// What a collidable is, from the other party's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Player,
    Enemy,
    Hazard,
    Projectile { creator: Option<EntityId> },
    Neutral,
}

/// The other party of a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub id: EntityId,
    pub role: Role,
}

impl Contact {
    pub fn is_projectile(&self) -> bool {
        matches!(self.role, Role::Projectile { .. })
    }

    /// True when this contact is a projectile fired by `id`.
    pub fn fired_by(&self, id: EntityId) -> bool {
        matches!(self.role, Role::Projectile { creator: Some(c) } if c == id)
    }
}

//=== GameObject ==========================================================

pub trait GameObject {
    /// Sort key for update and draw order.
    fn priority(&self) -> i32;

    fn update(&mut self, ctx: &mut ObjectContext<'_>);

    fn draw(&self, surface: &mut dyn Surface);

    /// Invisible, non-persistent entities are swept after each update.
    fn visible(&self) -> bool {
        true
    }

    /// Persistent entities survive the sweep while hidden.
    fn persistent(&self) -> bool {
        false
    }

    fn as_movable(&self) -> Option<&dyn Movable> {
        None
    }

    fn as_collidable(&self) -> Option<&dyn Collidable> {
        None
    }

    fn as_collidable_mut(&mut self) -> Option<&mut dyn Collidable> {
        None
    }

    fn as_killable(&self) -> Option<&dyn Killable> {
        None
    }

    /// Named value readable from scripts with `Property(object, name)`.
    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    /// Scripted method call: `("object", [Str(name), Str(method), args...])`.
    fn invoke(&mut self, _method: &str, _args: &[Value], _ctx: &mut ObjectContext<'_>) -> Result<(), InvokeError> {
        Err(InvokeError::UnknownMethod)
    }
}

//=== Movable =============================================================

pub trait Movable {
    fn position(&self) -> Vec2;

    fn bounds(&self) -> Rect;

    fn move_by(&mut self, dx: f32, dy: f32);

    /// Reacts to leaving `world`, after every successful move.
    fn offlimits(&mut self, world: Rect);
}

//=== Collidable ==========================================================

pub trait Collidable {
    /// Current collision shape, rebuilt from the entity's position.
    fn shape(&self) -> Shape;

    fn role(&self) -> Role;

    /// A pair is tested only when both sides return `true`.
    fn should_collide(&self) -> bool;

    fn collide_with(&mut self, other: &Contact, ctx: &mut ObjectContext<'_>);
}

//=== Killable ============================================================

pub trait Killable {
    /// True only while alive and not dying.
    fn should_update(&self) -> bool;

    fn is_dying(&self) -> bool;

    /// Enters the dying state.
    fn die(&mut self, ctx: &mut ObjectContext<'_>);
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_publishes_with_identity() {
        let mut bus = NotificationBus::new();
        let mut ctx = ObjectContext::new(EntityId::new(7), "ufo", 0, Rect::default(), &mut bus);
        ctx.publish(LifecycleEvent::Died);

        let pending = bus.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, EntityId::new(7));
        assert_eq!(pending[0].source, "ufo");
    }

    #[test]
    fn contact_identifies_creator() {
        let shooter = EntityId::new(1);
        let shot = Contact { id: EntityId::new(2), role: Role::Projectile { creator: Some(shooter) } };
        assert!(shot.is_projectile());
        assert!(shot.fired_by(shooter));
        assert!(!shot.fired_by(EntityId::new(3)));

        let enemy = Contact { id: EntityId::new(3), role: Role::Enemy };
        assert!(!enemy.is_projectile());
        assert!(!enemy.fired_by(shooter));
    }
}
