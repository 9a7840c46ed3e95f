//=========================================================================
// Enemy
//=========================================================================
//
// A scrolling NPC. Enters from the right edge at a random height unless
// a `position` is given, follows its controller, and hides once it has
// fully left through the left edge.
//
// Killed by touching the player or by any projectile it did not fire
// itself. Indestructible enemies still hurt the player but ignore every
// collision.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;
use rand::Rng;

//=== Internal Dependencies ===============================================

use super::{explosion_sprite, SMALL_EXPLOSION};
use crate::core::collision::{Rect, Shape, Vec2};
use crate::core::entity::{
    priority, Body, Collidable, Contact, DeathSequence, GameObject, Killable, Motion, Movable, ObjectContext, Role,
    Sprite, Visibility,
};
use crate::core::message_bus::LifecycleEvent;
use crate::core::render::Surface;
use crate::core::scene::{BuildContext, InvokeError, ParamError, Params, Value};

/// Distance kept from the top and bottom edges when picking a height.
const SPAWN_MARGIN: f32 = 50.0;

//=== Enemy ===============================================================

#[derive(Debug)]
pub struct Enemy {
    body: Body,
    motion: Motion,
    sprite: Sprite,
    visibility: Visibility,
    death: DeathSequence,
    indestructible: bool,
    clock: u64,
}

impl Enemy {
    pub fn from_params(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Self, ParamError> {
        let sprite = Sprite::from_params(params, Some("media/images/ufo_spin.gif"))?;
        let position = match params.get("position") {
            Some(_) => params.point("position")?,
            None => Vec2::new(ctx.bounds.right(), random_height(ctx)),
        };
        Ok(Self {
            body: Body::new(position, sprite.size()),
            motion: Motion::from_option(params.take_controller("controller")),
            death: DeathSequence::new(explosion_sprite(params, SMALL_EXPLOSION)?),
            sprite,
            visibility: Visibility::default(),
            indestructible: params.bool_or("indestructible", false)?,
            clock: ctx.now,
        })
    }

    pub fn is_indestructible(&self) -> bool {
        self.indestructible
    }
}

fn random_height(ctx: &mut BuildContext<'_>) -> f32 {
    let low = ctx.bounds.y + SPAWN_MARGIN;
    let high = ctx.bounds.bottom() - SPAWN_MARGIN;
    if high > low {
        ctx.rng.gen_range(low..=high).round()
    } else {
        ctx.bounds.center().y
    }
}

//=== GameObject ==========================================================

impl GameObject for Enemy {
    fn priority(&self) -> i32 {
        priority::ENEMY
    }

    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        self.clock = ctx.now;
        if self.death.is_dying() {
            if self.death.update(ctx.now) {
                self.visibility.hide();
            }
            return;
        }
        if !self.visibility.is_visible() {
            return;
        }
        if let Some((dx, dy)) = self.motion.step() {
            self.move_by(dx, dy);
            self.offlimits(ctx.bounds);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.death.is_dying() {
            self.death.draw(surface);
        } else {
            self.sprite.draw(surface, self.body.position, self.clock);
        }
    }

    fn visible(&self) -> bool {
        self.visibility.is_visible()
    }

    fn as_movable(&self) -> Option<&dyn Movable> {
        Some(self)
    }

    fn as_collidable(&self) -> Option<&dyn Collidable> {
        Some(self)
    }

    fn as_collidable_mut(&mut self) -> Option<&mut dyn Collidable> {
        Some(self)
    }

    fn as_killable(&self) -> Option<&dyn Killable> {
        Some(self)
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "position" => Some(self.body.position.into()),
            "center" => Some(self.body.rect().center().into()),
            "dying" => Some(Value::Bool(self.death.is_dying())),
            _ => None,
        }
    }

    fn invoke(&mut self, method: &str, _args: &[Value], ctx: &mut ObjectContext<'_>) -> Result<(), InvokeError> {
        match method {
            "die" => self.die(ctx),
            "hide" => self.visibility.hide(),
            _ => return Err(InvokeError::UnknownMethod),
        }
        Ok(())
    }
}

//=== Capabilities ========================================================

impl Movable for Enemy {
    fn position(&self) -> Vec2 {
        self.body.position
    }

    fn bounds(&self) -> Rect {
        self.body.rect()
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.body.move_by(dx, dy);
    }

    fn offlimits(&mut self, world: Rect) {
        self.body.clamp_vertical(world);
        if self.body.is_left_of(world) {
            debug!(target: "scene", "Enemy left the world at x = {}", self.body.position.x);
            self.visibility.hide();
        }
    }
}

impl Collidable for Enemy {
    fn shape(&self) -> Shape {
        Shape::Rect(self.body.rect())
    }

    fn role(&self) -> Role {
        Role::Enemy
    }

    fn should_collide(&self) -> bool {
        self.should_update()
    }

    fn collide_with(&mut self, other: &Contact, ctx: &mut ObjectContext<'_>) {
        if self.indestructible || !self.should_update() {
            return;
        }
        let lethal = match other.role {
            Role::Player => true,
            Role::Projectile { .. } => !other.fired_by(ctx.id),
            _ => false,
        };
        if lethal {
            self.die(ctx);
        }
    }
}

impl Killable for Enemy {
    fn should_update(&self) -> bool {
        self.visibility.is_visible() && !self.death.is_dying()
    }

    fn is_dying(&self) -> bool {
        self.death.is_dying()
    }

    fn die(&mut self, ctx: &mut ObjectContext<'_>) {
        if self.death.is_dying() {
            return;
        }
        self.death.start(self.body.rect().center(), ctx.now);
        ctx.publish(LifecycleEvent::Died);
    }
}

//=== Factory =============================================================

pub(crate) fn build(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError> {
    Ok(Box::new(Enemy::from_params(params, ctx)?))
}

//=========================================================================
// Unit Tests
//=========================================================================
