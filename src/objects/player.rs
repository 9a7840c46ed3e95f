//=========================================================================
// Player
//=========================================================================
//
// The player's ship.
//
// Moves by `speed` times its controller's step and stays inside the
// world on both axes. Any collision except with a projectile costs a
// life and starts the death sequence; scripts bring the ship back with
// `respawn`. The player is persistent, so it survives the sweep while
// hidden between lives.
//
// Published events: `Died`, `OutOfLives` (after the last `Died`),
// `Respawned`.
//
// Scripted methods: `respawn`, `accelerate`, `add_points(n)`, `die`.
// Properties: `lives`, `points`, `speed`, `position`, `center`, `gun`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{explosion_sprite, BIG_EXPLOSION};
use crate::core::collision::{Rect, Shape, Vec2};
use crate::core::entity::{
    priority, Body, Collidable, Contact, DeathSequence, GameObject, Killable, Motion, Movable, ObjectContext, Role,
    Sprite, Visibility,
};
use crate::core::message_bus::LifecycleEvent;
use crate::core::render::Surface;
use crate::core::scene::{BuildContext, InvokeError, ParamError, Params, Value};

//=== Constants ===========================================================

pub const DEFAULT_LIVES: i64 = 3;
pub const DEFAULT_SPEED: f32 = 5.0;
pub const MAX_SPEED: f32 = 7.5;
const ACCELERATION: f32 = 0.5;

//=== Player ==============================================================

#[derive(Debug)]
pub struct Player {
    body: Body,
    spawn_point: Vec2,
    motion: Motion,
    sprite: Sprite,
    visibility: Visibility,
    death: DeathSequence,
    collide: bool,
    lives: u32,
    points: i64,
    speed: f32,
    clock: u64,
}

impl Player {
    /// Reads `position`, `speed`, `lives`, an optional `controller` and
    /// the sprite parameters (`image`, `size`, `frames`, `frame_ms`).
    pub fn from_params(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Self, ParamError> {
        let sprite = Sprite::from_params(params, Some("media/images/f18.png"))?;
        let default_position = Vec2::new(ctx.bounds.x + 40.0, ctx.bounds.center().y - sprite.size().y / 2.0);
        let position = params.point_or("position", default_position)?;
        let lives = params.int_or("lives", DEFAULT_LIVES)?;
        let lives = u32::try_from(lives).map_err(|_| ParamError::invalid("lives", "must not be negative"))?;

        Ok(Self {
            body: Body::new(position, sprite.size()),
            spawn_point: position,
            motion: Motion::from_option(params.take_controller("controller")),
            death: DeathSequence::new(explosion_sprite(params, BIG_EXPLOSION)?),
            sprite,
            visibility: Visibility::default(),
            collide: true,
            lives,
            points: 0,
            speed: params.float_or("speed", DEFAULT_SPEED)?,
            clock: ctx.now,
        })
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Negative or zero amounts are ignored.
    pub fn add_points(&mut self, points: i64) {
        if points > 0 {
            self.points += points;
        }
    }

    /// Raises the speed by half a unit, up to `MAX_SPEED`.
    pub fn accelerate(&mut self) {
        if self.speed < MAX_SPEED {
            self.speed = (self.speed + ACCELERATION).min(MAX_SPEED);
        }
    }

    /// Puts the ship back at its spawn point. A player without lives
    /// stays down.
    pub fn respawn(&mut self, ctx: &mut ObjectContext<'_>) {
        if self.lives == 0 {
            debug!(target: "scene", "Player {} has no lives left; respawn ignored", ctx.id);
            return;
        }
        self.body.position = self.spawn_point;
        self.death.reset();
        self.visibility.show();
        self.collide = true;
        ctx.publish(LifecycleEvent::Respawned);
    }

    /// Muzzle position: middle of the ship's nose.
    fn gun(&self) -> Vec2 {
        let r = self.body.rect();
        Vec2::new(r.right(), r.center().y)
    }
}

//=== GameObject ==========================================================

impl GameObject for Player {
    fn priority(&self) -> i32 {
        priority::PLAYER
    }

    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        self.clock = ctx.now;
        if self.should_update() {
            if let Some((dx, dy)) = self.motion.step() {
                self.move_by(dx * self.speed, dy * self.speed);
                self.offlimits(ctx.bounds);
            }
        } else if self.death.update(ctx.now) {
            self.visibility.hide();
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if self.should_update() {
            self.sprite.draw(surface, self.body.position, self.clock);
        } else {
            self.death.draw(surface);
        }
    }

    fn visible(&self) -> bool {
        self.visibility.is_visible()
    }

    fn persistent(&self) -> bool {
        true
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
            "lives" => Some(Value::Int(i64::from(self.lives))),
            "points" => Some(Value::Int(self.points)),
            "speed" => Some(Value::Float(self.speed)),
            "position" => Some(self.body.position.into()),
            "center" => Some(self.body.rect().center().into()),
            "gun" => Some(self.gun().into()),
            _ => None,
        }
    }

    fn invoke(&mut self, method: &str, args: &[Value], ctx: &mut ObjectContext<'_>) -> Result<(), InvokeError> {
        match method {
            "respawn" => self.respawn(ctx),
            "accelerate" => self.accelerate(),
            "add_points" => {
                let points = args.first().and_then(Value::as_i64).ok_or(ParamError::missing("points"))?;
                self.add_points(points);
            }
            "die" => self.die(ctx),
            _ => return Err(InvokeError::UnknownMethod),
        }
        Ok(())
    }
}

//=== Capabilities ========================================================

impl Movable for Player {
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
        self.body.clamp_into(world);
    }
}

impl Collidable for Player {
    fn shape(&self) -> Shape {
        Shape::Rect(self.body.rect())
    }

    fn role(&self) -> Role {
        Role::Player
    }

    fn should_collide(&self) -> bool {
        self.collide
    }

    fn collide_with(&mut self, other: &Contact, ctx: &mut ObjectContext<'_>) {
        if !self.should_update() || other.is_projectile() {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        info!(target: "scene", "Player hit by {}; {} lives left", other.id, self.lives);
        self.die(ctx);
        if self.lives == 0 {
            ctx.publish(LifecycleEvent::OutOfLives);
        }
    }
}

impl Killable for Player {
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
        self.collide = false;
        self.death.start(self.body.rect().center(), ctx.now);
        ctx.publish(LifecycleEvent::Died);
    }
}

//=== Factory =============================================================

pub(crate) fn build(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError> {
    Ok(Box::new(Player::from_params(params, ctx)?))
}

//=========================================================================
// Unit Tests
//=========================================================================
