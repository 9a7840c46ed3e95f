//=========================================================================
// Projectile
//=========================================================================
//
// A straight shot. The velocity is fixed at spawn, aimed from `origin`
// toward `target` (or along `direction`), and drawn as the segment
// between the previous and the current position.
//
// Hides on leaving the world or on hitting anything except its creator
// and other projectiles. The creator is identity based: a shot never
// touches the entity that fired it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::f32::consts::PI;

//=== Internal Dependencies ===============================================

use crate::core::collision::{Rect, Shape, Vec2};
use crate::core::controller::ConstantController;
use crate::core::entity::{
    priority, Collidable, Contact, EntityId, GameObject, Motion, Movable, ObjectContext, Role, Visibility,
};
use crate::core::render::{Color, Surface};
use crate::core::scene::{BuildContext, ParamError, Params, Value};

pub const DEFAULT_SPEED: f32 = 8.0;

/// Velocity of a shot fired from `origin` at `target`.
pub fn aim(origin: Vec2, target: Vec2, speed: f32) -> (f32, f32) {
    let angle = PI + (origin.y - target.y).atan2(origin.x - target.x);
    (speed * angle.cos(), speed * angle.sin())
}

//=== Projectile ==========================================================

#[derive(Debug)]
pub struct Projectile {
    position: Vec2,
    previous: Option<Vec2>,
    motion: Motion,
    visibility: Visibility,
    creator: Option<EntityId>,
    color: Color,
    width: f32,
}

impl Projectile {
    /// Reads `origin`, `target` or `direction`, and the optional
    /// `creator`, `speed`, `color` and `width`.
    pub fn from_params(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Self, ParamError> {
        let origin = params.point("origin")?;
        let target = match (params.get("target"), params.get("direction")) {
            (Some(_), _) => params.point("target")?,
            (None, Some(_)) => {
                let direction = params.point("direction")?;
                if direction == Vec2::ZERO {
                    return Err(ParamError::invalid("direction", "must not be zero"));
                }
                Vec2::new(origin.x + direction.x, origin.y + direction.y)
            }
            (None, None) => return Err(ParamError::missing("target")),
        };
        let (dx, dy) = aim(origin, target, params.float_or("speed", DEFAULT_SPEED)?);

        Ok(Self {
            position: origin,
            previous: None,
            motion: Motion::new(Box::new(ConstantController::new(dx, dy, 1.0))),
            visibility: Visibility::default(),
            creator: params.entity("creator")?,
            color: params.color_or("color", Color::CYAN)?,
            width: params.float_or("width", 4.0)?,
        })
    }

    pub fn creator(&self) -> Option<EntityId> {
        self.creator
    }
}

//=== GameObject ==========================================================

impl GameObject for Projectile {
    fn priority(&self) -> i32 {
        priority::PROJECTILE
    }

    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        if !self.visibility.is_visible() {
            return;
        }
        if let Some((dx, dy)) = self.motion.step() {
            self.previous = Some(self.position);
            self.move_by(dx, dy);
            self.offlimits(ctx.bounds);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if let Some(previous) = self.previous {
            surface.draw_line(self.position, previous, self.color, self.width);
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

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "position" => Some(self.position.into()),
            "creator" => self.creator.map(Value::Entity),
            _ => None,
        }
    }
}

//=== Capabilities ========================================================

impl Movable for Projectile {
    fn position(&self) -> Vec2 {
        self.position
    }

    /// Box spanned by the drawn segment.
    fn bounds(&self) -> Rect {
        let previous = self.previous.unwrap_or(self.position);
        let x = self.position.x.min(previous.x);
        let y = self.position.y.min(previous.y);
        Rect::new(x, y, (self.position.x - previous.x).abs(), (self.position.y - previous.y).abs())
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    fn offlimits(&mut self, world: Rect) {
        if !world.contains(self.position) {
            self.visibility.hide();
        }
    }
}

impl Collidable for Projectile {
    fn shape(&self) -> Shape {
        Shape::Line { from: self.position, to: self.previous.unwrap_or(self.position) }
    }

    fn role(&self) -> Role {
        Role::Projectile { creator: self.creator }
    }

    fn should_collide(&self) -> bool {
        self.visibility.is_visible()
    }

    fn collide_with(&mut self, other: &Contact, _ctx: &mut ObjectContext<'_>) {
        if other.is_projectile() || Some(other.id) == self.creator {
            return;
        }
        self.visibility.hide();
    }
}

//=== Factory =============================================================

pub(crate) fn build(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError> {
    Ok(Box::new(Projectile::from_params(params, ctx)?))
}

//=========================================================================
// Unit Tests
//=========================================================================
