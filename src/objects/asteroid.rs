//=========================================================================
// Asteroid
//=========================================================================
//
// Scrolling hazard. Drifts left at a constant pace, kills the player on
// contact and is immune to everything. Collides as the ellipse inscribed
// in its sprite.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::collision::{Rect, Shape, ShapeKind, Vec2};
use crate::core::controller::ConstantController;
use crate::core::entity::{
    priority, Body, Collidable, Contact, GameObject, Motion, Movable, ObjectContext, Role, Sprite, Visibility,
};
use crate::core::render::Surface;
use crate::core::scene::{BuildContext, ParamError, Params, Value};

//=== Asteroid ============================================================

#[derive(Debug)]
pub struct Asteroid {
    body: Body,
    motion: Motion,
    sprite: Sprite,
    visibility: Visibility,
    clock: u64,
}

impl Asteroid {
    /// Reads `position`, an optional `speed` (default 1) and the sprite
    /// parameters. A `controller` replaces the default drift.
    pub fn from_params(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Self, ParamError> {
        let sprite = Sprite::from_params(params, Some("media/images/asteroid.png"))?;
        let speed = params.float_or("speed", 1.0)?;
        let motion = match params.take_controller("controller") {
            Some(controller) => Motion::new(controller),
            None => Motion::new(Box::new(ConstantController::new(-1.0, 0.0, speed))),
        };
        Ok(Self {
            body: Body::new(params.point("position")?, sprite.size()),
            motion,
            sprite,
            visibility: Visibility::default(),
            clock: ctx.now,
        })
    }
}

//=== GameObject ==========================================================

impl GameObject for Asteroid {
    fn priority(&self) -> i32 {
        priority::BOSS
    }

    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        self.clock = ctx.now;
        if let Some((dx, dy)) = self.motion.step() {
            self.move_by(dx, dy);
            self.offlimits(ctx.bounds);
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.sprite.draw(surface, self.body.position, self.clock);
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
            "position" => Some(self.body.position.into()),
            _ => None,
        }
    }
}

impl Movable for Asteroid {
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
        if self.body.is_left_of(world) {
            self.visibility.hide();
        }
    }
}

impl Collidable for Asteroid {
    fn shape(&self) -> Shape {
        Shape::fitted(ShapeKind::Ellipse, self.body.rect())
    }

    fn role(&self) -> Role {
        Role::Hazard
    }

    fn should_collide(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Immune.
    fn collide_with(&mut self, _other: &Contact, _ctx: &mut ObjectContext<'_>) {}
}

//=== Factory =============================================================

pub(crate) fn build(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError> {
    Ok(Box::new(Asteroid::from_params(params, ctx)?))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::EntityId;
    use crate::objects::testing::Harness;

    fn rock(h: &mut Harness, speed: f32) -> Asteroid {
        let mut params = Params::new("Asteroid")
            .with("size", Vec2::new(40.0, 20.0))
            .with("position", Vec2::new(10.0, 10.0))
            .with("speed", speed);
        Asteroid::from_params(&mut params, &mut h.build_ctx(3)).unwrap()
    }

    #[test]
    fn drifts_left_and_hides_offscreen() {
        let mut h = Harness::new(100.0, 100.0);
        let mut a = rock(&mut h, 30.0);
        a.update(&mut h.ctx(3, 0));
        assert_eq!(a.position(), Vec2::new(-20.0, 10.0));
        assert!(a.visible());
        a.update(&mut h.ctx(3, 0));
        assert!(!a.visible());
    }

    #[test]
    fn immune_to_collisions() {
        let mut h = Harness::new(100.0, 100.0);
        let mut a = rock(&mut h, 1.0);
        a.collide_with(&Contact { id: EntityId::new(1), role: Role::Player }, &mut h.ctx(3, 0));
        assert!(a.visible());
        assert!(a.should_collide());
        assert!(h.published().is_empty());
    }

    #[test]
    fn collides_as_an_ellipse() {
        let mut h = Harness::new(100.0, 100.0);
        let a = rock(&mut h, 1.0);
        assert_eq!(a.shape(), Shape::Ellipse { center: Vec2::new(30.0, 20.0), rx: 20.0, ry: 10.0 });
        assert_eq!(a.role(), Role::Hazard);
    }

    #[test]
    fn position_is_required() {
        let mut h = Harness::new(100.0, 100.0);
        let mut params = Params::new("Asteroid").with("size", Vec2::new(1.0, 1.0));
        assert!(matches!(Asteroid::from_params(&mut params, &mut h.build_ctx(3)), Err(ParamError::Missing(_))));
    }
}
