//=========================================================================
// Entity Components
//=========================================================================
//
// Building blocks that concrete entities embed and delegate to.
//
// Components:
// - `Body`            position and size (Positionable)
// - `Motion`          optional controller (Controllable)
// - `Visibility`      visibility flag (Hideable)
// - `ExplosionEffect` timed explosion animation
// - `DeathSequence`   the dying sub-state of a Killable
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::sprite::Sprite;
use crate::core::collision::{Rect, Vec2};
use crate::core::controller::Controller;
use crate::core::render::Surface;

//=== Body ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn move_by(&mut self, dx: f32, dy: f32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Pulls the body back inside `world` vertically.
    pub fn clamp_vertical(&mut self, world: Rect) {
        let max_y = world.bottom() - self.size.y;
        if self.position.y > max_y {
            self.position.y = max_y;
        }
        if self.position.y < world.y {
            self.position.y = world.y;
        }
    }

    /// Pulls the body back inside `world` on both axes.
    pub fn clamp_into(&mut self, world: Rect) {
        let max_x = world.right() - self.size.x;
        if self.position.x > max_x {
            self.position.x = max_x;
        }
        if self.position.x < world.x {
            self.position.x = world.x;
        }
        self.clamp_vertical(world);
    }

    /// Entirely past the left edge of `world`.
    pub fn is_left_of(&self, world: Rect) -> bool {
        self.position.x + self.size.x < world.x
    }

    /// Entirely past the right edge of `world`.
    pub fn is_right_of(&self, world: Rect) -> bool {
        self.position.x > world.right()
    }
}

//=== Motion ==============================================================

/// Controllable component: a controller, or none for static entities.
#[derive(Default)]
pub struct Motion {
    controller: Option<Box<dyn Controller>>,
    exhausted: bool,
}

impl Motion {
    pub fn new(controller: Box<dyn Controller>) -> Self {
        Self { controller: Some(controller), exhausted: false }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_option(controller: Option<Box<dyn Controller>>) -> Self {
        Self { controller, exhausted: false }
    }

    /// Next movement step. `None` for static or exhausted controllers.
    pub fn step(&mut self) -> Option<(f32, f32)> {
        if self.exhausted {
            return None;
        }
        let step = self.controller.as_mut()?.advance();
        if step.is_none() {
            trace!(target: "scene", "Controller exhausted");
            self.exhausted = true;
        }
        step
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn replace(&mut self, controller: Box<dyn Controller>) {
        self.controller = Some(controller);
        self.exhausted = false;
    }
}

impl std::fmt::Debug for Motion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Motion")
            .field("controlled", &self.controller.is_some())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

//=== Visibility ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    visible: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl Visibility {
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

//=== ExplosionEffect =====================================================

/// An explosion animation that expires `ttl_ms` after its first update.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionEffect {
    sprite: Sprite,
    position: Vec2,
    ttl_ms: u64,
    started: Option<u64>,
    elapsed: u64,
}

impl ExplosionEffect {
    pub fn new(sprite: Sprite, position: Vec2, ttl_ms: u64) -> Self {
        Self { sprite, position, ttl_ms, started: None, elapsed: 0 }
    }

    /// Starts the clock at `now` instead of the first update.
    pub fn started_at(mut self, now: u64) -> Self {
        self.started = Some(now);
        self
    }

    /// Advances to `now`; true once the TTL has elapsed.
    pub fn update(&mut self, now: u64) -> bool {
        let started = *self.started.get_or_insert(now);
        self.elapsed = now.saturating_sub(started);
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.started.is_some() && self.elapsed >= self.ttl_ms
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.sprite.draw(surface, self.position, self.elapsed);
    }
}

//=== DeathSequence =======================================================

/// Explosion used when a sprite has no animation of its own.
pub const DEFAULT_EXPLOSION_MS: u64 = 500;

/// Dying sub-state of a killable entity.
///
/// `start` spawns the explosion; `update` reports when it has run its
/// course, at which point the owner hides itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathSequence {
    explosion: Sprite,
    ttl_ms: u64,
    dying: Option<ExplosionEffect>,
}

impl DeathSequence {
    /// TTL is the explosion's animation length, or
    /// `DEFAULT_EXPLOSION_MS` for static sprites.
    pub fn new(explosion: Sprite) -> Self {
        let ttl_ms = match explosion.duration_ms() {
            0 => DEFAULT_EXPLOSION_MS,
            d => d,
        };
        Self { explosion, ttl_ms, dying: None }
    }

    pub fn with_ttl(mut self, ttl_ms: u64) -> Self {
        self.ttl_ms = ttl_ms;
        self
    }

    pub fn ttl_ms(&self) -> u64 {
        self.ttl_ms
    }

    pub fn is_dying(&self) -> bool {
        self.dying.is_some()
    }

    /// Starts the explosion centred on `center` at time `now`.
    pub fn start(&mut self, center: Vec2, now: u64) {
        let size = self.explosion.size();
        let at = Vec2::new(center.x - size.x / 2.0, center.y - size.y / 2.0);
        self.dying = Some(ExplosionEffect::new(self.explosion.clone(), at, self.ttl_ms).started_at(now));
    }

    /// Advances the explosion; true on the update that finishes it.
    pub fn update(&mut self, now: u64) -> bool {
        let finished = self.dying.as_mut().is_some_and(|e| e.update(now));
        if finished {
            self.dying = None;
        }
        finished
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(explosion) = &self.dying {
            explosion.draw(surface);
        }
    }

    /// Abandons a running explosion.
    pub fn reset(&mut self) {
        self.dying = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::{ConstantController, FiniteController};

    //=== Body ============================================================

    #[test]
    fn clamp_into_keeps_body_inside() {
        let world = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut body = Body::new(Vec2::new(95.0, -5.0), Vec2::new(10.0, 10.0));
        body.clamp_into(world);
        assert_eq!(body.position, Vec2::new(90.0, 0.0));
    }

    #[test]
    fn clamp_vertical_leaves_x_alone() {
        let world = Rect::new(0.0, 0.0, 100.0, 100.0);
        let mut body = Body::new(Vec2::new(-50.0, 99.0), Vec2::new(10.0, 10.0));
        body.clamp_vertical(world);
        assert_eq!(body.position, Vec2::new(-50.0, 90.0));
    }

    #[test]
    fn left_of_requires_fully_outside() {
        let world = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(!Body::new(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 10.0)).is_left_of(world));
        assert!(Body::new(Vec2::new(-10.5, 0.0), Vec2::new(10.0, 10.0)).is_left_of(world));
    }

    //=== Motion ==========================================================

    #[test]
    fn static_motion_never_moves() {
        let mut motion = Motion::none();
        assert_eq!(motion.step(), None);
    }

    #[test]
    fn exhausted_motion_stays_exhausted() {
        let inner = Box::new(ConstantController::new(1.0, 0.0, 1.0));
        let mut motion = Motion::new(Box::new(FiniteController::new(inner, 1)));
        assert_eq!(motion.step(), Some((1.0, 0.0)));
        assert_eq!(motion.step(), None);
        assert!(motion.is_exhausted());
        assert_eq!(motion.step(), None);
    }

    //=== Death ===========================================================

    #[test]
    fn death_sequence_runs_for_ttl() {
        let sprite = Sprite::with_size("boom.gif", Vec2::new(40.0, 40.0)).animated(4, 50);
        let mut death = DeathSequence::new(sprite);
        assert_eq!(death.ttl_ms(), 200);

        death.start(Vec2::new(100.0, 100.0), 1000);
        assert!(death.is_dying());
        assert!(!death.update(1100));
        assert!(death.is_dying());
        assert!(death.update(1200));
        assert!(!death.is_dying());
        assert!(!death.update(1300));
    }

    #[test]
    fn static_explosion_uses_default_ttl() {
        let death = DeathSequence::new(Sprite::with_size("boom.png", Vec2::new(8.0, 8.0)));
        assert_eq!(death.ttl_ms(), DEFAULT_EXPLOSION_MS);
    }

    #[test]
    fn explosion_clock_starts_on_first_update() {
        let mut effect = ExplosionEffect::new(Sprite::with_size("e.png", Vec2::ZERO), Vec2::ZERO, 100);
        assert!(!effect.update(5000));
        assert!(!effect.update(5099));
        assert!(effect.update(5100));
    }
}
