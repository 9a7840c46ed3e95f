//=========================================================================
// Game Objects
//=========================================================================
//
// The entities of Genesis, built from scene descriptions by class name.
//
// | Class        | Entity                                             |
// |--------------|----------------------------------------------------|
// | `Player`     | keyboard-driven ship with lives and points         |
// | `Enemy`      | scrolling NPC, killed by the player or its shots   |
// | `Asteroid`   | scrolling hazard, immune to collisions             |
// | `Projectile` | straight shot aimed at a point or a direction      |
// | `Explosion`  | one-off explosion animation                        |
// | `Starfield`  | parallax background                                |
// | `Label`      | text, optionally centred and blinking              |
// | `Score`      | zero-padded score with highscore                   |
//
//=========================================================================

//=== Submodules ==========================================================

pub mod asteroid;
pub mod enemy;
pub mod explosion;
pub mod label;
pub mod player;
pub mod projectile;
pub mod score;
pub mod starfield;

//=== Public Re-exports ===================================================

pub use asteroid::Asteroid;
pub use enemy::Enemy;
pub use explosion::Explosion;
pub use label::Label;
pub use player::Player;
pub use projectile::Projectile;
pub use score::Score;
pub use starfield::Starfield;

//=== Internal Dependencies ===============================================

use crate::core::collision::Vec2;
use crate::core::entity::Sprite;
use crate::core::scene::{ParamError, Params, Registry};

//=== Registration ========================================================

/// Adds every Genesis entity class to `registry`.
pub fn register(registry: &mut Registry) {
    registry.register_object("Player", player::build);
    registry.register_object("Enemy", enemy::build);
    registry.register_object("Asteroid", asteroid::build);
    registry.register_object("Projectile", projectile::build);
    registry.register_object("Explosion", explosion::build);
    registry.register_object("Starfield", starfield::build);
    registry.register_object("Label", label::build);
    registry.register_object("Score", score::build);
}

//=== Explosion Sprites ===================================================

/// Small explosion strip, used by enemies.
pub const SMALL_EXPLOSION: ExplosionStrip = ExplosionStrip {
    image: "media/images/explosion.gif",
    size: Vec2::new(512.0, 64.0),
    frames: 8,
    frame_ms: 60,
};

/// Big explosion strip, used by the player.
pub const BIG_EXPLOSION: ExplosionStrip = ExplosionStrip {
    image: "media/images/explosao.gif",
    size: Vec2::new(1536.0, 128.0),
    frames: 12,
    frame_ms: 75,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionStrip {
    pub image: &'static str,
    pub size: Vec2,
    pub frames: usize,
    pub frame_ms: u64,
}

impl ExplosionStrip {
    pub fn sprite(&self) -> Sprite {
        Sprite::with_size(self.image, self.size).animated(self.frames, self.frame_ms)
    }
}

/// Reads the `explosion` image and its optional `explosion_size`,
/// `explosion_frames` and `explosion_frame_ms`, falling back to
/// `default` entirely when no image is given.
pub(crate) fn explosion_sprite(params: &Params, default: ExplosionStrip) -> Result<Sprite, ParamError> {
    if params.get("explosion").is_none() {
        return Ok(default.sprite());
    }
    let image = params.string("explosion")?;
    let sprite = match params.get("explosion_size") {
        Some(_) => Sprite::with_size(image, params.point("explosion_size")?),
        None => Sprite::load(&image)?,
    };
    let frames = params.int_or("explosion_frames", 1)?;
    if frames > 1 {
        let frame_ms = params.int_or("explosion_frame_ms", 100)?.max(1) as u64;
        return Ok(sprite.animated(frames as usize, frame_ms));
    }
    Ok(sprite)
}

//=========================================================================
// Test Support
//=========================================================================

#[cfg(test)]
pub(crate) mod testing {

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::core::collision::Rect;
    use crate::core::entity::{EntityId, ObjectContext};
    use crate::core::input::{BoundKey, KeyBindings};
    use crate::core::message_bus::{LifecycleEvent, NotificationBus};
    use crate::core::scene::BuildContext;

    /// World pieces a factory or an entity needs, for unit tests.
    pub(crate) struct Harness {
        pub bounds: Rect,
        pub rng: StdRng,
        pub bindings: KeyBindings,
        pub keys: Vec<BoundKey>,
        pub bus: NotificationBus,
    }

    impl Harness {
        pub(crate) fn new(width: f32, height: f32) -> Self {
            Self {
                bounds: Rect::new(0.0, 0.0, width, height),
                rng: StdRng::seed_from_u64(7),
                bindings: KeyBindings::new(),
                keys: Vec::new(),
                bus: NotificationBus::new(),
            }
        }

        pub(crate) fn build_ctx(&mut self, id: u64) -> BuildContext<'_> {
            BuildContext::new(EntityId::new(id), self.bounds, 0, &mut self.rng, &mut self.bindings, &mut self.keys)
        }

        pub(crate) fn ctx(&mut self, id: u64, now: u64) -> ObjectContext<'_> {
            ObjectContext::new(EntityId::new(id), "test", now, self.bounds, &mut self.bus)
        }

        /// Lifecycle events published so far, draining them.
        pub(crate) fn published(&mut self) -> Vec<LifecycleEvent> {
            let events = self.bus.pending().iter().map(|n| n.event).collect();
            self.bus.resolve();
            events
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_adds_every_class() {
        let mut registry = Registry::new();
        register(&mut registry);
        for class in ["Player", "Enemy", "Asteroid", "Projectile", "Explosion", "Starfield", "Label", "Score"] {
            assert!(registry.is_object_class(class), "{class} missing");
        }
    }

    #[test]
    fn explosion_defaults_without_image() {
        let sprite = explosion_sprite(&Params::new("Enemy"), SMALL_EXPLOSION).unwrap();
        assert_eq!(sprite.size(), Vec2::new(64.0, 64.0));
        assert_eq!(sprite.duration_ms(), 480);
    }

    #[test]
    fn explosion_reads_custom_strip() {
        let params = Params::new("Enemy")
            .with("explosion", "boom.png")
            .with("explosion_size", Vec2::new(100.0, 20.0))
            .with("explosion_frames", 5_i64)
            .with("explosion_frame_ms", 10_i64);
        let sprite = explosion_sprite(&params, SMALL_EXPLOSION).unwrap();
        assert_eq!(sprite.image(), "boom.png");
        assert_eq!(sprite.size(), Vec2::new(20.0, 20.0));
        assert_eq!(sprite.duration_ms(), 50);
    }
}
