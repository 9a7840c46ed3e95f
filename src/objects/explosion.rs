//=========================================================================
// Explosion
//=========================================================================
//
// Stand-alone explosion, spawned by scripts. Plays its animation once
// and hides when the time is up, so the next sweep removes it.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::SMALL_EXPLOSION;
use crate::core::entity::components::DEFAULT_EXPLOSION_MS;
use crate::core::entity::{priority, ExplosionEffect, GameObject, ObjectContext, Sprite, Visibility};
use crate::core::render::Surface;
use crate::core::scene::{BuildContext, ParamError, Params};

//=== Explosion ===========================================================

#[derive(Debug)]
pub struct Explosion {
    effect: ExplosionEffect,
    visibility: Visibility,
}

impl Explosion {
    /// Reads `position`, an optional `ttl` and the sprite parameters.
    /// Without an `image` the small explosion strip is used.
    pub fn from_params(params: &mut Params, _ctx: &mut BuildContext<'_>) -> Result<Self, ParamError> {
        let sprite = match params.get("image") {
            Some(_) => Sprite::from_params(params, None)?,
            None => SMALL_EXPLOSION.sprite(),
        };
        let default_ttl = match sprite.duration_ms() {
            0 => DEFAULT_EXPLOSION_MS as i64,
            d => d as i64,
        };
        let ttl = params.int_or("ttl", default_ttl)?;
        let ttl = u64::try_from(ttl).map_err(|_| ParamError::invalid("ttl", "must not be negative"))?;
        Ok(Self {
            effect: ExplosionEffect::new(sprite, params.point("position")?, ttl),
            visibility: Visibility::default(),
        })
    }
}

impl GameObject for Explosion {
    fn priority(&self) -> i32 {
        priority::DEFAULT
    }

    fn update(&mut self, ctx: &mut ObjectContext<'_>) {
        if self.effect.update(ctx.now) {
            self.visibility.hide();
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.effect.draw(surface);
    }

    fn visible(&self) -> bool {
        self.visibility.is_visible()
    }
}

pub(crate) fn build(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError> {
    Ok(Box::new(Explosion::from_params(params, ctx)?))
}

//=========================================================================
// Unit Tests
//=========================================================================
