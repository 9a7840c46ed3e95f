//=========================================================================
// Starfield
//=========================================================================
//
// Parallax background: stars scroll left at one of three speeds and
// re-enter at the right edge with fresh random attributes.
//
//=========================================================================

//=== External Dependencies ===============================================

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

//=== Internal Dependencies ===============================================

use crate::core::collision::Vec2;
use crate::core::entity::{priority, GameObject, ObjectContext};
use crate::core::render::{Color, Surface};
use crate::core::scene::{BuildContext, ParamError, Params, Value};

pub const DEFAULT_STARS: i64 = 300;

const SPEEDS: [f32; 3] = [2.0, 4.0, 6.0];
const MAGNITUDES: [f32; 3] = [1.0, 2.0, 3.0];
const GRAYS: [u8; 3] = [100, 200, 250];

//=== Star ================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    at: Vec2,
    speed: f32,
    magnitude: f32,
    color: Color,
}

//=== Starfield ===========================================================

#[derive(Debug)]
pub struct Starfield {
    width: f32,
    height: f32,
    stars: Vec<Star>,
    rng: StdRng,
}

impl Starfield {
    /// Reads an optional `size` (defaults to the world) and `count`.
    ///
    /// The field seeds its own generator from the game's, so runs with a
    /// fixed seed replay the same sky.
    pub fn from_params(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Self, ParamError> {
        let size = params.point_or("size", Vec2::new(ctx.bounds.w, ctx.bounds.h))?;
        if size.x < 1.0 || size.y < 1.0 {
            return Err(ParamError::invalid("size", "must be at least one pixel each way"));
        }
        let count = params.int_or("count", DEFAULT_STARS)?;
        let count = usize::try_from(count).map_err(|_| ParamError::invalid("count", "must not be negative"))?;

        let mut field = Self {
            width: size.x,
            height: size.y,
            stars: Vec::with_capacity(count),
            rng: StdRng::seed_from_u64(ctx.rng.gen()),
        };
        for _ in 0..count {
            let x = field.rng.gen_range(0.0..field.width);
            let star = field.new_star(x);
            field.stars.push(star);
        }
        Ok(field)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    fn new_star(&mut self, x: f32) -> Star {
        let gray = GRAYS.choose(&mut self.rng).copied().unwrap_or(GRAYS[0]);
        Star {
            at: Vec2::new(x, self.rng.gen_range(0.0..self.height).floor()),
            speed: SPEEDS.choose(&mut self.rng).copied().unwrap_or(SPEEDS[0]),
            magnitude: MAGNITUDES.choose(&mut self.rng).copied().unwrap_or(MAGNITUDES[0]),
            color: Color(gray, gray, gray),
        }
    }
}

impl GameObject for Starfield {
    fn priority(&self) -> i32 {
        priority::BACKGROUND
    }

    fn update(&mut self, _ctx: &mut ObjectContext<'_>) {
        for i in 0..self.stars.len() {
            let star = self.stars[i];
            let next = if star.at.x - star.speed > 0.0 {
                Star { at: Vec2::new(star.at.x - star.speed, star.at.y), ..star }
            } else {
                self.new_star(self.width)
            };
            self.stars[i] = next;
        }
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            surface.draw_circle(star.at, star.magnitude, star.color);
        }
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "count" => Some(Value::Int(self.stars.len() as i64)),
            _ => None,
        }
    }
}

pub(crate) fn build(params: &mut Params, ctx: &mut BuildContext<'_>) -> Result<Box<dyn GameObject>, ParamError> {
    Ok(Box::new(Starfield::from_params(params, ctx)?))
}

//=========================================================================
// Unit Tests
//=========================================================================
