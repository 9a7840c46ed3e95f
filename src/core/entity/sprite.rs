//=========================================================================
// Sprite
//=========================================================================
//
// Image reference plus the metadata needed to place and animate it.
//
// Only dimensions are read from disk (`image::image_dimensions`); pixels
// stay with whatever presents the frame. Animated sprites are horizontal
// strips of equally sized frames.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::collision::{Rect, Vec2};
use crate::core::render::Surface;
use crate::core::scene::{ParamError, Params};

//=== Animation ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub frames: usize,
    pub frame_ms: u64,
}

//=== Sprite ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    image: String,
    size: Vec2,
    animation: Option<Animation>,
}

impl Sprite {
    /// Static sprite with a known size.
    pub fn with_size(image: impl Into<String>, size: Vec2) -> Self {
        Self { image: image.into(), size, animation: None }
    }

    /// Static sprite sized from the image file.
    pub fn load(image: &str) -> Result<Self, ParamError> {
        let (w, h) = image::image_dimensions(image).map_err(|source| ParamError::Image {
            path: image.to_string(),
            source,
        })?;
        Ok(Self::with_size(image, Vec2::new(w as f32, h as f32)))
    }

    /// Splits the sprite into `frames` horizontal frames shown for
    /// `frame_ms` each.
    pub fn animated(mut self, frames: usize, frame_ms: u64) -> Self {
        let frames = frames.max(1);
        self.size.x /= frames as f32;
        self.animation = Some(Animation { frames, frame_ms });
        self
    }

    /// Reads `image`, optional `size`, `frames` and `frame_ms`.
    ///
    /// Without `size` the image file is opened for its dimensions.
    pub fn from_params(params: &Params, default_image: Option<&str>) -> Result<Self, ParamError> {
        let image = match params.get("image") {
            Some(_) => params.string("image")?,
            None => default_image.map(str::to_string).ok_or_else(|| ParamError::missing("image"))?,
        };
        let sprite = match params.get("size") {
            Some(_) => Self::with_size(image, params.point("size")?),
            None => Self::load(&image)?,
        };
        let frames = params.int_or("frames", 1)?;
        if frames > 1 {
            let frame_ms = params.int_or("frame_ms", 100)?.max(1) as u64;
            return Ok(sprite.animated(frames as usize, frame_ms));
        }
        Ok(sprite)
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Size of one frame.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn bounds_at(&self, at: Vec2) -> Rect {
        Rect::new(at.x, at.y, self.size.x, self.size.y)
    }

    /// Length of one animation cycle; zero for static sprites.
    pub fn duration_ms(&self) -> u64 {
        self.animation.map_or(0, |a| a.frames as u64 * a.frame_ms)
    }

    /// Frame shown `elapsed_ms` after the animation started, looping.
    pub fn frame_at(&self, elapsed_ms: u64) -> usize {
        match self.animation {
            Some(a) if a.frame_ms > 0 => ((elapsed_ms / a.frame_ms) % a.frames as u64) as usize,
            _ => 0,
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, at: Vec2, elapsed_ms: u64) {
        surface.draw_sprite(&self.image, self.frame_at(elapsed_ms), at);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
