//=========================================================================
// Render Surface
//=========================================================================
//
// Drawing seam between the game and whatever presents frames.
//
// Entities draw through the `Surface` trait only. The engine ships one
// implementation, `DrawList`, which records commands in order and hands
// each presented frame to the platform thread as plain data.
//
// Frame Lifecycle:
// ```text
// clear() → draw_*() ... → present() → take_presented()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use crate::core::collision::Vec2;

//=== Color ===============================================================

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Self = Self(255, 255, 255);
    pub const BLACK: Self = Self(0, 0, 0);
    pub const CYAN: Self = Self(0, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Approximate rendered width of `text` at `size` pixels.
///
/// Fixed advance of 0.6 em per character; there are no font metrics.
pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.6
}

//=== Surface Trait =======================================================

/// Target of every draw call made during a frame.
pub trait Surface {
    /// Drawable area in pixels.
    fn size(&self) -> (u32, u32);

    /// Starts a new frame, discarding anything drawn since the last one.
    fn clear(&mut self);

    /// Draws frame `frame` of the sprite sheet `image` with its top-left
    /// corner at `at`.
    fn draw_sprite(&mut self, image: &str, frame: usize, at: Vec2);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draws `text` with its top-left corner at `at`.
    fn draw_text(&mut self, text: &str, at: Vec2, size: f32, color: Color);

    /// Finishes the frame.
    fn present(&mut self);
}

//=== DrawCommand =========================================================

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Sprite { image: String, frame: usize, at: Vec2 },
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
    Circle { center: Vec2, radius: f32, color: Color },
    Text { text: String, at: Vec2, size: f32, color: Color },
}

/// A finished frame: its sequence number and commands in draw order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub number: u64,
    pub commands: Vec<DrawCommand>,
}

//=== DrawList ============================================================

/// Recording `Surface`.
#[derive(Debug, Default)]
pub struct DrawList {
    size: (u32, u32),
    pending: Vec<DrawCommand>,
    presented: Option<Frame>,
    frames: u64,
}

impl DrawList {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: (width, height), ..Self::default() }
    }

    /// Commands drawn since the last `clear`.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    /// Takes the most recently presented frame, if not yet taken.
    pub fn take_presented(&mut self) -> Option<Frame> {
        self.presented.take()
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Surface for DrawList {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn clear(&mut self) {
        self.pending.clear();
    }

    fn draw_sprite(&mut self, image: &str, frame: usize, at: Vec2) {
        self.pending.push(DrawCommand::Sprite { image: image.to_string(), frame, at });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.pending.push(DrawCommand::Line { from, to, color, width });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.pending.push(DrawCommand::Circle { center, radius, color });
    }

    fn draw_text(&mut self, text: &str, at: Vec2, size: f32, color: Color) {
        self.pending.push(DrawCommand::Text { text: text.to_string(), at, size, color });
    }

    fn present(&mut self) {
        self.frames += 1;
        self.presented = Some(Frame {
            number: self.frames,
            commands: std::mem::take(&mut self.pending),
        });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
