//! Rendering surface
//!
//! The simulation draws through the `Surface` trait and never reads pixels back.
//! `CanvasSurface` targets a browser 2D canvas; `RecordingSurface` keeps the draw
//! calls in memory for headless runs and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCall, RecordingSurface};

use glam::Vec2;

use crate::assets::Visual;

/// A queued text draw (score readout, terminal message)
#[derive(Debug, Clone, PartialEq)]
pub struct UiText {
    pub text: String,
    /// Center of the text baseline
    pub pos: Vec2,
    pub font_px: f32,
}

/// 2D drawing target
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Draw a sprite centered on `pos`, rotated clockwise by `rotation_deg`
    fn draw_sprite(&mut self, visual: &Visual, pos: Vec2, rotation_deg: f32);

    /// Draw horizontally centered text
    fn draw_text(&mut self, text: &UiText);
}
