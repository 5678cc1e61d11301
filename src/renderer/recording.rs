//! In-memory surface for headless runs

use glam::Vec2;

use super::{Surface, UiText};
use crate::assets::{SpriteKind, Visual};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Sprite {
        sprite: SpriteKind,
        pos: Vec2,
        rotation: f32,
    },
    Text(UiText),
}

/// Records every draw call; `begin_frame` clears the previous frame
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    calls: Vec<DrawCall>,
    /// Total calls across all frames
    total_calls: u64,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            total_calls: 0,
        }
    }

    pub fn begin_frame(&mut self) {
        self.calls.clear();
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn total_calls(&self) -> u64 {
        self.total_calls
    }

    /// Sprites drawn this frame, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = (SpriteKind, Vec2, f32)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Sprite {
                sprite,
                pos,
                rotation,
            } => Some((*sprite, *pos, *rotation)),
            DrawCall::Text(_) => None,
        })
    }

    /// Text drawn this frame, in draw order
    pub fn texts(&self) -> impl Iterator<Item = &UiText> + '_ {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text(text) => Some(text),
            DrawCall::Sprite { .. } => None,
        })
    }

    fn record(&mut self, call: DrawCall) {
        self.total_calls += 1;
        self.calls.push(call);
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn draw_sprite(&mut self, visual: &Visual, pos: Vec2, rotation_deg: f32) {
        self.record(DrawCall::Sprite {
            sprite: visual.sprite,
            pos,
            rotation: rotation_deg,
        });
    }

    fn draw_text(&mut self, text: &UiText) {
        self.record(DrawCall::Text(text.clone()));
    }
}
