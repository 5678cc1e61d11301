//! Astro Drift - a tiny fixed-tick asteroid shooter
//!
//! Core modules:
//! - `sim`: Entity storage, per-kind behavior, collisions, and the tick driver
//! - `renderer`: Rendering surface contract plus the canvas and recording surfaces
//! - `platform`: Keyboard state to per-tick input snapshots
//! - `assets`: Visual descriptor table (sprite sizes and collidability)
//! - `tuning`: Data-driven game balance

pub mod assets;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use assets::{Visual, VisualTable};
pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed tick interval in milliseconds
    pub const TICK_MS: u32 = 16;
    /// Maximum ticks per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default surface dimensions for headless runs
    pub const DEFAULT_SURFACE_WIDTH: f32 = 800.0;
    pub const DEFAULT_SURFACE_HEIGHT: f32 = 600.0;

    /// Terminal message drawn once on game over
    pub const GAME_OVER_TEXT: &str = "GAME OVER";
}

/// Rotate a vector by an angle in degrees (screen space, y down)
#[inline]
pub fn rotate_degrees(v: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}
