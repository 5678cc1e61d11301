//! Keyboard state
//!
//! Key codes follow `KeyboardEvent.code`. Axis keys write their axis on keydown
//! and zero it on keyup, so the last pressed direction wins.

use std::collections::HashSet;

use glam::Vec2;

use crate::sim::TickInput;

const FIRE: &str = "Space";
const ROTATE_LEFT: &str = "KeyQ";
const ROTATE_RIGHT: &str = "KeyE";

/// Which axis a key drives and the value it writes on keydown
fn axis_binding(code: &str) -> Option<(usize, f32)> {
    match code {
        "KeyW" | "ArrowUp" => Some((1, -1.0)),
        "KeyS" | "ArrowDown" => Some((1, 1.0)),
        "KeyA" | "ArrowLeft" => Some((0, -1.0)),
        "KeyD" | "ArrowRight" => Some((0, 1.0)),
        _ => None,
    }
}

/// Continuously updated by key events, sampled once per tick
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    axis: Vec2,
    held: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        if let Some((axis, value)) = axis_binding(code) {
            self.axis[axis] = value;
        }
        self.held.insert(code.to_string());
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some((axis, _)) = axis_binding(code) {
            self.axis[axis] = 0.0;
        }
        self.held.remove(code);
    }

    pub fn is_held(&self, code: &str) -> bool {
        self.held.contains(code)
    }

    /// Whether the game handles this key (the page should not scroll on it)
    pub fn is_game_key(code: &str) -> bool {
        axis_binding(code).is_some() || matches!(code, FIRE | ROTATE_LEFT | ROTATE_RIGHT)
    }

    /// Read-only snapshot for the next tick
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            axis: self.axis,
            fire: self.is_held(FIRE),
            rotate_left: self.is_held(ROTATE_LEFT),
            rotate_right: self.is_held(ROTATE_RIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_share_axes() {
        let mut keys = KeyboardState::new();
        keys.key_down("KeyW");
        keys.key_down("ArrowRight");
        assert_eq!(keys.snapshot().axis, Vec2::new(1.0, -1.0));

        keys.key_up("KeyW");
        assert_eq!(keys.snapshot().axis, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_last_pressed_direction_wins() {
        let mut keys = KeyboardState::new();
        keys.key_down("KeyA");
        keys.key_down("KeyD");
        assert_eq!(keys.snapshot().axis.x, 1.0);
        // Releasing either key of the axis zeroes it
        keys.key_up("KeyA");
        assert_eq!(keys.snapshot().axis.x, 0.0);
    }

    #[test]
    fn test_action_keys() {
        let mut keys = KeyboardState::new();
        keys.key_down("Space");
        keys.key_down("KeyQ");
        let input = keys.snapshot();
        assert!(input.fire && input.rotate_left && !input.rotate_right);

        keys.key_up("Space");
        assert!(!keys.snapshot().fire);
        assert!(KeyboardState::is_game_key("ArrowDown"));
        assert!(!KeyboardState::is_game_key("KeyZ"));
    }
}
