//! Data-driven game balance
//!
//! Every field defaults to the value the game shipped with, so a partial JSON
//! document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::TICK_MS;
use crate::error::ConfigError;

/// Gameplay constants consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed tick interval (ms)
    pub tick_ms: u32,
    /// Ticks that must elapse between two shots
    pub fire_cooldown_ticks: u32,
    /// Rotation applied per tick while a rotate key is held (degrees)
    pub rotate_step_degrees: f32,
    /// Per-tick probability that the spawner creates a hazard
    pub hazard_spawn_chance: f64,
    /// Distance past any surface edge before an entity is destroyed
    pub out_of_bounds_margin: f32,
    /// Fraction of each sprite width used as its collision radius
    pub collision_radius_factor: f32,
    /// Projectile velocity as a fraction of the spawn offset
    pub projectile_speed_factor: f32,
    /// Scale applied to sampled hazard velocity components
    pub hazard_speed_factor: f32,
    /// Movement is scaled by surface height / this divisor
    pub movement_divisor: f32,
    /// Hazard velocity steps are surface height / this divisor
    pub hazard_speed_divisor: f32,
    /// Vertical position of the score text
    pub score_text_y: f32,
    /// Font size of the score text (px)
    pub score_font_px: f32,
    /// Font size of the game over text (px)
    pub game_over_font_px: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            fire_cooldown_ticks: 15,
            rotate_step_degrees: 2.0,
            hazard_spawn_chance: 0.15,
            out_of_bounds_margin: 10.0,
            collision_radius_factor: 0.3,
            projectile_speed_factor: 0.1,
            hazard_speed_factor: 0.1,
            movement_divisor: 80.0,
            hazard_speed_divisor: 160.0,
            score_text_y: 60.0,
            score_font_px: 40.0,
            game_over_font_px: 80.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::OutOfRange {
                field: "tick_ms",
                value: 0.0,
            });
        }
        if !(0.0..=1.0).contains(&self.hazard_spawn_chance) {
            return Err(ConfigError::OutOfRange {
                field: "hazard_spawn_chance",
                value: self.hazard_spawn_chance,
            });
        }
        let positive = [
            ("movement_divisor", self.movement_divisor),
            ("hazard_speed_divisor", self.hazard_speed_divisor),
            ("hazard_speed_factor", self.hazard_speed_factor),
            ("projectile_speed_factor", self.projectile_speed_factor),
        ];
        for (field, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }
        let non_negative = [
            ("collision_radius_factor", self.collision_radius_factor),
            ("out_of_bounds_margin", self.out_of_bounds_margin),
        ];
        for (field, value) in non_negative {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }
        Ok(())
    }

    /// Tick interval in seconds
    pub fn tick_secs(&self) -> f32 {
        self.tick_ms as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "fire_cooldown_ticks": 5 }"#).unwrap();
        assert_eq!(tuning.fire_cooldown_ticks, 5);
        assert_eq!(tuning.tick_ms, 16);
        assert!((tuning.hazard_spawn_chance - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = Tuning::from_json(r#"{ "hazard_spawn_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "hazard_spawn_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_tick() {
        assert!(Tuning::from_json(r#"{ "tick_ms": 0 }"#).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_tick_secs() {
        assert!((Tuning::default().tick_secs() - 0.016).abs() < 1e-6);
    }
}
