//! Player preferences
//!
//! Audio only; gameplay balance lives in `tuning`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence all audio
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings; volumes must lie in [0, 1]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        for (field, value) in [
            ("master_volume", settings.master_volume),
            ("sfx_volume", settings.sfx_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                });
            }
        }
        Ok(settings)
    }

    /// Gain applied to every sound effect
    pub fn effective_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_gain() {
        let mut settings = Settings::default();
        assert!((settings.effective_gain() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_gain(), 0.0);
    }

    #[test]
    fn test_rejects_loud_volume() {
        assert!(Settings::from_json(r#"{ "sfx_volume": 2.0 }"#).is_err());
        let settings = Settings::from_json(r#"{ "muted": true }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 0.8);
    }
}
