//! Visual descriptor table
//!
//! Maps each drawable entity kind to its image, size, and whether it takes part
//! in collisions. Populated before the loop starts; the simulation only reads it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Opaque image handle, one per drawable entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Background,
    Player,
    Hazard,
    Projectile,
}

impl SpriteKind {
    pub const ALL: [SpriteKind; 4] = [
        SpriteKind::Background,
        SpriteKind::Player,
        SpriteKind::Hazard,
        SpriteKind::Projectile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpriteKind::Background => "Background",
            SpriteKind::Player => "Player",
            SpriteKind::Hazard => "Hazard",
            SpriteKind::Projectile => "Projectile",
        }
    }
}

/// One row of the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteEntry {
    /// Image path relative to the page
    pub path: String,
    pub width: f32,
    pub height: f32,
    pub collidable: bool,
}

/// What an entity carries when it is drawable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub sprite: SpriteKind,
    pub width: f32,
    pub height: f32,
    pub collidable: bool,
}

/// Sprite data for every drawable kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualTable {
    entries: BTreeMap<SpriteKind, SpriteEntry>,
}

impl VisualTable {
    /// The shipped sprite set; the background always covers the whole surface
    pub fn default_for_surface(width: f32, height: f32) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            SpriteKind::Background,
            SpriteEntry {
                path: "img/background.png".into(),
                width,
                height,
                collidable: false,
            },
        );
        entries.insert(
            SpriteKind::Player,
            SpriteEntry {
                path: "img/player.png".into(),
                width: 64.0,
                height: 64.0,
                collidable: true,
            },
        );
        entries.insert(
            SpriteKind::Hazard,
            SpriteEntry {
                path: "img/asteroid.png".into(),
                width: 32.0,
                height: 32.0,
                collidable: true,
            },
        );
        entries.insert(
            SpriteKind::Projectile,
            SpriteEntry {
                path: "img/missile.png".into(),
                width: 32.0,
                height: 32.0,
                collidable: true,
            },
        );
        Self { entries }
    }

    /// Parse a table; rows with non-positive sizes are rejected
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: VisualTable = serde_json::from_str(json)?;
        for (kind, entry) in &table.entries {
            if entry.width <= 0.0 || entry.height <= 0.0 {
                return Err(ConfigError::InvalidSpriteSize {
                    kind: kind.as_str().to_string(),
                    width: entry.width,
                    height: entry.height,
                });
            }
        }
        Ok(table)
    }

    /// Visual for a kind; a missing row means the entity is neither drawn nor collidable
    pub fn visual(&self, kind: SpriteKind) -> Option<Visual> {
        self.entries.get(&kind).map(|entry| Visual {
            sprite: kind,
            width: entry.width,
            height: entry.height,
            collidable: entry.collidable,
        })
    }

    /// Kinds with no row; such entities still update but are never drawn
    pub fn missing(&self) -> impl Iterator<Item = SpriteKind> + '_ {
        SpriteKind::ALL
            .into_iter()
            .filter(|kind| !self.entries.contains_key(kind))
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpriteKind, &SpriteEntry)> {
        self.entries.iter().map(|(kind, entry)| (*kind, entry))
    }
}
