//! Entities and their shared movement rules
//!
//! An entity is a position, a rotation, an optional visual, and a kind tag that
//! selects its per-tick behavior (see `behavior`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::Visual;

/// Stable identity of an entity for its whole lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Surface extents, in surface units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True when `pos` lies more than `margin` beyond any edge
    pub fn is_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || self.width < pos.x - margin
            || pos.y < -margin
            || self.height < pos.y - margin
    }

    /// Clamp into `[0, width] x [0, height]`
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        Vec2::new(pos.x.clamp(0.0, self.width), pos.y.clamp(0.0, self.height))
    }
}

/// Closed set of entity kinds, each carrying its own state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Full-surface backdrop, drawn first, never collides
    Background,
    /// The ship
    Player {
        /// Ticks since the last shot (saturates; starts "infinitely" long ago)
        time_since_fired: u32,
    },
    Projectile {
        vel: Vec2,
    },
    Hazard {
        vel: Vec2,
    },
    /// Invisible; rolls for a new hazard every tick
    HazardSpawner,
    /// Invisible; owns the score and queues the score text
    ScoreTracker {
        score: u64,
    },
}

impl EntityKind {
    pub const PLAYER: &'static str = "Player";
    pub const PROJECTILE: &'static str = "Projectile";
    pub const HAZARD: &'static str = "Hazard";

    /// Identity name carried in collision events
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Background => "Background",
            EntityKind::Player { .. } => Self::PLAYER,
            EntityKind::Projectile { .. } => Self::PROJECTILE,
            EntityKind::Hazard { .. } => Self::HAZARD,
            EntityKind::HazardSpawner => "HazardSpawner",
            EntityKind::ScoreTracker { .. } => "ScoreTracker",
        }
    }

    /// Whether this kind has an update behavior
    pub fn has_update(&self) -> bool {
        !matches!(self, EntityKind::Background)
    }
}

/// A live game entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    /// Degrees, 0 = unrotated, positive = clockwise on screen
    pub rotation: f32,
    pub visual: Option<Visual>,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(id: EntityId, pos: Vec2, visual: Option<Visual>, kind: EntityKind) -> Self {
        Self {
            id,
            pos,
            rotation: 0.0,
            visual,
            kind,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Collision participation needs a visual that is marked collidable
    pub fn is_collidable(&self) -> bool {
        self.visual.is_some_and(|v| v.collidable)
    }

    /// Width used for the collision radius (0 without a visual)
    pub fn collision_width(&self) -> f32 {
        self.visual.map_or(0.0, |v| v.width)
    }

    /// Translate by `amount` scaled to the surface height so speed is
    /// independent of surface size
    pub fn translate(&mut self, amount: Vec2, bounds: &Bounds, movement_divisor: f32) {
        self.pos += amount * (bounds.height / movement_divisor);
    }

    /// Keep the entity on the surface instead of destroying it
    pub fn clamp_to_bounds(&mut self, bounds: &Bounds) {
        self.pos = bounds.clamp(self.pos);
    }

    /// True when the entity has drifted far enough out to be removed
    pub fn out_of_bounds(&self, bounds: &Bounds, margin: f32) -> bool {
        bounds.is_outside(self.pos, margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: Bounds = Bounds {
        width: 800.0,
        height: 600.0,
    };

    fn dot(pos: Vec2) -> Entity {
        Entity::new(EntityId(1), pos, None, EntityKind::HazardSpawner)
    }

    #[test]
    fn test_translate_scales_with_surface_height() {
        let mut e = dot(Vec2::ZERO);
        e.translate(Vec2::new(1.0, -1.0), &BOUNDS, 80.0);
        assert_eq!(e.pos, Vec2::new(7.5, -7.5));
    }

    #[test]
    fn test_out_of_bounds_margin_edges() {
        assert!(!dot(Vec2::new(-10.0, 300.0)).out_of_bounds(&BOUNDS, 10.0));
        assert!(dot(Vec2::new(-10.01, 300.0)).out_of_bounds(&BOUNDS, 10.0));
        assert!(!dot(Vec2::new(810.0, 300.0)).out_of_bounds(&BOUNDS, 10.0));
        assert!(dot(Vec2::new(810.5, 300.0)).out_of_bounds(&BOUNDS, 10.0));
        assert!(dot(Vec2::new(400.0, 611.0)).out_of_bounds(&BOUNDS, 10.0));
        assert!(dot(Vec2::new(400.0, -11.0)).out_of_bounds(&BOUNDS, 10.0));
    }

    #[test]
    fn test_entity_without_visual_is_not_collidable() {
        assert!(!dot(Vec2::ZERO).is_collidable());
        assert_eq!(dot(Vec2::ZERO).collision_width(), 0.0);
    }

    proptest! {
        #[test]
        fn clamp_always_lands_inside(x in -1e6f32..1e6, y in -1e6f32..1e6) {
            let mut e = dot(Vec2::new(x, y));
            e.clamp_to_bounds(&BOUNDS);
            prop_assert!(e.pos.x >= 0.0 && e.pos.x <= BOUNDS.width);
            prop_assert!(e.pos.y >= 0.0 && e.pos.y <= BOUNDS.height);
        }

        #[test]
        fn clamp_is_identity_inside(x in 0.0f32..=800.0, y in 0.0f32..=600.0) {
            let mut e = dot(Vec2::new(x, y));
            e.clamp_to_bounds(&BOUNDS);
            prop_assert_eq!(e.pos, Vec2::new(x, y));
        }

        #[test]
        fn out_of_bounds_iff_past_margin(x in -100.0f32..900.0, y in -100.0f32..700.0) {
            let expected = x < -10.0 || x > 810.0 || y < -10.0 || y > 610.0;
            prop_assert_eq!(dot(Vec2::new(x, y)).out_of_bounds(&BOUNDS, 10.0), expected);
        }
    }
}
