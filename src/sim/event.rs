//! Events produced during a tick
//!
//! The collision pass returns its events; reactions (score, game over, audio)
//! consume that list instead of listening on a global bus.

use glam::Vec2;

use super::entity::{Entity, EntityId};

/// Snapshot of one side of a collision, taken at the moment it was detected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Participant {
    pub id: EntityId,
    pub name: &'static str,
    pub pos: Vec2,
}

impl From<&Entity> for Participant {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id,
            name: entity.name(),
            pos: entity.pos,
        }
    }
}

/// One overlapping pair; `a` is the entity whose scan found `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: Participant,
    pub b: Participant,
}

impl CollisionEvent {
    /// True if either side carries the given identity name
    pub fn involves(&self, name: &str) -> bool {
        self.a.name == name || self.b.name == name
    }

    /// Midpoint of the two participants (where the impact sound is panned)
    pub fn midpoint(&self) -> Vec2 {
        (self.a.pos + self.b.pos) * 0.5
    }
}
