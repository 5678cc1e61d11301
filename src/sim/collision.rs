//! Pairwise collision resolution
//!
//! Exhaustive O(n^2) scan over collidable entities. The first overlapping
//! partner an entity finds wins: one event is emitted and both entities are
//! removed on the spot, so neither takes part in any later pair this tick.

use super::arena::EntityArena;
use super::entity::Entity;
use super::event::CollisionEvent;
use crate::distance;

/// Circle overlap using a fraction of each sprite width as the radius.
/// Strictly less-than: touching at exactly the threshold is not a hit.
pub fn overlaps(a: &Entity, b: &Entity, radius_factor: f32) -> bool {
    let threshold = a.collision_width() * radius_factor + b.collision_width() * radius_factor;
    distance(a.pos, b.pos) < threshold
}

/// Scan every live collidable entity against every other one, removing
/// colliding pairs from the arena and returning one event per pair
pub fn resolve_collisions(arena: &mut EntityArena, radius_factor: f32) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let count = arena.slot_count();

    for i in 0..count {
        if !arena.get(i).is_some_and(Entity::is_collidable) {
            continue;
        }
        for j in 0..count {
            if i == j {
                continue;
            }
            // `other` may already have died earlier in this pass
            let (Some(item), Some(other)) = (arena.get(i), arena.get(j)) else {
                continue;
            };
            if !other.is_collidable() || !overlaps(item, other, radius_factor) {
                continue;
            }

            let event = CollisionEvent {
                a: item.into(),
                b: other.into(),
            };
            log::debug!(
                "{} {:?} hit {} {:?} near {:?}",
                event.a.name,
                event.a.id,
                event.b.name,
                event.b.id,
                event.midpoint()
            );
            arena.remove(event.b.id);
            arena.remove(event.a.id);
            events.push(event);
            break;
        }
    }

    events
}
