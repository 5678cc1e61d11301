//! Index-stable entity storage
//!
//! Removing an entity only clears its slot's live flag, so indices held by an
//! in-progress phase stay valid. Dead slots are dropped by `compact`, which the
//! tick driver calls once no phase is iterating.

use std::collections::HashMap;

use super::entity::{Entity, EntityId};

#[derive(Debug, Clone)]
struct Slot {
    entity: Entity,
    live: bool,
}

/// Ordered store of entities with tombstoned removal
#[derive(Debug, Clone, Default)]
pub struct EntityArena {
    slots: Vec<Slot>,
    /// Slot index of every entity still holding a slot (live or dead)
    index: HashMap<EntityId, usize>,
    next_id: u32,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh entity id
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append an entity. Returns false (and stores nothing) if the id is already held.
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.index.contains_key(&entity.id) {
            log::warn!("Entity {:?} already in world, ignoring insert", entity.id);
            return false;
        }
        self.index.insert(entity.id, self.slots.len());
        self.slots.push(Slot { entity, live: true });
        true
    }

    /// Mark an entity dead. Removing an absent or already removed entity is a no-op.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.index.get(&id) {
            Some(&idx) if self.slots[idx].live => {
                self.slots[idx].live = false;
                true
            }
            _ => false,
        }
    }

    pub fn is_live(&self, id: EntityId) -> bool {
        self.index
            .get(&id)
            .is_some_and(|&idx| self.slots[idx].live)
    }

    /// Number of slots, live or dead; the upper bound for index iteration
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.live).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live entity at a slot index
    pub fn get(&self, idx: usize) -> Option<&Entity> {
        self.slots
            .get(idx)
            .filter(|s| s.live)
            .map(|s| &s.entity)
    }

    /// Live entity at a slot index, mutably
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Entity> {
        self.slots
            .get_mut(idx)
            .filter(|s| s.live)
            .map(|s| &mut s.entity)
    }

    /// Entity by id, live only
    pub fn by_id(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).and_then(|&idx| self.get(idx))
    }

    /// Entity at a slot index whether or not it has been removed this tick
    pub(crate) fn slot_entity_mut(&mut self, idx: usize) -> Option<&mut Entity> {
        self.slots.get_mut(idx).map(|s| &mut s.entity)
    }

    /// Live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter().filter(|s| s.live).map(|s| &s.entity)
    }

    /// Drop dead slots and reindex
    pub fn compact(&mut self) {
        self.slots.retain(|s| s.live);
        self.index.clear();
        for (idx, slot) in self.slots.iter().enumerate() {
            self.index.insert(slot.entity.id, idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use glam::Vec2;

    fn spawn(arena: &mut EntityArena) -> EntityId {
        let id = arena.next_entity_id();
        arena.insert(Entity::new(id, Vec2::ZERO, None, EntityKind::HazardSpawner));
        id
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut arena = EntityArena::new();
        let a = spawn(&mut arena);
        let b = spawn(&mut arena);

        assert!(arena.remove(a));
        let once: Vec<EntityId> = arena.iter().map(|e| e.id).collect();
        assert!(!arena.remove(a));
        let twice: Vec<EntityId> = arena.iter().map(|e| e.id).collect();

        assert_eq!(once, twice);
        assert_eq!(once, vec![b]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut arena = EntityArena::new();
        spawn(&mut arena);
        assert!(!arena.remove(EntityId(999)));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut arena = EntityArena::new();
        let id = spawn(&mut arena);
        let dup = Entity::new(id, Vec2::ONE, None, EntityKind::HazardSpawner);
        assert!(!arena.insert(dup));
        assert_eq!(arena.slot_count(), 1);
    }

    #[test]
    fn test_indices_stable_until_compact() {
        let mut arena = EntityArena::new();
        let a = spawn(&mut arena);
        let b = spawn(&mut arena);
        let c = spawn(&mut arena);

        arena.remove(b);
        assert_eq!(arena.get(0).map(|e| e.id), Some(a));
        assert!(arena.get(1).is_none());
        assert_eq!(arena.get(2).map(|e| e.id), Some(c));

        arena.compact();
        assert_eq!(arena.slot_count(), 2);
        assert_eq!(arena.get(1).map(|e| e.id), Some(c));
        assert!(arena.is_live(c));
        assert!(!arena.is_live(b));
        assert!(arena.by_id(c).is_some());
    }
}
