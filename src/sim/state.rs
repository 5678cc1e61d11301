//! World state
//!
//! Owns the entity arena, the RNG, the game-over latch, and the per-tick UI
//! request queue. All mutation happens inside `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::arena::EntityArena;
use super::behavior::Spawn;
use super::entity::{Bounds, Entity, EntityId, EntityKind};
use crate::assets::{SpriteKind, VisualTable};
use crate::renderer::UiText;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Ticking normally
    Running,
    /// Terminal; no further ticks run
    GameOver,
}

/// The whole game
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) rng: Pcg32,
    pub arena: EntityArena,
    /// Surface extents, refreshed from the surface at the start of every tick
    pub bounds: Bounds,
    pub tuning: Tuning,
    pub visuals: VisualTable,
    pub phase: GamePhase,
    /// One-way latch set by the player's collision reaction
    game_over: bool,
    /// Text requests queued during the current tick
    pub ui_queue: Vec<UiText>,
    /// Ticks run so far
    pub time_ticks: u64,
}

impl World {
    /// A world holding no entities
    pub fn empty(seed: u64, bounds: Bounds, tuning: Tuning, visuals: VisualTable) -> Self {
        for kind in visuals.missing() {
            log::warn!("No sprite entry for {}; it will not be drawn", kind.as_str());
        }
        Self {
            rng: Pcg32::seed_from_u64(seed),
            arena: EntityArena::new(),
            bounds,
            tuning,
            visuals,
            phase: GamePhase::Running,
            game_over: false,
            ui_queue: Vec::new(),
            time_ticks: 0,
        }
    }

    /// A fresh game: background, ship at the center, hazard spawner, score tracker
    pub fn new(seed: u64, bounds: Bounds, tuning: Tuning, visuals: VisualTable) -> Self {
        let mut world = Self::empty(seed, bounds, tuning, visuals);
        let center = bounds.center();
        world.spawn(center, Some(SpriteKind::Background), EntityKind::Background);
        world.spawn(
            center,
            Some(SpriteKind::Player),
            EntityKind::Player {
                time_since_fired: u32::MAX,
            },
        );
        world.spawn(Vec2::ZERO, None, EntityKind::HazardSpawner);
        world.spawn(Vec2::ZERO, None, EntityKind::ScoreTracker { score: 0 });
        log::info!(
            "World created: seed={} surface={}x{}",
            seed,
            bounds.width,
            bounds.height
        );
        world
    }

    /// Default tuning and the shipped sprite table for the given surface size
    pub fn with_defaults(seed: u64, width: f32, height: f32) -> Self {
        Self::new(
            seed,
            Bounds::new(width, height),
            Tuning::default(),
            VisualTable::default_for_surface(width, height),
        )
    }

    /// Add an entity; its visual comes from the table
    pub fn spawn(&mut self, pos: Vec2, sprite: Option<SpriteKind>, kind: EntityKind) -> EntityId {
        let id = self.arena.next_entity_id();
        let visual = sprite.and_then(|s| self.visuals.visual(s));
        self.arena.insert(Entity::new(id, pos, visual, kind));
        id
    }

    /// Remove an entity; absent ids are ignored
    pub fn remove(&mut self, id: EntityId) -> bool {
        self.arena.remove(id)
    }

    /// Set the game-over latch. It never resets.
    pub fn latch_game_over(&mut self) {
        if !self.game_over {
            log::info!("Game over latched at tick {}", self.time_ticks);
        }
        self.game_over = true;
    }

    pub fn game_over_latched(&self) -> bool {
        self.game_over
    }

    /// Current score, held by the score tracker
    pub fn score(&self) -> u64 {
        self.arena
            .iter()
            .find_map(|e| match e.kind {
                EntityKind::ScoreTracker { score } => Some(score),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.arena
            .iter()
            .find(|e| matches!(e.kind, EntityKind::Player { .. }))
    }

    /// Live entities of a given identity name
    pub fn count_named(&self, name: &str) -> usize {
        self.arena.iter().filter(|e| e.name() == name).count()
    }

    pub fn entity_count(&self) -> usize {
        self.arena.len()
    }
}

/// Append an entity requested during an update pass
pub(crate) fn insert_spawn(arena: &mut EntityArena, visuals: &VisualTable, spawn: Spawn) -> EntityId {
    let id = arena.next_entity_id();
    let visual = visuals.visual(spawn.sprite);
    log::debug!("Spawned {} {:?} at {:?}", spawn.kind.name(), id, spawn.pos);
    arena.insert(Entity::new(id, spawn.pos, visual, spawn.kind).with_rotation(spawn.rotation));
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_layout() {
        let world = World::with_defaults(1, 800.0, 600.0);
        assert_eq!(world.entity_count(), 4);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.score(), 0);

        let first = world.arena.get(0).unwrap();
        assert_eq!(first.kind, EntityKind::Background);
        assert!(!first.is_collidable());

        let player = world.player().unwrap();
        assert_eq!(player.pos, Vec2::new(400.0, 300.0));
        assert!(player.is_collidable());

        // Handlers are invisible
        assert!(world.arena.iter().filter(|e| e.visual.is_none()).count() == 2);
    }

    #[test]
    fn test_latch_is_one_way() {
        let mut world = World::with_defaults(1, 800.0, 600.0);
        assert!(!world.game_over_latched());
        world.latch_game_over();
        world.latch_game_over();
        assert!(world.game_over_latched());
    }

    #[test]
    fn test_missing_sprite_spawns_invisible_entity() {
        let visuals = VisualTable::default_for_surface(800.0, 600.0);
        let mut world = World::empty(3, Bounds::new(800.0, 600.0), Tuning::default(), visuals);
        let id = world.spawn(Vec2::ZERO, Some(SpriteKind::Hazard), EntityKind::Hazard {
            vel: Vec2::ONE,
        });
        assert!(world.arena.by_id(id).unwrap().visual.is_some());

        let mut world = World::empty(
            3,
            Bounds::new(800.0, 600.0),
            Tuning::default(),
            VisualTable::from_json(r#"{ "entries": {} }"#).unwrap(),
        );
        let id = world.spawn(Vec2::ZERO, Some(SpriteKind::Hazard), EntityKind::Hazard {
            vel: Vec2::ONE,
        });
        let hazard = world.arena.by_id(id).unwrap();
        assert!(hazard.visual.is_none());
        assert!(!hazard.is_collidable());
    }
}
