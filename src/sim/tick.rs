//! Fixed timestep simulation tick
//!
//! One call runs update -> collision -> draw -> UI flush. Removals only clear
//! live flags, so no phase ever sees its own iteration shift under it; dead
//! slots are compacted once the tick is over.

use glam::Vec2;

use super::behavior::{self, Reaction, TickContext, UpdateOutcome};
use super::collision::resolve_collisions;
use super::entity::{Bounds, EntityId};
use super::event::CollisionEvent;
use super::state::{GamePhase, World, insert_spawn};
use crate::consts::GAME_OVER_TEXT;
use crate::renderer::{Surface, UiText};

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Movement axes, each -1, 0, or 1
    pub axis: Vec2,
    pub fire: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Phase after the tick
    pub phase: GamePhase,
    /// Collision pairs resolved this tick, in detection order
    pub collisions: Vec<CollisionEvent>,
    /// Entities created during the update pass
    pub spawned: Vec<EntityId>,
}

impl TickReport {
    fn idle(phase: GamePhase) -> Self {
        Self {
            phase,
            collisions: Vec::new(),
            spawned: Vec::new(),
        }
    }
}

/// Advance the world by one fixed tick and draw it
pub fn tick<S: Surface + ?Sized>(world: &mut World, input: &TickInput, surface: &mut S) -> TickReport {
    if world.phase == GamePhase::GameOver {
        return TickReport::idle(GamePhase::GameOver);
    }

    world.bounds = Bounds::new(surface.width(), surface.height());

    // The latch is only checked here, never mid-tick
    if world.game_over_latched() {
        enter_game_over(world, surface);
        return TickReport::idle(GamePhase::GameOver);
    }

    world.time_ticks += 1;

    let spawned = update_phase(world, input);
    let collisions = collision_phase(world);
    draw_phase(world, surface);
    flush_ui(world, surface);
    world.arena.compact();

    TickReport {
        phase: world.phase,
        collisions,
        spawned,
    }
}

/// Update every entity in collection order. Spawns are appended as soon as
/// they are requested, so they are reached and updated later in the same pass.
fn update_phase(world: &mut World, input: &TickInput) -> Vec<EntityId> {
    let World {
        arena,
        rng,
        tuning,
        visuals,
        ui_queue,
        bounds,
        ..
    } = world;
    let mut ctx = TickContext {
        input,
        bounds: *bounds,
        tuning,
        rng,
        spawns: Vec::new(),
        ui: ui_queue,
    };
    let mut spawned = Vec::new();

    let mut idx = 0;
    while idx < arena.slot_count() {
        let outcome = match arena.get_mut(idx) {
            Some(entity) if entity.kind.has_update() => {
                Some((entity.id, entity.name(), behavior::update(entity, &mut ctx)))
            }
            _ => None,
        };
        idx += 1;

        if let Some((id, name, UpdateOutcome::Despawn)) = outcome {
            log::debug!("{} {:?} left the surface", name, id);
            arena.remove(id);
        }
        for spawn in ctx.spawns.drain(..) {
            spawned.push(insert_spawn(arena, visuals, spawn));
        }
    }

    spawned
}

/// Resolve collisions, then deliver each event to every entity that was live
/// when the pass began (including the ones the pass removed)
fn collision_phase(world: &mut World) -> Vec<CollisionEvent> {
    let subscribers: Vec<usize> = (0..world.arena.slot_count())
        .filter(|&idx| world.arena.get(idx).is_some())
        .collect();

    let events = resolve_collisions(&mut world.arena, world.tuning.collision_radius_factor);

    let mut game_over = false;
    for event in &events {
        for &idx in &subscribers {
            let Some(entity) = world.arena.slot_entity_mut(idx) else {
                continue;
            };
            if behavior::react(entity, event) == Reaction::GameOver {
                game_over = true;
            }
        }
    }
    if game_over {
        world.latch_game_over();
    }

    events
}

fn draw_phase<S: Surface + ?Sized>(world: &World, surface: &mut S) {
    for entity in world.arena.iter() {
        if let Some(visual) = &entity.visual {
            surface.draw_sprite(visual, entity.pos, entity.rotation);
        }
    }
}

/// Draw every queued text request; the queue is emptied either way
fn flush_ui<S: Surface + ?Sized>(world: &mut World, surface: &mut S) {
    for text in world.ui_queue.drain(..) {
        surface.draw_text(&text);
    }
}

fn enter_game_over<S: Surface + ?Sized>(world: &mut World, surface: &mut S) {
    world.phase = GamePhase::GameOver;
    world.ui_queue.clear();
    surface.draw_text(&UiText {
        text: GAME_OVER_TEXT.to_string(),
        pos: world.bounds.center(),
        font_px: world.tuning.game_over_font_px,
    });
    log::info!(
        "GAME OVER after {} ticks, score {}",
        world.time_ticks,
        world.score()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{SpriteKind, VisualTable};
    use crate::renderer::RecordingSurface;
    use crate::sim::entity::EntityKind;
    use crate::tuning::Tuning;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    /// World with only a ship and no hazard spawner
    fn ship_only() -> (World, EntityId) {
        let mut world = World::empty(
            42,
            Bounds::new(W, H),
            Tuning::default(),
            VisualTable::default_for_surface(W, H),
        );
        let player = world.spawn(
            Vec2::new(W / 2.0, H / 2.0),
            Some(SpriteKind::Player),
            EntityKind::Player {
                time_since_fired: u32::MAX,
            },
        );
        (world, player)
    }

    fn projectiles_in(world: &World, report: &TickReport) -> usize {
        report
            .spawned
            .iter()
            .filter(|id| {
                world
                    .arena
                    .by_id(**id)
                    .is_some_and(|e| e.name() == EntityKind::PROJECTILE)
            })
            .count()
    }

    #[test]
    fn test_fire_cooldown() {
        let (mut world, _) = ship_only();
        let mut surface = RecordingSurface::new(W, H);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        let mut fired_on = Vec::new();
        for n in 1..=31 {
            let report = tick(&mut world, &fire, &mut surface);
            if projectiles_in(&world, &report) > 0 {
                fired_on.push(n);
            }
        }
        assert_eq!(fired_on, vec![1, 16, 31]);
    }

    /// Where a projectile spawned at `ship + offset` ends up after its first update
    fn after_first_step(ship: Vec2, offset: Vec2) -> Vec2 {
        let vel = offset * Tuning::default().projectile_speed_factor;
        ship + offset + vel * H / Tuning::default().movement_divisor
    }

    #[test]
    fn test_projectile_spawn_geometry() {
        let (mut world, player) = ship_only();
        let mut surface = RecordingSurface::new(W, H);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };

        let report = tick(&mut world, &fire, &mut surface);
        let shot = world.arena.by_id(report.spawned[0]).unwrap();
        let ship = world.arena.by_id(player).unwrap();
        let EntityKind::Projectile { vel } = shot.kind else {
            panic!("expected a projectile");
        };
        assert!((vel - Vec2::new(0.0, -3.2)).length() < 1e-4);
        // Spawned at the nose, then moved once in the same pass
        let expected = after_first_step(ship.pos, Vec2::new(0.0, -32.0));
        assert!((shot.pos - expected).length() < 1e-3);
        assert!((shot.pos - (ship.pos + Vec2::new(0.0, -56.0))).length() < 1e-3);

        // Rotate to 90 degrees (45 ticks of +2), then wait out the cooldown
        let turn = TickInput {
            rotate_right: true,
            ..Default::default()
        };
        for _ in 0..45 {
            tick(&mut world, &turn, &mut surface);
        }
        let ship = world.arena.by_id(player).unwrap();
        assert!((ship.rotation - 90.0).abs() < 1e-4);

        let report = tick(&mut world, &fire, &mut surface);
        let shot = world.arena.by_id(report.spawned[0]).unwrap();
        let ship = world.arena.by_id(player).unwrap();
        let expected = after_first_step(ship.pos, Vec2::new(32.0, 0.0));
        assert!((shot.pos - expected).length() < 1e-3);
        assert!((shot.rotation - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_spawns_update_in_collection_order() {
        let mut world = World::empty(
            5,
            Bounds::new(W, H),
            Tuning {
                hazard_spawn_chance: 1.0,
                ..Tuning::default()
            },
            VisualTable::default_for_surface(W, H),
        );
        world.spawn(Vec2::ZERO, None, EntityKind::HazardSpawner);
        let mut surface = RecordingSurface::new(W, H);

        let report = tick(&mut world, &TickInput::default(), &mut surface);
        assert_eq!(report.spawned.len(), 1);
        let hazard = world.arena.by_id(report.spawned[0]).unwrap();
        let EntityKind::Hazard { vel } = hazard.kind else {
            panic!("expected a hazard");
        };
        // An edge spawn has already drifted off the edge it started on
        let start = hazard.pos - vel * H / world.tuning.movement_divisor;
        let on_edge = start.x.abs() < 1e-3
            || (start.x - W).abs() < 1e-3
            || start.y.abs() < 1e-3
            || (start.y - H).abs() < 1e-3;
        assert!(on_edge);
        assert_ne!(hazard.pos, start);
    }

    #[test]
    fn test_rotate_left_wins_when_both_held() {
        let (mut world, player) = ship_only();
        let mut surface = RecordingSurface::new(W, H);
        let both = TickInput {
            rotate_left: true,
            rotate_right: true,
            ..Default::default()
        };
        tick(&mut world, &both, &mut surface);
        assert_eq!(world.arena.by_id(player).unwrap().rotation, -2.0);
    }

    #[test]
    fn test_player_is_clamped_to_surface() {
        let (mut world, player) = ship_only();
        let mut surface = RecordingSurface::new(W, H);
        let up_left = TickInput {
            axis: Vec2::new(-1.0, -1.0),
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut world, &up_left, &mut surface);
        }
        assert_eq!(world.arena.by_id(player).unwrap().pos, Vec2::ZERO);
    }

    #[test]
    fn test_projectile_leaves_and_is_removed() {
        let (mut world, _) = ship_only();
        let mut surface = RecordingSurface::new(W, H);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        let report = tick(&mut world, &fire, &mut surface);
        let shot = report.spawned[0];

        for _ in 0..30 {
            tick(&mut world, &TickInput::default(), &mut surface);
        }
        assert!(!world.arena.is_live(shot));
        assert_eq!(world.count_named(EntityKind::PROJECTILE), 0);
    }

    #[test]
    fn test_determinism() {
        let mut world1 = World::with_defaults(99999, W, H);
        let mut world2 = World::with_defaults(99999, W, H);
        let mut s1 = RecordingSurface::new(W, H);
        let mut s2 = RecordingSurface::new(W, H);

        let inputs = [
            TickInput {
                axis: Vec2::new(1.0, 0.0),
                ..Default::default()
            },
            TickInput {
                fire: true,
                rotate_left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut world1, input, &mut s1);
                tick(&mut world2, input, &mut s2);
            }
        }

        assert_eq!(world1.time_ticks, world2.time_ticks);
        assert_eq!(world1.entity_count(), world2.entity_count());
        let pos1: Vec<Vec2> = world1.arena.iter().map(|e| e.pos).collect();
        let pos2: Vec<Vec2> = world2.arena.iter().map(|e| e.pos).collect();
        assert_eq!(pos1, pos2);
    }
}
