//! Per-kind update behavior and collision reactions
//!
//! Every kind is dispatched through `update`; spawns and UI text are pushed into
//! the `TickContext` and applied by the tick driver right after the requesting
//! entity's update.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::entity::{Bounds, Entity, EntityKind};
use super::event::CollisionEvent;
use super::tick::TickInput;
use crate::assets::SpriteKind;
use crate::renderer::UiText;
use crate::rotate_degrees;
use crate::tuning::Tuning;

/// What the world should do with an entity after its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Keep,
    Despawn,
}

/// What a collision reaction asks of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    None,
    GameOver,
}

/// An entity requested during the update pass; the world assigns its id
#[derive(Debug, Clone, PartialEq)]
pub struct Spawn {
    pub pos: Vec2,
    pub rotation: f32,
    pub sprite: SpriteKind,
    pub kind: EntityKind,
}

/// Everything an update may read or append to
pub struct TickContext<'a> {
    pub input: &'a TickInput,
    pub bounds: Bounds,
    pub tuning: &'a Tuning,
    pub rng: &'a mut Pcg32,
    pub spawns: Vec<Spawn>,
    pub ui: &'a mut Vec<UiText>,
}

/// Run one entity's update behavior
pub fn update(entity: &mut Entity, ctx: &mut TickContext) -> UpdateOutcome {
    match entity.kind {
        EntityKind::Background => UpdateOutcome::Keep,
        EntityKind::Player { .. } => {
            update_player(entity, ctx);
            UpdateOutcome::Keep
        }
        EntityKind::Projectile { vel } | EntityKind::Hazard { vel } => drift(entity, vel, ctx),
        EntityKind::HazardSpawner => {
            roll_hazard_spawn(ctx);
            UpdateOutcome::Keep
        }
        EntityKind::ScoreTracker { score } => {
            ctx.ui.push(UiText {
                text: score.to_string(),
                pos: Vec2::new(ctx.bounds.width / 2.0, ctx.tuning.score_text_y),
                font_px: ctx.tuning.score_font_px,
            });
            UpdateOutcome::Keep
        }
    }
}

/// Apply one collision event to an entity's own state
pub fn react(entity: &mut Entity, event: &CollisionEvent) -> Reaction {
    match &mut entity.kind {
        EntityKind::Player { .. } if event.involves(EntityKind::PLAYER) => Reaction::GameOver,
        EntityKind::ScoreTracker { score } if event.involves(EntityKind::PROJECTILE) => {
            *score += 1;
            Reaction::None
        }
        _ => Reaction::None,
    }
}

/// Move, clamp, fire, rotate, then advance the cooldown
fn update_player(player: &mut Entity, ctx: &mut TickContext) {
    let tuning = ctx.tuning;
    player.translate(ctx.input.axis, &ctx.bounds, tuning.movement_divisor);
    player.clamp_to_bounds(&ctx.bounds);

    let half_height = player.visual.map_or(0.0, |v| v.height / 2.0);
    let EntityKind::Player { time_since_fired } = &mut player.kind else {
        return;
    };

    if ctx.input.fire && *time_since_fired >= tuning.fire_cooldown_ticks {
        let offset = muzzle_offset(half_height, player.rotation);
        log::debug!("Player fired at rotation {}", player.rotation);
        ctx.spawns.push(Spawn {
            pos: player.pos + offset,
            rotation: player.rotation,
            sprite: SpriteKind::Projectile,
            kind: EntityKind::Projectile {
                vel: offset * tuning.projectile_speed_factor,
            },
        });
        *time_since_fired = 0;
    }

    if ctx.input.rotate_left {
        player.rotation -= tuning.rotate_step_degrees;
    } else if ctx.input.rotate_right {
        player.rotation += tuning.rotate_step_degrees;
    }

    *time_since_fired = time_since_fired.saturating_add(1);
}

/// Forward vector `(0, -half_height)` rotated by the ship's heading
pub fn muzzle_offset(half_height: f32, rotation: f32) -> Vec2 {
    rotate_degrees(Vec2::new(0.0, -half_height), rotation)
}

/// Constant-velocity motion shared by projectiles and hazards
fn drift(entity: &mut Entity, vel: Vec2, ctx: &TickContext) -> UpdateOutcome {
    entity.translate(vel, &ctx.bounds, ctx.tuning.movement_divisor);
    if entity.out_of_bounds(&ctx.bounds, ctx.tuning.out_of_bounds_margin) {
        UpdateOutcome::Despawn
    } else {
        UpdateOutcome::Keep
    }
}

fn roll_hazard_spawn(ctx: &mut TickContext) {
    if ctx.rng.random::<f64>() >= ctx.tuning.hazard_spawn_chance {
        return;
    }
    let pos = edge_position(&mut *ctx.rng, &ctx.bounds);
    let vel = hazard_velocity(&mut *ctx.rng, ctx.bounds.height, ctx.tuning);
    ctx.spawns.push(Spawn {
        pos,
        rotation: 0.0,
        sprite: SpriteKind::Hazard,
        kind: EntityKind::Hazard { vel },
    });
}

/// Uniform point on one of the four edges
pub fn edge_position<R: Rng>(rng: &mut R, bounds: &Bounds) -> Vec2 {
    if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) { 0.0 } else { bounds.width };
        Vec2::new(x, rng.random::<f32>() * bounds.height)
    } else {
        let y = if rng.random_bool(0.5) { 0.0 } else { bounds.height };
        Vec2::new(rng.random::<f32>() * bounds.width, y)
    }
}

/// Diagonal drift: both components drawn from {-2..=2} steps, resampled until nonzero
pub fn hazard_velocity<R: Rng>(rng: &mut R, surface_height: f32, tuning: &Tuning) -> Vec2 {
    let step = surface_height / tuning.hazard_speed_divisor * tuning.hazard_speed_factor;
    loop {
        let x = velocity_step(rng);
        let y = velocity_step(rng);
        if x != 0 && y != 0 {
            return Vec2::new(x as f32 * step, y as f32 * step);
        }
    }
}

fn velocity_step<R: Rng>(rng: &mut R) -> i32 {
    (rng.random::<f32>() * 4.0).round() as i32 - 2
}
