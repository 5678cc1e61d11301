//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, tombstoned removal)
//! - Draws only through the `Surface` trait

pub mod arena;
pub mod behavior;
pub mod collision;
pub mod entity;
pub mod event;
pub mod state;
pub mod tick;

pub use arena::EntityArena;
pub use behavior::{Reaction, Spawn, TickContext, UpdateOutcome, hazard_velocity, muzzle_offset};
pub use collision::{overlaps, resolve_collisions};
pub use entity::{Bounds, Entity, EntityId, EntityKind};
pub use event::{CollisionEvent, Participant};
pub use state::{GamePhase, World};
pub use tick::{TickInput, TickReport, tick};
