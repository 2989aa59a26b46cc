//! Events emitted by the simulation during a tick.

use combat_core::{CombatEvent, EntityId, HealthEvent, ProjectileRequest};

/// Everything presentation-layer consumers can observe.
///
/// Pipeline outcomes are wrapped as [`SimEvent::Combat`]; the remaining
/// variants cover driver-level happenings (casts, projectile requests,
/// rewards, lifecycle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimEvent {
    /// A resolution-pipeline outcome (damage, heal, death, knockback).
    Combat(CombatEvent),

    /// A health notification outside the pipeline (regeneration, revives).
    Health { entity: EntityId, event: HealthEvent },

    /// A timed cast started; the projectile releases at `release_at`.
    CastStarted { entity: EntityId, release_at: f32 },

    /// A projectile spawn was requested from the external spawner.
    ProjectileRequested(ProjectileRequest),

    /// An enemy died and paid out its reward yields.
    RewardGranted { entity: EntityId, xp: u32, gold: u32 },

    /// A corpse finished its removal delay and left the simulation.
    EntityDespawned { entity: EntityId },
}
