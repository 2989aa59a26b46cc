//! Deterministic combat simulation shared across hosts.
//!
//! `combat-core` defines the canonical rules of the combat loop: the entity
//! registry, the health/status model, the pure damage calculator, the intent
//! queue and its single-drain resolution pipeline, the weapon action state
//! machine, and the enemy AI state machine. All health mutation flows through
//! [`pipeline::CombatPipeline`], and supporting crates depend on the types
//! re-exported here.
//!
//! External collaborators (movement integration, projectile flight,
//! presentation) are reached only through the traits in [`env`].
pub mod ai;
pub mod combat;
pub mod config;
pub mod entity;
pub mod env;
pub mod health;
pub mod pipeline;
pub mod weapon;

pub use ai::{
    AiDirective, AiState, AttackOrder, EnemyAiState, EnemyProfile, EnemyRank, RankScaling,
    SpawnStats, spawn_stats,
};
pub use combat::{
    DamageResult, DamageType, RuneKind, WeaponType, apply_armor_reduction, calculate_damage,
    calculate_healing, calculate_scaled_damage, critical_chance, critical_multiplier,
    weapon_damage_multiplier,
};
pub use config::CombatConfig;
pub use entity::{EntityId, EntityRegistry, RegistryError};
pub use env::{
    CombatEnv, EmptyLoadout, LoadoutOracle, MovementSink, OracleError, PcgRng, ProjectileKind,
    ProjectileRequest, ProjectileSink, RngOracle, SpatialOracle, compute_seed,
};
pub use health::{HealthEvent, HealthEvents, HealthState, Regeneration};
pub use pipeline::{CombatEvent, CombatPipeline, CombatStats, DamageIntent};
pub use weapon::{
    AbilityCooldown, AbilityDef, AbilityEffect, AbilitySlot, AttackPattern, ManaPool, ManaSpec,
    WeaponAction, WeaponSpec, WeaponState, WeaponTickEvent,
};
