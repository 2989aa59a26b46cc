//! Static balance content and data-file loaders.
//!
//! This crate houses the builtin weapon and enemy catalogs and provides
//! loaders for player loadout (TOML) and enemy template (RON) data files:
//! - Weapon behavior tables, one per weapon category
//! - Enemy base profiles, one per rank
//! - Player loadout (rune counts + passive unlocks) as a loadout oracle
//!
//! Content is consumed by the runtime and never appears in simulation
//! state. All loaders use combat-core types directly with serde.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{base_profile, weapon_spec};

#[cfg(feature = "loaders")]
pub use loaders::{EnemyTemplateLoader, EnemyTemplateSet, LoadoutLoader, PlayerLoadout};
