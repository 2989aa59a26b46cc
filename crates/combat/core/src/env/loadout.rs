//! Account-level modifier oracle.

use crate::combat::{RuneKind, WeaponType};

/// Read-only view of the owning player's persistent modifiers.
///
/// Rune counts and passive unlocks feed the damage calculator and health
/// initialization. Storage and progression live outside this crate.
pub trait LoadoutOracle: Send + Sync {
    /// Number of runes of the given kind the account holds.
    fn rune_count(&self, kind: RuneKind) -> u32;

    /// Whether the weapon's permanent passive bonus is unlocked.
    fn passive_unlocked(&self, weapon: WeaponType) -> bool;
}

/// Loadout with no runes and no passives. Default for enemies and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyLoadout;

impl LoadoutOracle for EmptyLoadout {
    fn rune_count(&self, _kind: RuneKind) -> u32 {
        0
    }

    fn passive_unlocked(&self, _weapon: WeaponType) -> bool {
        false
    }
}
