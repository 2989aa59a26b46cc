//! Closed combat enums and calculation results.

use strum::EnumIter;

/// Weapon categories available in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponType {
    /// Tank class melee weapon.
    Sword,
    /// Healer class melee weapon with life drain.
    Scythe,
    /// Ranged weapon with charged shots.
    Bow,
    /// Magic-infused melee blade.
    Runeblade,
    /// Dual-wield melee.
    Sabres,
    /// Mage staff, timed spellcasting.
    Staff,
}

/// Damage categories for resolution and resistances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageType {
    Physical,
    Magical,
    /// Ignores armor.
    True,
    /// Restores health; carried through the same intent queue as damage.
    Healing,
}

/// Persistent account-level modifier kinds.
///
/// Rune counts are read-only inputs to the calculator; how they are stored
/// and earned is outside this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuneKind {
    /// Raises critical hit chance.
    Critical,
    /// Raises the critical damage multiplier.
    CritDamage,
    /// Raises maximum health.
    Health,
    /// Raises movement/attack speed.
    Speed,
}

/// Outcome of a damage calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    pub damage: u32,
    pub is_critical: bool,
    pub damage_type: DamageType,
    pub weapon_type: WeaponType,
}
