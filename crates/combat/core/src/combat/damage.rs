//! Damage and healing formulas.

use crate::env::LoadoutOracle;

use super::types::{DamageResult, DamageType, RuneKind, WeaponType};

/// Base critical hit chance before runes and passives.
pub const BASE_CRIT_CHANCE: f32 = 0.11;
/// Base critical damage multiplier before runes.
pub const BASE_CRIT_MULTIPLIER: f32 = 2.0;
/// Critical chance added per critical rune.
pub const CRIT_RUNE_BONUS: f32 = 0.03;
/// Critical multiplier added per crit-damage rune.
pub const CRIT_DAMAGE_RUNE_BONUS: f32 = 0.15;

/// Critical chance added by the bow passive.
const BOW_PASSIVE_CRIT_BONUS: f32 = 0.05;
/// Damage multiplier granted by the sword passive.
const SWORD_PASSIVE_DAMAGE_BONUS: f32 = 1.15;
/// Healing multiplier granted by the scythe passive.
const SCYTHE_PASSIVE_HEALING_BONUS: f32 = 1.25;
/// Damage multiplier granted by the runeblade passive.
const RUNEBLADE_PASSIVE_DAMAGE_BONUS: f32 = 1.2;
/// Damage multiplier granted by the sabres passive.
const SABRES_PASSIVE_DAMAGE_BONUS: f32 = 1.1;

/// Calculate damage for one hit.
///
/// # Formula
///
/// ```text
/// crit_chance = 0.11 + 0.03 × critical_runes + weapon passive bonus,
///               clamped to [0, 1]
/// is_critical = roll < crit_chance
/// crit_multiplier = 2.0 + 0.15 × crit_damage_runes
/// final = round(base × weapon_multiplier)
/// if critical: final = round(final × crit_multiplier)
/// ```
///
/// # Arguments
///
/// * `base_amount` - Base damage before modifiers
/// * `weapon_type` - Weapon category (drives passive bonuses)
/// * `damage_type` - Carried through unchanged into the result
/// * `roll` - Uniform random value in `[0, 1)`, supplied by the caller
/// * `loadout` - Rune counts and passive unlocks
pub fn calculate_damage(
    base_amount: u32,
    weapon_type: WeaponType,
    damage_type: DamageType,
    roll: f32,
    loadout: &(impl LoadoutOracle + ?Sized),
) -> DamageResult {
    let crit_chance = critical_chance(weapon_type, loadout);
    let is_critical = roll < crit_chance;

    let mut final_damage =
        (base_amount as f32 * weapon_damage_multiplier(weapon_type, loadout)).round() as u32;

    if is_critical {
        final_damage = (final_damage as f32 * critical_multiplier(loadout)).round() as u32;
    }

    DamageResult {
        damage: final_damage,
        is_critical,
        damage_type,
        weapon_type,
    }
}

/// Critical hit chance from runes and weapon passives, clamped to `[0, 1]`.
pub fn critical_chance(weapon_type: WeaponType, loadout: &(impl LoadoutOracle + ?Sized)) -> f32 {
    let mut chance = BASE_CRIT_CHANCE + loadout.rune_count(RuneKind::Critical) as f32 * CRIT_RUNE_BONUS;

    if weapon_type == WeaponType::Bow && loadout.passive_unlocked(WeaponType::Bow) {
        chance += BOW_PASSIVE_CRIT_BONUS;
    }

    chance.clamp(0.0, 1.0)
}

/// Critical damage multiplier from crit-damage runes.
pub fn critical_multiplier(loadout: &(impl LoadoutOracle + ?Sized)) -> f32 {
    BASE_CRIT_MULTIPLIER + loadout.rune_count(RuneKind::CritDamage) as f32 * CRIT_DAMAGE_RUNE_BONUS
}

/// Per-weapon damage multiplier; 1.0 unless the weapon's passive is
/// unlocked and affects outgoing damage.
pub fn weapon_damage_multiplier(
    weapon_type: WeaponType,
    loadout: &(impl LoadoutOracle + ?Sized),
) -> f32 {
    if !loadout.passive_unlocked(weapon_type) {
        return 1.0;
    }

    match weapon_type {
        WeaponType::Sword => SWORD_PASSIVE_DAMAGE_BONUS,
        WeaponType::Runeblade => RUNEBLADE_PASSIVE_DAMAGE_BONUS,
        WeaponType::Sabres => SABRES_PASSIVE_DAMAGE_BONUS,
        // Scythe's passive boosts healing, bow's boosts crit chance.
        WeaponType::Scythe | WeaponType::Bow | WeaponType::Staff => 1.0,
    }
}

/// Calculate a healing amount. The scythe passive boosts it by 25%.
pub fn calculate_healing(
    base_healing: u32,
    weapon_type: WeaponType,
    loadout: &(impl LoadoutOracle + ?Sized),
) -> u32 {
    let multiplier = if weapon_type == WeaponType::Scythe && loadout.passive_unlocked(weapon_type) {
        SCYTHE_PASSIVE_HEALING_BONUS
    } else {
        1.0
    };

    (base_healing as f32 * multiplier).round() as u32
}

/// Scale damage by entity level: `1 + (level - 1) × 0.1`.
pub fn calculate_scaled_damage(base_damage: u32, level: u32) -> u32 {
    let multiplier = 1.0 + (level.saturating_sub(1)) as f32 * 0.1;
    (base_damage as f32 * multiplier).round() as u32
}

/// Reduce damage by armor: `reduction = armor / (armor + 100)`.
pub fn apply_armor_reduction(damage: u32, armor: u32) -> u32 {
    let reduction = armor as f32 / (armor + 100) as f32;
    (damage as f32 * (1.0 - reduction)).round() as u32
}
