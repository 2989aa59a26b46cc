//! Damage calculation.
//!
//! Pure, stateless functions turning a base amount plus weapon context into
//! a final damage or healing result. Randomness enters only as an explicit
//! roll argument and account-level modifiers only through
//! [`crate::env::LoadoutOracle`], so every function here is deterministic
//! given its inputs.
mod damage;
mod types;

pub use damage::{
    BASE_CRIT_CHANCE, BASE_CRIT_MULTIPLIER, CRIT_DAMAGE_RUNE_BONUS, CRIT_RUNE_BONUS,
    apply_armor_reduction, calculate_damage, calculate_healing, calculate_scaled_damage,
    critical_chance, critical_multiplier, weapon_damage_multiplier,
};
pub use types::{DamageResult, DamageType, RuneKind, WeaponType};
