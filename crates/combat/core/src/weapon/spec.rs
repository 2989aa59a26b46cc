//! Static weapon behavior tables.
//!
//! A single weapon record parameterized by data replaces per-weapon
//! subclassing: the attack pattern is a tagged variant, abilities are slot
//! definitions, and everything else is numbers. Catalogs of these live in
//! the content crate.

use crate::combat::WeaponType;
use crate::env::ProjectileKind;

/// Describes one weapon category's behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaponSpec {
    pub weapon_type: WeaponType,
    pub name: &'static str,
    /// Damage of a basic attack before multipliers.
    pub base_damage: u32,
    /// Reach of a basic attack, in world units.
    pub attack_range: f32,
    /// Basic attacks per second.
    pub fire_rate: f32,
    pub pattern: AttackPattern,
    /// Up to four ability slot definitions.
    pub abilities: [Option<AbilityDef>; 4],
    /// Mana pool for casting weapons.
    pub mana: Option<ManaSpec>,
    /// Fraction of damage dealt returned to the wielder as healing.
    pub life_drain: Option<f32>,
}

impl WeaponSpec {
    pub fn ability(&self, index: usize) -> Option<&AbilityDef> {
        self.abilities.get(index).and_then(|slot| slot.as_ref())
    }
}

/// How a weapon's basic attack behaves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttackPattern {
    /// Plain swing, no sub-state.
    Instant,

    /// Attack index wrapping through `multipliers`; resets to the first
    /// step when the time since the last attack exceeds the window.
    Combo {
        multipliers: &'static [f32],
        reset_window: f32,
    },

    /// Press toggles charging; release maps elapsed charge time linearly
    /// onto `[min_multiplier, max_multiplier]`, clamped at `max_charge`
    /// seconds.
    Charge {
        min_multiplier: f32,
        max_multiplier: f32,
        max_charge: f32,
    },

    /// Non-blocking timed cast that releases a projectile after
    /// `cast_time` and cannot be re-triggered until both the cast resolves
    /// and `cooldown` elapses.
    Cast {
        cast_time: f32,
        cooldown: f32,
        projectile: ProjectileKind,
        mana_cost: u32,
    },
}

/// An ability bound to a cooldown slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbilityDef {
    pub name: &'static str,
    pub cooldown: f32,
    pub effect: AbilityEffect,
}

/// What an ability does when it fires.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AbilityEffect {
    /// Area damage around the wielder.
    Strike { damage: u32, radius: f32 },

    /// Brief invulnerability for the wielder.
    Guard { duration: f32 },

    /// Time-boxed basic-attack rate multiplier.
    RateBoost { multiplier: f32, duration: f32 },

    /// Area healing around the wielder.
    HealPulse { amount: u32, radius: f32 },

    /// Fan of projectiles.
    Volley {
        count: u32,
        projectile: ProjectileKind,
        damage: u32,
    },

    /// Area damage that also freezes whatever it touches.
    FreezeNova {
        damage: u32,
        radius: f32,
        freeze_duration: f32,
    },

    /// Brings dead allies in the radius back at a fraction of max health.
    Revive { health_fraction: f32, radius: f32 },
}

/// Mana pool settings for casting weapons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManaSpec {
    pub max: u32,
    pub regen_per_second: f32,
}
