//! Builtin weapon and enemy catalogs.
//!
//! One record per weapon category and one base profile per enemy rank.
//! Hosts that want different balance load overrides through the loaders
//! instead of editing these tables.

use combat_core::{
    AbilityDef, AbilityEffect, AttackPattern, EnemyProfile, EnemyRank, ManaSpec, ProjectileKind,
    WeaponSpec, WeaponType,
};

static SWORD: WeaponSpec = WeaponSpec {
    weapon_type: WeaponType::Sword,
    name: "Sword",
    base_damage: 15,
    attack_range: 2.5,
    fire_rate: 1.21,
    pattern: AttackPattern::Combo {
        multipliers: &[1.0, 1.2, 1.5],
        reset_window: 1.0,
    },
    abilities: [
        Some(AbilityDef {
            name: "Charge",
            cooldown: 6.0,
            effect: AbilityEffect::Strike {
                damage: 20,
                radius: 2.0,
            },
        }),
        Some(AbilityDef {
            name: "Deflect",
            cooldown: 8.0,
            effect: AbilityEffect::Guard { duration: 0.3 },
        }),
        Some(AbilityDef {
            name: "Colossus Strike",
            cooldown: 12.0,
            effect: AbilityEffect::Strike {
                damage: 50,
                radius: 3.0,
            },
        }),
        Some(AbilityDef {
            name: "Wind Shear",
            cooldown: 10.0,
            effect: AbilityEffect::Volley {
                count: 1,
                projectile: ProjectileKind::WindSlash,
                damage: 15,
            },
        }),
    ],
    mana: None,
    life_drain: None,
};

static SCYTHE: WeaponSpec = WeaponSpec {
    weapon_type: WeaponType::Scythe,
    name: "Scythe",
    base_damage: 12,
    attack_range: 3.0,
    fire_rate: 1.1,
    pattern: AttackPattern::Instant,
    abilities: [
        Some(AbilityDef {
            name: "Healing Wave",
            cooldown: 8.0,
            effect: AbilityEffect::HealPulse {
                amount: 25,
                radius: 8.0,
            },
        }),
        Some(AbilityDef {
            name: "Soul Harvest",
            cooldown: 10.0,
            effect: AbilityEffect::Strike {
                damage: 24,
                radius: 4.0,
            },
        }),
        Some(AbilityDef {
            name: "Resurrection",
            cooldown: 60.0,
            effect: AbilityEffect::Revive {
                health_fraction: 0.5,
                radius: 6.0,
            },
        }),
        None,
    ],
    mana: None,
    life_drain: Some(0.3),
};

static BOW: WeaponSpec = WeaponSpec {
    weapon_type: WeaponType::Bow,
    name: "Archer's Bow",
    base_damage: 10,
    attack_range: 30.0,
    fire_rate: 1.0,
    pattern: AttackPattern::Charge {
        min_multiplier: 0.5,
        max_multiplier: 2.0,
        max_charge: 2.0,
    },
    abilities: [
        Some(AbilityDef {
            name: "Multi-Shot",
            cooldown: 10.0,
            effect: AbilityEffect::Volley {
                count: 3,
                projectile: ProjectileKind::Arrow,
                damage: 7,
            },
        }),
        Some(AbilityDef {
            name: "Arrow Rain",
            cooldown: 12.0,
            effect: AbilityEffect::Strike {
                damage: 15,
                radius: 5.0,
            },
        }),
        Some(AbilityDef {
            name: "Rapid Fire",
            cooldown: 15.0,
            effect: AbilityEffect::RateBoost {
                multiplier: 3.0,
                duration: 5.0,
            },
        }),
        None,
    ],
    mana: None,
    life_drain: None,
};

static RUNEBLADE: WeaponSpec = WeaponSpec {
    weapon_type: WeaponType::Runeblade,
    name: "Runeblade",
    base_damage: 14,
    attack_range: 2.5,
    fire_rate: 1.15,
    pattern: AttackPattern::Instant,
    abilities: [
        Some(AbilityDef {
            name: "Rune Burst",
            cooldown: 9.0,
            effect: AbilityEffect::Strike {
                damage: 35,
                radius: 3.0,
            },
        }),
        None,
        None,
        None,
    ],
    mana: None,
    life_drain: None,
};

static SABRES: WeaponSpec = WeaponSpec {
    weapon_type: WeaponType::Sabres,
    name: "Twin Sabres",
    base_damage: 8,
    attack_range: 2.0,
    fire_rate: 1.8,
    pattern: AttackPattern::Instant,
    abilities: [
        Some(AbilityDef {
            name: "Flurry",
            cooldown: 12.0,
            effect: AbilityEffect::RateBoost {
                multiplier: 2.0,
                duration: 4.0,
            },
        }),
        None,
        None,
        None,
    ],
    mana: None,
    life_drain: None,
};

static STAFF: WeaponSpec = WeaponSpec {
    weapon_type: WeaponType::Staff,
    name: "Mage Staff",
    base_damage: 15,
    attack_range: 40.0,
    fire_rate: 1.25,
    pattern: AttackPattern::Cast {
        cast_time: 0.5,
        cooldown: 0.8,
        projectile: ProjectileKind::Fireball,
        mana_cost: 10,
    },
    abilities: [
        Some(AbilityDef {
            name: "Fireball",
            cooldown: 8.0,
            effect: AbilityEffect::Volley {
                count: 1,
                projectile: ProjectileKind::Fireball,
                damage: 50,
            },
        }),
        Some(AbilityDef {
            name: "Ice Nova",
            cooldown: 12.0,
            effect: AbilityEffect::FreezeNova {
                damage: 30,
                radius: 5.0,
                freeze_duration: 3.0,
            },
        }),
        Some(AbilityDef {
            name: "Lightning Strike",
            cooldown: 15.0,
            effect: AbilityEffect::Volley {
                count: 1,
                projectile: ProjectileKind::LightningBolt,
                damage: 80,
            },
        }),
        None,
    ],
    mana: Some(ManaSpec {
        max: 100,
        regen_per_second: 5.0,
    }),
    life_drain: None,
};

/// Builtin behavior table for a weapon category.
pub fn weapon_spec(weapon: WeaponType) -> &'static WeaponSpec {
    match weapon {
        WeaponType::Sword => &SWORD,
        WeaponType::Scythe => &SCYTHE,
        WeaponType::Bow => &BOW,
        WeaponType::Runeblade => &RUNEBLADE,
        WeaponType::Sabres => &SABRES,
        WeaponType::Staff => &STAFF,
    }
}

/// Builtin base profile for an enemy rank, level 1.
///
/// Rank multipliers are applied by `spawn_stats` at spawn time, not here.
pub fn base_profile(rank: EnemyRank) -> EnemyProfile {
    let name = match rank {
        EnemyRank::Grunt => "Grunt",
        EnemyRank::Elite => "Elite",
        EnemyRank::Miniboss => "Miniboss",
        EnemyRank::Boss => "Boss",
    };

    EnemyProfile {
        name: name.to_string(),
        rank,
        level: 1,
        base_health: 100,
        base_damage: 15,
        base_speed: 3.0,
        attack_range: 2.0,
        attack_rate: 1.0,
        aggro_range: 8.0,
        lose_aggro_range: 15.0,
        can_patrol: true,
        patrol_radius: 10.0,
        idle_time: 2.0,
        melee_weapon: WeaponType::Sword,
        xp_reward: 10,
        gold_reward: 5,
        removal_delay: 5.0,
    }
}
