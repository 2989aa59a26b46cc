//! Weapon action state machine.
//!
//! Each equipped weapon instance tracks its ability cooldowns, the basic
//! attack rate gate, and a pattern-specific action sub-state (combo step,
//! charge progress, or an in-flight timed cast). Weapons never touch health
//! directly: firing produces order values the tick driver converts into
//! pipeline intents or projectile spawn requests.
//!
//! The timed cast is a scheduled continuation (a `release_at` timestamp
//! the driver's tick advances past), not a suspension of the tick loop.
//! Unequipping mid-cast discards the continuation.
mod cooldown;
mod spec;

pub use cooldown::{AbilityCooldown, AbilitySlot};
pub use spec::{AbilityDef, AbilityEffect, AttackPattern, ManaSpec, WeaponSpec};

use glam::Vec3;
use tracing::debug;

use crate::env::ProjectileKind;

/// Order produced by a fire press, enacted by the tick driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeaponAction {
    /// Land a basic attack of `damage` on targets within `range`.
    Strike { damage: u32, range: f32 },
    /// Charging started; a later fire press releases it.
    BeginCharge,
    /// A timed cast started; the projectile releases at `release_at`.
    BeginCast { release_at: f32 },
}

/// Deferred outcome surfaced by the per-tick update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeaponTickEvent {
    /// A pending cast completed; spawn the projectile.
    CastReleased {
        projectile: ProjectileKind,
        base_damage: u32,
        aim: Vec3,
    },
}

/// Mana pool for casting weapons.
///
/// Regeneration accumulates fractionally so slow rates still add up over
/// many small ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManaPool {
    current: u32,
    max: u32,
    regen_per_second: f32,
    regen_carry: f32,
}

impl ManaPool {
    pub fn new(spec: ManaSpec) -> Self {
        Self {
            current: spec.max,
            max: spec.max,
            regen_per_second: spec.regen_per_second,
            regen_carry: 0.0,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Spends `cost` if available. Insufficient mana is a no-op signalled
    /// by the return value, not an error.
    pub fn try_spend(&mut self, cost: u32) -> bool {
        if self.current < cost {
            return false;
        }
        self.current -= cost;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if self.current >= self.max {
            self.regen_carry = 0.0;
            return;
        }
        self.regen_carry += self.regen_per_second * dt;
        let whole = self.regen_carry.floor();
        if whole >= 1.0 {
            self.regen_carry -= whole;
            self.current = (self.current + whole as u32).min(self.max);
        }
    }
}

/// Weapon-specific action sub-state.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ActionState {
    Ready,
    /// Next combo step and when the previous attack landed.
    Combo { step: usize, last_attack: f32 },
    Charging { started_at: f32 },
    Casting { release_at: f32, aim: Vec3 },
}

/// Time-boxed basic-attack rate multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
struct RateBuff {
    multiplier: f32,
    expires_at: f32,
}

/// Per-instance state of one equipped weapon.
pub struct WeaponState {
    spec: &'static WeaponSpec,
    equipped: bool,
    cooldowns: [Option<AbilityCooldown>; 4],
    action: ActionState,
    last_fire: Option<f32>,
    rate_buff: Option<RateBuff>,
    mana: Option<ManaPool>,
    /// Earliest time the cast pattern may start again.
    cast_ready_at: f32,
}

impl WeaponState {
    pub fn new(spec: &'static WeaponSpec) -> Self {
        let mut cooldowns = [None; 4];
        for (slot, def) in cooldowns.iter_mut().zip(spec.abilities.iter()) {
            *slot = def.map(|def| AbilityCooldown::new(def.name, def.cooldown));
        }

        Self {
            spec,
            equipped: false,
            cooldowns,
            action: ActionState::Ready,
            last_fire: None,
            rate_buff: None,
            mana: spec.mana.map(ManaPool::new),
            cast_ready_at: 0.0,
        }
    }

    pub fn spec(&self) -> &'static WeaponSpec {
        self.spec
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    pub fn equip(&mut self) {
        self.equipped = true;
    }

    /// Unequips and resets any in-progress action. A pending cast is
    /// discarded; its mana is not refunded.
    pub fn unequip(&mut self) {
        if let ActionState::Casting { .. } = self.action {
            debug!(weapon = self.spec.name, "pending cast discarded on unequip");
        }
        self.equipped = false;
        self.action = ActionState::Ready;
        self.rate_buff = None;
    }

    pub fn mana(&self) -> Option<&ManaPool> {
        self.mana.as_ref()
    }

    pub fn cooldown(&self, slot: AbilitySlot) -> Option<&AbilityCooldown> {
        self.cooldowns[slot.index()].as_ref()
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.action, ActionState::Charging { .. })
    }

    pub fn is_casting(&self) -> bool {
        matches!(self.action, ActionState::Casting { .. })
    }

    /// Charge completion in `[0, 1]`, if currently charging.
    pub fn charge_progress(&self, now: f32) -> Option<f32> {
        let (ActionState::Charging { started_at }, AttackPattern::Charge { max_charge, .. }) =
            (self.action, self.spec.pattern)
        else {
            return None;
        };
        Some(((now - started_at) / max_charge).clamp(0.0, 1.0))
    }

    /// Effective basic-attack rate gate.
    fn can_fire(&self, now: f32) -> bool {
        let rate = self.spec.fire_rate * self.rate_multiplier(now);
        match self.last_fire {
            None => true,
            Some(last) => now - last >= 1.0 / rate,
        }
    }

    fn rate_multiplier(&self, now: f32) -> f32 {
        match self.rate_buff {
            Some(buff) if now < buff.expires_at => buff.multiplier,
            _ => 1.0,
        }
    }

    /// Handles one fire press.
    ///
    /// Returns `None` when unequipped, rate-limited, mid-cast, or out of
    /// mana; misuse is a no-op, never an error. The charge pattern
    /// interprets alternating presses as start/release.
    pub fn fire(&mut self, now: f32, aim: Vec3) -> Option<WeaponAction> {
        if !self.equipped {
            return None;
        }

        match self.spec.pattern {
            AttackPattern::Instant => {
                if !self.can_fire(now) {
                    return None;
                }
                self.last_fire = Some(now);
                Some(WeaponAction::Strike {
                    damage: self.spec.base_damage,
                    range: self.spec.attack_range,
                })
            }

            AttackPattern::Combo {
                multipliers,
                reset_window,
            } => {
                if !self.can_fire(now) {
                    return None;
                }

                let step = match self.action {
                    ActionState::Combo { step, last_attack }
                        if now - last_attack <= reset_window =>
                    {
                        step
                    }
                    _ => 0,
                };

                let multiplier = multipliers.get(step).copied().unwrap_or(1.0);
                let damage = (self.spec.base_damage as f32 * multiplier).round() as u32;

                self.action = ActionState::Combo {
                    step: (step + 1) % multipliers.len(),
                    last_attack: now,
                };
                self.last_fire = Some(now);

                Some(WeaponAction::Strike {
                    damage,
                    range: self.spec.attack_range,
                })
            }

            AttackPattern::Charge {
                min_multiplier,
                max_multiplier,
                max_charge,
            } => match self.action {
                ActionState::Charging { started_at } => {
                    let t = ((now - started_at) / max_charge).clamp(0.0, 1.0);
                    let multiplier = min_multiplier + (max_multiplier - min_multiplier) * t;
                    let damage = (self.spec.base_damage as f32 * multiplier).round() as u32;

                    self.action = ActionState::Ready;
                    self.last_fire = Some(now);

                    Some(WeaponAction::Strike {
                        damage,
                        range: self.spec.attack_range,
                    })
                }
                _ => {
                    if !self.can_fire(now) {
                        return None;
                    }
                    self.action = ActionState::Charging { started_at: now };
                    Some(WeaponAction::BeginCharge)
                }
            },

            AttackPattern::Cast {
                cast_time,
                mana_cost,
                ..
            } => {
                if self.is_casting() || now < self.cast_ready_at {
                    return None;
                }
                if let Some(mana) = self.mana.as_mut()
                    && !mana.try_spend(mana_cost)
                {
                    debug!(weapon = self.spec.name, "cast rejected: insufficient mana");
                    return None;
                }

                let release_at = now + cast_time;
                self.action = ActionState::Casting { release_at, aim };
                self.last_fire = Some(now);
                Some(WeaponAction::BeginCast { release_at })
            }
        }
    }

    /// Activates an ability slot.
    ///
    /// Returns the definition for the driver to enact, or `None` when the
    /// slot is empty, on cooldown, or the weapon is unequipped. Rate
    /// boosts apply to this weapon immediately.
    pub fn activate_ability(&mut self, slot: AbilitySlot, now: f32) -> Option<AbilityDef> {
        if !self.equipped {
            return None;
        }
        let def = *self.spec.ability(slot.index())?;
        let cooldown = self.cooldowns[slot.index()].as_mut()?;
        if !cooldown.is_ready() {
            return None;
        }
        cooldown.trigger();

        if let AbilityEffect::RateBoost {
            multiplier,
            duration,
        } = def.effect
        {
            self.rate_buff = Some(RateBuff {
                multiplier,
                expires_at: now + duration,
            });
        }

        Some(def)
    }

    /// Advances cooldowns, mana, rate buffs, and pending casts by one tick.
    ///
    /// No-op while unequipped (state is frozen, matching the equip
    /// lifecycle). At most one event per tick.
    pub fn tick(&mut self, dt: f32, now: f32) -> Option<WeaponTickEvent> {
        if !self.equipped {
            return None;
        }

        for cooldown in self.cooldowns.iter_mut().flatten() {
            cooldown.tick(dt);
        }
        if let Some(mana) = self.mana.as_mut() {
            mana.tick(dt);
        }
        if let Some(buff) = self.rate_buff
            && now >= buff.expires_at
        {
            self.rate_buff = None;
        }

        if let (ActionState::Casting { release_at, aim }, AttackPattern::Cast {
            cooldown,
            projectile,
            ..
        }) = (self.action, self.spec.pattern)
            && now >= release_at
        {
            self.action = ActionState::Ready;
            self.cast_ready_at = release_at + cooldown;
            return Some(WeaponTickEvent::CastReleased {
                projectile,
                base_damage: self.spec.base_damage,
                aim,
            });
        }

        None
    }
}
