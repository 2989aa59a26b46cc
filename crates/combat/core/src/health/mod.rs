//! Health, shield, regeneration, and death state.
//!
//! `HealthState` is a capability component attached to any damageable
//! entity. Mutators are pure state transitions: gameplay-normal conditions
//! (dead, invulnerable, clamped amounts) are silently absorbed, never
//! errors. Each mutator returns the batch of notifications it produced so
//! the caller (normally the resolution pipeline) can forward them.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Notifications emitted by health mutations.
///
/// Consumed by the resolution pipeline and by presentation-layer
/// subscribers (HUD bars, floating numbers, animation triggers).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthEvent {
    /// Current or maximum health changed.
    Changed { current: u32, max: u32 },
    /// Damage landed. Carries the post-shield amount actually suffered.
    DamageTaken { amount: u32 },
    /// Healing landed. Carries the actual delta, not the requested amount.
    Healed { amount: u32 },
    /// Health reached zero while alive. Fired exactly once per death.
    Died,
    /// An explicit revive brought the entity back.
    Revived,
}

/// Bounded notification batch returned by every mutator.
pub type HealthEvents = ArrayVec<HealthEvent, { CombatConfig::MAX_HEALTH_EVENTS }>;

/// Passive health recovery settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Regeneration {
    pub enabled: bool,
    /// Health restored per second once regeneration kicks in.
    pub rate_per_second: f32,
    /// Seconds without taking damage before regeneration starts.
    pub delay: f32,
    pub time_since_damage: f32,
}

impl Regeneration {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            rate_per_second: 1.0,
            delay: 3.0,
            time_since_damage: 0.0,
        }
    }

    pub fn new(rate_per_second: f32, delay: f32) -> Self {
        Self {
            enabled: true,
            rate_per_second,
            delay,
            time_since_damage: 0.0,
        }
    }
}

/// Mutable health/shield/death state for one entity.
///
/// # Invariants
///
/// - `0 <= current <= max` and `0 <= shield <= shield_max` at all times
/// - `dead` is true iff health was driven to zero and no revive happened yet
/// - state changes only through the methods below; the resolution pipeline
///   is the single writer during normal play
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealthState {
    max: u32,
    current: u32,
    shield: u32,
    shield_max: u32,
    invulnerable: bool,
    dead: bool,
    regen: Regeneration,
}

impl HealthState {
    /// Creates a health pool at full, with no shield and no regeneration.
    pub fn new(max: u32) -> Self {
        Self {
            max: max.max(1),
            current: max.max(1),
            shield: 0,
            shield_max: 0,
            invulnerable: false,
            dead: false,
            regen: Regeneration::disabled(),
        }
    }

    pub fn with_shield(mut self, shield_max: u32) -> Self {
        self.shield_max = shield_max;
        self.shield = shield_max;
        self
    }

    pub fn with_regen(mut self, regen: Regeneration) -> Self {
        self.regen = regen;
        self
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn shield(&self) -> u32 {
        self.shield
    }

    pub fn shield_max(&self) -> u32 {
        self.shield_max
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    /// Applies damage, shield first.
    ///
    /// No-op when dead, invulnerable, or `amount == 0`. Resets the
    /// regeneration timer. A hit fully absorbed by the shield reports only
    /// `DamageTaken` with the absorbed amount; otherwise the remainder
    /// lands on health, floored at zero, and a death transition fires at
    /// most once.
    pub fn take_damage(&mut self, amount: u32) -> HealthEvents {
        let mut events = HealthEvents::new();
        if self.dead || self.invulnerable || amount == 0 {
            return events;
        }

        self.regen.time_since_damage = 0.0;

        let mut remaining = amount;
        if self.shield > 0 {
            let absorbed = self.shield.min(remaining);
            self.shield -= absorbed;
            remaining -= absorbed;

            if remaining == 0 {
                events.push(HealthEvent::DamageTaken { amount: absorbed });
                return events;
            }
        }

        self.current = self.current.saturating_sub(remaining);
        events.push(HealthEvent::Changed {
            current: self.current,
            max: self.max,
        });
        events.push(HealthEvent::DamageTaken { amount: remaining });

        if self.current == 0 {
            self.dead = true;
            events.push(HealthEvent::Died);
        }

        events
    }

    /// Restores health, clamped to the maximum.
    ///
    /// No-op when dead or `amount == 0`. Reports the actual delta, which
    /// may be smaller than requested; a heal at full health reports
    /// nothing.
    pub fn heal(&mut self, amount: u32) -> HealthEvents {
        let mut events = HealthEvents::new();
        if self.dead || amount == 0 {
            return events;
        }

        let before = self.current;
        self.current = (self.current + amount).min(self.max);
        let healed = self.current - before;

        if healed > 0 {
            events.push(HealthEvent::Changed {
                current: self.current,
                max: self.max,
            });
            events.push(HealthEvent::Healed { amount: healed });
        }

        events
    }

    /// Grants shield points, clamped to the shield maximum.
    pub fn add_shield(&mut self, amount: u32) {
        self.shield = (self.shield + amount).min(self.shield_max);
    }

    /// Changes the shield capacity; current shield is re-clamped.
    pub fn set_max_shield(&mut self, new_max: u32) {
        self.shield_max = new_max;
        self.shield = self.shield.min(self.shield_max);
    }

    /// Changes the health maximum.
    ///
    /// When `scale_current` is set, current health keeps its fraction of
    /// the old maximum (rounded to nearest); otherwise it is clamped.
    pub fn set_max_health(&mut self, new_max: u32, scale_current: bool) -> HealthEvents {
        let new_max = new_max.max(1);
        if scale_current {
            let fraction = self.fraction();
            self.max = new_max;
            self.current = (new_max as f32 * fraction).round() as u32;
        } else {
            self.max = new_max;
            self.current = self.current.min(self.max);
        }

        let mut events = HealthEvents::new();
        events.push(HealthEvent::Changed {
            current: self.current,
            max: self.max,
        });
        events
    }

    /// Raises both maximum and current health, for permanent buffs.
    pub fn increase_max_health(&mut self, delta: u32) -> HealthEvents {
        self.max += delta;
        self.current += delta;

        let mut events = HealthEvents::new();
        events.push(HealthEvent::Changed {
            current: self.current,
            max: self.max,
        });
        events
    }

    /// Brings a dead entity back. No-op while alive.
    ///
    /// `revive_health` of `None` revives at full; any value is clamped to
    /// the maximum.
    pub fn revive(&mut self, revive_health: Option<u32>) -> HealthEvents {
        let mut events = HealthEvents::new();
        if !self.dead {
            return events;
        }

        self.dead = false;
        self.current = revive_health.unwrap_or(self.max).min(self.max).max(1);

        events.push(HealthEvent::Changed {
            current: self.current,
            max: self.max,
        });
        events.push(HealthEvent::Revived);
        events
    }

    pub fn set_invulnerable(&mut self, invulnerable: bool) {
        self.invulnerable = invulnerable;
    }

    /// Forces death, bypassing invulnerability and shield.
    pub fn instant_kill(&mut self) -> HealthEvents {
        let mut events = HealthEvents::new();
        self.current = 0;
        events.push(HealthEvent::Changed {
            current: 0,
            max: self.max,
        });
        if !self.dead {
            self.dead = true;
            events.push(HealthEvent::Died);
        }
        events
    }

    /// Restores health and shield to their maximums.
    pub fn restore_to_full(&mut self) -> HealthEvents {
        self.current = self.max;
        self.shield = self.shield_max;

        let mut events = HealthEvents::new();
        events.push(HealthEvent::Changed {
            current: self.current,
            max: self.max,
        });
        events
    }

    pub fn regen(&self) -> &Regeneration {
        &self.regen
    }

    pub fn set_regen(&mut self, regen: Regeneration) {
        self.regen = regen;
    }

    /// Advances passive regeneration by `dt` seconds.
    ///
    /// Heals `ceil(rate × dt)` once the post-damage delay has elapsed,
    /// while alive, enabled, and below the maximum.
    pub fn tick_regen(&mut self, dt: f32) -> HealthEvents {
        if !self.regen.enabled || self.dead || self.current >= self.max {
            return HealthEvents::new();
        }

        self.regen.time_since_damage += dt;
        if self.regen.time_since_damage < self.regen.delay {
            return HealthEvents::new();
        }

        let amount = (self.regen.rate_per_second * dt).ceil() as u32;
        self.heal(amount)
    }
}
