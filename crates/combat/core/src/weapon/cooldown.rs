//! Ability cooldown tracking.

use strum::EnumIter;

/// One of the four ability slots a weapon can bind.
///
/// A closed set: there is no way to ask for a slot a weapon cannot have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilitySlot {
    First,
    Second,
    Third,
    Fourth,
}

impl AbilitySlot {
    pub const ALL: [AbilitySlot; 4] = [Self::First, Self::Second, Self::Third, Self::Fourth];

    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
            Self::Fourth => 3,
        }
    }
}

/// Cooldown state for one ability slot.
///
/// `remaining` only decreases via [`tick`](Self::tick) and is reset to the
/// total by [`trigger`](Self::trigger).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbilityCooldown {
    pub name: &'static str,
    /// Full cooldown duration in seconds.
    pub total: f32,
    /// Seconds until the ability is ready again.
    pub remaining: f32,
}

impl AbilityCooldown {
    pub fn new(name: &'static str, total: f32) -> Self {
        Self {
            name,
            total,
            remaining: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Fraction of the cooldown already elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total <= 0.0 {
            1.0
        } else {
            (1.0 - self.remaining / self.total).clamp(0.0, 1.0)
        }
    }

    /// Advances time; floors at zero.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Puts the ability on cooldown.
    pub fn trigger(&mut self) {
        self.remaining = self.total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_never_increases_without_trigger() {
        let mut cooldown = AbilityCooldown::new("charge", 6.0);
        cooldown.trigger();

        let mut last = cooldown.remaining;
        for _ in 0..100 {
            cooldown.tick(0.1);
            assert!(cooldown.remaining <= last);
            last = cooldown.remaining;
        }
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining, 0.0);
    }

    #[test]
    fn trigger_resets_to_total() {
        let mut cooldown = AbilityCooldown::new("deflect", 8.0);
        cooldown.trigger();
        cooldown.tick(3.0);
        cooldown.trigger();
        assert_eq!(cooldown.remaining, 8.0);
        assert!(!cooldown.is_ready());
    }

    #[test]
    fn progress_runs_zero_to_one() {
        let mut cooldown = AbilityCooldown::new("strike", 10.0);
        cooldown.trigger();
        assert_eq!(cooldown.progress(), 0.0);
        cooldown.tick(5.0);
        assert!((cooldown.progress() - 0.5).abs() < 1e-6);
        cooldown.tick(10.0);
        assert_eq!(cooldown.progress(), 1.0);
    }

    #[test]
    fn slot_indices_are_stable() {
        for (i, slot) in AbilitySlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }
}
