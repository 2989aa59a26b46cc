//! Events produced by the resolution pipeline.

use glam::Vec3;

use crate::combat::{DamageType, WeaponType};
use crate::entity::EntityId;

/// Outcome of one processed intent, consumed by the tick driver and by
/// read-only presentation subscribers.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// A damage intent landed on a live target.
    Damage {
        target: EntityId,
        source: Option<EntityId>,
        /// Amount carried by the intent.
        amount: u32,
        /// Post-shield amount the target actually suffered
        /// (zero when fully absorbed or the target was invulnerable).
        applied: u32,
        damage_type: DamageType,
        weapon_type: WeaponType,
        is_critical: bool,
    },

    /// A healing intent landed on a live target.
    Heal {
        target: EntityId,
        source: Option<EntityId>,
        /// Amount carried by the intent.
        amount: u32,
        /// Actual delta after clamping to maximum health.
        applied: u32,
        weapon_type: WeaponType,
    },

    /// The target died from a processed intent.
    Died { entity: EntityId },

    /// A knockback impulse was forwarded to the movement collaborator.
    Knockback { entity: EntityId, impulse: Vec3 },
}
