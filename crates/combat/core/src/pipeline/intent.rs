//! Queued damage/heal intents.

use glam::Vec3;

use crate::combat::{DamageType, WeaponType};
use crate::entity::EntityId;

/// A queued request to damage or heal a target, not yet applied.
///
/// Healing travels through the same queue as damage with the amount
/// negated and `damage_type == Healing`, so a single resolution path can
/// handle both; the sign is unwrapped on apply.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageIntent {
    pub target: EntityId,
    /// Originating entity; `None` for environmental damage.
    pub source: Option<EntityId>,
    /// Positive = health reduction, negative = healing.
    pub amount: i32,
    pub damage_type: DamageType,
    pub weapon_type: WeaponType,
    pub is_critical: bool,
    /// Simulation time the intent was queued, in seconds.
    pub timestamp: f32,
    pub hit_position: Vec3,
    pub hit_normal: Vec3,
}

impl DamageIntent {
    /// True when this intent encodes healing rather than damage.
    pub fn is_healing(&self) -> bool {
        self.damage_type == DamageType::Healing
    }
}
