//! World-position oracle.

use glam::Vec3;

use crate::entity::EntityId;

/// Read-only view of entity positions, owned by the movement collaborator.
///
/// The simulation uses it for AI distance checks and knockback directions;
/// it never integrates movement itself.
pub trait SpatialOracle: Send + Sync {
    /// World position of an entity, if it is placed.
    fn position(&self, entity: EntityId) -> Option<Vec3>;

    /// Whether the entity is standing on the ground.
    fn is_grounded(&self, entity: EntityId) -> bool {
        let _ = entity;
        true
    }
}
