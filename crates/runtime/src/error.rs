//! Runtime errors.
//!
//! Gameplay-normal conditions (firing on cooldown, commands aimed at a
//! despawned entity) are no-ops, not errors. These variants cover host
//! programming mistakes only.

use combat_core::{EntityId, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A setup call referenced an entity the simulation does not know.
    #[error("entity {entity} is not part of the simulation")]
    UnknownEntity { entity: EntityId },

    /// A weapon was issued to an entity that already carries one.
    #[error("entity {entity} already carries a weapon")]
    WeaponAlreadyIssued { entity: EntityId },

    /// An enemy agent was registered twice for the same entity.
    #[error("entity {entity} already has an enemy agent")]
    AgentAlreadyRegistered { entity: EntityId },

    /// Component registration failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
