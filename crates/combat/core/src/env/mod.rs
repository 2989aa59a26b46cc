//! Traits describing external collaborators.
//!
//! Oracles expose read-only data the simulation consults (randomness,
//! account loadout, world positions); sinks are the outbound ports the
//! simulation pushes effects through (movement impulses, projectile spawn
//! requests). The [`CombatEnv`] aggregate bundles the oracles so core code
//! can access everything it needs without hard coupling to concrete
//! implementations.
mod loadout;
mod rng;
mod spatial;

pub use loadout::{EmptyLoadout, LoadoutOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use spatial::SpatialOracle;

use glam::Vec3;

use crate::combat::WeaponType;
use crate::entity::EntityId;

/// Errors raised when an absent oracle is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("rng oracle not available")]
    RngNotAvailable,
    #[error("loadout oracle not available")]
    LoadoutNotAvailable,
    #[error("spatial oracle not available")]
    SpatialNotAvailable,
}

/// Consumes knockback impulses computed by the resolution pipeline.
///
/// The simulation never integrates movement itself; whoever owns physics
/// (or a simple kinematic model) implements this.
pub trait MovementSink {
    fn apply_impulse(&mut self, entity: EntityId, impulse: Vec3);
}

/// Projectile categories the core can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectileKind {
    Arrow,
    Fireball,
    IceNova,
    LightningBolt,
    WindSlash,
}

/// A request to spawn a projectile collaborator.
///
/// Damage is pre-computed at spawn time; the spawned object is responsible
/// for queuing it against whatever it hits. The core does not simulate
/// flight.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileRequest {
    pub kind: ProjectileKind,
    pub origin: Vec3,
    pub direction: Vec3,
    pub damage: u32,
    pub weapon_type: WeaponType,
    pub source: EntityId,
}

/// Receives projectile spawn requests from weapons and abilities.
pub trait ProjectileSink {
    fn spawn(&mut self, request: ProjectileRequest);
}

/// Aggregates the read-only oracles required by the pipeline and the
/// weapon/AI state machines.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    rng: Option<&'a dyn RngOracle>,
    loadout: Option<&'a dyn LoadoutOracle>,
    spatial: Option<&'a dyn SpatialOracle>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        rng: Option<&'a dyn RngOracle>,
        loadout: Option<&'a dyn LoadoutOracle>,
        spatial: Option<&'a dyn SpatialOracle>,
    ) -> Self {
        Self {
            rng,
            loadout,
            spatial,
        }
    }

    pub fn with_all(
        rng: &'a dyn RngOracle,
        loadout: &'a dyn LoadoutOracle,
        spatial: &'a dyn SpatialOracle,
    ) -> Self {
        Self::new(Some(rng), Some(loadout), Some(spatial))
    }

    pub fn empty() -> Self {
        Self {
            rng: None,
            loadout: None,
            spatial: None,
        }
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a dyn RngOracle, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the LoadoutOracle, or an error if not available.
    pub fn loadout(&self) -> Result<&'a dyn LoadoutOracle, OracleError> {
        self.loadout.ok_or(OracleError::LoadoutNotAvailable)
    }

    /// Returns the SpatialOracle, or an error if not available.
    pub fn spatial(&self) -> Result<&'a dyn SpatialOracle, OracleError> {
        self.spatial.ok_or(OracleError::SpatialNotAvailable)
    }
}
