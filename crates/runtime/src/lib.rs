//! Tick-driven orchestration for the combat simulation.
//!
//! This crate wires the combat-core state machines, the resolution
//! pipeline, and the arena movement model into a cohesive driver API.
//! Hosts embed [`Simulation`] to spawn entities, feed player commands,
//! advance ticks, and consume events.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the driver and its builder
//! - [`events`] defines what consumers can observe per tick
//! - [`hooks`] provides push-style event dispatch for presentation layers
//! - [`arena`] is the host-side movement collaborator implementation
pub mod arena;
pub mod error;
pub mod events;
pub mod hooks;
pub mod simulation;

pub use arena::FlatArena;
pub use error::{Result, RuntimeError};
pub use events::SimEvent;
pub use hooks::{HookContext, HookRegistry, SimulationHook};
pub use simulation::{PlayerCommand, Simulation, SimulationBuilder};
