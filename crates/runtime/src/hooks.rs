//! Post-tick hook dispatch.
//!
//! Hooks are the push-style counterpart to draining the event log: HUDs,
//! floating damage numbers, audio triggers, and replication layers register
//! one and receive every event at the end of the tick that produced it.
//! Hooks are read-only consumers; they never mutate simulation state.

use tracing::trace;

use crate::events::SimEvent;

/// Timing context handed to every hook invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HookContext {
    pub tick: u64,
    pub now: f32,
}

/// A read-only consumer of simulation events.
pub trait SimulationHook {
    /// Human-readable name, used in logging.
    fn name(&self) -> &'static str;

    /// Called once per event, after the tick that produced it completes.
    fn on_event(&mut self, event: &SimEvent, ctx: &HookContext);
}

/// Registered hooks, dispatched in registration order.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn SimulationHook>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Box<dyn SimulationHook>) {
        trace!(hook = hook.name(), "hook registered");
        self.hooks.push(hook);
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn dispatch(&mut self, events: &[SimEvent], ctx: &HookContext) {
        for event in events {
            for hook in &mut self.hooks {
                hook.on_event(event, ctx);
            }
        }
    }
}
