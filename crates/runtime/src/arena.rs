//! Flat-arena movement model.
//!
//! The simulation core treats movement as an external collaborator. This
//! is the runtime's host-side implementation: a flat ground plane with
//! kinematic bodies, impulse integration with damping, and facing
//! directions. A game client with a real physics engine replaces it by
//! implementing the same two traits.

use std::collections::HashMap;

use glam::Vec3;

use combat_core::{EntityId, MovementSink, SpatialOracle};

#[derive(Clone, Copy, Debug)]
struct Body {
    position: Vec3,
    velocity: Vec3,
    facing: Vec3,
}

/// Positions, velocities, and facings for every placed entity.
pub struct FlatArena {
    bodies: HashMap<EntityId, Body>,
    /// Fraction of velocity lost per second.
    damping: f32,
}

impl FlatArena {
    pub fn new(damping: f32) -> Self {
        Self {
            bodies: HashMap::new(),
            damping,
        }
    }

    pub fn place(&mut self, entity: EntityId, position: Vec3) {
        self.bodies.insert(entity, Body {
            position,
            velocity: Vec3::ZERO,
            facing: Vec3::Z,
        });
    }

    pub fn remove(&mut self, entity: EntityId) {
        self.bodies.remove(&entity);
    }

    pub fn facing(&self, entity: EntityId) -> Option<Vec3> {
        self.bodies.get(&entity).map(|body| body.facing)
    }

    pub fn set_facing(&mut self, entity: EntityId, towards: Vec3) {
        if let Some(body) = self.bodies.get_mut(&entity) {
            let mut flat = towards - body.position;
            flat.y = 0.0;
            if let Some(direction) = flat.try_normalize() {
                body.facing = direction;
            }
        }
    }

    /// Kinematic step toward a destination on the ground plane.
    pub fn move_towards(&mut self, entity: EntityId, destination: Vec3, max_step: f32) {
        if let Some(body) = self.bodies.get_mut(&entity) {
            let mut delta = destination - body.position;
            delta.y = 0.0;
            let distance = delta.length();
            if distance < f32::EPSILON {
                return;
            }
            let step = delta / distance * max_step.min(distance);
            body.position += step;
            body.facing = delta / distance;
        }
    }

    /// Integrates impulse velocities and applies damping.
    pub fn integrate(&mut self, dt: f32) {
        let decay = (1.0 - self.damping * dt).max(0.0);
        for body in self.bodies.values_mut() {
            body.position += body.velocity * dt;
            // Bodies stay on the ground plane; vertical kick decays into it.
            body.position.y = body.position.y.max(0.0);
            body.velocity *= decay;
        }
    }
}

impl Default for FlatArena {
    fn default() -> Self {
        Self::new(4.0)
    }
}

impl SpatialOracle for FlatArena {
    fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.bodies.get(&entity).map(|body| body.position)
    }

    fn is_grounded(&self, entity: EntityId) -> bool {
        self.bodies
            .get(&entity)
            .is_some_and(|body| body.position.y <= f32::EPSILON)
    }
}

impl MovementSink for FlatArena {
    fn apply_impulse(&mut self, entity: EntityId, impulse: Vec3) {
        if let Some(body) = self.bodies.get_mut(&entity) {
            body.velocity += impulse;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_moves_the_body_over_ticks() {
        let mut arena = FlatArena::new(0.0);
        let id = EntityId(1);
        arena.place(id, Vec3::ZERO);

        arena.apply_impulse(id, Vec3::new(2.0, 0.0, 0.0));
        arena.integrate(0.5);

        assert_eq!(arena.position(id), Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn damping_bleeds_velocity() {
        let mut arena = FlatArena::new(1.0);
        let id = EntityId(1);
        arena.place(id, Vec3::ZERO);

        arena.apply_impulse(id, Vec3::new(4.0, 0.0, 0.0));
        arena.integrate(0.5);
        let after_first = arena.position(id).unwrap().x;
        arena.integrate(0.5);
        let second_step = arena.position(id).unwrap().x - after_first;

        assert!(second_step < after_first);
    }

    #[test]
    fn move_towards_clamps_at_the_destination() {
        let mut arena = FlatArena::default();
        let id = EntityId(1);
        arena.place(id, Vec3::ZERO);

        arena.move_towards(id, Vec3::new(1.0, 0.0, 0.0), 5.0);
        assert_eq!(arena.position(id), Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn facing_ignores_height() {
        let mut arena = FlatArena::default();
        let id = EntityId(1);
        arena.place(id, Vec3::ZERO);

        arena.set_facing(id, Vec3::new(0.0, 3.0, 2.0));
        assert_eq!(arena.facing(id), Some(Vec3::Z));
    }
}
