//! Combat resolution pipeline.
//!
//! The single authority for applying damage and healing. Any source (weapon
//! swings, enemy attacks, projectiles, scripted effects) queues an intent;
//! once per tick the driver drains the queue and every intent is resolved
//! against the target's [`HealthState`] in FIFO order. Routing all mutation
//! through one place keeps statistics, knockback, and event ordering
//! consistent; nothing else writes health during normal play.
//!
//! Intents queued while a drain is in progress (reactive effects such as
//! life drain) are resolved on the *next* drain, which bounds the work per
//! tick and keeps ordering observable.
mod events;
mod intent;

pub use events::CombatEvent;
pub use intent::DamageIntent;

use std::collections::VecDeque;

use glam::Vec3;
use tracing::{debug, warn};

use crate::combat::{DamageType, WeaponType};
use crate::config::CombatConfig;
use crate::entity::{EntityId, EntityRegistry};
use crate::env::{CombatEnv, MovementSink, SpatialOracle};
use crate::health::{HealthEvent, HealthState};

/// Running totals across every processed intent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    pub total_damage_dealt: u64,
    pub total_critical_hits: u64,
    pub total_healing_done: u64,
}

/// Intent queue plus the state shared by every resolution: statistics,
/// knockback configuration, and the trailing history of processed intents.
pub struct CombatPipeline {
    config: CombatConfig,
    queue: VecDeque<DamageIntent>,
    /// Bounded trailing history for recent-event queries; not the live queue.
    history: Vec<DamageIntent>,
    stats: CombatStats,
}

impl CombatPipeline {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            queue: VecDeque::new(),
            history: Vec::new(),
            stats: CombatStats::default(),
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn stats(&self) -> CombatStats {
        self.stats
    }

    /// Number of intents waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Queues damage against a target.
    ///
    /// Intents addressed to an entity the registry does not know are
    /// dropped with a warning; combat continues uninterrupted.
    #[allow(clippy::too_many_arguments)]
    pub fn queue_damage(
        &mut self,
        registry: &EntityRegistry,
        target: EntityId,
        source: Option<EntityId>,
        amount: u32,
        damage_type: DamageType,
        weapon_type: WeaponType,
        is_critical: bool,
        now: f32,
        hit_position: Option<Vec3>,
        hit_normal: Option<Vec3>,
    ) {
        if !registry.contains(target) {
            warn!(%target, "dropping damage intent for unknown target");
            return;
        }

        self.queue.push_back(DamageIntent {
            target,
            source,
            amount: amount as i32,
            damage_type,
            weapon_type,
            is_critical,
            timestamp: now,
            hit_position: hit_position.unwrap_or(Vec3::ZERO),
            hit_normal: hit_normal.unwrap_or(Vec3::ZERO),
        });
    }

    /// Queues healing against a target.
    ///
    /// Encoded as a negative amount with `DamageType::Healing` so damage
    /// and healing share one resolution path.
    pub fn queue_healing(
        &mut self,
        registry: &EntityRegistry,
        target: EntityId,
        source: Option<EntityId>,
        heal_amount: u32,
        weapon_type: WeaponType,
        now: f32,
    ) {
        if !registry.contains(target) {
            warn!(%target, "dropping heal intent for unknown target");
            return;
        }

        self.queue.push_back(DamageIntent {
            target,
            source,
            amount: -(heal_amount as i32),
            damage_type: DamageType::Healing,
            weapon_type,
            is_critical: false,
            timestamp: now,
            hit_position: Vec3::ZERO,
            hit_normal: Vec3::ZERO,
        });
    }

    /// Processes every intent queued since the last drain, in FIFO order.
    ///
    /// Exactly the intents present at entry are resolved; anything queued
    /// afterwards waits for the next drain. Intents whose target is gone,
    /// lacks a health component, or is already dead are silently dropped.
    pub fn drain(
        &mut self,
        registry: &mut EntityRegistry,
        env: &CombatEnv<'_>,
        movement: &mut dyn MovementSink,
    ) -> Vec<CombatEvent> {
        let mut out = Vec::new();

        let count = self.queue.len();
        for _ in 0..count {
            let Some(intent) = self.queue.pop_front() else {
                break;
            };

            if intent.is_healing() {
                self.apply_healing(registry, &intent, &mut out);
            } else {
                self.apply_damage(registry, env, movement, &intent, &mut out);
            }

            self.history.push(intent);
        }

        if self.history.len() > CombatConfig::EVENT_HISTORY_CAP {
            self.history.drain(..CombatConfig::EVENT_HISTORY_TRIM);
        }

        out
    }

    fn apply_damage(
        &mut self,
        registry: &mut EntityRegistry,
        env: &CombatEnv<'_>,
        movement: &mut dyn MovementSink,
        intent: &DamageIntent,
        out: &mut Vec<CombatEvent>,
    ) {
        let Some(health) = registry.get_mut::<HealthState>(intent.target) else {
            debug!(target = %intent.target, "damage intent dropped: no health state");
            return;
        };
        if health.is_dead() {
            debug!(target = %intent.target, "damage intent dropped: target already dead");
            return;
        }

        let amount = intent.amount as u32;
        let health_events = health.take_damage(amount);

        self.stats.total_damage_dealt += amount as u64;
        if intent.is_critical {
            self.stats.total_critical_hits += 1;
        }

        let applied = health_events
            .iter()
            .filter_map(|event| match event {
                HealthEvent::DamageTaken { amount } => Some(*amount),
                _ => None,
            })
            .sum();

        out.push(CombatEvent::Damage {
            target: intent.target,
            source: intent.source,
            amount,
            applied,
            damage_type: intent.damage_type,
            weapon_type: intent.weapon_type,
            is_critical: intent.is_critical,
        });

        if health_events.contains(&HealthEvent::Died) {
            out.push(CombatEvent::Died {
                entity: intent.target,
            });
        }

        if self.config.knockback_enabled
            && let Some(source) = intent.source
            && let Some(impulse) = self.knockback_impulse(env, intent.target, source, intent.is_critical)
        {
            movement.apply_impulse(intent.target, impulse);
            out.push(CombatEvent::Knockback {
                entity: intent.target,
                impulse,
            });
        }
    }

    fn apply_healing(
        &mut self,
        registry: &mut EntityRegistry,
        intent: &DamageIntent,
        out: &mut Vec<CombatEvent>,
    ) {
        let Some(health) = registry.get_mut::<HealthState>(intent.target) else {
            debug!(target = %intent.target, "heal intent dropped: no health state");
            return;
        };
        if health.is_dead() {
            debug!(target = %intent.target, "heal intent dropped: target already dead");
            return;
        }

        let amount = (-intent.amount) as u32;
        let health_events = health.heal(amount);

        self.stats.total_healing_done += amount as u64;

        let applied = health_events
            .iter()
            .filter_map(|event| match event {
                HealthEvent::Healed { amount } => Some(*amount),
                _ => None,
            })
            .sum();

        out.push(CombatEvent::Heal {
            target: intent.target,
            source: intent.source,
            amount,
            applied,
            weapon_type: intent.weapon_type,
        });
    }

    /// Impulse pushing the target away from the source, with a fixed upward
    /// component. Returns `None` when positions are unavailable or the two
    /// entities overlap exactly.
    fn knockback_impulse(
        &self,
        env: &CombatEnv<'_>,
        target: EntityId,
        source: EntityId,
        is_critical: bool,
    ) -> Option<Vec3> {
        let spatial = env.spatial().ok()?;
        let target_pos = spatial.position(target)?;
        let source_pos = spatial.position(source)?;

        let mut direction = (target_pos - source_pos).normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        direction.y = self.config.knockback_upward_bias;

        let mut force = self.config.knockback_force;
        if is_critical {
            force *= self.config.crit_knockback_multiplier;
        }

        Some(direction * force)
    }

    /// Processed intents targeting `entity` within the lookback window.
    pub fn recent_events(&self, entity: EntityId, window: f32, now: f32) -> Vec<&DamageIntent> {
        self.history
            .iter()
            .filter(|intent| intent.target == entity && now - intent.timestamp <= window)
            .collect()
    }

    /// Clears totals and the trailing history. The live queue is untouched.
    pub fn reset_statistics(&mut self) {
        self.stats = CombatStats::default();
        self.history.clear();
    }
}

impl Default for CombatPipeline {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EmptyLoadout, PcgRng, SpatialOracle};
    use crate::health::HealthState;

    /// Movement sink that records every impulse it receives.
    #[derive(Default)]
    struct RecordingSink {
        impulses: Vec<(EntityId, Vec3)>,
    }

    impl MovementSink for RecordingSink {
        fn apply_impulse(&mut self, entity: EntityId, impulse: Vec3) {
            self.impulses.push((entity, impulse));
        }
    }

    struct FixedPositions(Vec<(EntityId, Vec3)>);

    impl SpatialOracle for FixedPositions {
        fn position(&self, entity: EntityId) -> Option<Vec3> {
            self.0
                .iter()
                .find(|(id, _)| *id == entity)
                .map(|(_, pos)| *pos)
        }
    }

    fn spawn_with_health(registry: &mut EntityRegistry, name: &str, max: u32) -> EntityId {
        let id = registry.spawn(name);
        registry.attach(id, HealthState::new(max)).unwrap();
        id
    }

    #[test]
    fn drain_applies_queued_damage_fifo() {
        let mut registry = EntityRegistry::new();
        let target = spawn_with_health(&mut registry, "grunt", 100);
        let mut pipeline = CombatPipeline::new(CombatConfig::without_knockback());
        let mut sink = RecordingSink::default();

        pipeline.queue_damage(
            &registry,
            target,
            None,
            30,
            DamageType::Physical,
            WeaponType::Sword,
            false,
            0.0,
            None,
            None,
        );
        pipeline.queue_healing(&registry, target, None, 10, WeaponType::Scythe, 0.0);

        let events = pipeline.drain(&mut registry, &CombatEnv::empty(), &mut sink);

        // Same final health as applying damage then heal sequentially.
        let health = registry.get::<HealthState>(target).unwrap();
        assert_eq!(health.current(), 80);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], CombatEvent::Damage { applied: 30, .. }));
        assert!(matches!(events[1], CombatEvent::Heal { applied: 10, .. }));
    }

    #[test]
    fn queue_to_unknown_target_is_dropped_at_enqueue() {
        let registry = EntityRegistry::new();
        let mut pipeline = CombatPipeline::default();

        pipeline.queue_damage(
            &registry,
            EntityId(404),
            None,
            10,
            DamageType::Physical,
            WeaponType::Sword,
            false,
            0.0,
            None,
            None,
        );

        assert_eq!(pipeline.pending(), 0);
    }

    #[test]
    fn intent_for_destroyed_target_is_dropped_at_drain() {
        let mut registry = EntityRegistry::new();
        let target = spawn_with_health(&mut registry, "grunt", 50);
        let mut pipeline = CombatPipeline::new(CombatConfig::without_knockback());
        let mut sink = RecordingSink::default();

        pipeline.queue_damage(
            &registry,
            target,
            None,
            10,
            DamageType::Physical,
            WeaponType::Sword,
            false,
            0.0,
            None,
            None,
        );
        registry.destroy(target);

        let events = pipeline.drain(&mut registry, &CombatEnv::empty(), &mut sink);
        assert!(events.is_empty());
        assert_eq!(pipeline.stats().total_damage_dealt, 0);
    }

    #[test]
    fn dead_target_intents_are_dropped_not_retried() {
        let mut registry = EntityRegistry::new();
        let target = spawn_with_health(&mut registry, "grunt", 20);
        let mut pipeline = CombatPipeline::new(CombatConfig::without_knockback());
        let mut sink = RecordingSink::default();

        pipeline.queue_damage(
            &registry,
            target,
            None,
            20,
            DamageType::Physical,
            WeaponType::Sword,
            false,
            0.0,
            None,
            None,
        );
        pipeline.queue_damage(
            &registry,
            target,
            None,
            20,
            DamageType::Physical,
            WeaponType::Sword,
            false,
            0.0,
            None,
            None,
        );

        let events = pipeline.drain(&mut registry, &CombatEnv::empty(), &mut sink);

        // One kill, one drop; exactly one death event and no second damage.
        let deaths = events
            .iter()
            .filter(|event| matches!(event, CombatEvent::Died { .. }))
            .count();
        assert_eq!(deaths, 1);
        assert_eq!(pipeline.stats().total_damage_dealt, 20);
        assert_eq!(pipeline.pending(), 0);
    }

    #[test]
    fn statistics_accumulate_and_reset() {
        let mut registry = EntityRegistry::new();
        let target = spawn_with_health(&mut registry, "grunt", 1000);
        let mut pipeline = CombatPipeline::new(CombatConfig::without_knockback());
        let mut sink = RecordingSink::default();

        pipeline.queue_damage(
            &registry,
            target,
            None,
            15,
            DamageType::Physical,
            WeaponType::Sword,
            true,
            0.0,
            None,
            None,
        );
        pipeline.queue_healing(&registry, target, None, 40, WeaponType::Scythe, 0.0);
        pipeline.drain(&mut registry, &CombatEnv::empty(), &mut sink);

        let stats = pipeline.stats();
        assert_eq!(stats.total_damage_dealt, 15);
        assert_eq!(stats.total_critical_hits, 1);
        // Healing totals count the queued amount even when clamped.
        assert_eq!(stats.total_healing_done, 40);

        pipeline.reset_statistics();
        assert_eq!(pipeline.stats(), CombatStats::default());
        assert!(pipeline.recent_events(target, 100.0, 0.0).is_empty());
    }

    #[test]
    fn knockback_pushes_target_away_from_source() {
        let mut registry = EntityRegistry::new();
        let target = spawn_with_health(&mut registry, "grunt", 100);
        let source = spawn_with_health(&mut registry, "player", 100);
        let positions = FixedPositions(vec![
            (target, Vec3::new(2.0, 0.0, 0.0)),
            (source, Vec3::ZERO),
        ]);
        let rng = PcgRng;
        let env = CombatEnv::with_all(&rng, &EmptyLoadout, &positions);

        let mut pipeline = CombatPipeline::default();
        let mut sink = RecordingSink::default();

        pipeline.queue_damage(
            &registry,
            target,
            Some(source),
            10,
            DamageType::Physical,
            WeaponType::Sword,
            false,
            0.0,
            None,
            None,
        );
        pipeline.drain(&mut registry, &env, &mut sink);

        let (hit, impulse) = sink.impulses[0];
        assert_eq!(hit, target);
        assert!(impulse.x > 0.0);
        assert!((impulse.y - 0.5 * CombatConfig::DEFAULT_KNOCKBACK_FORCE).abs() < 1e-4);
    }

    #[test]
    fn critical_knockback_is_stronger() {
        let mut registry = EntityRegistry::new();
        let target = spawn_with_health(&mut registry, "grunt", 100);
        let source = spawn_with_health(&mut registry, "player", 100);
        let positions = FixedPositions(vec![
            (target, Vec3::new(1.0, 0.0, 0.0)),
            (source, Vec3::ZERO),
        ]);
        let rng = PcgRng;
        let env = CombatEnv::with_all(&rng, &EmptyLoadout, &positions);

        let mut pipeline = CombatPipeline::default();
        let mut sink = RecordingSink::default();

        for is_critical in [false, true] {
            pipeline.queue_damage(
                &registry,
                target,
                Some(source),
                1,
                DamageType::Physical,
                WeaponType::Sword,
                is_critical,
                0.0,
                None,
                None,
            );
        }
        pipeline.drain(&mut registry, &env, &mut sink);

        let normal = sink.impulses[0].1.x;
        let critical = sink.impulses[1].1.x;
        assert!((critical - normal * 1.5).abs() < 1e-4);
    }

    #[test]
    fn sourceless_damage_produces_no_knockback() {
        let mut registry = EntityRegistry::new();
        let target = spawn_with_health(&mut registry, "grunt", 100);
        let mut pipeline = CombatPipeline::default();
        let mut sink = RecordingSink::default();

        pipeline.queue_damage(
            &registry,
            target,
            None,
            10,
            DamageType::True,
            WeaponType::Sword,
            false,
            0.0,
            None,
            None,
        );
        pipeline.drain(&mut registry, &CombatEnv::empty(), &mut sink);

        assert!(sink.impulses.is_empty());
    }

    #[test]
    fn recent_events_filter_by_target_and_window() {
        let mut registry = EntityRegistry::new();
        let a = spawn_with_health(&mut registry, "a", 100);
        let b = spawn_with_health(&mut registry, "b", 100);
        let mut pipeline = CombatPipeline::new(CombatConfig::without_knockback());
        let mut sink = RecordingSink::default();

        pipeline.queue_damage(
            &registry,
            a,
            None,
            5,
            DamageType::Physical,
            WeaponType::Sword,
            false,
            1.0,
            None,
            None,
        );
        pipeline.queue_damage(
            &registry,
            b,
            None,
            5,
            DamageType::Physical,
            WeaponType::Sword,
            false,
            8.0,
            None,
            None,
        );
        pipeline.drain(&mut registry, &CombatEnv::empty(), &mut sink);

        assert_eq!(pipeline.recent_events(a, 5.0, 10.0).len(), 0);
        assert_eq!(pipeline.recent_events(a, 10.0, 10.0).len(), 1);
        assert_eq!(pipeline.recent_events(b, 5.0, 10.0).len(), 1);
    }

    #[test]
    fn history_is_trimmed_at_the_cap() {
        let mut registry = EntityRegistry::new();
        let target = spawn_with_health(&mut registry, "grunt", u32::MAX);
        let mut pipeline = CombatPipeline::new(CombatConfig::without_knockback());
        let mut sink = RecordingSink::default();

        for i in 0..(CombatConfig::EVENT_HISTORY_CAP as u32 + 10) {
            pipeline.queue_damage(
                &registry,
                target,
                None,
                1,
                DamageType::Physical,
                WeaponType::Sword,
                false,
                i as f32,
                None,
                None,
            );
        }
        pipeline.drain(&mut registry, &CombatEnv::empty(), &mut sink);

        let kept = pipeline.recent_events(target, f32::MAX, 0.0).len();
        assert_eq!(
            kept,
            CombatConfig::EVENT_HISTORY_CAP + 10 - CombatConfig::EVENT_HISTORY_TRIM
        );
    }
}
