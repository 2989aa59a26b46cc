//! Enemy behavior state machine.
//!
//! Each enemy carries an [`EnemyAiState`] that the tick driver advances
//! once per tick. The machine never moves or damages anything itself: it
//! returns an [`AiDirective`] (movement target, facing, attack order) that
//! the driver converts into arena movement and pipeline intents, mirroring
//! the weapon layer's order-value split.
//!
//! Stun and freeze are expiry timestamps held alongside the nominal state:
//! while either is active, movement and attacks are suppressed regardless
//! of what the machine would otherwise do, and re-application simply
//! overwrites the expiry.

use glam::Vec3;
use tracing::debug;

use crate::combat::{WeaponType, calculate_scaled_damage};
use crate::entity::{EntityId, EntityRegistry};
use crate::env::{CombatEnv, RngOracle, SpatialOracle};
use crate::health::HealthState;

/// Distance at which a movement destination counts as reached.
const ARRIVE_EPSILON: f32 = 0.5;

/// Hysteresis factor keeping an attacker latched until the target is
/// clearly out of reach.
const ATTACK_RANGE_HYSTERESIS: f32 = 1.2;

/// Behavior states. `Dead` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiState {
    Idle,
    Patrolling,
    Chasing,
    Attacking,
    Retreating,
    Dead,
}

/// Enemy tiers with fixed stat and reward multipliers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyRank {
    Grunt,
    Elite,
    Miniboss,
    Boss,
}

/// Multipliers applied once at spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RankScaling {
    pub health: f32,
    pub damage: f32,
    pub speed: f32,
    pub xp: u32,
    pub gold: u32,
}

impl EnemyRank {
    pub fn scaling(self) -> RankScaling {
        match self {
            Self::Grunt => RankScaling {
                health: 1.0,
                damage: 1.0,
                speed: 1.0,
                xp: 1,
                gold: 1,
            },
            Self::Elite => RankScaling {
                health: 2.0,
                damage: 1.5,
                speed: 1.2,
                xp: 3,
                gold: 2,
            },
            Self::Miniboss => RankScaling {
                health: 5.0,
                damage: 2.0,
                speed: 1.1,
                xp: 10,
                gold: 5,
            },
            Self::Boss => RankScaling {
                health: 10.0,
                damage: 3.0,
                speed: 1.0,
                xp: 50,
                gold: 20,
            },
        }
    }
}

/// Static behavior parameters for one enemy kind.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyProfile {
    pub name: String,
    pub rank: EnemyRank,
    pub level: u32,
    pub base_health: u32,
    pub base_damage: u32,
    pub base_speed: f32,
    pub attack_range: f32,
    /// Attacks per second while in range.
    pub attack_rate: f32,
    pub aggro_range: f32,
    /// Distance at which a chased target is given up.
    pub lose_aggro_range: f32,
    pub can_patrol: bool,
    pub patrol_radius: f32,
    /// Seconds of idling before a patrol leg starts.
    pub idle_time: f32,
    /// Weapon category stamped on this enemy's attack intents.
    pub melee_weapon: WeaponType,
    pub xp_reward: u32,
    pub gold_reward: u32,
    /// Seconds between death and corpse removal.
    pub removal_delay: f32,
}

/// Stats resolved from a profile once at spawn: level scaling first, then
/// rank multipliers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnStats {
    pub max_health: u32,
    pub attack_damage: u32,
    pub move_speed: f32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

/// Resolve spawn-time stats for a profile.
pub fn spawn_stats(profile: &EnemyProfile) -> SpawnStats {
    let scaling = profile.rank.scaling();

    let level_health = (profile.base_health as f32
        * (1.0 + profile.level.saturating_sub(1) as f32 * 0.15))
        .round();
    let max_health = (level_health * scaling.health).round() as u32;

    let level_damage = calculate_scaled_damage(profile.base_damage, profile.level);
    let attack_damage = (level_damage as f32 * scaling.damage).round() as u32;

    SpawnStats {
        max_health,
        attack_damage,
        move_speed: profile.base_speed * scaling.speed,
        xp_reward: profile.xp_reward * scaling.xp,
        gold_reward: profile.gold_reward * scaling.gold,
    }
}

/// An attack the driver should queue into the pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackOrder {
    pub target: EntityId,
    pub damage: u32,
    pub weapon_type: WeaponType,
}

/// What the enemy wants to do this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AiDirective {
    /// Destination to move toward, if any.
    pub move_to: Option<Vec3>,
    /// Point to face, if any.
    pub face: Option<Vec3>,
    /// Attack to queue, if the attack gate opened this tick.
    pub attack: Option<AttackOrder>,
}

/// Mutable behavior state for one enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyAiState {
    state: AiState,
    entered_at: f32,
    target: Option<EntityId>,
    stunned_until: f32,
    frozen_until: f32,
    spawn_position: Vec3,
    patrol_destination: Option<Vec3>,
    last_attack: Option<f32>,
    remove_at: Option<f32>,
}

impl EnemyAiState {
    pub fn new(spawn_position: Vec3, now: f32) -> Self {
        Self {
            state: AiState::Idle,
            entered_at: now,
            target: None,
            stunned_until: 0.0,
            frozen_until: 0.0,
            spawn_position,
            patrol_destination: None,
            last_attack: None,
            remove_at: None,
        }
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn spawn_position(&self) -> Vec3 {
        self.spawn_position
    }

    /// True while a stun or freeze suppresses movement and attacks.
    pub fn is_suppressed(&self, now: f32) -> bool {
        now < self.stunned_until || now < self.frozen_until
    }

    /// Suppresses the enemy for `duration` seconds. Re-application
    /// overwrites the expiry; it does not stack.
    pub fn apply_stun(&mut self, duration: f32, now: f32) {
        self.stunned_until = now + duration;
    }

    pub fn apply_freeze(&mut self, duration: f32, now: f32) {
        self.frozen_until = now + duration;
    }

    /// Damage always breaks passive states: while idling or patrolling,
    /// getting hit re-evaluates aggro immediately.
    pub fn notify_damaged(
        &mut self,
        me: EntityId,
        profile: &EnemyProfile,
        candidates: &[EntityId],
        registry: &EntityRegistry,
        env: &CombatEnv<'_>,
        now: f32,
    ) {
        if matches!(self.state, AiState::Idle | AiState::Patrolling) {
            self.try_acquire_target(me, profile, candidates, registry, env, now);
        }
    }

    /// Transitions to the terminal state and schedules corpse removal.
    pub fn notify_death(&mut self, removal_delay: f32, now: f32) {
        if self.state == AiState::Dead {
            return;
        }
        self.change_state(AiState::Dead, now);
        self.target = None;
        self.remove_at = Some(now + removal_delay);
        debug!("enemy died, removal in {removal_delay}s");
    }

    /// True once the post-death removal delay has elapsed.
    pub fn should_despawn(&self, now: f32) -> bool {
        self.remove_at.is_some_and(|at| now >= at)
    }

    /// Advances the state machine one tick.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        me: EntityId,
        profile: &EnemyProfile,
        attack_damage: u32,
        candidates: &[EntityId],
        registry: &EntityRegistry,
        env: &CombatEnv<'_>,
        now: f32,
        seed: u64,
    ) -> AiDirective {
        let mut directive = AiDirective::default();

        if self.state == AiState::Dead || self.is_suppressed(now) {
            return directive;
        }

        let Some(my_pos) = env.spatial().ok().and_then(|s| s.position(me)) else {
            return directive;
        };

        match self.state {
            AiState::Idle => {
                if self.try_acquire_target(me, profile, candidates, registry, env, now) {
                    return self.tick_chase(profile, my_pos, env, now, &mut directive);
                }
                if profile.can_patrol && now - self.entered_at >= profile.idle_time {
                    self.patrol_destination = Some(self.roll_patrol_destination(profile, env, seed));
                    self.change_state(AiState::Patrolling, now);
                }
            }

            AiState::Patrolling => {
                if self.try_acquire_target(me, profile, candidates, registry, env, now) {
                    return self.tick_chase(profile, my_pos, env, now, &mut directive);
                }
                match self.patrol_destination {
                    Some(dest) if my_pos.distance(dest) > ARRIVE_EPSILON => {
                        directive.move_to = Some(dest);
                    }
                    _ => {
                        self.patrol_destination = None;
                        self.change_state(AiState::Idle, now);
                    }
                }
            }

            AiState::Chasing => {
                return self.tick_chase(profile, my_pos, env, now, &mut directive);
            }

            AiState::Attacking => {
                let Some((target, target_pos)) = self.live_target(registry, env) else {
                    self.target = None;
                    self.change_state(AiState::Idle, now);
                    return directive;
                };

                let distance = my_pos.distance(target_pos);
                if distance > profile.attack_range * ATTACK_RANGE_HYSTERESIS {
                    self.change_state(AiState::Chasing, now);
                    return self.tick_chase(profile, my_pos, env, now, &mut directive);
                }

                directive.face = Some(target_pos);
                let gate = 1.0 / profile.attack_rate;
                if self.last_attack.is_none_or(|last| now - last >= gate) {
                    self.last_attack = Some(now);
                    directive.attack = Some(AttackOrder {
                        target,
                        damage: attack_damage,
                        weapon_type: profile.melee_weapon,
                    });
                }
            }

            AiState::Retreating => {
                if my_pos.distance(self.spawn_position) > ARRIVE_EPSILON {
                    directive.move_to = Some(self.spawn_position);
                } else {
                    self.change_state(AiState::Idle, now);
                }
            }

            AiState::Dead => {}
        }

        directive
    }

    fn tick_chase(
        &mut self,
        profile: &EnemyProfile,
        my_pos: Vec3,
        env: &CombatEnv<'_>,
        now: f32,
        directive: &mut AiDirective,
    ) -> AiDirective {
        let Some(target) = self.target else {
            self.change_state(AiState::Idle, now);
            return *directive;
        };
        let Some(target_pos) = env.spatial().ok().and_then(|s| s.position(target)) else {
            self.target = None;
            self.change_state(AiState::Idle, now);
            return *directive;
        };

        if self.state != AiState::Chasing {
            self.change_state(AiState::Chasing, now);
        }

        let distance = my_pos.distance(target_pos);
        if distance > profile.lose_aggro_range {
            self.target = None;
            self.change_state(AiState::Retreating, now);
            directive.move_to = Some(self.spawn_position);
            return *directive;
        }

        if distance <= profile.attack_range {
            self.change_state(AiState::Attacking, now);
            directive.face = Some(target_pos);
            return *directive;
        }

        directive.move_to = Some(target_pos);
        *directive
    }

    /// Nearest living candidate inside aggro range becomes the target.
    fn try_acquire_target(
        &mut self,
        me: EntityId,
        profile: &EnemyProfile,
        candidates: &[EntityId],
        registry: &EntityRegistry,
        env: &CombatEnv<'_>,
        now: f32,
    ) -> bool {
        let Ok(spatial) = env.spatial() else {
            return false;
        };
        let Some(my_pos) = spatial.position(me) else {
            return false;
        };

        let mut best: Option<(EntityId, f32)> = None;
        for &candidate in candidates {
            if candidate == me {
                continue;
            }
            let alive = registry
                .get::<HealthState>(candidate)
                .is_some_and(|health| !health.is_dead());
            if !alive {
                continue;
            }
            let Some(pos) = spatial.position(candidate) else {
                continue;
            };
            let distance = my_pos.distance(pos);
            if distance <= profile.aggro_range
                && best.is_none_or(|(_, best_distance)| distance < best_distance)
            {
                best = Some((candidate, distance));
            }
        }

        if let Some((target, _)) = best {
            self.target = Some(target);
            self.change_state(AiState::Chasing, now);
            true
        } else {
            false
        }
    }

    /// Current target if it is still registered, alive, and placed.
    fn live_target(
        &self,
        registry: &EntityRegistry,
        env: &CombatEnv<'_>,
    ) -> Option<(EntityId, Vec3)> {
        let target = self.target?;
        let health = registry.get::<HealthState>(target)?;
        if health.is_dead() {
            return None;
        }
        let pos = env.spatial().ok()?.position(target)?;
        Some((target, pos))
    }

    /// Random point on the ground inside the patrol radius of the spawn.
    fn roll_patrol_destination(
        &self,
        profile: &EnemyProfile,
        env: &CombatEnv<'_>,
        seed: u64,
    ) -> Vec3 {
        let Ok(rng) = env.rng() else {
            return self.spawn_position;
        };
        let angle = rng.unit(seed) * std::f32::consts::TAU;
        let distance = rng.unit(seed.wrapping_add(1)) * profile.patrol_radius;
        self.spawn_position + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
    }

    fn change_state(&mut self, next: AiState, now: f32) {
        if self.state == next {
            return;
        }
        debug!(from = ?self.state, to = ?next, "ai state change");
        self.state = next;
        self.entered_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{EmptyLoadout, PcgRng, SpatialOracle};

    struct TestWorld {
        positions: Vec<(EntityId, Vec3)>,
    }

    impl SpatialOracle for TestWorld {
        fn position(&self, entity: EntityId) -> Option<Vec3> {
            self.positions
                .iter()
                .find(|(id, _)| *id == entity)
                .map(|(_, pos)| *pos)
        }
    }

    fn grunt_profile() -> EnemyProfile {
        EnemyProfile {
            name: "grunt".into(),
            rank: EnemyRank::Grunt,
            level: 1,
            base_health: 100,
            base_damage: 15,
            base_speed: 3.0,
            attack_range: 2.0,
            attack_rate: 1.0,
            aggro_range: 8.0,
            lose_aggro_range: 15.0,
            can_patrol: true,
            patrol_radius: 10.0,
            idle_time: 2.0,
            melee_weapon: WeaponType::Sword,
            xp_reward: 10,
            gold_reward: 5,
            removal_delay: 5.0,
        }
    }

    struct Scenario {
        registry: EntityRegistry,
        world: TestWorld,
        enemy: EntityId,
        player: EntityId,
    }

    fn scenario(enemy_pos: Vec3, player_pos: Vec3) -> Scenario {
        let mut registry = EntityRegistry::new();
        let enemy = registry.spawn("grunt");
        let player = registry.spawn("player");
        registry.attach(enemy, HealthState::new(100)).unwrap();
        registry.attach(player, HealthState::new(100)).unwrap();

        Scenario {
            registry,
            world: TestWorld {
                positions: vec![(enemy, enemy_pos), (player, player_pos)],
            },
            enemy,
            player,
        }
    }

    fn tick(
        ai: &mut EnemyAiState,
        scenario: &Scenario,
        profile: &EnemyProfile,
        now: f32,
    ) -> AiDirective {
        let rng = PcgRng;
        let env = CombatEnv::with_all(&rng, &EmptyLoadout, &scenario.world);
        ai.tick(
            scenario.enemy,
            profile,
            15,
            &[scenario.player],
            &scenario.registry,
            &env,
            now,
            7,
        )
    }

    #[test]
    fn idle_aggros_when_target_enters_range() {
        let scenario = scenario(Vec3::ZERO, Vec3::new(5.0, 0.0, 0.0));
        let profile = grunt_profile();
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);

        let directive = tick(&mut ai, &scenario, &profile, 0.1);

        assert_eq!(ai.state(), AiState::Chasing);
        assert_eq!(ai.target(), Some(scenario.player));
        assert_eq!(directive.move_to, Some(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn idle_starts_patrolling_after_idle_time() {
        let scenario = scenario(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0));
        let profile = grunt_profile();
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);

        tick(&mut ai, &scenario, &profile, 1.0);
        assert_eq!(ai.state(), AiState::Idle);

        tick(&mut ai, &scenario, &profile, 2.5);
        assert_eq!(ai.state(), AiState::Patrolling);
    }

    #[test]
    fn patrol_destination_stays_inside_radius() {
        let spawn = Vec3::new(3.0, 0.0, -2.0);
        let scenario = scenario(spawn, Vec3::new(100.0, 0.0, 0.0));
        let profile = grunt_profile();
        let mut ai = EnemyAiState::new(spawn, 0.0);

        tick(&mut ai, &scenario, &profile, 2.5);
        let directive = tick(&mut ai, &scenario, &profile, 2.6);

        match directive.move_to {
            Some(dest) => assert!(spawn.distance(dest) <= profile.patrol_radius + 1e-3),
            // A destination rolled next to the spawn counts as arrived.
            None => assert_eq!(ai.state(), AiState::Idle),
        }
    }

    #[test]
    fn chase_enters_attack_at_range() {
        let scenario = scenario(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0));
        let profile = grunt_profile();
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);

        tick(&mut ai, &scenario, &profile, 0.1);
        assert_eq!(ai.state(), AiState::Attacking);
    }

    #[test]
    fn attack_fires_at_the_attack_rate() {
        let scenario = scenario(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0));
        let profile = grunt_profile();
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);

        tick(&mut ai, &scenario, &profile, 0.0);
        let first = tick(&mut ai, &scenario, &profile, 0.1);
        let order = first.attack.expect("first swing");
        assert_eq!(order.target, scenario.player);
        assert_eq!(order.weapon_type, WeaponType::Sword);
        assert_eq!(order.damage, 15);

        // 1 attack/s: the gate stays closed until a full second elapsed.
        let blocked = tick(&mut ai, &scenario, &profile, 0.6);
        assert!(blocked.attack.is_none());
        assert_eq!(blocked.face, Some(Vec3::new(1.5, 0.0, 0.0)));

        let second = tick(&mut ai, &scenario, &profile, 1.2);
        assert!(second.attack.is_some());
    }

    #[test]
    fn attack_holds_inside_hysteresis_band() {
        let profile = grunt_profile();
        let mut scenario = scenario(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0));
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);
        tick(&mut ai, &scenario, &profile, 0.0);
        assert_eq!(ai.state(), AiState::Attacking);

        // attack_range × 1.1 exceeds the range but not the hysteresis band.
        scenario.world.positions[1].1 = Vec3::new(2.2, 0.0, 0.0);
        tick(&mut ai, &scenario, &profile, 0.5);
        assert_eq!(ai.state(), AiState::Attacking);

        // Past × 1.2 the latch releases.
        scenario.world.positions[1].1 = Vec3::new(2.5, 0.0, 0.0);
        tick(&mut ai, &scenario, &profile, 1.0);
        assert_eq!(ai.state(), AiState::Chasing);
    }

    #[test]
    fn losing_aggro_retreats_to_spawn_then_idles() {
        let profile = grunt_profile();
        let spawn = Vec3::ZERO;
        let mut scenario = scenario(spawn, Vec3::new(5.0, 0.0, 0.0));
        let mut ai = EnemyAiState::new(spawn, 0.0);

        tick(&mut ai, &scenario, &profile, 0.0);
        assert_eq!(ai.state(), AiState::Chasing);

        // Target escapes past the lose-aggro distance.
        scenario.world.positions[1].1 = Vec3::new(20.0, 0.0, 0.0);
        let directive = tick(&mut ai, &scenario, &profile, 1.0);
        assert_eq!(ai.state(), AiState::Retreating);
        assert_eq!(ai.target(), None);
        assert_eq!(directive.move_to, Some(spawn));

        // Enemy walks home; standing on the spawn point drops to Idle.
        scenario.world.positions[0].1 = spawn;
        tick(&mut ai, &scenario, &profile, 2.0);
        assert_eq!(ai.state(), AiState::Idle);
    }

    #[test]
    fn dead_target_is_dropped() {
        let profile = grunt_profile();
        let mut scenario = scenario(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0));
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);
        tick(&mut ai, &scenario, &profile, 0.0);
        assert_eq!(ai.state(), AiState::Attacking);

        scenario
            .registry
            .get_mut::<HealthState>(scenario.player)
            .unwrap()
            .instant_kill();

        let directive = tick(&mut ai, &scenario, &profile, 0.5);
        assert_eq!(ai.state(), AiState::Idle);
        assert!(directive.attack.is_none());
    }

    #[test]
    fn stun_suppresses_and_expires() {
        let profile = grunt_profile();
        let scenario = scenario(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0));
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);

        ai.apply_stun(2.0, 0.0);
        let directive = tick(&mut ai, &scenario, &profile, 1.0);
        assert_eq!(directive, AiDirective::default());
        assert_eq!(ai.state(), AiState::Idle);

        // Auto-clears once the expiry passes.
        let directive = tick(&mut ai, &scenario, &profile, 2.5);
        assert_ne!(directive, AiDirective::default());
    }

    #[test]
    fn reapplied_status_overwrites_expiry() {
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);

        ai.apply_freeze(5.0, 0.0);
        ai.apply_freeze(1.0, 2.0);

        // The later application's expiry (3.0) wins over the original 5.0.
        assert!(ai.is_suppressed(2.5));
        assert!(!ai.is_suppressed(3.5));
    }

    #[test]
    fn damage_breaks_passive_states() {
        let profile = grunt_profile();
        // Player inside aggro range, but the enemy has not looked yet.
        let scenario = scenario(Vec3::ZERO, Vec3::new(6.0, 0.0, 0.0));
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);
        assert_eq!(ai.state(), AiState::Idle);

        let rng = PcgRng;
        let env = CombatEnv::with_all(&rng, &EmptyLoadout, &scenario.world);
        ai.notify_damaged(
            scenario.enemy,
            &profile,
            &[scenario.player],
            &scenario.registry,
            &env,
            0.5,
        );

        assert_eq!(ai.state(), AiState::Chasing);
    }

    #[test]
    fn death_is_terminal_and_schedules_removal() {
        let profile = grunt_profile();
        let scenario = scenario(Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0));
        let mut ai = EnemyAiState::new(Vec3::ZERO, 0.0);

        ai.notify_death(5.0, 1.0);
        assert_eq!(ai.state(), AiState::Dead);
        assert!(!ai.should_despawn(3.0));
        assert!(ai.should_despawn(6.0));

        let directive = tick(&mut ai, &scenario, &profile, 2.0);
        assert_eq!(directive, AiDirective::default());
        assert_eq!(ai.state(), AiState::Dead);
    }

    #[test]
    fn rank_scaling_applies_once_at_spawn() {
        let mut profile = grunt_profile();
        let grunt = spawn_stats(&profile);
        assert_eq!(grunt.max_health, 100);
        assert_eq!(grunt.attack_damage, 15);
        assert_eq!(grunt.xp_reward, 10);

        profile.rank = EnemyRank::Elite;
        let elite = spawn_stats(&profile);
        assert_eq!(elite.max_health, 200);
        assert_eq!(elite.attack_damage, 23);
        assert!((elite.move_speed - 3.6).abs() < 1e-3);
        assert_eq!(elite.xp_reward, 30);
        assert_eq!(elite.gold_reward, 10);

        profile.rank = EnemyRank::Boss;
        profile.level = 3;
        let boss = spawn_stats(&profile);
        // Level 3: health 100 × 1.3 = 130, ×10 = 1300; damage 15 × 1.2 = 18, ×3 = 54.
        assert_eq!(boss.max_health, 1300);
        assert_eq!(boss.attack_damage, 54);
    }
}
