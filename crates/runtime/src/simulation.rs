//! Tick driver.
//!
//! [`Simulation`] wires the entity registry, the resolution pipeline, the
//! weapon and AI state machines, and the arena movement model into one
//! single-threaded loop. Every tick runs the same fixed order:
//!
//! 1. player commands (weapon fire / abilities / equip lifecycle)
//! 2. weapon updates (cooldowns, mana, pending casts)
//! 3. enemy AI updates (movement orders, attack intents)
//! 4. health regeneration and guard expiry
//! 5. the pipeline's single drain
//! 6. reactions to drained events (aggro-on-hit, life drain, rewards)
//! 7. corpse despawn and movement integration
//! 8. hook dispatch
//!
//! Decisions always enqueue before the drain, so an intent is applied at
//! most once and never in the tick that reacted to it. Reactive intents
//! (life drain) land in the next tick's drain.

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use tracing::{debug, warn};

use combat_core::{
    AbilityDef, AbilityEffect, AbilitySlot, AiDirective, CombatConfig, CombatEnv, CombatEvent,
    CombatPipeline, CombatStats, DamageType, EmptyLoadout, EnemyAiState, EnemyProfile, EntityId,
    EntityRegistry, HealthState, LoadoutOracle, MovementSink, PcgRng, ProjectileKind,
    ProjectileRequest, ProjectileSink, RngOracle, SpawnStats, SpatialOracle, WeaponAction,
    WeaponSpec, WeaponState, WeaponTickEvent, WeaponType, calculate_damage, calculate_healing,
    compute_seed, spawn_stats,
};

use crate::arena::FlatArena;
use crate::error::{Result, RuntimeError};
use crate::events::SimEvent;
use crate::hooks::{HookContext, HookRegistry, SimulationHook};

/// Half-angle of the melee arc: strikes hit everything in front.
const MELEE_ARC_COS: f32 = 0.0;

/// Seed context for basic-attack and ability crit rolls.
const ROLL_CONTEXT_CRIT: u32 = 0;
/// Seed context for AI patrol destinations.
const ROLL_CONTEXT_PATROL: u32 = 1;

/// Input routed to a player-held weapon for one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerCommand {
    /// Fire press. Charge weapons treat alternating presses as
    /// start/release.
    Fire { entity: EntityId, aim: Vec3 },
    /// Activate an ability slot.
    Ability { entity: EntityId, slot: AbilitySlot },
    Equip { entity: EntityId },
    Unequip { entity: EntityId },
}

/// Per-enemy driver bookkeeping: static profile, spawn-resolved stats,
/// and the behavior state machine.
struct EnemyAgent {
    profile: EnemyProfile,
    stats: SpawnStats,
    ai: EnemyAiState,
}

/// Buffers knockback impulses during a drain; they are applied to the
/// arena afterwards so the drain never aliases the spatial oracle.
#[derive(Default)]
struct ImpulseBuffer(Vec<(EntityId, Vec3)>);

impl MovementSink for ImpulseBuffer {
    fn apply_impulse(&mut self, entity: EntityId, impulse: Vec3) {
        self.0.push((entity, impulse));
    }
}

/// Collects projectile spawn requests for the external spawner.
#[derive(Default)]
struct ProjectileQueue(Vec<ProjectileRequest>);

impl ProjectileSink for ProjectileQueue {
    fn spawn(&mut self, request: ProjectileRequest) {
        self.0.push(request);
    }
}

/// Builder for [`Simulation`]. All collaborators are injected explicitly;
/// there are no process-wide singletons.
pub struct SimulationBuilder {
    config: CombatConfig,
    seed: Option<u64>,
    loadout: Option<Box<dyn LoadoutOracle>>,
    damping: f32,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self {
            config: CombatConfig::default(),
            seed: None,
            loadout: None,
            damping: 4.0,
        }
    }

    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// Fixes the roll stream for replays and tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_loadout(mut self, loadout: Box<dyn LoadoutOracle>) -> Self {
        self.loadout = Some(loadout);
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    pub fn build(self) -> Simulation {
        let game_seed = self.seed.unwrap_or_else(rand::random);
        debug!(game_seed, "simulation created");

        Simulation {
            registry: EntityRegistry::new(),
            pipeline: CombatPipeline::new(self.config),
            arena: FlatArena::new(self.damping),
            rng: PcgRng,
            loadout: self.loadout.unwrap_or_else(|| Box::new(EmptyLoadout)),
            game_seed,
            tick: 0,
            now: 0.0,
            roll_nonce: 0,
            players: HashSet::new(),
            weapons: HashMap::new(),
            enemies: HashMap::new(),
            projectiles: ProjectileQueue::default(),
            events: Vec::new(),
            hooks: HookRegistry::new(),
            guard_expiries: Vec::new(),
        }
    }
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// One combat simulation instance.
pub struct Simulation {
    registry: EntityRegistry,
    pipeline: CombatPipeline,
    arena: FlatArena,
    rng: PcgRng,
    loadout: Box<dyn LoadoutOracle>,
    game_seed: u64,
    tick: u64,
    now: f32,
    roll_nonce: u64,
    players: HashSet<EntityId>,
    weapons: HashMap<EntityId, WeaponState>,
    enemies: HashMap<EntityId, EnemyAgent>,
    projectiles: ProjectileQueue,
    events: Vec<SimEvent>,
    hooks: HookRegistry,
    /// Pending invulnerability windows from guard abilities.
    guard_expiries: Vec<(EntityId, f32)>,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::new()
    }

    // ========================================================================
    // World setup
    // ========================================================================

    /// Spawns a player entity with a health pool at `position`.
    pub fn spawn_player(
        &mut self,
        name: impl Into<String>,
        max_health: u32,
        position: Vec3,
    ) -> Result<EntityId> {
        let id = self.registry.spawn(name);
        self.registry.attach(id, HealthState::new(max_health))?;
        self.arena.place(id, position);
        self.players.insert(id);
        Ok(id)
    }

    /// Spawns an enemy from a profile. Level and rank scaling are resolved
    /// here, once.
    pub fn spawn_enemy(&mut self, profile: EnemyProfile, position: Vec3) -> Result<EntityId> {
        let stats = spawn_stats(&profile);
        let id = self.registry.spawn(profile.name.clone());
        self.registry.attach(id, HealthState::new(stats.max_health))?;
        self.arena.place(id, position);
        self.enemies.insert(id, EnemyAgent {
            ai: EnemyAiState::new(position, self.now),
            profile,
            stats,
        });
        Ok(id)
    }

    /// Hands a weapon to an entity and equips it.
    pub fn issue_weapon(&mut self, entity: EntityId, spec: &'static WeaponSpec) -> Result<()> {
        if !self.registry.contains(entity) {
            return Err(RuntimeError::UnknownEntity { entity });
        }
        if self.weapons.contains_key(&entity) {
            return Err(RuntimeError::WeaponAlreadyIssued { entity });
        }
        let mut weapon = WeaponState::new(spec);
        weapon.equip();
        self.weapons.insert(entity, weapon);
        Ok(())
    }

    /// Removes an entity and everything the driver tracks for it.
    pub fn despawn(&mut self, entity: EntityId) {
        self.registry.destroy(entity);
        self.arena.remove(entity);
        self.players.remove(&entity);
        self.weapons.remove(&entity);
        self.enemies.remove(&entity);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn arena(&self) -> &FlatArena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut FlatArena {
        &mut self.arena
    }

    pub fn pipeline(&self) -> &CombatPipeline {
        &self.pipeline
    }

    pub fn stats(&self) -> CombatStats {
        self.pipeline.stats()
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn weapon(&self, entity: EntityId) -> Option<&WeaponState> {
        self.weapons.get(&entity)
    }

    pub fn ai_state(&self, entity: EntityId) -> Option<&EnemyAiState> {
        self.enemies.get(&entity).map(|agent| &agent.ai)
    }

    pub fn add_hook(&mut self, hook: Box<dyn SimulationHook>) {
        self.hooks.register(hook);
    }

    /// Events accumulated since the last drain call.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Projectile spawn requests for the external spawner.
    pub fn drain_projectile_requests(&mut self) -> Vec<ProjectileRequest> {
        std::mem::take(&mut self.projectiles.0)
    }

    // ========================================================================
    // External intent entry points
    // ========================================================================

    /// Queues damage from an external source (projectile collision,
    /// scripted effect). Resolved at this tick's drain if called before
    /// [`tick`](Self::tick), otherwise at the next one.
    pub fn queue_damage(
        &mut self,
        target: EntityId,
        source: Option<EntityId>,
        amount: u32,
        damage_type: DamageType,
        weapon_type: WeaponType,
        is_critical: bool,
    ) {
        let hit_position = self.arena.position(target);
        self.pipeline.queue_damage(
            &self.registry,
            target,
            source,
            amount,
            damage_type,
            weapon_type,
            is_critical,
            self.now,
            hit_position,
            None,
        );
    }

    /// Queues healing from an external source.
    pub fn queue_healing(
        &mut self,
        target: EntityId,
        source: Option<EntityId>,
        amount: u32,
        weapon_type: WeaponType,
    ) {
        self.pipeline
            .queue_healing(&self.registry, target, source, amount, weapon_type, self.now);
    }

    // ========================================================================
    // Status effects
    // ========================================================================

    /// Stuns an enemy; re-application overwrites the expiry.
    pub fn stun_enemy(&mut self, entity: EntityId, duration: f32) {
        let now = self.now;
        if let Some(agent) = self.enemies.get_mut(&entity) {
            agent.ai.apply_stun(duration, now);
        }
    }

    /// Freezes an enemy; re-application overwrites the expiry.
    pub fn freeze_enemy(&mut self, entity: EntityId, duration: f32) {
        let now = self.now;
        if let Some(agent) = self.enemies.get_mut(&entity) {
            agent.ai.apply_freeze(duration, now);
        }
    }

    // ========================================================================
    // Tick
    // ========================================================================

    /// Advances the simulation by `dt` seconds, applying `commands` first.
    pub fn tick(&mut self, dt: f32, commands: &[PlayerCommand]) {
        self.tick += 1;
        self.now += dt;
        let now = self.now;

        let mut tick_events: Vec<SimEvent> = Vec::new();

        // 1. Player commands.
        for command in commands {
            self.apply_command(*command, &mut tick_events);
        }

        // 2. Weapon updates; pending casts may release.
        let armed: Vec<EntityId> = self.weapons.keys().copied().collect();
        for entity in armed {
            let released = self
                .weapons
                .get_mut(&entity)
                .and_then(|weapon| weapon.tick(dt, now));
            if let Some(WeaponTickEvent::CastReleased {
                projectile,
                base_damage,
                aim,
            }) = released
            {
                self.release_cast(entity, projectile, base_damage, aim, &mut tick_events);
            }
        }

        // 3. Enemy AI decisions, then their side effects.
        let candidates: Vec<EntityId> = self.players.iter().copied().collect();
        let mut orders: Vec<(EntityId, AiDirective, f32)> = Vec::new();
        {
            let env = CombatEnv::with_all(&self.rng, self.loadout.as_ref(), &self.arena);
            for (&entity, agent) in self.enemies.iter_mut() {
                let seed =
                    compute_seed(self.game_seed, self.tick, entity.raw(), ROLL_CONTEXT_PATROL);
                let directive = agent.ai.tick(
                    entity,
                    &agent.profile,
                    agent.stats.attack_damage,
                    &candidates,
                    &self.registry,
                    &env,
                    now,
                    seed,
                );
                orders.push((entity, directive, agent.stats.move_speed));
            }
        }
        for (entity, directive, speed) in orders {
            if let Some(destination) = directive.move_to {
                self.arena.move_towards(entity, destination, speed * dt);
            }
            if let Some(face) = directive.face {
                self.arena.set_facing(entity, face);
            }
            if let Some(attack) = directive.attack {
                let hit_position = self.arena.position(attack.target);
                self.pipeline.queue_damage(
                    &self.registry,
                    attack.target,
                    Some(entity),
                    attack.damage,
                    DamageType::Physical,
                    attack.weapon_type,
                    // Enemies do not crit.
                    false,
                    now,
                    hit_position,
                    None,
                );
            }
        }

        // 4. Passive regeneration and guard expiry.
        for entity in self.registry.entities_with::<HealthState>() {
            let Some(health) = self.registry.get_mut::<HealthState>(entity) else {
                continue;
            };
            for event in health.tick_regen(dt) {
                tick_events.push(SimEvent::Health { entity, event });
            }
        }
        self.expire_guards(now);

        // 5. The single drain. Impulses are buffered so the movement model
        // is not aliased while the drain reads positions from it.
        let mut impulses = ImpulseBuffer::default();
        let combat_events = {
            let env = CombatEnv::with_all(&self.rng, self.loadout.as_ref(), &self.arena);
            self.pipeline.drain(&mut self.registry, &env, &mut impulses)
        };
        for (entity, impulse) in impulses.0 {
            self.arena.apply_impulse(entity, impulse);
        }

        for event in &combat_events {
            tick_events.push(SimEvent::Combat(*event));
        }

        // 6. Reactions. Anything these queue resolves on the next drain.
        for event in &combat_events {
            match *event {
                CombatEvent::Damage {
                    target,
                    source,
                    amount,
                    ..
                } => {
                    if let Some(agent) = self.enemies.get_mut(&target) {
                        let env =
                            CombatEnv::with_all(&self.rng, self.loadout.as_ref(), &self.arena);
                        agent.ai.notify_damaged(
                            target,
                            &agent.profile,
                            &candidates,
                            &self.registry,
                            &env,
                            now,
                        );
                    }

                    if let Some(source_id) = source
                        && let Some(weapon) = self.weapons.get(&source_id)
                        && let Some(drain) = weapon.spec().life_drain
                        && weapon.is_equipped()
                    {
                        let base = (amount as f32 * drain).round() as u32;
                        let heal = calculate_healing(
                            base,
                            weapon.spec().weapon_type,
                            self.loadout.as_ref(),
                        );
                        if heal > 0 {
                            self.pipeline.queue_healing(
                                &self.registry,
                                source_id,
                                Some(source_id),
                                heal,
                                weapon.spec().weapon_type,
                                now,
                            );
                        }
                    }
                }

                CombatEvent::Died { entity } => {
                    if let Some(agent) = self.enemies.get_mut(&entity) {
                        agent.ai.notify_death(agent.profile.removal_delay, now);
                        tick_events.push(SimEvent::RewardGranted {
                            entity,
                            xp: agent.stats.xp_reward,
                            gold: agent.stats.gold_reward,
                        });
                    }
                }

                _ => {}
            }
        }

        // 7. Corpse removal and movement integration.
        let expired: Vec<EntityId> = self
            .enemies
            .iter()
            .filter(|(_, agent)| agent.ai.should_despawn(now))
            .map(|(&entity, _)| entity)
            .collect();
        for entity in expired {
            self.despawn(entity);
            tick_events.push(SimEvent::EntityDespawned { entity });
        }
        self.arena.integrate(dt);

        // 8. Hand everything to the hooks, then keep it for pull consumers.
        let ctx = HookContext {
            tick: self.tick,
            now,
        };
        self.hooks.dispatch(&tick_events, &ctx);
        self.events.extend(tick_events);
    }

    // ========================================================================
    // Command handling
    // ========================================================================

    fn apply_command(&mut self, command: PlayerCommand, tick_events: &mut Vec<SimEvent>) {
        let now = self.now;
        match command {
            PlayerCommand::Fire { entity, aim } => {
                let fired = match self.weapons.get_mut(&entity) {
                    Some(weapon) => weapon.fire(now, aim).map(|action| (action, weapon.spec())),
                    None => {
                        warn!(%entity, "fire command for entity without a weapon");
                        None
                    }
                };
                let Some((action, spec)) = fired else {
                    return;
                };

                match action {
                    WeaponAction::Strike { damage, range } => {
                        if let Some(position) = self.arena.position(entity) {
                            self.arena.set_facing(entity, position + aim);
                        }
                        self.queue_strike(entity, spec, damage, range, Some(aim));
                    }
                    WeaponAction::BeginCharge => {}
                    WeaponAction::BeginCast { release_at } => {
                        tick_events.push(SimEvent::CastStarted { entity, release_at });
                    }
                }
            }

            PlayerCommand::Ability { entity, slot } => {
                let Some((def, spec)) = self.weapons.get_mut(&entity).and_then(|weapon| {
                    let spec = weapon.spec();
                    weapon.activate_ability(slot, now).map(|def| (def, spec))
                }) else {
                    return;
                };
                self.enact_ability(entity, spec, &def, tick_events);
            }

            PlayerCommand::Equip { entity } => {
                if let Some(weapon) = self.weapons.get_mut(&entity) {
                    weapon.equip();
                }
            }

            PlayerCommand::Unequip { entity } => {
                if let Some(weapon) = self.weapons.get_mut(&entity) {
                    weapon.unequip();
                }
            }
        }
    }

    fn enact_ability(
        &mut self,
        entity: EntityId,
        spec: &'static WeaponSpec,
        def: &AbilityDef,
        tick_events: &mut Vec<SimEvent>,
    ) {
        debug!(%entity, ability = def.name, "ability activated");
        let now = self.now;

        match def.effect {
            AbilityEffect::Strike { damage, radius } => {
                self.queue_strike(entity, spec, damage, radius, None);
            }

            AbilityEffect::Guard { duration } => {
                if let Some(health) = self.registry.get_mut::<HealthState>(entity) {
                    health.set_invulnerable(true);
                    self.guard_expiries.push((entity, now + duration));
                }
            }

            // Applied inside the weapon state when the slot triggered.
            AbilityEffect::RateBoost { .. } => {}

            AbilityEffect::HealPulse { amount, radius } => {
                let heal = calculate_healing(amount, spec.weapon_type, self.loadout.as_ref());
                for ally in self.players_in_radius(entity, radius, true) {
                    self.pipeline.queue_healing(
                        &self.registry,
                        ally,
                        Some(entity),
                        heal,
                        spec.weapon_type,
                        now,
                    );
                }
            }

            AbilityEffect::Volley {
                count,
                projectile,
                damage,
            } => {
                let Some(origin) = self.arena.position(entity) else {
                    return;
                };
                let forward = self.arena.facing(entity).unwrap_or(Vec3::Z);
                let spread = 15.0_f32.to_radians();
                let start = -spread * (count.saturating_sub(1)) as f32 / 2.0;

                for i in 0..count {
                    let angle = start + spread * i as f32;
                    let (sin, cos) = angle.sin_cos();
                    let direction = Vec3::new(
                        forward.x * cos - forward.z * sin,
                        0.0,
                        forward.x * sin + forward.z * cos,
                    );
                    self.request_projectile(
                        entity,
                        spec,
                        projectile,
                        damage,
                        origin,
                        direction,
                        tick_events,
                    );
                }
            }

            AbilityEffect::FreezeNova {
                damage,
                radius,
                freeze_duration,
            } => {
                let frozen = self.enemies_in_radius(entity, radius);
                for enemy in frozen {
                    let hit_position = self.arena.position(enemy);
                    self.pipeline.queue_damage(
                        &self.registry,
                        enemy,
                        Some(entity),
                        damage,
                        DamageType::Magical,
                        spec.weapon_type,
                        false,
                        now,
                        hit_position,
                        None,
                    );
                    if let Some(agent) = self.enemies.get_mut(&enemy) {
                        agent.ai.apply_freeze(freeze_duration, now);
                    }
                }
            }

            AbilityEffect::Revive {
                health_fraction,
                radius,
            } => {
                for ally in self.players_in_radius(entity, radius, false) {
                    let Some(health) = self.registry.get_mut::<HealthState>(ally) else {
                        continue;
                    };
                    if !health.is_dead() {
                        continue;
                    }
                    let restored = (health.max() as f32 * health_fraction).round() as u32;
                    for event in health.revive(Some(restored)) {
                        tick_events.push(SimEvent::Health {
                            entity: ally,
                            event,
                        });
                    }
                }
            }
        }
    }

    /// Rolls crits per target and queues damage for a strike around the
    /// attacker. With an aim direction only the front 180° arc is hit.
    fn queue_strike(
        &mut self,
        attacker: EntityId,
        spec: &'static WeaponSpec,
        damage: u32,
        range: f32,
        aim: Option<Vec3>,
    ) {
        let targets = self.strike_targets(attacker, range, aim);
        for target in targets {
            let roll = self.next_roll(attacker);
            let result = calculate_damage(
                damage,
                spec.weapon_type,
                DamageType::Physical,
                roll,
                self.loadout.as_ref(),
            );
            let hit_position = self.arena.position(target);
            self.pipeline.queue_damage(
                &self.registry,
                target,
                Some(attacker),
                result.damage,
                result.damage_type,
                result.weapon_type,
                result.is_critical,
                self.now,
                hit_position,
                None,
            );
        }
    }

    fn release_cast(
        &mut self,
        caster: EntityId,
        projectile: ProjectileKind,
        base_damage: u32,
        aim: Vec3,
        tick_events: &mut Vec<SimEvent>,
    ) {
        let Some(spec) = self.weapons.get(&caster).map(|weapon| weapon.spec()) else {
            return;
        };
        let Some(origin) = self.arena.position(caster) else {
            return;
        };
        let direction = aim.try_normalize().unwrap_or(Vec3::Z);
        self.request_projectile(
            caster,
            spec,
            projectile,
            base_damage,
            origin,
            direction,
            tick_events,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn request_projectile(
        &mut self,
        source: EntityId,
        spec: &'static WeaponSpec,
        kind: ProjectileKind,
        base_damage: u32,
        origin: Vec3,
        direction: Vec3,
        tick_events: &mut Vec<SimEvent>,
    ) {
        let roll = self.next_roll(source);
        let result = calculate_damage(
            base_damage,
            spec.weapon_type,
            DamageType::Magical,
            roll,
            self.loadout.as_ref(),
        );
        let request = ProjectileRequest {
            kind,
            origin,
            direction,
            damage: result.damage,
            weapon_type: spec.weapon_type,
            source,
        };
        self.projectiles.spawn(request);
        tick_events.push(SimEvent::ProjectileRequested(request));
    }

    // ========================================================================
    // Targeting helpers
    // ========================================================================

    /// Living targets within range of the attacker; with an aim direction,
    /// only those in the front arc.
    fn strike_targets(&self, attacker: EntityId, range: f32, aim: Option<Vec3>) -> Vec<EntityId> {
        let Some(origin) = self.arena.position(attacker) else {
            return Vec::new();
        };
        let aim_flat = aim.and_then(|aim| Vec3::new(aim.x, 0.0, aim.z).try_normalize());

        self.registry
            .entities_with::<HealthState>()
            .into_iter()
            .filter(|&target| target != attacker)
            .filter(|&target| {
                self.registry
                    .get::<HealthState>(target)
                    .is_some_and(|health| !health.is_dead())
            })
            .filter(|&target| {
                let Some(position) = self.arena.position(target) else {
                    return false;
                };
                if origin.distance(position) > range {
                    return false;
                }
                match aim_flat {
                    Some(forward) => {
                        let mut to_target = position - origin;
                        to_target.y = 0.0;
                        match to_target.try_normalize() {
                            Some(direction) => forward.dot(direction) >= MELEE_ARC_COS,
                            // Overlapping bodies always count as in front.
                            None => true,
                        }
                    }
                    None => true,
                }
            })
            .collect()
    }

    fn players_in_radius(&self, center: EntityId, radius: f32, include_self: bool) -> Vec<EntityId> {
        let Some(origin) = self.arena.position(center) else {
            return Vec::new();
        };
        self.players
            .iter()
            .copied()
            .filter(|&player| include_self || player != center)
            .filter(|&player| {
                self.arena
                    .position(player)
                    .is_some_and(|position| origin.distance(position) <= radius)
            })
            .collect()
    }

    fn enemies_in_radius(&self, center: EntityId, radius: f32) -> Vec<EntityId> {
        let Some(origin) = self.arena.position(center) else {
            return Vec::new();
        };
        self.enemies
            .keys()
            .copied()
            .filter(|&enemy| {
                self.arena
                    .position(enemy)
                    .is_some_and(|position| origin.distance(position) <= radius)
            })
            .collect()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Next deterministic roll in `[0, 1)` for an entity's action.
    fn next_roll(&mut self, entity: EntityId) -> f32 {
        self.roll_nonce += 1;
        let seed = compute_seed(self.game_seed, self.roll_nonce, entity.raw(), ROLL_CONTEXT_CRIT);
        self.rng.unit(seed)
    }

    fn expire_guards(&mut self, now: f32) {
        let mut still_pending = Vec::new();
        for (entity, expires_at) in std::mem::take(&mut self.guard_expiries) {
            if now >= expires_at {
                if let Some(health) = self.registry.get_mut::<HealthState>(entity) {
                    health.set_invulnerable(false);
                }
            } else {
                still_pending.push((entity, expires_at));
            }
        }
        self.guard_expiries = still_pending;
    }
}
