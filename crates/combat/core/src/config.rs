/// Simulation constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Whether processed damage intents push an impulse to the movement sink.
    pub knockback_enabled: bool,
    /// Base knockback force applied per hit.
    pub knockback_force: f32,
    /// Knockback force multiplier on critical hits.
    pub crit_knockback_multiplier: f32,
    /// Vertical component forced onto the knockback direction.
    pub knockback_upward_bias: f32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of health notifications a single mutation can emit.
    pub const MAX_HEALTH_EVENTS: usize = 4;
    /// Number of ability cooldown slots per weapon.
    pub const ABILITY_SLOTS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_KNOCKBACK_FORCE: f32 = 5.0;
    pub const DEFAULT_CRIT_KNOCKBACK_MULTIPLIER: f32 = 1.5;
    pub const DEFAULT_KNOCKBACK_UPWARD_BIAS: f32 = 0.5;

    /// Processed-intent history grows to this many entries before trimming.
    pub const EVENT_HISTORY_CAP: usize = 100;
    /// Number of oldest history entries removed per trim.
    pub const EVENT_HISTORY_TRIM: usize = 50;
    /// Default lookback window for recent-event queries, in seconds.
    pub const DEFAULT_RECENT_WINDOW: f32 = 5.0;

    pub fn new() -> Self {
        Self {
            knockback_enabled: true,
            knockback_force: Self::DEFAULT_KNOCKBACK_FORCE,
            crit_knockback_multiplier: Self::DEFAULT_CRIT_KNOCKBACK_MULTIPLIER,
            knockback_upward_bias: Self::DEFAULT_KNOCKBACK_UPWARD_BIAS,
        }
    }

    pub fn without_knockback() -> Self {
        Self {
            knockback_enabled: false,
            ..Self::new()
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
