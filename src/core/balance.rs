//! Shared balance constants used by the engine and the simulator.
//!
//! All core balance numbers should be defined here.
//! Change once, test everywhere.

// =============================================================================
// PLAYER
// =============================================================================

/// Player max HP at the start of a game.
pub const PLAYER_BASE_HP: u32 = 150;

/// Player attack power at the start of a game.
pub const PLAYER_BASE_ATTACK: u32 = 25;

/// Player defense at the start of a game.
pub const PLAYER_BASE_DEFENSE: u32 = 0;

/// Flat HP restored by the Heal action.
pub const HEAL_ACTION_AMOUNT: i32 = 50;

/// Attack gained after clearing any wave.
pub const WAVE_CLEAR_ATTACK_GAIN: u32 = 5;

/// Max HP gained after clearing any wave (player is also fully healed).
pub const WAVE_CLEAR_MAX_HP_GAIN: u32 = 10;

// =============================================================================
// DAMAGE
// =============================================================================

/// Every landed hit deals at least this much, regardless of defense.
pub const MINIMUM_DAMAGE: u32 = 1;

/// Attack rolls are uniformly scaled within this band.
pub const ATTACK_ROLL_MIN: f64 = 0.8;
pub const ATTACK_ROLL_MAX: f64 = 1.2;

/// Fight round at which regular enemies start enraging.
pub const ENRAGE_ROUND_REGULAR: u32 = 10;

/// Fight round at which bosses start enraging.
pub const ENRAGE_ROUND_BOSS: u32 = 15;

/// Attack multiplier applied each enraged round.
pub const ENRAGE_MULTIPLIER: f64 = 1.5;

// =============================================================================
// ENEMY SCALING
// =============================================================================

/// Regular enemy HP: base + per-wave step.
pub const ENEMY_BASE_HP: u32 = 100;
pub const ENEMY_HP_PER_WAVE: u32 = 12;

/// Regular enemy attack: base + per-wave step.
pub const ENEMY_BASE_ATTACK: u32 = 12;
pub const ENEMY_ATTACK_PER_WAVE: u32 = 3;

/// Boss bonus tiers: (last wave of tier, extra HP, extra attack).
pub const BOSS_TIERS: [(u32, u32, u32); 2] = [(10, 80, 15), (30, 150, 30)];

/// Boss bonus past the last tier.
pub const BOSS_LATE_BONUS: (u32, u32) = (250, 40);

/// Boss defense: base + one point per this many waves.
pub const BOSS_BASE_DEFENSE: u32 = 2;
pub const BOSS_DEFENSE_WAVE_DIVISOR: u32 = 5;

/// Endless scaling per wave past the story, regular enemies (HP, attack).
pub const ENDLESS_ENEMY_STEP: (u32, u32) = (20, 4);

/// Endless scaling per wave past the story, bosses (HP, attack).
pub const ENDLESS_BOSS_STEP: (u32, u32) = (30, 6);

// =============================================================================
// WAVES & STORY
// =============================================================================

/// Every wave divisible by this is a boss wave.
pub const BOSS_WAVE_INTERVAL: u32 = 5;

/// Every wave divisible by this rolls a random event.
pub const EVENT_WAVE_INTERVAL: u32 = 3;

/// The story ends once the boss of this wave falls.
pub const STORY_END_WAVE: u32 = 25;

/// Highest wave a session may be configured to start on.
pub const MAX_STARTING_WAVE: u32 = 10_000;

/// Final milestone stance bonuses.
pub const STANCE_DEFEND_MAX_HP: u32 = 50;
pub const STANCE_STRIKE_ATTACK: u32 = 20;

// =============================================================================
// REWARDS
// =============================================================================

/// Coins for a regular enemy.
pub const COINS_PER_ENEMY: u32 = 6;

/// Coins for a boss.
pub const COINS_PER_BOSS: u32 = 15;

/// Ember's Fury: attack per stack and stack cap.
pub const EMBER_ATTACK_PER_STACK: u32 = 5;
pub const EMBER_MAX_STACKS: u32 = 3;

/// Chance of a bonus Ember's Fury stack once the passive is already held.
pub const EMBER_BONUS_STACK_CHANCE: f64 = 0.2;

/// Chance the passive backfires, and the share of max HP it costs.
pub const EMBER_BACKLASH_CHANCE: f64 = 0.10;
pub const EMBER_BACKLASH_PERCENT: f64 = 0.05;

// =============================================================================
// RANDOM EVENTS
// =============================================================================

/// Default chance of a chained second event.
pub const SECOND_EVENT_CHANCE: f64 = 0.18;

/// Endless event intensity grows by this much per wave past the story.
pub const EVENT_SCALE_PER_WAVE: f64 = 0.03;

/// Endless event intensity cap.
pub const EVENT_SCALE_MAX: f64 = 2.0;

/// Percent-based event effects never exceed this share of max HP.
pub const EVENT_PERCENT_CAP: f64 = 0.45;

// =============================================================================
// ENDLESS GIMMICK
// =============================================================================

/// Minimum fight rounds between two drains by the same enemy.
pub const GIMMICK_MIN_GAP: u32 = 3;

/// Base trigger chance (boss, regular) and its per-wave growth and cap.
pub const GIMMICK_CHANCE_BOSS: f64 = 0.24;
pub const GIMMICK_CHANCE_REGULAR: f64 = 0.14;
pub const GIMMICK_CHANCE_PER_WAVE: f64 = 0.01;
pub const GIMMICK_CHANCE_CAP: f64 = 0.18;

/// Drained share of max HP (boss, regular), its growth and cap.
pub const GIMMICK_DRAIN_BOSS: (f64, f64, f64) = (0.06, 0.002, 0.12);
pub const GIMMICK_DRAIN_REGULAR: (f64, f64, f64) = (0.04, 0.0015, 0.08);

// =============================================================================
// ECONOMY
// =============================================================================

/// Coins the player starts with.
pub const STARTING_COINS: u32 = 2;

/// The shop opens on waves divisible by this.
pub const SHOP_INTERVAL: u32 = 2;

/// Konami fragment defaults.
pub const FRAGMENT_BASE_PRICE: u32 = 50;
pub const FRAGMENT_LIFETIME_ROUNDS: u32 = 5;
pub const FRAGMENT_CAP: u32 = 3;
pub const FRAGMENT_DROP_CHANCE: f64 = 1.0;

/// Price factor grows by one every this many successful activations.
pub const FRAGMENT_SUCCESSES_PER_TIER: u32 = 3;

/// Share of attack and max HP granted by an activation.
pub const FRAGMENT_STAT_SURGE: f64 = 0.3;
