use rand::Rng;
use serde::Serialize;

use super::types::{Combatant, CombatantKind};
use crate::core::balance::*;
use crate::core::config::Difficulty;
use crate::core::GameMode;
use crate::error::Result;
use crate::skills::to_amount;
use crate::story::boss_name;

/// What the enemy did on its turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EnemyAction {
    /// Lost its turn to a stun.
    Stunned,
    Attacked {
        /// Rolled damage before any mitigation.
        raw: u32,
        /// Removed by the attack debuff and the player's tonic.
        mitigated: u32,
        /// Soaked by the player's shield.
        absorbed: u32,
        /// HP the player actually lost.
        damage: u32,
    },
}

/// Rolls `attack` scaled by the attack band.
pub fn roll_attack(attack: u32, rng: &mut impl Rng) -> u32 {
    let multiplier = rng.gen_range(ATTACK_ROLL_MIN..=ATTACK_ROLL_MAX);
    (attack as f64 * multiplier).round() as u32
}

fn scale(value: u32, factor: f64) -> u32 {
    ((value as f64 * factor).round() as u32).max(1)
}

/// Story scaling shared by enemies and bosses (HP, attack). Saturates.
fn base_enemy_stats(wave: u32) -> (u32, u32) {
    (
        ENEMY_BASE_HP.saturating_add(wave.saturating_mul(ENEMY_HP_PER_WAVE)),
        ENEMY_BASE_ATTACK.saturating_add(wave.saturating_mul(ENEMY_ATTACK_PER_WAVE)),
    )
}

/// Generates the regular enemy for `wave`.
pub fn spawn_enemy(wave: u32, mode: GameMode, difficulty: Difficulty) -> Combatant {
    let (mut hp, mut attack) = base_enemy_stats(wave);
    if mode == GameMode::Endless {
        let extra = wave.saturating_sub(STORY_END_WAVE);
        hp = hp.saturating_add(extra.saturating_mul(ENDLESS_ENEMY_STEP.0));
        attack = attack.saturating_add(extra.saturating_mul(ENDLESS_ENEMY_STEP.1));
    }
    let factor = difficulty.multiplier();
    Combatant::new(
        CombatantKind::Enemy,
        "Enemy Monster".to_string(),
        scale(hp, factor),
        scale(attack, factor),
        0,
    )
}

/// Generates the boss for `wave`: a regular enemy with tiered bonuses,
/// defense, and a name.
pub fn spawn_boss(wave: u32, mode: GameMode, difficulty: Difficulty) -> Combatant {
    let (mut hp, mut attack) = base_enemy_stats(wave);

    let (bonus_hp, bonus_attack) = BOSS_TIERS
        .iter()
        .find(|(last_wave, _, _)| wave <= *last_wave)
        .map(|(_, hp, atk)| (*hp, *atk))
        .unwrap_or(BOSS_LATE_BONUS);
    hp = hp.saturating_add(bonus_hp);
    attack = attack.saturating_add(bonus_attack);

    if mode == GameMode::Endless {
        let extra = wave.saturating_sub(STORY_END_WAVE);
        hp = hp.saturating_add(extra.saturating_mul(ENDLESS_BOSS_STEP.0));
        attack = attack.saturating_add(extra.saturating_mul(ENDLESS_BOSS_STEP.1));
    }

    let factor = difficulty.multiplier();
    Combatant::new(
        CombatantKind::Boss,
        boss_name(wave),
        scale(hp, factor),
        scale(attack, factor),
        BOSS_BASE_DEFENSE + wave / BOSS_DEFENSE_WAVE_DIVISOR,
    )
}

/// The player's basic attack. Empowered attacks add their bonus and use up
/// one charge. Returns (HP removed, whether the hit was empowered).
pub fn player_attack(
    player: &mut Combatant,
    enemy: &mut Combatant,
    rng: &mut impl Rng,
) -> Result<(u32, bool)> {
    let mut damage = roll_attack(player.attack, rng);
    let empowered = player.status.empowered_attacks > 0 && player.status.empowered_bonus > 0.0;
    if empowered {
        damage = (damage as f64 * (1.0 + player.status.empowered_bonus)).round() as u32;
        player.status.empowered_attacks -= 1;
        if player.status.empowered_attacks == 0 {
            player.status.empowered_bonus = 0.0;
        }
    }
    let before = enemy.hp;
    enemy.apply_damage(to_amount(damage))?;
    Ok((before - enemy.hp, empowered))
}

/// Escalates a fight that drags on. Returns the new attack when it fired.
pub fn enrage_if_due(enemy: &mut Combatant, fight_round: u32) -> Option<u32> {
    let threshold = if enemy.is_boss() {
        ENRAGE_ROUND_BOSS
    } else {
        ENRAGE_ROUND_REGULAR
    };
    if fight_round < threshold {
        return None;
    }
    enemy.attack = (enemy.attack as f64 * ENRAGE_MULTIPLIER) as u32;
    Some(enemy.attack)
}

/// Resolves the enemy's turn against the player.
pub fn enemy_turn(
    enemy: &mut Combatant,
    player: &mut Combatant,
    rng: &mut impl Rng,
) -> Result<EnemyAction> {
    if enemy.status.stunned {
        enemy.status.stunned = false;
        return Ok(EnemyAction::Stunned);
    }

    let raw = roll_attack(enemy.attack, rng);
    let mut actual = raw;

    let debuff = enemy.status.attack_debuff;
    if debuff > 0.0 {
        actual = (actual as f64 * (1.0 - debuff)).max(0.0) as u32;
        enemy.status.attack_debuff = 0.0;
    }

    if player.status.tonic_turns > 0 && player.status.tonic_reduction > 0.0 {
        actual = (actual as f64 * (1.0 - player.status.tonic_reduction)) as u32;
        player.status.tonic_turns -= 1;
        if player.status.tonic_turns == 0 {
            player.status.tonic_reduction = 0.0;
        }
    }
    let mitigated = raw - actual;

    let through = player.absorb(actual);
    let absorbed = actual - through;

    let damage = if through > 0 {
        let before = player.hp;
        player.apply_damage(to_amount(through))?;
        before - player.hp
    } else {
        0
    };

    Ok(EnemyAction::Attacked {
        raw,
        mitigated,
        absorbed,
        damage,
    })
}

/// Endless-mode drain. Fires at most once every few fight rounds; returns the
/// drained HP and whether it was the boss variant.
pub fn endless_gimmick(
    enemy: &Combatant,
    player: &mut Combatant,
    wave: u32,
    fight_round: u32,
    last_gimmick_round: Option<u32>,
    rng: &mut impl Rng,
) -> Option<u32> {
    if let Some(last) = last_gimmick_round {
        if fight_round.saturating_sub(last) < GIMMICK_MIN_GAP {
            return None;
        }
    }

    let waves_past = wave.saturating_sub(STORY_END_WAVE) as f64;
    let base = if enemy.is_boss() {
        GIMMICK_CHANCE_BOSS
    } else {
        GIMMICK_CHANCE_REGULAR
    };
    let chance = base + (waves_past * GIMMICK_CHANCE_PER_WAVE).min(GIMMICK_CHANCE_CAP);
    if rng.gen::<f64>() >= chance {
        return None;
    }

    let (drain_base, drain_step, drain_cap) = if enemy.is_boss() {
        GIMMICK_DRAIN_BOSS
    } else {
        GIMMICK_DRAIN_REGULAR
    };
    let percent = drain_base + (waves_past * drain_step).min(drain_cap);
    let damage = ((player.max_hp as f64 * percent).round() as u32).max(1);
    player.lose_health(damage);
    Some(damage)
}

/// Ember's Fury after a boss kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassiveGain {
    pub stacks_added: u32,
    pub stacks: u32,
    pub attack_gained: u32,
    /// HP lost to the passive's backlash, if it fired.
    pub backlash: u32,
}

/// Adds Ember's Fury stacks to the player. A second stack can surge in once
/// the passive is already held. Returns None when the passive is maxed.
pub fn grant_ember_fury(
    player: &mut Combatant,
    stacks: &mut u32,
    rng: &mut impl Rng,
) -> Option<PassiveGain> {
    if *stacks >= EMBER_MAX_STACKS {
        return None;
    }
    let initial = *stacks;
    *stacks += 1;
    if initial > 0 && *stacks < EMBER_MAX_STACKS && rng.gen::<f64>() < EMBER_BONUS_STACK_CHANCE {
        *stacks += 1;
    }
    let stacks_added = *stacks - initial;
    let attack_gained = stacks_added * EMBER_ATTACK_PER_STACK;
    player.attack = player.attack.saturating_add(attack_gained);

    let backlash = if rng.gen::<f64>() < EMBER_BACKLASH_CHANCE {
        let amount = ((player.max_hp as f64 * EMBER_BACKLASH_PERCENT) as u32).max(1);
        player.lose_health(amount)
    } else {
        0
    };

    Some(PassiveGain {
        stacks_added,
        stacks: *stacks,
        attack_gained,
        backlash,
    })
}
