use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::data::{event_pool, RandomEvent};
use crate::combat::Combatant;
use crate::core::balance::*;
use crate::core::config::WaveRange;
use crate::core::GameMode;
use crate::shop::Wallet;
use crate::skills::SkillId;

/// Deterministic eligibility: every third wave, plus any configured range.
pub fn is_event_wave(wave: u32, extra_ranges: &[WaveRange]) -> bool {
    (wave > 0 && wave % EVENT_WAVE_INTERVAL == 0) || extra_ranges.iter().any(|r| r.contains(wave))
}

/// Draws events without repeats until the pool is exhausted, then starts over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDeck {
    used: BTreeSet<RandomEvent>,
}

impl EventDeck {
    pub fn used(&self) -> &BTreeSet<RandomEvent> {
        &self.used
    }

    /// Draws one unused event from `pool`, never one of `exclude`.
    pub fn draw(
        &mut self,
        pool: &[RandomEvent],
        exclude: &[RandomEvent],
        rng: &mut impl Rng,
    ) -> Option<RandomEvent> {
        if pool.iter().all(|e| self.used.contains(e)) {
            self.used.clear();
        }
        let mut remaining: Vec<RandomEvent> = pool
            .iter()
            .copied()
            .filter(|e| !self.used.contains(e) && !exclude.contains(e))
            .collect();
        if remaining.is_empty() {
            // Only excluded events were left in this cycle. They already
            // fired, so they open the new one as used.
            self.used.clear();
            self.used.extend(exclude.iter().copied().filter(|e| pool.contains(e)));
            remaining = pool
                .iter()
                .copied()
                .filter(|e| !exclude.contains(e))
                .collect();
        }
        if remaining.is_empty() {
            return None;
        }
        let chosen = remaining[rng.gen_range(0..remaining.len())];
        self.used.insert(chosen);
        Some(chosen)
    }
}

/// Rolls the events for the start of `wave`: a primary event on eligible
/// waves, then an independent chance of a chained second one drawn from the
/// same deck.
pub fn roll_wave_events(
    deck: &mut EventDeck,
    wave: u32,
    extra_ranges: &[WaveRange],
    second_event_chance: f64,
    rng: &mut impl Rng,
) -> Vec<RandomEvent> {
    if !is_event_wave(wave, extra_ranges) {
        return Vec::new();
    }
    let pool = event_pool(wave);
    let mut fired = Vec::with_capacity(2);
    if let Some(primary) = deck.draw(&pool, &[], rng) {
        fired.push(primary);
        if rng.gen::<f64>() < second_event_chance {
            if let Some(extra) = deck.draw(&pool, &fired, rng) {
                fired.push(extra);
            }
        }
    }
    fired
}

/// Intensity multiplier for percent-based effects.
pub fn event_scale(mode: GameMode, wave: u32) -> f64 {
    match mode {
        GameMode::Story => 1.0,
        GameMode::Endless => {
            let extra = wave.saturating_sub(STORY_END_WAVE) as f64;
            (1.0 + extra * EVENT_SCALE_PER_WAVE).min(EVENT_SCALE_MAX)
        }
    }
}

fn scaled_percent(base: f64, scale: f64) -> f64 {
    (base * scale).min(EVENT_PERCENT_CAP)
}

/// What an event changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventEffect {
    pub hp_lost: u32,
    pub coins_gained: u32,
    pub coins_lost: u32,
    pub gold_gained: u32,
    pub max_hp_gained: u32,
    pub shield: u32,
    pub wave_attack_bonus: u32,
    pub empowered_attacks: u32,
    pub skill_learned: Option<SkillId>,
}

/// Everything an event may touch.
pub struct EventTarget<'a> {
    pub player: &'a mut Combatant,
    pub wallet: &'a mut Wallet,
    /// The merchant teaches one skill per game, then pays coins instead.
    pub merchant_skill_given: &'a mut bool,
}

pub fn apply_event(
    event: RandomEvent,
    target: EventTarget<'_>,
    scale: f64,
    rng: &mut impl Rng,
) -> EventEffect {
    let EventTarget {
        player,
        wallet,
        merchant_skill_given,
    } = target;
    let mut effect = EventEffect::default();

    match event {
        RandomEvent::MysteriousMerchant => {
            if !*merchant_skill_given {
                effect.skill_learned = player.skills.learn_random(rng);
                *merchant_skill_given = true;
            } else {
                effect.coins_gained = rng.gen_range(3..=6);
            }
        }
        RandomEvent::LightningStorm => {
            effect.hp_lost = player.lose_percent(scaled_percent(0.18, scale));
        }
        RandomEvent::LostCowReturns => {
            let shield_percent = (scaled_percent(0.12, scale) * 3.0).min(EVENT_PERCENT_CAP);
            let shield = ((player.max_hp as f64 * shield_percent).round() as u32).max(1);
            player.status.shield = player.status.shield.max(shield);
            effect.shield = shield;
            effect.coins_gained = rng.gen_range(1..=3);
        }
        RandomEvent::StrangeSeedSprouts => {
            player.raise_max_hp(15);
            effect.max_hp_gained = 15;
        }
        RandomEvent::Trap => {
            effect.hp_lost = player.lose_percent(scaled_percent(0.2, scale));
        }
        RandomEvent::WanderingBard => {
            effect.coins_gained = rng.gen_range(3..=8);
        }
        RandomEvent::LocustSwarm => {
            effect.hp_lost = player.lose_percent(scaled_percent(0.12, scale));
        }
        RandomEvent::IrrigationBoom => {
            let shield =
                ((player.max_hp as f64 * scaled_percent(0.1, scale)).round() as u32).max(1);
            player.status.empowered_attacks = player.status.empowered_attacks.max(2);
            player.status.empowered_bonus = player.status.empowered_bonus.max(0.30);
            player.status.shield = player.status.shield.max(shield);
            effect.shield = shield;
            effect.empowered_attacks = 2;
        }
        RandomEvent::MoonlitHarvest => {
            effect.coins_gained = rng.gen_range(2..=5);
            let gold_chance = (0.35 * scale).min(0.6);
            if rng.gen::<f64>() < gold_chance {
                effect.gold_gained = 1;
            }
        }
        RandomEvent::ButterflyBloom => {
            effect.coins_gained = rng.gen_range(2..=5);
            player.grant_wave_attack(3);
            effect.wave_attack_bonus = 3;
        }
        RandomEvent::SoggyFurrows | RandomEvent::GravelGust | RandomEvent::RustyPitchfork => {
            effect.hp_lost = player.lose_percent(scaled_percent(0.1, scale));
        }
        RandomEvent::CinderDrift => {
            effect.hp_lost = player.lose_percent(scaled_percent(0.14, scale));
        }
        RandomEvent::CharredFence => {
            let cost = rng.gen_range(2..=4);
            effect.coins_lost = cost.min(wallet.coins);
        }
        RandomEvent::RustedPlow => {
            effect.coins_gained = rng.gen_range(3..=6);
        }
        RandomEvent::SuddenHail => {
            effect.hp_lost = player.lose_percent(scaled_percent(0.12, scale));
        }
        RandomEvent::ThornyBrambles => {
            effect.hp_lost = player.lose_percent(scaled_percent(0.08, scale));
        }
    }

    wallet.coins = wallet.coins.saturating_add(effect.coins_gained) - effect.coins_lost;
    wallet.gold = wallet.gold.saturating_add(effect.gold_gained);
    effect
}
