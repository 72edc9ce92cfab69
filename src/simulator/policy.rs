//! Scripted autoplayer used by the simulator.
//!
//! Decisions are made from the public snapshot only, the same view a human
//! front end would render.

use crate::core::{Action, GamePhase, GameSnapshot};
use crate::error::Currency;
use crate::shop::{ItemEffect, ShopItem};
use crate::skills::{SkillId, SkillKind};

/// Below this share of max HP the player heals instead of attacking.
const HEAL_THRESHOLD: f64 = 0.35;

/// Healing skills are worth it below this share of max HP.
const SKILL_HEAL_THRESHOLD: f64 = 0.5;

fn hp_share(state: &GameSnapshot) -> f64 {
    state.player.hp as f64 / state.player.max_hp.max(1) as f64
}

fn ready_skill(state: &GameSnapshot, kind: SkillKind) -> Option<SkillId> {
    state
        .cooldowns
        .iter()
        .find(|c| c.remaining == 0 && c.skill.spec().kind == kind)
        .map(|c| c.skill)
}

fn affordable(state: &GameSnapshot, item: &ShopItem, reserve: u32) -> bool {
    match item.price.currency {
        Currency::Coins => state.coins >= item.price.amount + reserve,
        Currency::Gold => state.gold >= item.price.amount,
    }
}

/// Something from the shop worth buying right now, if any.
fn shopping(state: &GameSnapshot) -> Option<Action> {
    if !state.shop.open {
        return None;
    }
    // Coins for the next activation are not spent on shopping.
    let reserve = if state.fragments.count > 0 && !state.fragments.corroded {
        state.fragments.price
    } else {
        0
    };
    let wounded = hp_share(state) < SKILL_HEAL_THRESHOLD;

    state
        .shop
        .items
        .iter()
        .filter(|item| affordable(state, item, reserve))
        .find(|item| match item.effect {
            ItemEffect::Seed { .. } => true,
            ItemEffect::Tonic { .. } => wounded && state.player.status.tonic_turns == 0,
            ItemEffect::GoldGrant(_) => state.gold == 0,
            ItemEffect::WaveAttack(_) => state.enemy.is_boss(),
        })
        .map(|item| Action::BuyItem(item.id))
}

/// Picks the next action for `state`.
pub fn choose_action(state: &GameSnapshot) -> Action {
    match state.phase {
        GamePhase::BossIntro | GamePhase::StoryIntro { .. } | GamePhase::Endless => {
            return Action::Continue
        }
        GamePhase::InCombat | GamePhase::GameOver => {}
    }

    let fragments = &state.fragments;
    if fragments.count > 0 && !fragments.corroded && state.coins >= fragments.price {
        return Action::ActivateFragment;
    }
    if let Some(buy) = shopping(state) {
        return buy;
    }

    let share = hp_share(state);
    if share < SKILL_HEAL_THRESHOLD {
        if let Some(skill) = ready_skill(state, SkillKind::Heal) {
            return Action::UseSkill(skill);
        }
    }
    if share < HEAL_THRESHOLD {
        return Action::Heal;
    }
    if let Some(skill) = ready_skill(state, SkillKind::Buff) {
        return Action::UseSkill(skill);
    }
    if let Some(skill) = ready_skill(state, SkillKind::Damage) {
        return Action::UseSkill(skill);
    }
    Action::Attack
}
