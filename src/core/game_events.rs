//! What happened while an action resolved.
//!
//! The engine never formats text. Collaborators map these to log lines,
//! banners, or HTML as they see fit.

use serde::Serialize;

use super::game_state::{GameOutcome, GameSnapshot, Stance};
use crate::combat::{EnemyAction, PassiveGain};
use crate::error::Currency;
use crate::events::{EventEffect, RandomEvent};
use crate::fragments::FragmentDrop;
use crate::shop::ItemId;
use crate::skills::{SkillId, SkillOutcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    // ── Waves ───────────────────────────────────────────────────
    AreaEntered {
        name: &'static str,
        detail: &'static str,
    },

    WaveStarted {
        wave: u32,
        enemy: String,
    },

    BossAppeared {
        wave: u32,
        name: String,
        max_hp: u32,
        attack: u32,
    },

    RandomEventFired {
        event: RandomEvent,
        effect: EventEffect,
        /// Rolled off the back of the primary event.
        chained: bool,
    },

    // ── Combat ──────────────────────────────────────────────────
    PlayerAttacked {
        damage: u32,
        empowered: bool,
    },

    PlayerHealed {
        amount: u32,
    },

    SkillUsed {
        skill: SkillId,
        outcome: SkillOutcome,
    },

    EnemyEnraged {
        attack: u32,
    },

    EnemyActed(EnemyAction),

    /// Endless-mode drain.
    EndlessGimmick {
        damage: u32,
        boss: bool,
    },

    EnemyDefeated {
        name: String,
        wave: u32,
        boss: bool,
        coins: u32,
    },

    PlayerDefeated {
        wave: u32,
        round: u32,
    },

    // ── Rewards ─────────────────────────────────────────────────
    FragmentDropped(FragmentDrop),

    FragmentCorroded,

    PassiveGained(PassiveGain),

    WaveCleared {
        wave: u32,
        attack_gained: u32,
        max_hp_gained: u32,
    },

    // ── Story ───────────────────────────────────────────────────
    StoryMilestone {
        wave: u32,
        narrative: &'static str,
    },

    SkillLearned(SkillId),

    StanceChosen {
        stance: Stance,
        attack_gained: u32,
        max_hp_gained: u32,
    },

    EndlessUnlocked,

    // ── Free actions ────────────────────────────────────────────
    ItemPurchased {
        item: ItemId,
        currency: Currency,
        price: u32,
    },

    FragmentActivated {
        price: u32,
        successes: u32,
        attack_gained: u32,
        max_hp_gained: u32,
        skill_learned: Option<SkillId>,
    },

    GameEnded(GameOutcome),
}

/// Result of a successful `submit_action`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionReport {
    pub events: Vec<GameEvent>,
    pub state: GameSnapshot,
}

impl ActionReport {
    pub fn has_event(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}
