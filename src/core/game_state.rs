//! Observable session state: phases, actions, and the read-only snapshot.

use serde::{Deserialize, Serialize};

use crate::combat::Combatant;
use crate::events::RandomEvent;
use crate::fragments::FragmentStatus;
use crate::shop::{ItemId, ShopItem};
use crate::skills::SkillId;

/// Story runs the milestone arc; Endless is entered once and never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Story,
    Endless,
}

/// Where the progression state machine currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fighting the enemy of the current wave.
    InCombat,
    /// A boss has spawned and waits for `Continue`.
    BossIntro,
    /// A milestone boss fell; its story beat waits for `Continue`
    /// (or `ChooseStance` on the final milestone).
    StoryIntro { milestone_wave: u32 },
    /// The story is over; `Continue` goes endless, `Retire` ends the game.
    Endless,
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        self == GamePhase::GameOver
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Defeated,
    Retired,
}

/// Final milestone choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    /// Fortify the land: more max HP.
    Defend,
    /// Counterattack: more attack.
    #[default]
    StrikeBack,
}

/// Everything a collaborator can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Attack,
    Heal,
    UseSkill(SkillId),
    BuyItem(ItemId),
    ActivateFragment,
    Continue,
    ChooseStance(Stance),
    Retire,
}

impl Action {
    /// Attack, Heal and skills resolve a full round; the rest are free.
    pub fn is_combat(self) -> bool {
        matches!(self, Action::Attack | Action::Heal | Action::UseSkill(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CooldownView {
    pub skill: SkillId,
    pub name: &'static str,
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopView {
    pub open: bool,
    pub items: Vec<ShopItem>,
}

/// Read-only view of a session, handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub round_index: u32,
    pub wave_index: u32,
    pub phase: GamePhase,
    pub mode: GameMode,
    pub outcome: Option<GameOutcome>,
    pub area: &'static str,
    pub player: Combatant,
    pub enemy: Combatant,
    pub cooldowns: Vec<CooldownView>,
    pub coins: u32,
    pub gold: u32,
    pub fragments: FragmentStatus,
    pub shop: ShopView,
    /// Random events rolled at the start of the current wave.
    pub pending_events: Vec<RandomEvent>,
    pub ember_stacks: u32,
    pub stance: Option<Stance>,
}
