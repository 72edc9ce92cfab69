use serde::{Deserialize, Serialize};

/// Identifies a learnable skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillId {
    BlazingCorn,
    RainDance,
    Stampede,
    FortifyFence,
    SapBurst,
    ConcussiveSeed,
}

impl SkillId {
    pub const ALL: [SkillId; 6] = [
        SkillId::BlazingCorn,
        SkillId::RainDance,
        SkillId::Stampede,
        SkillId::FortifyFence,
        SkillId::SapBurst,
        SkillId::ConcussiveSeed,
    ];

    pub fn spec(self) -> &'static SkillSpec {
        // Catalog order matches ALL.
        &SKILL_CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

/// Broad category, used for display and by the autoplay policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    Damage,
    Heal,
    Buff,
}

/// One step of a skill's effect, applied in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillEffect {
    /// Hit for `attack_ratio` of the user's attack plus `target_hp_ratio` of
    /// the target's current HP. Defense applies.
    Strike {
        attack_ratio: f64,
        target_hp_ratio: f64,
    },
    /// Heal for `max_hp_ratio` of the user's max HP plus `attack_ratio` of
    /// the user's attack.
    Restore { max_hp_ratio: f64, attack_ratio: f64 },
    /// Target skips its next turn.
    Stun,
    /// Target's next attack is reduced by this fraction.
    Weaken(f64),
    /// User loses this fraction of the damage dealt so far.
    Recoil(f64),
    /// Permanently raise the user's max HP.
    Fortify(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillSpec {
    pub id: SkillId,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: SkillKind,
    /// Rounds the skill stays unusable after use.
    pub cooldown: u32,
    pub effects: &'static [SkillEffect],
}

/// Effectively single use: the cooldown outlasts any realistic game.
pub const FORTIFY_COOLDOWN: u32 = 9999;

pub static SKILL_CATALOG: [SkillSpec; 6] = [
    SkillSpec {
        id: SkillId::BlazingCorn,
        name: "Blazing Corn",
        description: "Deal 30% of enemy current HP + 30% of your attack power and stun the enemy.",
        kind: SkillKind::Damage,
        cooldown: 4,
        effects: &[
            SkillEffect::Strike {
                attack_ratio: 0.3,
                target_hp_ratio: 0.3,
            },
            SkillEffect::Stun,
        ],
    },
    SkillSpec {
        id: SkillId::RainDance,
        name: "Rain Dance",
        description: "Restore HP equal to 30% of your max HP + 50% of your attack power.",
        kind: SkillKind::Heal,
        cooldown: 5,
        effects: &[SkillEffect::Restore {
            max_hp_ratio: 0.3,
            attack_ratio: 0.5,
        }],
    },
    SkillSpec {
        id: SkillId::Stampede,
        name: "Stampede",
        description: "Strike for 1.3x attack power, reduce enemy next attack, and you take 30% recoil.",
        kind: SkillKind::Damage,
        cooldown: 5,
        effects: &[
            SkillEffect::Strike {
                attack_ratio: 1.3,
                target_hp_ratio: 0.0,
            },
            SkillEffect::Weaken(0.3),
            SkillEffect::Recoil(0.3),
        ],
    },
    SkillSpec {
        id: SkillId::FortifyFence,
        name: "Fortify Fence",
        description: "Permanently increase max HP by 25.",
        kind: SkillKind::Buff,
        cooldown: FORTIFY_COOLDOWN,
        effects: &[SkillEffect::Fortify(25)],
    },
    SkillSpec {
        id: SkillId::SapBurst,
        name: "Sap Burst",
        description: "Deal 0.9x attack power and heal for 12% of your max HP.",
        kind: SkillKind::Damage,
        cooldown: 3,
        effects: &[
            SkillEffect::Strike {
                attack_ratio: 0.9,
                target_hp_ratio: 0.0,
            },
            SkillEffect::Restore {
                max_hp_ratio: 0.12,
                attack_ratio: 0.0,
            },
        ],
    },
    SkillSpec {
        id: SkillId::ConcussiveSeed,
        name: "Concussive Seed",
        description: "Deal 0.5x attack power and stun the enemy to skip its next turn.",
        kind: SkillKind::Damage,
        cooldown: 4,
        effects: &[
            SkillEffect::Strike {
                attack_ratio: 0.5,
                target_hp_ratio: 0.0,
            },
            SkillEffect::Stun,
        ],
    },
];

/// A learned skill and its remaining cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub cooldown_remaining: u32,
}

impl Skill {
    pub fn new(id: SkillId) -> Self {
        Self {
            id,
            cooldown_remaining: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }
}

/// What a skill did, for the event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillOutcome {
    pub damage_dealt: u32,
    pub healed: u32,
    pub recoil: u32,
    pub max_hp_gained: u32,
    pub stunned: bool,
    pub weakened: bool,
    pub target_defeated: bool,
}
