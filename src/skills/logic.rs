use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::*;
use crate::combat::Combatant;
use crate::error::{GameError, Result};

/// Skills owned by one combatant, in learn order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillBook {
    skills: Vec<Skill>,
}

impl SkillBook {
    pub fn knows(&self, id: SkillId) -> bool {
        self.skills.iter().any(|s| s.id == id)
    }

    /// Remaining cooldown, or None if the skill is not learned.
    pub fn cooldown_remaining(&self, id: SkillId) -> Option<u32> {
        self.skills
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.cooldown_remaining)
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Adds a skill. Returns false if it was already known.
    pub fn learn(&mut self, id: SkillId) -> bool {
        if self.knows(id) {
            return false;
        }
        self.skills.push(Skill::new(id));
        true
    }

    /// Learns a random skill not yet known. None once everything is learned.
    pub fn learn_random(&mut self, rng: &mut impl Rng) -> Option<SkillId> {
        let unknown: Vec<SkillId> = SkillId::ALL
            .iter()
            .copied()
            .filter(|id| !self.knows(*id))
            .collect();
        if unknown.is_empty() {
            return None;
        }
        let id = unknown[rng.gen_range(0..unknown.len())];
        self.skills.push(Skill::new(id));
        Some(id)
    }

    fn start_cooldown(&mut self, id: SkillId) {
        if let Some(skill) = self.skills.iter_mut().find(|s| s.id == id) {
            skill.cooldown_remaining = id.spec().cooldown;
        }
    }

    fn tick(&mut self) {
        for skill in &mut self.skills {
            skill.cooldown_remaining = skill.cooldown_remaining.saturating_sub(1);
        }
    }
}

/// True iff `owner` knows the skill, is standing, and the cooldown is spent.
pub fn can_use(owner: &Combatant, skill: SkillId) -> bool {
    owner.can_use(skill)
}

/// Checks everything `use_skill` would check, without touching anything.
pub fn validate_skill_use(user: &Combatant, skill: SkillId, target: &Combatant) -> Result<()> {
    let remaining = user.skills.cooldown_remaining(skill).ok_or_else(|| {
        GameError::InvalidArgument(format!("{} has not learned {}", user.name, skill.name()))
    })?;
    if user.is_defeated() {
        return Err(GameError::InvalidState(format!(
            "{} is already defeated",
            user.name
        )));
    }
    if remaining > 0 {
        return Err(GameError::SkillOnCooldown { skill, remaining });
    }
    if target.is_defeated() {
        return Err(GameError::InvalidState(format!(
            "{} is already defeated",
            target.name
        )));
    }
    Ok(())
}

/// Applies the skill's effects and starts its cooldown.
///
/// Target-side effects after a killing blow are skipped; user-side effects
/// (healing, recoil, fortify) still resolve.
pub fn use_skill(user: &mut Combatant, skill: SkillId, target: &mut Combatant) -> Result<SkillOutcome> {
    validate_skill_use(user, skill, target)?;

    let spec = skill.spec();
    let mut outcome = SkillOutcome::default();

    for effect in spec.effects {
        match *effect {
            SkillEffect::Strike {
                attack_ratio,
                target_hp_ratio,
            } => {
                if target.is_defeated() {
                    continue;
                }
                let raw = (target.hp as f64 * target_hp_ratio).round() as u32
                    + (user.attack as f64 * attack_ratio).round() as u32;
                let before = target.hp;
                outcome.target_defeated = target.apply_damage(to_amount(raw))?;
                outcome.damage_dealt += before - target.hp;
            }
            SkillEffect::Restore {
                max_hp_ratio,
                attack_ratio,
            } => {
                let amount = (user.max_hp as f64 * max_hp_ratio).round() as u32
                    + (user.attack as f64 * attack_ratio).round() as u32;
                if !user.is_defeated() {
                    outcome.healed += user.heal(to_amount(amount))?;
                }
            }
            SkillEffect::Stun => {
                if !target.is_defeated() {
                    target.status.stunned = true;
                    outcome.stunned = true;
                }
            }
            SkillEffect::Weaken(fraction) => {
                if !target.is_defeated() {
                    target.status.attack_debuff += fraction;
                    outcome.weakened = true;
                }
            }
            SkillEffect::Recoil(fraction) => {
                let recoil = (outcome.damage_dealt as f64 * fraction).round() as u32;
                outcome.recoil += user.lose_health(recoil);
            }
            SkillEffect::Fortify(amount) => {
                user.raise_max_hp(amount);
                outcome.max_hp_gained += amount;
            }
        }
    }

    user.skills.start_cooldown(skill);
    Ok(outcome)
}

/// Called once per round per owner, after action resolution.
pub fn tick_cooldowns(owner: &mut Combatant) {
    owner.skills.tick();
}

pub fn to_amount(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
