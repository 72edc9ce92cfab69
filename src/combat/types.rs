use serde::{Deserialize, Serialize};

use crate::core::balance::*;
use crate::error::{GameError, Result};
use crate::skills::{SkillBook, SkillId};

/// What a combatant is. Player, regular enemy, and boss share one set of
/// capabilities; the kind only steers spawning, rewards, and enrage timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantKind {
    Player,
    Enemy,
    Boss,
}

/// Temporary modifiers carried by a combatant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    /// Skips its next turn.
    pub stunned: bool,
    /// Fraction shaved off the next attack (consumed on use).
    pub attack_debuff: f64,
    /// Incoming damage reduction from a tonic, and the hits it still covers.
    pub tonic_turns: u32,
    pub tonic_reduction: f64,
    /// Flat damage absorbed before HP is touched.
    pub shield: u32,
    /// Next `empowered_attacks` basic attacks deal `+empowered_bonus`.
    pub empowered_attacks: u32,
    pub empowered_bonus: f64,
    /// Attack granted until the current wave ends.
    pub wave_attack_bonus: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub kind: CombatantKind,
    pub name: String,
    pub max_hp: u32,
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[serde(default)]
    pub status: StatusEffects,
    #[serde(default)]
    pub skills: SkillBook,
}

impl Combatant {
    pub fn new(kind: CombatantKind, name: String, max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            kind,
            name,
            max_hp,
            hp: max_hp,
            attack,
            defense,
            status: StatusEffects::default(),
            skills: SkillBook::default(),
        }
    }

    /// A fresh player farm.
    pub fn player(name: &str) -> Self {
        Self::new(
            CombatantKind::Player,
            name.to_string(),
            PLAYER_BASE_HP,
            PLAYER_BASE_ATTACK,
            PLAYER_BASE_DEFENSE,
        )
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    pub fn is_boss(&self) -> bool {
        self.kind == CombatantKind::Boss
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.is_defeated() {
            return Err(GameError::InvalidState(format!(
                "{} is already defeated",
                self.name
            )));
        }
        Ok(())
    }

    fn ensure_non_negative(amount: i32) -> Result<u32> {
        u32::try_from(amount)
            .map_err(|_| GameError::InvalidArgument(format!("negative amount {}", amount)))
    }

    /// Damage a hit of `amount` would deal after defense.
    pub fn damage_after_defense(&self, amount: u32) -> u32 {
        amount.saturating_sub(self.defense).max(MINIMUM_DAMAGE)
    }

    /// Takes a hit reduced by defense (never below the damage floor).
    /// Returns whether this hit defeated the combatant.
    pub fn apply_damage(&mut self, amount: i32) -> Result<bool> {
        let amount = Self::ensure_non_negative(amount)?;
        self.ensure_alive()?;
        let dealt = self.damage_after_defense(amount);
        self.hp = self.hp.saturating_sub(dealt);
        Ok(self.is_defeated())
    }

    /// Restores HP up to max. Healing a full combatant is a no-op.
    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> Result<u32> {
        let amount = Self::ensure_non_negative(amount)?;
        self.ensure_alive()?;
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        Ok(self.hp - before)
    }

    /// Loses HP directly, ignoring defense and shields. Used for recoil and
    /// environmental damage. Returns the HP lost.
    pub fn lose_health(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Loses `percent` of max HP (rounded), ignoring defense.
    /// Returns the rounded amount, which may exceed the HP actually left.
    pub fn lose_percent(&mut self, percent: f64) -> u32 {
        let amount = (self.max_hp as f64 * percent).round() as u32;
        self.lose_health(amount);
        amount
    }

    /// Restores `percent` of max HP (rounded). Returns the rounded amount.
    pub fn heal_percent(&mut self, percent: f64) -> u32 {
        let amount = (self.max_hp as f64 * percent).round() as u32;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        amount
    }

    /// Permanently raises max HP, and current HP with it.
    pub fn raise_max_hp(&mut self, amount: u32) {
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    /// Soaks `amount` into the shield. Returns what gets through.
    pub fn absorb(&mut self, amount: u32) -> u32 {
        let absorbed = amount.min(self.status.shield);
        self.status.shield -= absorbed;
        amount - absorbed
    }

    /// Attack bonus that expires at the end of the wave.
    pub fn grant_wave_attack(&mut self, bonus: u32) {
        self.attack = self.attack.saturating_add(bonus);
        self.status.wave_attack_bonus = self.status.wave_attack_bonus.saturating_add(bonus);
    }

    /// Drops the per-wave attack bonus.
    pub fn expire_wave_bonus(&mut self) {
        self.attack = self.attack.saturating_sub(self.status.wave_attack_bonus);
        self.status.wave_attack_bonus = 0;
    }

    /// True iff the skill is known, off cooldown, and this combatant stands.
    pub fn can_use(&self, skill: SkillId) -> bool {
        !self.is_defeated() && self.skills.cooldown_remaining(skill) == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(defense: u32) -> Combatant {
        Combatant::new(CombatantKind::Enemy, "Crow".to_string(), 100, 10, defense)
    }

    #[test]
    fn test_apply_damage_subtracts_defense() {
        let mut c = dummy(5);
        assert_eq!(c.apply_damage(20), Ok(false));
        assert_eq!(c.hp, 85);
    }

    #[test]
    fn test_apply_damage_has_floor() {
        let mut c = dummy(50);
        c.apply_damage(10).unwrap();
        assert_eq!(c.hp, 100 - MINIMUM_DAMAGE);
        c.apply_damage(0).unwrap();
        assert_eq!(c.hp, 100 - 2 * MINIMUM_DAMAGE);
    }

    #[test]
    fn test_apply_damage_clamps_and_reports_defeat() {
        let mut c = dummy(0);
        assert_eq!(c.apply_damage(500), Ok(true));
        assert_eq!(c.hp, 0);
        assert!(c.is_defeated());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut c = dummy(0);
        assert!(matches!(
            c.apply_damage(-1),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(c.heal(-5), Err(GameError::InvalidArgument(_))));
        assert_eq!(c.hp, 100);
    }

    #[test]
    fn test_defeated_combatant_rejects_operations() {
        let mut c = dummy(0);
        c.apply_damage(100).unwrap();
        assert!(matches!(c.apply_damage(1), Err(GameError::InvalidState(_))));
        assert!(matches!(c.heal(1), Err(GameError::InvalidState(_))));
    }

    #[test]
    fn test_heal_is_capped_at_max() {
        let mut c = dummy(0);
        c.apply_damage(30).unwrap();
        assert_eq!(c.heal(50), Ok(30));
        assert_eq!(c.hp, 100);
        assert_eq!(c.heal(10), Ok(0));
        assert_eq!(c.hp, 100);
    }

    #[test]
    fn test_shield_absorbs_first() {
        let mut c = dummy(0);
        c.status.shield = 15;
        assert_eq!(c.absorb(10), 0);
        assert_eq!(c.status.shield, 5);
        assert_eq!(c.absorb(10), 5);
        assert_eq!(c.status.shield, 0);
    }

    #[test]
    fn test_wave_attack_bonus_expires() {
        let mut c = Combatant::player("Farm");
        c.grant_wave_attack(12);
        assert_eq!(c.attack, PLAYER_BASE_ATTACK + 12);
        c.expire_wave_bonus();
        assert_eq!(c.attack, PLAYER_BASE_ATTACK);
        assert_eq!(c.status.wave_attack_bonus, 0);
    }

    #[test]
    fn test_lose_percent_clamps_at_zero() {
        let mut c = dummy(0);
        c.hp = 5;
        assert_eq!(c.lose_percent(0.2), 20);
        assert_eq!(c.hp, 0);
    }

    #[test]
    fn test_raise_max_hp_lifts_current() {
        let mut c = dummy(0);
        c.apply_damage(40).unwrap();
        c.raise_max_hp(25);
        assert_eq!(c.max_hp, 125);
        assert_eq!(c.hp, 85);
    }
}
