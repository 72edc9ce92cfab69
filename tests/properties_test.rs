//! Property-based tests for combat, cooldown, and economy invariants.

use farm_defense::combat::{Combatant, CombatantKind};
use farm_defense::core::{Action, Engine, GameConfig, GameMode, GamePhase};
use farm_defense::fragments::FragmentEconomy;
use farm_defense::simulator::choose_action;
use farm_defense::skills::{self, SkillId};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
enum HealthOp {
    Damage(i32),
    Heal(i32),
    Lose(u32),
    RaiseMax(u32),
    LosePercent(f64),
    HealPercent(f64),
}

fn health_op() -> impl Strategy<Value = HealthOp> {
    prop_oneof![
        (-50i32..500).prop_map(HealthOp::Damage),
        (-50i32..500).prop_map(HealthOp::Heal),
        (0u32..500).prop_map(HealthOp::Lose),
        (0u32..100).prop_map(HealthOp::RaiseMax),
        (0.0f64..1.0).prop_map(HealthOp::LosePercent),
        (0.0f64..1.0).prop_map(HealthOp::HealPercent),
    ]
}

fn sturdy(kind: CombatantKind) -> Combatant {
    Combatant::new(kind, "Sturdy".to_string(), 1_000_000, 30, 0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// HP stays within [0, max_hp] whatever happens to it.
    #[test]
    fn prop_health_stays_clamped(
        max_hp in 1u32..2_000,
        defense in 0u32..20,
        ops in prop::collection::vec(health_op(), 0..40),
    ) {
        let mut c = Combatant::new(CombatantKind::Enemy, "Target".to_string(), max_hp, 10, defense);
        for op in ops {
            let before = c.clone();
            let result = match op {
                HealthOp::Damage(n) => c.apply_damage(n).map(|_| ()),
                HealthOp::Heal(n) => c.heal(n).map(|_| ()),
                HealthOp::Lose(n) => { c.lose_health(n); Ok(()) }
                HealthOp::RaiseMax(n) => { c.raise_max_hp(n); Ok(()) }
                HealthOp::LosePercent(p) => { c.lose_percent(p); Ok(()) }
                HealthOp::HealPercent(p) => { c.heal_percent(p); Ok(()) }
            };
            if result.is_err() {
                // Rejected operations leave the combatant untouched.
                prop_assert_eq!(&c, &before);
            }
            prop_assert!(c.hp <= c.max_hp);
        }
    }

    /// The price never drops, and climbs exactly on every third success.
    #[test]
    fn prop_fragment_price_tiers(activations in 1usize..30, endless in any::<bool>()) {
        let mode = if endless { GameMode::Endless } else { GameMode::Story };
        let mut frags = FragmentEconomy::new(5, 3, 50, 1.0);
        frags.on_boss_defeated(&mut ChaCha8Rng::seed_from_u64(1));
        let mut coins = u32::MAX;

        let mut last = 0;
        for n in 0..activations as u32 {
            let price = frags.activate(&mut coins, mode).unwrap();
            prop_assert!(price >= last);
            if n > 0 && n % 3 == 0 {
                prop_assert!(price > last);
            } else if n > 0 {
                prop_assert_eq!(price, last);
            }
            last = price;
        }
        prop_assert_eq!(frags.successes(), activations as u32);
    }

    /// A skill used now becomes usable again after exactly `cooldown` ticks.
    #[test]
    fn prop_cooldown_is_exact(index in 0usize..SkillId::ALL.len()) {
        let skill = SkillId::ALL[index];
        let cooldown = skill.spec().cooldown;
        prop_assume!(cooldown < 100);

        let mut user = sturdy(CombatantKind::Player);
        let mut target = sturdy(CombatantKind::Enemy);
        user.skills.learn(skill);
        prop_assert!(user.can_use(skill));

        skills::use_skill(&mut user, skill, &mut target).unwrap();
        for _ in 0..cooldown - 1 {
            skills::tick_cooldowns(&mut user);
            prop_assert!(!user.can_use(skill));
        }
        skills::tick_cooldowns(&mut user);
        prop_assert!(user.can_use(skill));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Once a session reaches Endless Mode it never returns to Story.
    #[test]
    fn prop_endless_is_one_way(seed in any::<u64>(), start in 20u32..=25) {
        let config = GameConfig {
            starting_wave: start,
            starting_coins: 500,
            ..GameConfig::seeded(seed)
        };
        let mut engine = Engine::start_game(config).unwrap();
        let mut seen_endless = false;

        for _ in 0..400 {
            let state = engine.get_state();
            if seen_endless {
                prop_assert_eq!(state.mode, GameMode::Endless);
            }
            seen_endless |= state.mode == GameMode::Endless;
            if engine.is_over() {
                break;
            }
            if engine.submit_action(choose_action(&state)).is_err() {
                let fallback = if state.phase == GamePhase::InCombat {
                    Action::Attack
                } else {
                    Action::Continue
                };
                engine.submit_action(fallback).unwrap();
            }
        }
    }
}
