//! The wave/round progression state machine.
//!
//! One `Engine` is one game session. It owns the player, the current enemy,
//! the wave/round counters and every piece of mutable economy state. Each
//! call to [`Engine::submit_action`] is a synchronous step from one state to
//! the next; a rejected action leaves the session (RNG included) untouched.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::balance::*;
use super::config::GameConfig;
use super::game_events::{ActionReport, GameEvent};
use super::game_state::*;
use crate::combat::{self, Combatant};
use crate::error::{GameError, Result};
use crate::events::{apply_event, event_scale, roll_wave_events, EventDeck, EventTarget, RandomEvent};
use crate::fragments::FragmentEconomy;
use crate::shop::{self, ItemId, Wallet};
use crate::skills;
use crate::story::{self, MilestoneReward};

const PLAYER_NAME: &str = "Your Farm";

#[derive(Debug, Clone)]
pub struct Engine<R: Rng = ChaCha8Rng> {
    config: GameConfig,
    rng: R,
    phase: GamePhase,
    mode: GameMode,
    outcome: Option<GameOutcome>,
    round_index: u32,
    wave_index: u32,
    /// Rounds spent on the current enemy; drives enrage and the gimmick gap.
    fight_round: u32,
    last_gimmick_round: Option<u32>,
    player: Combatant,
    enemy: Combatant,
    wallet: Wallet,
    fragments: FragmentEconomy,
    deck: EventDeck,
    merchant_skill_given: bool,
    ember_stacks: u32,
    stance: Option<Stance>,
    area: Option<&'static str>,
    pending_events: Vec<RandomEvent>,
    opening_events: Vec<GameEvent>,
}

impl Engine<ChaCha8Rng> {
    /// Starts a session seeded from `config.seed`, or from entropy.
    pub fn start_game(config: GameConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Engine<R> {
    /// Starts a session driven by an injected generator.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let mode = if config.starting_wave > STORY_END_WAVE {
            GameMode::Endless
        } else {
            GameMode::Story
        };

        let mut player = Combatant::player(PLAYER_NAME);
        let mut wallet = Wallet {
            coins: config.starting_coins,
            gold: 0,
        };
        for id in &config.starting_items {
            let item = shop::find_item(GameMode::Story, *id).ok_or_else(|| {
                GameError::InvalidArgument(format!(
                    "starting item {:?} is not in the base stock",
                    id
                ))
            })?;
            shop::apply_item_effect(item, &mut player, &mut wallet);
        }

        let wave = config.starting_wave;
        let enemy = combat::spawn_enemy(wave, mode, config.difficulty);
        let fragments = FragmentEconomy::from_config(&config);

        let mut engine = Self {
            config,
            rng,
            phase: GamePhase::InCombat,
            mode,
            outcome: None,
            round_index: 0,
            wave_index: wave,
            fight_round: 0,
            last_gimmick_round: None,
            player,
            enemy,
            wallet,
            fragments,
            deck: EventDeck::default(),
            merchant_skill_given: false,
            ember_stacks: 0,
            stance: None,
            area: None,
            pending_events: Vec::new(),
            opening_events: Vec::new(),
        };

        info!(
            wave,
            mode = ?engine.mode,
            difficulty = ?engine.config.difficulty,
            "game started"
        );
        let mut opening = Vec::new();
        engine.begin_wave(&mut opening);
        engine.opening_events = opening;
        Ok(engine)
    }

    /// Resolves one action. On error nothing about the session has changed.
    pub fn submit_action(&mut self, action: Action) -> Result<ActionReport> {
        if self.phase.is_terminal() {
            return Err(GameError::GameOverState);
        }

        let mut events = Vec::new();
        match action {
            Action::Attack | Action::Heal | Action::UseSkill(_) => {
                self.resolve_round(action, &mut events)?
            }
            Action::BuyItem(id) => self.buy_item(id, &mut events)?,
            Action::ActivateFragment => self.activate_fragment(&mut events)?,
            Action::Continue => self.advance_phase(None, &mut events)?,
            Action::ChooseStance(stance) => self.advance_phase(Some(stance), &mut events)?,
            Action::Retire => self.end_game(GameOutcome::Retired, &mut events),
        }

        Ok(ActionReport {
            events,
            state: self.get_state(),
        })
    }

    pub fn get_state(&self) -> GameSnapshot {
        GameSnapshot {
            round_index: self.round_index,
            wave_index: self.wave_index,
            phase: self.phase,
            mode: self.mode,
            outcome: self.outcome,
            area: self
                .area
                .unwrap_or_else(|| story::area_for_wave(self.wave_index).name),
            player: self.player.clone(),
            enemy: self.enemy.clone(),
            cooldowns: self
                .player
                .skills
                .skills()
                .iter()
                .map(|s| CooldownView {
                    skill: s.id,
                    name: s.id.name(),
                    remaining: s.cooldown_remaining,
                })
                .collect(),
            coins: self.wallet.coins,
            gold: self.wallet.gold,
            fragments: self.fragments.status(self.mode),
            shop: ShopView {
                open: self.is_shop_open(),
                items: shop::shop_catalog(self.mode).to_vec(),
            },
            pending_events: self.pending_events.clone(),
            ember_stacks: self.ember_stacks,
            stance: self.stance,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn wave_index(&self) -> u32 {
        self.wave_index
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn wallet(&self) -> Wallet {
        self.wallet
    }

    pub fn fragments(&self) -> &FragmentEconomy {
        &self.fragments
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Events produced while setting up the first wave.
    pub fn opening_events(&self) -> &[GameEvent] {
        &self.opening_events
    }

    pub fn is_shop_open(&self) -> bool {
        shop::is_shop_open(self.wave_index, self.config.shop_interval)
    }

    // ── Rounds ──────────────────────────────────────────────────

    fn resolve_round(&mut self, action: Action, events: &mut Vec<GameEvent>) -> Result<()> {
        if self.phase != GamePhase::InCombat {
            return Err(GameError::InvalidState(format!(
                "{:?} needs an active fight, but the game is in {:?}",
                action, self.phase
            )));
        }
        if let Action::UseSkill(skill) = action {
            skills::validate_skill_use(&self.player, skill, &self.enemy)?;
        }

        self.player_turn(action, events)?;
        self.round_index += 1;
        self.fight_round += 1;
        debug!(
            round = self.round_index,
            fight_round = self.fight_round,
            ?action,
            enemy_hp = self.enemy.hp,
            "player acted"
        );

        if self.player.is_defeated() {
            self.end_game(GameOutcome::Defeated, events);
            return Ok(());
        }

        // The enemy only acts if the player's action left it standing.
        let enemy_down = self.enemy.is_defeated();
        if !enemy_down {
            self.enemy_turn(events)?;
            if self.player.is_defeated() {
                self.end_game(GameOutcome::Defeated, events);
                return Ok(());
            }
        }

        skills::tick_cooldowns(&mut self.player);
        skills::tick_cooldowns(&mut self.enemy);
        if self.fragments.tick_round() {
            events.push(GameEvent::FragmentCorroded);
        }

        if enemy_down {
            self.on_enemy_defeated(events);
        }
        Ok(())
    }

    fn player_turn(&mut self, action: Action, events: &mut Vec<GameEvent>) -> Result<()> {
        match action {
            Action::Attack => {
                let (damage, empowered) =
                    combat::player_attack(&mut self.player, &mut self.enemy, &mut self.rng)?;
                events.push(GameEvent::PlayerAttacked { damage, empowered });
            }
            Action::Heal => {
                let amount = self.player.heal(HEAL_ACTION_AMOUNT)?;
                events.push(GameEvent::PlayerHealed { amount });
            }
            Action::UseSkill(skill) => {
                let outcome = skills::use_skill(&mut self.player, skill, &mut self.enemy)?;
                events.push(GameEvent::SkillUsed { skill, outcome });
            }
            other => {
                return Err(GameError::InvalidArgument(format!(
                    "{:?} is not a combat action",
                    other
                )))
            }
        }
        Ok(())
    }

    fn enemy_turn(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        if let Some(attack) = combat::enrage_if_due(&mut self.enemy, self.fight_round) {
            debug!(attack, "enemy enraged");
            events.push(GameEvent::EnemyEnraged { attack });
        }

        let acted = combat::enemy_turn(&mut self.enemy, &mut self.player, &mut self.rng)?;
        events.push(GameEvent::EnemyActed(acted));

        if self.mode == GameMode::Endless && !self.player.is_defeated() {
            if let Some(damage) = combat::endless_gimmick(
                &self.enemy,
                &mut self.player,
                self.wave_index,
                self.fight_round,
                self.last_gimmick_round,
                &mut self.rng,
            ) {
                self.last_gimmick_round = Some(self.fight_round);
                events.push(GameEvent::EndlessGimmick {
                    damage,
                    boss: self.enemy.is_boss(),
                });
            }
        }
        Ok(())
    }

    // ── Wave boundaries ─────────────────────────────────────────

    fn on_enemy_defeated(&mut self, events: &mut Vec<GameEvent>) {
        let wave = self.wave_index;
        let was_boss = self.enemy.is_boss();
        let coins = if was_boss {
            COINS_PER_BOSS
        } else {
            COINS_PER_ENEMY
        };
        self.wallet.coins = self.wallet.coins.saturating_add(coins);
        info!(wave, boss = was_boss, round = self.round_index, "enemy defeated");
        events.push(GameEvent::EnemyDefeated {
            name: self.enemy.name.clone(),
            wave,
            boss: was_boss,
            coins,
        });

        self.player.expire_wave_bonus();
        self.player.attack = self.player.attack.saturating_add(WAVE_CLEAR_ATTACK_GAIN);
        self.player.raise_max_hp(WAVE_CLEAR_MAX_HP_GAIN);
        self.player.hp = self.player.max_hp;
        events.push(GameEvent::WaveCleared {
            wave,
            attack_gained: WAVE_CLEAR_ATTACK_GAIN,
            max_hp_gained: WAVE_CLEAR_MAX_HP_GAIN,
        });

        if was_boss {
            let drop = self.fragments.on_boss_defeated(&mut self.rng);
            events.push(GameEvent::FragmentDropped(drop));
            if let Some(gain) =
                combat::grant_ember_fury(&mut self.player, &mut self.ember_stacks, &mut self.rng)
            {
                debug!(stacks = gain.stacks, "ember's fury gained");
                events.push(GameEvent::PassiveGained(gain));
            }
        }

        self.wave_index = self.wave_index.saturating_add(1);

        if was_boss && self.mode == GameMode::Story {
            if let Some(milestone) = story::milestone_for_wave(wave) {
                info!(wave, boss = milestone.boss_name, "story milestone");
                self.phase = GamePhase::StoryIntro {
                    milestone_wave: wave,
                };
                events.push(GameEvent::StoryMilestone {
                    wave,
                    narrative: milestone.narrative,
                });
                if milestone.reward == MilestoneReward::LearnSkill {
                    if let Some(skill) = self.player.skills.learn_random(&mut self.rng) {
                        events.push(GameEvent::SkillLearned(skill));
                    }
                }
                return;
            }
        }

        self.begin_wave(events);
    }

    /// Sets up `wave_index`: area change, random events, then the enemy.
    fn begin_wave(&mut self, events: &mut Vec<GameEvent>) {
        let wave = self.wave_index;
        self.fight_round = 0;
        self.last_gimmick_round = None;

        let area = story::area_for_wave(wave);
        if self.area != Some(area.name) {
            debug!(area = area.name, wave, "entered area");
            self.area = Some(area.name);
            events.push(GameEvent::AreaEntered {
                name: area.name,
                detail: area.detail,
            });
        }

        let fired = roll_wave_events(
            &mut self.deck,
            wave,
            &self.config.event_wave_ranges,
            self.config.second_event_chance,
            &mut self.rng,
        );
        let scale = event_scale(self.mode, wave);
        for (i, event) in fired.iter().enumerate() {
            let effect = apply_event(
                *event,
                EventTarget {
                    player: &mut self.player,
                    wallet: &mut self.wallet,
                    merchant_skill_given: &mut self.merchant_skill_given,
                },
                scale,
                &mut self.rng,
            );
            debug!(?event, wave, "random event");
            events.push(GameEvent::RandomEventFired {
                event: *event,
                effect,
                chained: i > 0,
            });
        }
        self.pending_events = fired;

        if self.player.is_defeated() {
            self.end_game(GameOutcome::Defeated, events);
            return;
        }

        let difficulty = self.config.difficulty;
        if wave % BOSS_WAVE_INTERVAL == 0 {
            self.enemy = combat::spawn_boss(wave, self.mode, difficulty);
            self.phase = GamePhase::BossIntro;
            info!(wave, boss = %self.enemy.name, "boss appeared");
            events.push(GameEvent::BossAppeared {
                wave,
                name: self.enemy.name.clone(),
                max_hp: self.enemy.max_hp,
                attack: self.enemy.attack,
            });
        } else {
            self.enemy = combat::spawn_enemy(wave, self.mode, difficulty);
            self.phase = GamePhase::InCombat;
            debug!(wave, enemy_hp = self.enemy.max_hp, "wave started");
            events.push(GameEvent::WaveStarted {
                wave,
                enemy: self.enemy.name.clone(),
            });
        }
    }

    /// `Continue` and `ChooseStance`.
    fn advance_phase(&mut self, stance: Option<Stance>, events: &mut Vec<GameEvent>) -> Result<()> {
        match self.phase {
            GamePhase::BossIntro if stance.is_none() => {
                self.phase = GamePhase::InCombat;
                Ok(())
            }
            GamePhase::StoryIntro { milestone_wave } if story::is_final_milestone(milestone_wave) => {
                self.close_story(stance.unwrap_or_default(), events);
                Ok(())
            }
            GamePhase::StoryIntro { .. } if stance.is_none() => {
                self.begin_wave(events);
                Ok(())
            }
            GamePhase::Endless if stance.is_none() => {
                info!(wave = self.wave_index, "entering endless waves");
                self.begin_wave(events);
                Ok(())
            }
            phase => Err(GameError::InvalidState(match stance {
                Some(_) => format!("a stance can only be chosen at the final milestone, not in {:?}", phase),
                None => format!("nothing to continue in {:?}", phase),
            })),
        }
    }

    /// Applies the final stance and flips the session into Endless Mode.
    /// Runs when the final StoryIntro is resolved, not when its boss falls.
    fn close_story(&mut self, stance: Stance, events: &mut Vec<GameEvent>) {
        let (attack_gained, max_hp_gained) = match stance {
            Stance::Defend => (0, STANCE_DEFEND_MAX_HP),
            Stance::StrikeBack => (STANCE_STRIKE_ATTACK, 0),
        };
        self.player.attack = self.player.attack.saturating_add(attack_gained);
        self.player.raise_max_hp(max_hp_gained);
        self.stance = Some(stance);
        events.push(GameEvent::StanceChosen {
            stance,
            attack_gained,
            max_hp_gained,
        });

        self.mode = GameMode::Endless;
        self.phase = GamePhase::Endless;
        info!(?stance, "story complete, endless mode unlocked");
        events.push(GameEvent::EndlessUnlocked);
    }

    fn end_game(&mut self, outcome: GameOutcome, events: &mut Vec<GameEvent>) {
        self.phase = GamePhase::GameOver;
        self.outcome = Some(outcome);
        if outcome == GameOutcome::Defeated {
            events.push(GameEvent::PlayerDefeated {
                wave: self.wave_index,
                round: self.round_index,
            });
        }
        info!(
            ?outcome,
            wave = self.wave_index,
            round = self.round_index,
            "game over"
        );
        events.push(GameEvent::GameEnded(outcome));
    }

    // ── Free actions ────────────────────────────────────────────

    fn buy_item(&mut self, id: ItemId, events: &mut Vec<GameEvent>) -> Result<()> {
        if !self.is_shop_open() {
            return Err(GameError::InvalidState(format!(
                "the shop is closed on wave {}",
                self.wave_index
            )));
        }
        let item = shop::purchase(id, self.mode, &mut self.player, &mut self.wallet)?;
        debug!(item = item.name, "item purchased");
        events.push(GameEvent::ItemPurchased {
            item: id,
            currency: item.price.currency,
            price: item.price.amount,
        });
        Ok(())
    }

    fn activate_fragment(&mut self, events: &mut Vec<GameEvent>) -> Result<()> {
        let price = self.fragments.activate(&mut self.wallet.coins, self.mode)?;

        let attack_gained =
            ((self.player.attack as f64 * FRAGMENT_STAT_SURGE).round() as u32).max(1);
        let max_hp_gained =
            ((self.player.max_hp as f64 * FRAGMENT_STAT_SURGE).round() as u32).max(1);
        self.player.attack = self.player.attack.saturating_add(attack_gained);
        self.player.raise_max_hp(max_hp_gained);
        let skill_learned = self.player.skills.learn_random(&mut self.rng);

        events.push(GameEvent::FragmentActivated {
            price,
            successes: self.fragments.successes(),
            attack_gained,
            max_hp_gained,
            skill_learned,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Currency;
    use crate::fragments::FragmentDrop;
    use crate::skills::SkillId;

    fn engine_at(wave: u32) -> Engine {
        let config = GameConfig {
            starting_wave: wave,
            ..GameConfig::seeded(17)
        };
        Engine::start_game(config).unwrap()
    }

    /// Player and enemy that survive anything a few rounds can throw.
    fn make_sturdy(engine: &mut Engine) {
        engine.player.max_hp = 100_000;
        engine.player.hp = 100_000;
        engine.enemy.max_hp = 100_000;
        engine.enemy.hp = 100_000;
    }

    #[test]
    fn test_start_game_begins_on_wave_one() {
        let engine = Engine::start_game(GameConfig::seeded(1)).unwrap();
        let state = engine.get_state();
        assert_eq!(state.wave_index, 1);
        assert_eq!(state.round_index, 0);
        assert_eq!(state.phase, GamePhase::InCombat);
        assert_eq!(state.mode, GameMode::Story);
        assert_eq!(state.coins, STARTING_COINS);
        assert_eq!(state.area, "Meadowfront");
        assert_eq!(state.enemy.max_hp, 112);
        assert!(!state.shop.open);
        assert!(engine
            .opening_events()
            .iter()
            .any(|e| matches!(e, GameEvent::AreaEntered { .. })));
    }

    #[test]
    fn test_starting_items_are_free() {
        let config = GameConfig {
            starting_items: vec![ItemId::BlessedSeed, ItemId::FieldTonic],
            ..GameConfig::seeded(1)
        };
        let engine = Engine::start_game(config).unwrap();
        assert_eq!(engine.player().attack, PLAYER_BASE_ATTACK + 3);
        assert_eq!(engine.player().status.tonic_turns, 3);
        assert_eq!(engine.wallet().coins, STARTING_COINS);
    }

    #[test]
    fn test_endgame_starting_item_rejected() {
        let config = GameConfig {
            starting_items: vec![ItemId::WarBanner],
            ..GameConfig::seeded(1)
        };
        assert!(matches!(
            Engine::start_game(config),
            Err(GameError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_killing_attack_on_wave_four_enters_boss_intro() {
        let mut engine = engine_at(4);
        engine.enemy.hp = 1;
        let report = engine.submit_action(Action::Attack).unwrap();

        assert_eq!(report.state.wave_index, 5);
        assert_eq!(report.state.phase, GamePhase::BossIntro);
        assert_eq!(report.state.round_index, 1);
        assert!(report.state.enemy.is_boss());
        assert!(report.has_event(|e| matches!(e, GameEvent::EnemyDefeated { wave: 4, .. })));
        assert!(!report.has_event(|e| matches!(e, GameEvent::EnemyActed(_))));
    }

    #[test]
    fn test_boss_intro_blocks_combat_until_continue() {
        let mut engine = engine_at(5);
        assert_eq!(engine.phase(), GamePhase::BossIntro);
        assert!(matches!(
            engine.submit_action(Action::Attack),
            Err(GameError::InvalidState(_))
        ));
        assert_eq!(engine.round_index(), 0);
        engine.submit_action(Action::Continue).unwrap();
        assert_eq!(engine.phase(), GamePhase::InCombat);
        assert!(engine.submit_action(Action::Attack).is_ok());
    }

    #[test]
    fn test_continue_in_combat_is_invalid() {
        let mut engine = engine_at(1);
        assert!(matches!(
            engine.submit_action(Action::Continue),
            Err(GameError::InvalidState(_))
        ));
        assert!(matches!(
            engine.submit_action(Action::ChooseStance(Stance::Defend)),
            Err(GameError::InvalidState(_))
        ));
    }

    #[test]
    fn test_failed_action_leaves_state_and_rng_untouched() {
        let mut engine = engine_at(2);
        let before = engine.get_state();
        let mut rng_before = engine.rng.clone();

        assert!(matches!(
            engine.submit_action(Action::UseSkill(SkillId::SapBurst)),
            Err(GameError::InvalidArgument(_))
        ));
        assert!(matches!(
            engine.submit_action(Action::BuyItem(ItemId::BlessedSeed)),
            Err(GameError::InsufficientFunds { .. })
        ));
        assert!(matches!(
            engine.submit_action(Action::ActivateFragment),
            Err(GameError::InsufficientFunds { .. })
        ));

        assert_eq!(engine.get_state(), before);
        assert_eq!(engine.rng.gen::<u64>(), rng_before.gen::<u64>());
    }

    #[test]
    fn test_activate_with_no_coins_is_insufficient_funds() {
        let mut engine = engine_at(1);
        engine.wallet.coins = 0;
        let err = engine.submit_action(Action::ActivateFragment).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientFunds {
                currency: Currency::Coins,
                required: 50,
                available: 0
            }
        );
        assert_eq!(engine.wallet().coins, 0);
    }

    #[test]
    fn test_skill_cooldown_across_rounds() {
        let mut engine = engine_at(1);
        make_sturdy(&mut engine);
        engine.player.skills.learn(SkillId::SapBurst);
        engine.round_index = 9;

        let report = engine.submit_action(Action::UseSkill(SkillId::SapBurst)).unwrap();
        assert_eq!(report.state.round_index, 10);

        for _ in 11..=12 {
            assert!(!engine.player().can_use(SkillId::SapBurst));
            assert!(matches!(
                engine.submit_action(Action::UseSkill(SkillId::SapBurst)),
                Err(GameError::SkillOnCooldown { .. })
            ));
            engine.submit_action(Action::Attack).unwrap();
        }

        assert_eq!(engine.round_index(), 12);
        assert!(engine.player().can_use(SkillId::SapBurst));
        let report = engine.submit_action(Action::UseSkill(SkillId::SapBurst)).unwrap();
        assert_eq!(report.state.round_index, 13);
    }

    #[test]
    fn test_player_defeat_is_terminal() {
        let mut engine = engine_at(1);
        engine.enemy.max_hp = 100_000;
        engine.enemy.hp = 100_000;
        engine.player.max_hp = 1;
        engine.player.hp = 1;

        let report = engine.submit_action(Action::Heal).unwrap();
        assert_eq!(report.state.phase, GamePhase::GameOver);
        assert_eq!(report.state.outcome, Some(GameOutcome::Defeated));
        assert!(report.has_event(|e| matches!(e, GameEvent::PlayerDefeated { .. })));

        assert_eq!(
            engine.submit_action(Action::Attack),
            Err(GameError::GameOverState)
        );
        assert_eq!(
            engine.submit_action(Action::Retire),
            Err(GameError::GameOverState)
        );
    }

    #[test]
    fn test_retire_ends_the_game() {
        let mut engine = engine_at(3);
        let report = engine.submit_action(Action::Retire).unwrap();
        assert_eq!(report.state.outcome, Some(GameOutcome::Retired));
        assert!(engine.is_over());
    }

    #[test]
    fn test_shop_closed_on_odd_wave() {
        let mut engine = engine_at(1);
        engine.wallet.coins = 100;
        assert!(matches!(
            engine.submit_action(Action::BuyItem(ItemId::FieldTonic)),
            Err(GameError::InvalidState(_))
        ));
        assert_eq!(engine.wallet().coins, 100);
    }

    #[test]
    fn test_boss_drop_then_activation_keeps_fragment() {
        let mut engine = engine_at(5);
        engine.submit_action(Action::Continue).unwrap();
        engine.enemy.hp = 1;
        let report = engine.submit_action(Action::Attack).unwrap();
        assert_eq!(
            report.state.phase,
            GamePhase::StoryIntro { milestone_wave: 5 }
        );
        assert_eq!(engine.fragments().count(), 1);

        engine.wallet.coins = 60;
        let attack_before = engine.player().attack;
        engine.submit_action(Action::ActivateFragment).unwrap();
        assert_eq!(engine.wallet().coins, 10);
        assert_eq!(engine.fragments().count(), 1);
        assert_eq!(engine.fragments().successes(), 1);
        assert!(engine.player().attack > attack_before);
    }

    #[test]
    fn test_fragment_corrodes_after_five_idle_rounds() {
        let mut engine = engine_at(5);
        engine.submit_action(Action::Continue).unwrap();
        engine.enemy.hp = 1;
        engine.submit_action(Action::Attack).unwrap();
        engine.submit_action(Action::Continue).unwrap();
        assert_eq!(engine.wave_index(), 6);
        assert_eq!(engine.phase(), GamePhase::InCombat);

        make_sturdy(&mut engine);
        for round in 1..=5 {
            let report = engine.submit_action(Action::Heal).unwrap();
            let corroded = report.has_event(|e| matches!(e, GameEvent::FragmentCorroded));
            assert_eq!(corroded, round == 5, "round {}", round);
        }

        engine.wallet.coins = 1000;
        assert_eq!(
            engine.submit_action(Action::ActivateFragment),
            Err(GameError::NoFragmentAvailable)
        );
        assert_eq!(engine.wallet().coins, 1000);
    }

    #[test]
    fn test_boss_drop_in_the_corroding_round_restores_a_fresh_fragment() {
        let mut engine = engine_at(10);
        engine.fragments.on_boss_defeated(&mut engine.rng);
        for _ in 0..4 {
            assert!(!engine.fragments.tick_round());
        }
        engine.submit_action(Action::Continue).unwrap();
        engine.enemy.hp = 1;

        let report = engine.submit_action(Action::Attack).unwrap();
        let corroded_at = report
            .events
            .iter()
            .position(|e| matches!(e, GameEvent::FragmentCorroded));
        let dropped_at = report.events.iter().position(|e| {
            matches!(
                e,
                GameEvent::FragmentDropped(FragmentDrop::Granted { count: 1 })
            )
        });
        assert!(corroded_at.is_some());
        assert!(corroded_at < dropped_at);

        let frags = report.state.fragments;
        assert_eq!(frags.count, 1);
        assert_eq!(frags.age, 0);
        assert!(!frags.corroded);
    }

    #[test]
    fn test_final_milestone_unlocks_endless_for_good() {
        let mut engine = engine_at(STORY_END_WAVE);
        engine.submit_action(Action::Continue).unwrap();
        engine.enemy.hp = 1;
        engine.submit_action(Action::Attack).unwrap();
        assert_eq!(
            engine.phase(),
            GamePhase::StoryIntro {
                milestone_wave: STORY_END_WAVE
            }
        );
        assert_eq!(engine.mode(), GameMode::Story);

        let max_hp = engine.player().max_hp;
        let report = engine
            .submit_action(Action::ChooseStance(Stance::Defend))
            .unwrap();
        assert!(report.has_event(|e| matches!(e, GameEvent::EndlessUnlocked)));
        assert_eq!(engine.player().max_hp, max_hp + STANCE_DEFEND_MAX_HP);
        assert_eq!(engine.phase(), GamePhase::Endless);
        assert_eq!(engine.mode(), GameMode::Endless);
        assert_eq!(report.state.shop.items[0].id, ItemId::IronbarkBrew);

        engine.submit_action(Action::Continue).unwrap();
        assert_eq!(engine.wave_index(), STORY_END_WAVE + 1);
        assert_eq!(engine.phase(), GamePhase::InCombat);
        assert_eq!(engine.mode(), GameMode::Endless);
    }

    #[test]
    fn test_stance_only_at_final_milestone() {
        let mut engine = engine_at(10);
        engine.submit_action(Action::Continue).unwrap();
        engine.enemy.hp = 1;
        engine.submit_action(Action::Attack).unwrap();
        assert_eq!(
            engine.phase(),
            GamePhase::StoryIntro { milestone_wave: 10 }
        );
        assert!(matches!(
            engine.submit_action(Action::ChooseStance(Stance::StrikeBack)),
            Err(GameError::InvalidState(_))
        ));
        engine.submit_action(Action::Continue).unwrap();
        assert_eq!(engine.wave_index(), 11);
        assert_eq!(engine.get_state().area, "Ashen Fields");
    }

    #[test]
    fn test_starting_past_story_is_endless() {
        let engine = engine_at(31);
        assert_eq!(engine.mode(), GameMode::Endless);
        assert_eq!(engine.get_state().area, "Endless Verge");
    }

    #[test]
    fn test_snapshot_serializes() {
        let engine = engine_at(1);
        let json = serde_json::to_string(&engine.get_state()).unwrap();
        assert!(json.contains("\"wave_index\":1"));
    }
}
