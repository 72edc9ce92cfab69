//! Story progression integration tests
//!
//! Areas, boss milestones, and the hand-over from the story to Endless Mode,
//! checked against the data tables and against live sessions.

use farm_defense::core::balance::{BOSS_WAVE_INTERVAL, STORY_END_WAVE};
use farm_defense::core::{Action, Engine, GameConfig, GameEvent, GameMode, GamePhase, Stance};
use farm_defense::error::GameError;
use farm_defense::simulator::choose_action;
use farm_defense::story::{
    area_for_wave, boss_name, is_final_milestone, milestone_for_wave, MilestoneReward, AREAS,
    STORY_MILESTONES,
};

// ============================================================================
// Data tables
// ============================================================================

#[test]
fn test_areas_cover_every_wave_without_gaps() {
    assert_eq!(AREAS[0].first_wave, 1);
    for pair in AREAS.windows(2) {
        assert_eq!(pair[0].last_wave + 1, pair[1].first_wave);
    }
    assert_eq!(AREAS[AREAS.len() - 1].last_wave, u32::MAX);

    assert_eq!(area_for_wave(10).name, "Meadowfront");
    assert_eq!(area_for_wave(11).name, "Ashen Fields");
    assert_eq!(area_for_wave(30).name, "Ironridge");
    assert_eq!(area_for_wave(31).name, "Endless Verge");
    assert_eq!(area_for_wave(10_000).name, "Endless Verge");
}

#[test]
fn test_only_the_last_milestone_offers_a_stance() {
    let stance_waves: Vec<u32> = STORY_MILESTONES
        .iter()
        .filter(|m| m.reward == MilestoneReward::StanceChoice)
        .map(|m| m.wave)
        .collect();
    assert_eq!(stance_waves, vec![STORY_END_WAVE]);
    assert!(is_final_milestone(STORY_END_WAVE));
    assert!(!is_final_milestone(20));

    assert_eq!(
        milestone_for_wave(15).map(|m| m.reward),
        Some(MilestoneReward::LearnSkill)
    );
    assert!(milestone_for_wave(30).is_none());
    assert!(milestone_for_wave(7).is_none());
}

#[test]
fn test_boss_names_carry_the_wave() {
    assert_eq!(boss_name(5), "Gorecrow (Wave 5)");
    assert!(boss_name(35).contains("Wave 35"));
}

// ============================================================================
// Live sessions
// ============================================================================

#[test]
fn test_boss_waves_open_with_an_intro() {
    for wave in [5, 10, 20, 35] {
        let config = GameConfig {
            starting_wave: wave,
            ..GameConfig::seeded(u64::from(wave))
        };
        let engine = Engine::start_game(config).unwrap();
        let state = engine.get_state();
        assert_eq!(state.phase, GamePhase::BossIntro, "wave {}", wave);
        assert!(state.enemy.is_boss());
        assert!(engine
            .opening_events()
            .iter()
            .any(|e| matches!(e, GameEvent::BossAppeared { wave: w, .. } if *w == wave)));
    }
}

#[test]
fn test_stance_outside_final_milestone_is_rejected() {
    let config = GameConfig {
        starting_wave: 4,
        ..GameConfig::seeded(12)
    };
    let mut engine = Engine::start_game(config).unwrap();
    let before = engine.get_state();

    let err = engine
        .submit_action(Action::ChooseStance(Stance::Defend))
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidState(_)));
    assert_eq!(engine.get_state(), before);
}

#[test]
fn test_story_events_follow_the_tables() {
    for seed in 0..4 {
        let config = GameConfig {
            starting_wave: 19,
            starting_coins: 300,
            ..GameConfig::seeded(seed)
        };
        let mut engine = Engine::start_game(config).unwrap();
        let mut area = engine.get_state().area;

        for _ in 0..600 {
            if engine.is_over() {
                break;
            }
            let state = engine.get_state();
            let report = match engine.submit_action(choose_action(&state)) {
                Ok(report) => report,
                Err(_) if state.phase == GamePhase::InCombat => {
                    engine.submit_action(Action::Attack).unwrap()
                }
                Err(_) => engine.submit_action(Action::Continue).unwrap(),
            };

            for event in &report.events {
                match event {
                    GameEvent::StoryMilestone { wave, .. } => {
                        assert!(milestone_for_wave(*wave).is_some());
                        assert_eq!(wave % BOSS_WAVE_INTERVAL, 0);
                        assert_eq!(state.mode, GameMode::Story);
                    }
                    GameEvent::AreaEntered { name, .. } => {
                        assert_ne!(*name, area);
                        assert_eq!(*name, area_for_wave(report.state.wave_index).name);
                        area = *name;
                    }
                    GameEvent::EndlessUnlocked => {
                        assert_eq!(report.state.mode, GameMode::Endless);
                        assert_eq!(report.state.phase, GamePhase::Endless);
                        assert_eq!(report.state.stance, Some(Stance::StrikeBack));
                        assert_eq!(report.state.wave_index, STORY_END_WAVE + 1);
                    }
                    _ => {}
                }
            }
        }
    }
}
