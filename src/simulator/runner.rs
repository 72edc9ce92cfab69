//! Main simulation runner.
//!
//! Every game is played through the public engine surface (`GameLoop`), so
//! the numbers reflect real game mechanics. Statistics are collected from the
//! emitted `GameEvent`s.

use serde::Serialize;
use tracing::{debug, warn};

use super::config::SimConfig;
use super::policy::choose_action;
use super::report::SimReport;
use crate::core::{Action, Engine, GameEvent, GameLoop, GameMode, GameOutcome, GamePhase};
use crate::error::Result;

/// Outcome of one simulated game.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub final_wave: u32,
    pub final_round: u32,
    pub kills: u32,
    pub bosses_defeated: u32,
    pub story_cleared: bool,
    pub reached_endless: bool,
    /// Area the player fell in; None if the run retired or hit a cap.
    pub death_area: Option<String>,
    pub fragment_activations: u32,
    pub fragments_corroded: u32,
    pub items_bought: u32,
    pub skills_learned: u32,
    /// Stopped by `max_wave` or `max_rounds_per_run` rather than by dying.
    pub capped: bool,
}

impl RunStats {
    fn process(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::EnemyDefeated { boss, .. } => {
                    self.kills += 1;
                    if *boss {
                        self.bosses_defeated += 1;
                    }
                }
                GameEvent::EndlessUnlocked => self.story_cleared = true,
                GameEvent::FragmentActivated { skill_learned, .. } => {
                    self.fragment_activations += 1;
                    if skill_learned.is_some() {
                        self.skills_learned += 1;
                    }
                }
                GameEvent::FragmentCorroded => self.fragments_corroded += 1,
                GameEvent::ItemPurchased { .. } => self.items_bought += 1,
                GameEvent::SkillLearned(_) => self.skills_learned += 1,
                GameEvent::RandomEventFired { effect, .. } if effect.skill_learned.is_some() => {
                    self.skills_learned += 1
                }
                _ => {}
            }
        }
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let game = config.game_for_run(run_idx);
        let mut engine = match Engine::start_game(game) {
            Ok(engine) => engine,
            Err(e) => {
                warn!(run = run_idx, error = %e, "could not start game");
                continue;
            }
        };

        let mut stats = RunStats::default();
        stats.process(engine.opening_events());
        if let Err(e) = play(&mut engine, config, &mut stats) {
            warn!(run = run_idx, error = %e, "run aborted");
        }

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Wave {}, Round {}, Kills {}, Bosses {}, Endless {}, Died in {}",
                run_idx + 1,
                config.num_runs,
                stats.final_wave,
                stats.final_round,
                stats.kills,
                stats.bosses_defeated,
                stats.reached_endless,
                stats.death_area.as_deref().unwrap_or("-"),
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one game to the end with the scripted policy.
pub fn play(game: &mut impl GameLoop, config: &SimConfig, stats: &mut RunStats) -> Result<()> {
    loop {
        let state = game.get_state();
        stats.final_wave = state.wave_index;
        stats.final_round = state.round_index;
        stats.reached_endless |= state.mode == GameMode::Endless;

        if game.is_over() {
            if state.outcome == Some(GameOutcome::Defeated) {
                stats.death_area = Some(state.area.to_string());
            }
            return Ok(());
        }

        if state.wave_index > config.max_wave || state.round_index >= config.max_rounds_per_run {
            stats.capped = true;
            let report = game.submit_action(Action::Retire)?;
            stats.process(&report.events);
            continue;
        }

        let action = choose_action(&state);
        let report = match game.submit_action(action) {
            Ok(report) => report,
            Err(e) => {
                debug!(?action, error = %e, "policy action rejected");
                let fallback = if state.phase == GamePhase::InCombat {
                    Action::Attack
                } else {
                    Action::Continue
                };
                game.submit_action(fallback)?
            }
        };
        stats.process(&report.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_simulation_is_reproducible() {
        let config = SimConfig::quick(7);
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.run_stats, b.run_stats);
        assert_eq!(a.num_runs, config.num_runs);
    }

    #[test]
    fn test_every_run_terminates() {
        let config = SimConfig {
            num_runs: 5,
            max_wave: 12,
            ..SimConfig::quick(3)
        };
        let report = run_simulation(&config);
        for run in &report.run_stats {
            assert!(run.final_wave >= 1);
            assert!(run.capped || run.death_area.is_some());
            assert!(run.final_wave <= config.max_wave + 1);
        }
    }
}
