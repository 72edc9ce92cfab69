//! Simulation configuration.

use crate::core::GameConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulated games
    pub num_runs: u32,

    /// Base seed; run `i` plays with `seed + i` (None = entropy per run)
    pub seed: Option<u64>,

    /// Session settings handed to every game (its own seed is overridden)
    pub game: GameConfig,

    /// The autoplayer retires once this wave is reached
    pub max_wave: u32,

    /// Safety cap on rounds per game
    pub max_rounds_per_run: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 500,
            seed: None,
            game: GameConfig::default(),
            max_wave: 40,
            max_rounds_per_run: 5_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small seeded batch, for tests and smoke checks.
    pub fn quick(seed: u64) -> Self {
        Self {
            num_runs: 20,
            seed: Some(seed),
            max_wave: 30,
            verbosity: 0,
            ..Default::default()
        }
    }

    /// Session config for run number `run_idx`.
    pub fn game_for_run(&self, run_idx: u32) -> GameConfig {
        GameConfig {
            seed: self.seed.map(|s| s.wrapping_add(run_idx as u64)),
            ..self.game.clone()
        }
    }
}
