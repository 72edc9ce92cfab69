//! Session engine, configuration, and balance tuning.

pub mod balance;
pub mod config;
pub mod engine;
pub mod game_events;
pub mod game_loop;
pub mod game_state;

pub use config::{Difficulty, GameConfig, WaveRange};
pub use engine::Engine;
pub use game_events::{ActionReport, GameEvent};
pub use game_loop::GameLoop;
pub use game_state::*;
