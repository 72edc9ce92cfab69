//! Combatants, attack rolls, enemy spawning, and enemy turns.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
