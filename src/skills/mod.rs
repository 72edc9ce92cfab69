//! Skill catalog and cooldown tracking.

mod logic;
mod types;

pub use logic::*;
pub use types::*;
