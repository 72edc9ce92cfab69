//! Story progression data.
//!
//! The story runs through five boss milestones; the last one hands the game
//! over to Endless Mode.

mod data;

pub use data::*;
