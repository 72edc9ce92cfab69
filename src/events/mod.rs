//! Random events: catalog, non-repeating draws, and their effects.

mod data;
mod logic;

pub use data::*;
pub use logic::*;
