//! Traveling shop: stock tables and purchases.

mod data;
mod logic;

pub use data::*;
pub use logic::*;
