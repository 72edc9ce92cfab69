//! Game balance simulator for Monte Carlo analysis.
//!
//! Plays many seeded games with a scripted autoplayer to see how far runs
//! get, where they die, and how the fragment economy is used. Games go
//! through the same engine front ends use, so results match real play.

mod config;
mod policy;
mod report;
mod runner;

pub use config::SimConfig;
pub use policy::choose_action;
pub use report::SimReport;
pub use runner::{play, run_simulation, RunStats};
