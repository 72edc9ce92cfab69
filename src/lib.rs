//! Farm Defense - turn-based wave combat engine.
//!
//! A player farm fights waves of enemies with attacks, heals and skills,
//! works through a story of boss milestones, and finally holds out in an
//! endless mode. Front ends drive a session through [`core::Engine`] (or the
//! [`core::GameLoop`] trait) and render the snapshots it returns.

pub mod combat;
pub mod core;
pub mod error;
pub mod events;
pub mod fragments;
pub mod shop;
pub mod simulator;
pub mod skills;
pub mod story;

pub use crate::core::{Action, ActionReport, Engine, GameConfig, GameEvent, GameSnapshot};
pub use crate::error::{GameError, Result};
