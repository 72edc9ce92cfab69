//! Shared session trait for front ends and the simulator.
//!
//! Collaborators (a prompt loop, an HTTP handler, the balance simulator) only
//! ever drive a session through this surface.

use rand::Rng;

use super::engine::Engine;
use super::game_events::ActionReport;
use super::game_state::{Action, GamePhase, GameSnapshot};
use crate::error::Result;

pub trait GameLoop {
    /// Resolve one action. Returns what happened.
    fn submit_action(&mut self, action: Action) -> Result<ActionReport>;

    /// Read-only view of the session.
    fn get_state(&self) -> GameSnapshot;

    fn phase(&self) -> GamePhase;

    fn is_over(&self) -> bool {
        self.phase().is_terminal()
    }
}

impl<R: Rng> GameLoop for Engine<R> {
    fn submit_action(&mut self, action: Action) -> Result<ActionReport> {
        Engine::submit_action(self, action)
    }

    fn get_state(&self) -> GameSnapshot {
        Engine::get_state(self)
    }

    fn phase(&self) -> GamePhase {
        Engine::phase(self)
    }
}
