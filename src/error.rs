//! Error types for the combat engine.

use serde::Serialize;
use thiserror::Error;

use crate::skills::SkillId;

/// Result type alias using [`GameError`].
pub type Result<T> = std::result::Result<T, GameError>;

/// Which purse a price is charged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Currency {
    Coins,
    Gold,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Coins => write!(f, "coins"),
            Currency::Gold => write!(f, "gold"),
        }
    }
}

/// Every way a call into the engine can be refused.
///
/// None of these are fatal. A failed action leaves the engine exactly as it
/// was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// Malformed amount, unknown id, or an id not valid in this context.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Acting on a defeated combatant or in the wrong phase.
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// The skill still has rounds left on its cooldown.
    #[error("{skill:?} is on cooldown for {remaining} more rounds")]
    SkillOnCooldown { skill: SkillId, remaining: u32 },

    /// Not enough currency for a purchase or activation.
    #[error("Insufficient funds: need {required} {currency}, have {available}")]
    InsufficientFunds {
        currency: Currency,
        required: u32,
        available: u32,
    },

    /// No usable Konami fragment is held.
    #[error("No Konami fragment available")]
    NoFragmentAvailable,

    /// The session has ended; no further actions are accepted.
    #[error("The game is over")]
    GameOverState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_message_names_currency() {
        let err = GameError::InsufficientFunds {
            currency: Currency::Gold,
            required: 2,
            available: 0,
        };
        assert_eq!(err.to_string(), "Insufficient funds: need 2 gold, have 0");
    }

    #[test]
    fn test_cooldown_message() {
        let err = GameError::SkillOnCooldown {
            skill: SkillId::SapBurst,
            remaining: 2,
        };
        assert!(err.to_string().contains("2 more rounds"));
    }
}
