//! Session configuration.
//!
//! Everything that used to be module-level tuning lives here and is handed to
//! the engine once, at construction. A config is scoped to one game session.

use serde::{Deserialize, Serialize};

use super::balance::*;
use crate::error::{GameError, Result};
use crate::shop::ItemId;

/// Enemy stat scaling preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Multiplier applied to enemy HP and attack.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.25,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "normal" | "n" => Some(Difficulty::Normal),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Inclusive wave span on which random events also fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveRange {
    pub first: u32,
    pub last: u32,
}

impl WaveRange {
    pub fn contains(&self, wave: u32) -> bool {
        (self.first..=self.last).contains(&wave)
    }
}

/// Configuration for one game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Scales enemy stats.
    pub difficulty: Difficulty,

    /// Base-stock items applied for free before wave 1.
    pub starting_items: Vec<ItemId>,

    /// Seed for the session RNG (None = entropy).
    pub seed: Option<u64>,

    /// Wave to begin on. Starting past the story begins in Endless Mode.
    pub starting_wave: u32,

    pub starting_coins: u32,

    /// Chance a primary random event chains into a second one.
    pub second_event_chance: f64,

    /// Extra wave spans that trigger random events besides every third wave.
    pub event_wave_ranges: Vec<WaveRange>,

    /// The shop is open on waves divisible by this.
    pub shop_interval: u32,

    pub fragment_drop_chance: f64,
    pub fragment_lifetime_rounds: u32,
    pub fragment_cap: u32,
    pub fragment_base_price: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            starting_items: Vec::new(),
            seed: None,
            starting_wave: 1,
            starting_coins: STARTING_COINS,
            second_event_chance: SECOND_EVENT_CHANCE,
            event_wave_ranges: Vec::new(),
            shop_interval: SHOP_INTERVAL,
            fragment_drop_chance: FRAGMENT_DROP_CHANCE,
            fragment_lifetime_rounds: FRAGMENT_LIFETIME_ROUNDS,
            fragment_cap: FRAGMENT_CAP,
            fragment_base_price: FRAGMENT_BASE_PRICE,
        }
    }
}

impl GameConfig {
    /// Config with a fixed seed, otherwise default.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parse a JSON config; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)
            .map_err(|e| GameError::InvalidArgument(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.starting_wave == 0 {
            return Err(GameError::InvalidArgument(
                "starting_wave must be at least 1".to_string(),
            ));
        }
        if self.starting_wave > MAX_STARTING_WAVE {
            return Err(GameError::InvalidArgument(format!(
                "starting_wave must be at most {}, got {}",
                MAX_STARTING_WAVE, self.starting_wave
            )));
        }
        for (name, chance) in [
            ("second_event_chance", self.second_event_chance),
            ("fragment_drop_chance", self.fragment_drop_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(GameError::InvalidArgument(format!(
                    "{} must be within 0..=1, got {}",
                    name, chance
                )));
            }
        }
        if self.shop_interval == 0 {
            return Err(GameError::InvalidArgument(
                "shop_interval must be at least 1".to_string(),
            ));
        }
        if self.fragment_lifetime_rounds == 0 {
            return Err(GameError::InvalidArgument(
                "fragment_lifetime_rounds must be at least 1".to_string(),
            ));
        }
        if let Some(range) = self.event_wave_ranges.iter().find(|r| r.first > r.last) {
            return Err(GameError::InvalidArgument(format!(
                "event wave range {}..={} is empty",
                range.first, range.last
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{"difficulty":"Hard","seed":7}"#).unwrap();
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.fragment_base_price, FRAGMENT_BASE_PRICE);
        assert_eq!(config.starting_wave, 1);
    }

    #[test]
    fn test_from_json_rejects_bad_chance() {
        let err = GameConfig::from_json(r#"{"second_event_chance":1.5}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_json_rejects_huge_starting_wave() {
        let err = GameConfig::from_json(r#"{"seed":1,"starting_wave":400000000}"#).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(_)));

        let config = GameConfig {
            starting_wave: MAX_STARTING_WAVE,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GameConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_wave_range_is_inclusive() {
        let range = WaveRange { first: 4, last: 6 };
        assert!(!range.contains(3));
        assert!(range.contains(4));
        assert!(range.contains(6));
        assert!(!range.contains(7));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("e"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("nightmare"), None);
    }
}
