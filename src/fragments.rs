//! Konami fragment economy.
//!
//! Bosses drop fragments. A held fragment corrodes if it sits unused for too
//! many rounds; activating one costs coins at a price that climbs with every
//! third success. Activation never consumes the fragment itself.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::balance::FRAGMENT_SUCCESSES_PER_TIER;
use crate::core::config::GameConfig;
use crate::core::GameMode;
use crate::error::{Currency, GameError, Result};

/// Result of a boss drop roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FragmentDrop {
    /// A new fragment; `count` is the new total.
    Granted { count: u32 },
    /// Already at the cap; the held fragments' age was refreshed.
    Refreshed { count: u32 },
    Missed,
}

/// Read-only view for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FragmentStatus {
    pub count: u32,
    pub age: u32,
    pub rounds_left: u32,
    pub corroded: bool,
    pub successes: u32,
    pub price: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentEconomy {
    count: u32,
    /// Rounds since the last drop or successful activation.
    age: u32,
    successes: u32,
    corroded: bool,
    lifetime: u32,
    cap: u32,
    base_price: u32,
    drop_chance: f64,
}

impl FragmentEconomy {
    pub fn new(lifetime: u32, cap: u32, base_price: u32, drop_chance: f64) -> Self {
        Self {
            count: 0,
            age: 0,
            successes: 0,
            corroded: false,
            lifetime,
            cap,
            base_price,
            drop_chance,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.fragment_lifetime_rounds,
            config.fragment_cap,
            config.fragment_base_price,
            config.fragment_drop_chance,
        )
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn successes(&self) -> u32 {
        self.successes
    }

    pub fn is_corroded(&self) -> bool {
        self.corroded
    }

    pub fn is_available(&self) -> bool {
        self.count > 0 && !self.corroded
    }

    /// Boss-only drop source. A successful roll resets the age.
    pub fn on_boss_defeated(&mut self, rng: &mut impl Rng) -> FragmentDrop {
        if rng.gen::<f64>() >= self.drop_chance {
            debug!("boss dropped no fragment");
            return FragmentDrop::Missed;
        }
        self.age = 0;
        self.corroded = false;
        if self.count >= self.cap {
            return FragmentDrop::Refreshed { count: self.count };
        }
        self.count += 1;
        info!(count = self.count, "konami fragment obtained");
        FragmentDrop::Granted { count: self.count }
    }

    /// Advances the age by one round. Returns true if the fragments corroded
    /// on this tick.
    pub fn tick_round(&mut self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.age += 1;
        if self.age >= self.lifetime {
            self.count = 0;
            self.age = 0;
            self.corroded = true;
            info!("konami fragment corroded");
            return true;
        }
        false
    }

    /// Price factor: 1 for successes 0-2, 2 for 3-5, and so on.
    pub fn price_factor(&self) -> u32 {
        1 + self.successes / FRAGMENT_SUCCESSES_PER_TIER
    }

    /// Current price in coins. Endless Mode adds one factor tier.
    pub fn activation_price(&self, mode: GameMode) -> u32 {
        let endless_tier = match mode {
            GameMode::Story => 0,
            GameMode::Endless => 1,
        };
        self.base_price
            .saturating_mul(self.price_factor() + endless_tier)
    }

    /// Checks an activation without performing it. Returns the price.
    pub fn validate_activation(&self, coins: u32, mode: GameMode) -> Result<u32> {
        let price = self.activation_price(mode);
        if coins < price {
            return Err(GameError::InsufficientFunds {
                currency: Currency::Coins,
                required: price,
                available: coins,
            });
        }
        if !self.is_available() {
            return Err(GameError::NoFragmentAvailable);
        }
        Ok(price)
    }

    /// Spends the current price from `coins` and records a success.
    /// Returns the price paid.
    pub fn activate(&mut self, coins: &mut u32, mode: GameMode) -> Result<u32> {
        let price = self.validate_activation(*coins, mode)?;
        *coins -= price;
        self.successes += 1;
        self.age = 0;
        info!(price, successes = self.successes, "konami fragment activated");
        Ok(price)
    }

    pub fn status(&self, mode: GameMode) -> FragmentStatus {
        FragmentStatus {
            count: self.count,
            age: self.age,
            rounds_left: if self.is_available() {
                self.lifetime.saturating_sub(self.age)
            } else {
                0
            },
            corroded: self.corroded,
            successes: self.successes,
            price: self.activation_price(mode),
        }
    }
}
