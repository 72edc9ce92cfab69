use serde::{Deserialize, Serialize};

use super::data::*;
use crate::combat::Combatant;
use crate::core::GameMode;
use crate::error::{Currency, GameError, Result};

/// Player purse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: u32,
    pub gold: u32,
}

impl Wallet {
    pub fn balance(&self, currency: Currency) -> u32 {
        match currency {
            Currency::Coins => self.coins,
            Currency::Gold => self.gold,
        }
    }

    /// Fails without touching the wallet if the balance is short.
    pub fn spend(&mut self, price: Price) -> Result<()> {
        let available = self.balance(price.currency);
        if available < price.amount {
            return Err(GameError::InsufficientFunds {
                currency: price.currency,
                required: price.amount,
                available,
            });
        }
        match price.currency {
            Currency::Coins => self.coins -= price.amount,
            Currency::Gold => self.gold -= price.amount,
        }
        Ok(())
    }
}

/// Whether the traveling shop visits on `wave`.
pub fn is_shop_open(wave: u32, interval: u32) -> bool {
    interval > 0 && wave % interval == 0
}

/// Checks a purchase without performing it.
pub fn validate_purchase(
    id: ItemId,
    mode: GameMode,
    player: &Combatant,
    wallet: &Wallet,
) -> Result<&'static ShopItem> {
    let item = find_item(mode, id).ok_or_else(|| {
        GameError::InvalidArgument(format!("{:?} is not stocked in {:?} mode", id, mode))
    })?;
    if matches!(item.effect, ItemEffect::Tonic { .. }) && player.status.tonic_turns > 0 {
        return Err(GameError::InvalidState(
            "a tonic is still in effect".to_string(),
        ));
    }
    let available = wallet.balance(item.price.currency);
    if available < item.price.amount {
        return Err(GameError::InsufficientFunds {
            currency: item.price.currency,
            required: item.price.amount,
            available,
        });
    }
    Ok(item)
}

/// Buys one item from the active stock and applies it.
pub fn purchase(
    id: ItemId,
    mode: GameMode,
    player: &mut Combatant,
    wallet: &mut Wallet,
) -> Result<&'static ShopItem> {
    let item = validate_purchase(id, mode, player, wallet)?;
    wallet.spend(item.price)?;
    apply_item_effect(item, player, wallet);
    Ok(item)
}

/// Applies an item's effect without charging for it.
pub fn apply_item_effect(item: &ShopItem, player: &mut Combatant, wallet: &mut Wallet) {
    match item.effect {
        ItemEffect::Tonic { reduction, turns } => {
            player.status.tonic_reduction = reduction;
            player.status.tonic_turns = turns;
        }
        ItemEffect::WaveAttack(bonus) => player.grant_wave_attack(bonus),
        ItemEffect::GoldGrant(gold) => wallet.gold = wallet.gold.saturating_add(gold),
        ItemEffect::Seed { attack, max_hp } => {
            player.attack = player.attack.saturating_add(attack);
            player.raise_max_hp(max_hp);
        }
    }
}
