//! Shop stock definitions.

use serde::{Deserialize, Serialize};

use crate::core::GameMode;
use crate::error::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemId {
    FieldTonic,
    AttackTonic,
    GoldPouch,
    BlessedSeed,
    IronbarkBrew,
    WarBanner,
    GoldenRelic,
    AncientSeed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Price {
    pub currency: Currency,
    pub amount: u32,
}

impl Price {
    const fn coins(amount: u32) -> Self {
        Self {
            currency: Currency::Coins,
            amount,
        }
    }

    const fn gold(amount: u32) -> Self {
        Self {
            currency: Currency::Gold,
            amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ItemEffect {
    /// Cut incoming damage by `reduction` for the next `turns` hits.
    Tonic { reduction: f64, turns: u32 },
    /// Extra attack until the wave ends.
    WaveAttack(u32),
    /// Convert coins into gold.
    GoldGrant(u32),
    /// Permanent attack and max HP.
    Seed { attack: u32, max_hp: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopItem {
    pub id: ItemId,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Price,
    pub effect: ItemEffect,
}

pub static BASE_STOCK: [ShopItem; 4] = [
    ShopItem {
        id: ItemId::FieldTonic,
        name: "Field Tonic",
        description: "Reduce incoming damage by 30% for 3 turns",
        price: Price::coins(8),
        effect: ItemEffect::Tonic {
            reduction: 0.30,
            turns: 3,
        },
    },
    ShopItem {
        id: ItemId::AttackTonic,
        name: "Attack Tonic",
        description: "+12 attack for this wave",
        price: Price::coins(6),
        effect: ItemEffect::WaveAttack(12),
    },
    ShopItem {
        id: ItemId::GoldPouch,
        name: "Gold Pouch",
        description: "Gain 1 gold",
        price: Price::coins(10),
        effect: ItemEffect::GoldGrant(1),
    },
    ShopItem {
        id: ItemId::BlessedSeed,
        name: "Blessed Seed",
        description: "Permanently +3 attack and +10 max HP",
        price: Price::gold(1),
        effect: ItemEffect::Seed {
            attack: 3,
            max_hp: 10,
        },
    },
];

/// Replaces the base stock for good once Endless Mode begins.
pub static ENDGAME_STOCK: [ShopItem; 4] = [
    ShopItem {
        id: ItemId::IronbarkBrew,
        name: "Ironbark Brew",
        description: "Reduce incoming damage by 45% for 2 turns",
        price: Price::coins(10),
        effect: ItemEffect::Tonic {
            reduction: 0.45,
            turns: 2,
        },
    },
    ShopItem {
        id: ItemId::WarBanner,
        name: "War Banner",
        description: "+20 attack for this wave",
        price: Price::coins(12),
        effect: ItemEffect::WaveAttack(20),
    },
    ShopItem {
        id: ItemId::GoldenRelic,
        name: "Golden Relic",
        description: "Gain 2 gold",
        price: Price::coins(15),
        effect: ItemEffect::GoldGrant(2),
    },
    ShopItem {
        id: ItemId::AncientSeed,
        name: "Ancient Seed",
        description: "Permanently +8 attack and +20 max HP",
        price: Price::gold(2),
        effect: ItemEffect::Seed {
            attack: 8,
            max_hp: 20,
        },
    },
];

/// The active stock for a mode.
pub fn shop_catalog(mode: GameMode) -> &'static [ShopItem] {
    match mode {
        GameMode::Story => &BASE_STOCK,
        GameMode::Endless => &ENDGAME_STOCK,
    }
}

/// Looks an item up in the stock for `mode`.
pub fn find_item(mode: GameMode, id: ItemId) -> Option<&'static ShopItem> {
    shop_catalog(mode).iter().find(|item| item.id == id)
}
