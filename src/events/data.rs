//! Random event catalog.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RandomEvent {
    MysteriousMerchant,
    LightningStorm,
    LostCowReturns,
    StrangeSeedSprouts,
    Trap,
    WanderingBard,
    LocustSwarm,
    IrrigationBoom,
    MoonlitHarvest,
    SuddenHail,
    RustyPitchfork,
    ThornyBrambles,
    ButterflyBloom,
    SoggyFurrows,
    CinderDrift,
    CharredFence,
    GravelGust,
    RustedPlow,
}

impl RandomEvent {
    pub fn name(self) -> &'static str {
        match self {
            RandomEvent::MysteriousMerchant => "Mysterious Merchant",
            RandomEvent::LightningStorm => "Lightning Storm",
            RandomEvent::LostCowReturns => "Lost Cow Returns",
            RandomEvent::StrangeSeedSprouts => "Strange Seed Sprouts",
            RandomEvent::Trap => "A Trap",
            RandomEvent::WanderingBard => "Wandering Bard",
            RandomEvent::LocustSwarm => "Locust Swarm",
            RandomEvent::IrrigationBoom => "Irrigation Boom",
            RandomEvent::MoonlitHarvest => "Moonlit Harvest",
            RandomEvent::SuddenHail => "Sudden Hail",
            RandomEvent::RustyPitchfork => "Rusty Pitchfork",
            RandomEvent::ThornyBrambles => "Thorny Brambles",
            RandomEvent::ButterflyBloom => "Butterfly Bloom",
            RandomEvent::SoggyFurrows => "Soggy Furrows",
            RandomEvent::CinderDrift => "Cinder Drift",
            RandomEvent::CharredFence => "Charred Fence",
            RandomEvent::GravelGust => "Gravel Gust",
            RandomEvent::RustedPlow => "Rusted Plow",
        }
    }

    /// Events that only hurt.
    pub fn is_hazard(self) -> bool {
        BAD_EVENTS.contains(&self)
    }
}

/// Drawn on any event wave.
pub const GLOBAL_EVENTS: [RandomEvent; 9] = [
    RandomEvent::MysteriousMerchant,
    RandomEvent::LightningStorm,
    RandomEvent::LostCowReturns,
    RandomEvent::StrangeSeedSprouts,
    RandomEvent::Trap,
    RandomEvent::WanderingBard,
    RandomEvent::LocustSwarm,
    RandomEvent::IrrigationBoom,
    RandomEvent::MoonlitHarvest,
];

pub const BAD_EVENTS: [RandomEvent; 3] = [
    RandomEvent::SuddenHail,
    RandomEvent::RustyPitchfork,
    RandomEvent::ThornyBrambles,
];

/// Area-specific additions: (first wave, last wave, events).
pub const AREA_EVENTS: [(u32, u32, [RandomEvent; 2]); 3] = [
    (
        1,
        10,
        [RandomEvent::ButterflyBloom, RandomEvent::SoggyFurrows],
    ),
    (11, 20, [RandomEvent::CinderDrift, RandomEvent::CharredFence]),
    (21, 30, [RandomEvent::GravelGust, RandomEvent::RustedPlow]),
];

/// Every event that can be drawn on `wave`.
pub fn event_pool(wave: u32) -> Vec<RandomEvent> {
    let mut pool: Vec<RandomEvent> = GLOBAL_EVENTS.iter().chain(BAD_EVENTS.iter()).copied().collect();
    if let Some((_, _, extra)) = AREA_EVENTS
        .iter()
        .find(|(first, last, _)| (*first..=*last).contains(&wave))
    {
        pool.extend_from_slice(extra);
    }
    pool
}
