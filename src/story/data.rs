//! Story milestones, boss names, and areas.

use serde::Serialize;

use crate::core::balance::STORY_END_WAVE;

/// What a milestone hands the player when it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MilestoneReward {
    None,
    /// A random unlearned skill.
    LearnSkill,
    /// Defend or strike back; closes the story.
    StanceChoice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryMilestone {
    pub wave: u32,
    pub boss_name: &'static str,
    pub narrative: &'static str,
    pub reward: MilestoneReward,
}

pub static STORY_MILESTONES: [StoryMilestone; 5] = [
    StoryMilestone {
        wave: 5,
        boss_name: "Gorecrow",
        narrative: "A shadow farmer raids your field. Something darker looms...",
        reward: MilestoneReward::None,
    },
    StoryMilestone {
        wave: 10,
        boss_name: "Scorch Herald",
        narrative: "A cult called Scorch appears, burning farms across the land.",
        reward: MilestoneReward::None,
    },
    StoryMilestone {
        wave: 15,
        boss_name: "Rusthorn",
        narrative: "A rogue survivor teaches you a mysterious skill.",
        reward: MilestoneReward::LearnSkill,
    },
    StoryMilestone {
        wave: 20,
        boss_name: "Emberlord",
        narrative: "The Emberlord falls, and the flames around your barn die down.",
        reward: MilestoneReward::None,
    },
    StoryMilestone {
        wave: STORY_END_WAVE,
        boss_name: "Gravelox",
        narrative: "You uncover the truth. Will you DEFEND or STRIKE BACK?",
        reward: MilestoneReward::StanceChoice,
    },
];

/// Milestone played after the boss of `wave` falls, if any.
pub fn milestone_for_wave(wave: u32) -> Option<&'static StoryMilestone> {
    STORY_MILESTONES.iter().find(|m| m.wave == wave)
}

pub fn is_final_milestone(wave: u32) -> bool {
    wave == STORY_END_WAVE
}

/// Boss name for a boss wave.
pub fn boss_name(wave: u32) -> String {
    match milestone_for_wave(wave) {
        Some(m) => format!("{} (Wave {})", m.boss_name, wave),
        None => format!("Endless Warden (Wave {})", wave),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub first_wave: u32,
    pub last_wave: u32,
    pub name: &'static str,
    pub detail: &'static str,
}

pub static AREAS: [Area; 4] = [
    Area {
        first_wave: 1,
        last_wave: 10,
        name: "Meadowfront",
        detail: "Soft grass, warm wind, and a distant scarecrow.",
    },
    Area {
        first_wave: 11,
        last_wave: 20,
        name: "Ashen Fields",
        detail: "The soil is warm to the touch, embers float in the air.",
    },
    Area {
        first_wave: 21,
        last_wave: 30,
        name: "Ironridge",
        detail: "Rocky furrows and clanging windmills grind the horizon.",
    },
    Area {
        first_wave: 31,
        last_wave: u32::MAX,
        name: "Endless Verge",
        detail: "The land stretches forever, hungry for another wave.",
    },
];

pub fn area_for_wave(wave: u32) -> &'static Area {
    AREAS
        .iter()
        .find(|a| (a.first_wave..=a.last_wave).contains(&wave))
        .unwrap_or(&AREAS[0])
}
