//! Static achievement definitions.

use super::types::{AchievementCategory, AchievementId};

#[derive(Debug, Clone, Copy)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
}

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    // Combat
    AchievementDef {
        id: AchievementId::FirstBlood,
        name: "First Blood",
        description: "Defeat your first enemy",
        category: AchievementCategory::Combat,
    },
    AchievementDef {
        id: AchievementId::Naturalist,
        name: "Naturalist",
        description: "Record five creatures in the bestiary",
        category: AchievementCategory::Combat,
    },
    // Exploration
    AchievementDef {
        id: AchievementId::OriabSerenity,
        name: "Serenity of Oriab",
        description: "Reach Oriab with your mind nearly whole",
        category: AchievementCategory::Exploration,
    },
    AchievementDef {
        id: AchievementId::Cartographer,
        name: "Cartographer",
        description: "Gather three map fragments",
        category: AchievementCategory::Exploration,
    },
    AchievementDef {
        id: AchievementId::Wanderer,
        name: "Wanderer",
        description: "Visit every zone of the Dreamlands",
        category: AchievementCategory::Exploration,
    },
    AchievementDef {
        id: AchievementId::Survivor,
        name: "Survivor",
        description: "Endure one hundred turns",
        category: AchievementCategory::Exploration,
    },
    // Story
    AchievementDef {
        id: AchievementId::KittenRescued,
        name: "Friend of Cats",
        description: "Find the oneiric kitten",
        category: AchievementCategory::Story,
    },
    AchievementDef {
        id: AchievementId::RichDreamer,
        name: "Rich Dreamer",
        description: "Hold 500 gold",
        category: AchievementCategory::Story,
    },
    AchievementDef {
        id: AchievementId::VeilTorn,
        name: "Beyond the Veil",
        description: "Meet an Outer God",
        category: AchievementCategory::Story,
    },
    AchievementDef {
        id: AchievementId::PacifistEnd,
        name: "Gentle Dreamer",
        description: "Finish a run without slaying anything",
        category: AchievementCategory::Story,
    },
    AchievementDef {
        id: AchievementId::CycleBreaker,
        name: "Cycle Breaker",
        description: "Finish a run in New Game+",
        category: AchievementCategory::Story,
    },
];

pub fn get_achievement_def(id: AchievementId) -> Option<&'static AchievementDef> {
    ALL_ACHIEVEMENTS.iter().find(|def| def.id == id)
}
