//! Achievement identifiers and unlock checks.

use crate::character::player::Player;
use crate::core::constants::*;
use crate::registry::Registry;

/// Achievement categories for organization in the pause screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementCategory {
    Combat,
    Exploration,
    Story,
}

impl AchievementCategory {
    pub fn name(&self) -> &'static str {
        match self {
            AchievementCategory::Combat => "Combat",
            AchievementCategory::Exploration => "Exploration",
            AchievementCategory::Story => "Story",
        }
    }
}

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    FirstBlood,
    KittenRescued,
    RichDreamer,
    OriabSerenity,
    Naturalist,
    Cartographer,
    Wanderer,
    Survivor,
    VeilTorn,
    PacifistEnd,
    CycleBreaker,
}

impl AchievementId {
    pub const ALL: [AchievementId; 11] = [
        AchievementId::FirstBlood,
        AchievementId::KittenRescued,
        AchievementId::RichDreamer,
        AchievementId::OriabSerenity,
        AchievementId::Naturalist,
        AchievementId::Cartographer,
        AchievementId::Wanderer,
        AchievementId::Survivor,
        AchievementId::VeilTorn,
        AchievementId::PacifistEnd,
        AchievementId::CycleBreaker,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AchievementId::FirstBlood => "first_blood",
            AchievementId::KittenRescued => "kitten_rescued",
            AchievementId::RichDreamer => "rich_dreamer",
            AchievementId::OriabSerenity => "oriab_serenity",
            AchievementId::Naturalist => "naturalist",
            AchievementId::Cartographer => "cartographer",
            AchievementId::Wanderer => "wanderer",
            AchievementId::Survivor => "survivor",
            AchievementId::VeilTorn => "veil_torn",
            AchievementId::PacifistEnd => "pacifist_end",
            AchievementId::CycleBreaker => "cycle_breaker",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }
}

impl Player {
    /// Records an achievement. Returns true if it was new.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        if self.achievements.contains(&id) {
            return false;
        }
        self.achievements.push(id);
        log::info!("Achievement unlocked: {}", id.id());
        true
    }
}

/// Unlocks every state-based achievement the player now qualifies for and
/// returns the newly unlocked ones.
pub fn check_progress(player: &mut Player, registry: &Registry) -> Vec<AchievementId> {
    let all_zones_visited = registry
        .zones()
        .iter()
        .all(|z| player.has_visited(z.id));
    let candidates = [
        (AchievementId::KittenRescued, player.has_item("dream_kitten")),
        (AchievementId::RichDreamer, player.gold >= RICH_DREAMER_GOLD),
        (
            AchievementId::OriabSerenity,
            player.zone == "oriab_sea" && player.sanity >= ORIAB_SERENITY_SANITY,
        ),
        (
            AchievementId::Naturalist,
            player.bestiary.len() >= NATURALIST_BESTIARY,
        ),
        (
            AchievementId::Cartographer,
            player.map_fragments >= CARTOGRAPHER_FRAGMENTS,
        ),
        (AchievementId::Wanderer, all_zones_visited),
        (AchievementId::Survivor, player.turn >= SURVIVOR_TURNS),
    ];
    candidates
        .into_iter()
        .filter(|(_, earned)| *earned)
        .filter_map(|(id, _)| player.unlock(id).then_some(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_is_idempotent() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        assert!(player.unlock(AchievementId::FirstBlood));
        assert!(!player.unlock(AchievementId::FirstBlood));
        assert_eq!(player.achievements.len(), 1);
    }

    #[test]
    fn test_check_progress_thresholds() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        assert!(check_progress(&mut player, &registry).is_empty());

        player.gold = 500;
        player.map_fragments = 3;
        let unlocked = check_progress(&mut player, &registry);
        assert_eq!(
            unlocked,
            vec![AchievementId::RichDreamer, AchievementId::Cartographer]
        );
        assert!(check_progress(&mut player, &registry).is_empty());
    }

    #[test]
    fn test_oriab_serenity_needs_both() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        player.zone = "oriab_sea";
        player.sanity = 89;
        assert!(check_progress(&mut player, &registry).is_empty());
        player.sanity = 90;
        assert_eq!(
            check_progress(&mut player, &registry),
            vec![AchievementId::OriabSerenity]
        );
    }

    #[test]
    fn test_ids_roundtrip() {
        for id in AchievementId::ALL {
            assert_eq!(AchievementId::from_id(id.id()), Some(id));
        }
    }
}
