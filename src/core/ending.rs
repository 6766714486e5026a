//! How a run ends, decided purely from the final player state.

use crate::character::flags::StoryFlag;
use crate::character::player::Player;
use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// Sanity gave out.
    Madness,
    /// Reached Kadath whole, with the cats and all three seals.
    True,
    Dreamer,
    Fractured,
    /// Ended elsewhere after seeing Nyarlathotep.
    CrawlingChaos,
    Abandoned,
}

impl Ending {
    pub fn title(&self) -> &'static str {
        match self {
            Ending::Madness => "Devoured by Chaos",
            Ending::True => "The Dreamer's Apotheosis",
            Ending::Dreamer => "The Awakening",
            Ending::Fractured => "The Curse of Kadath",
            Ending::CrawlingChaos => "The Encounter",
            Ending::Abandoned => "The Journey Ends",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Ending::Madness => "Your mind is gone. Nyarlathotep claims what is left of you.",
            Ending::True => "The gods of Kadath receive you, and you dream forever.",
            Ending::Dreamer => "The gods ignore you. You wake in your own bed.",
            Ending::Fractured => "Kadath is a prison, and you wander it eternally.",
            Ending::CrawlingChaos => "You saw the Crawling Chaos and lived. You will never be the same.",
            Ending::Abandoned => "Your quest is over, for now.",
        }
    }
}

/// Picks the ending. Madness wins over everything else.
pub fn ending_for(player: &Player) -> Ending {
    if player.sanity <= 0 {
        return Ending::Madness;
    }
    if player.zone == FINAL_ZONE {
        if player.sanity > TRUE_ENDING_SANITY
            && player.has_flag(StoryFlag::CatsAllied)
            && player.lunar_seals() >= TRUE_ENDING_SEALS
        {
            Ending::True
        } else if player.sanity > DREAMER_ENDING_SANITY {
            Ending::Dreamer
        } else {
            Ending::Fractured
        }
    } else if player.has_flag(StoryFlag::NyarlathotepSeen) {
        Ending::CrawlingChaos
    } else {
        Ending::Abandoned
    }
}

/// Statistics shown when a run ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ending: Ending,
    pub level: u32,
    pub turns: u64,
    pub quests_completed: usize,
    pub bestiary_size: usize,
}

impl RunSummary {
    pub fn of(player: &Player) -> Self {
        Self {
            ending: ending_for(player),
            level: player.level,
            turns: player.turn,
            quests_completed: player.completed_quests.len(),
            bestiary_size: player.bestiary.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    fn at_kadath(registry: &Registry) -> Player {
        let mut player = Player::new(registry);
        player.zone = "kadath";
        player
    }

    #[test]
    fn test_madness_takes_priority() {
        let registry = Registry::standard();
        let mut player = at_kadath(&registry);
        player.sanity = 0;
        player.set_flag(StoryFlag::CatsAllied);
        assert_eq!(ending_for(&player), Ending::Madness);
    }

    #[test]
    fn test_true_ending_needs_everything() {
        let registry = Registry::standard();
        let mut player = at_kadath(&registry);
        player.set_flag(StoryFlag::CatsAllied);
        for seal in LUNAR_SEALS {
            player.add_item(registry.item(seal).unwrap().clone());
        }
        assert_eq!(ending_for(&player), Ending::True);

        player.sanity = 70;
        assert_eq!(ending_for(&player), Ending::Dreamer);

        player.sanity = 90;
        player.remove_item("seal_of_leng");
        assert_eq!(ending_for(&player), Ending::Dreamer);
    }

    #[test]
    fn test_kadath_thresholds() {
        let registry = Registry::standard();
        let mut player = at_kadath(&registry);
        player.sanity = 51;
        assert_eq!(ending_for(&player), Ending::Dreamer);
        player.sanity = 50;
        assert_eq!(ending_for(&player), Ending::Fractured);
    }

    #[test]
    fn test_endings_elsewhere() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        assert_eq!(ending_for(&player), Ending::Abandoned);
        player.set_flag(StoryFlag::NyarlathotepSeen);
        assert_eq!(ending_for(&player), Ending::CrawlingChaos);
    }

    #[test]
    fn test_run_summary() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        player.level = 4;
        player.turn = 321;
        player.completed_quests.push("cats_favor");
        player.bestiary.insert("zoog", 2);
        player.bestiary.insert("ghoul", 0);
        let summary = RunSummary::of(&player);
        assert_eq!(summary.ending, Ending::Abandoned);
        assert_eq!(summary.level, 4);
        assert_eq!(summary.turns, 321);
        assert_eq!(summary.quests_completed, 1);
        assert_eq!(summary.bestiary_size, 2);
    }
}
