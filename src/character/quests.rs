//! Quest definitions and the quest state machine.
//!
//! A quest only ever moves inactive -> active -> completed.

use rand::Rng;

use super::flags::StoryFlag;
use super::player::{Player, Stat};
use super::progression::Skill;
use super::spells::Spell;
use crate::core::constants::MAP_FRAGMENT;
use crate::error::ActionError;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Hold the item when reporting back. The item is kept.
    Possess(&'static str),
    /// Hand the item over when reporting back.
    Deliver(&'static str),
    /// Set foot in the zone.
    Explore(&'static str),
    /// Use the item while standing in the zone. The item is consumed.
    UseAt {
        item: &'static str,
        zone: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reward {
    pub gold: i32,
    pub xp: u32,
    pub item: Option<&'static str>,
    pub flag: Option<StoryFlag>,
    /// Flag cleared on completion, for quests that betray another faction.
    pub clears: Option<StoryFlag>,
    pub skill: Option<Skill>,
    pub spell: Option<Spell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    pub id: &'static str,
    pub title: &'static str,
    pub giver: &'static str,
    pub zone: &'static str,
    pub objective: Objective,
    pub reward: Reward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestState {
    Inactive,
    Active,
    Completed,
}

pub fn all_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: "cats_favor",
            title: "The Favor of the Cats",
            giver: "menes",
            zone: "ulthar",
            objective: Objective::Possess("dream_kitten"),
            reward: Reward {
                gold: 50,
                xp: 80,
                flag: Some(StoryFlag::CatsAllied),
                ..Reward::default()
            },
        },
        Quest {
            id: "zoog_bargain",
            title: "The Bargain of the Zoogs",
            giver: "grey_zoog",
            zone: "zoog_forest",
            objective: Objective::Deliver("dream_kitten"),
            reward: Reward {
                gold: 30,
                xp: 60,
                item: Some("map_fragment"),
                flag: Some(StoryFlag::CatsHostile),
                clears: Some(StoryFlag::CatsAllied),
                ..Reward::default()
            },
        },
        Quest {
            id: "dylath_debt",
            title: "The Debt of Dylath-Leen",
            giver: "arash",
            zone: "dylath_leen",
            objective: Objective::Possess("ghast_trophy"),
            reward: Reward {
                gold: 100,
                xp: 100,
                flag: Some(StoryFlag::SafeRoute),
                spell: Some(Spell::OpenPortal),
                ..Reward::default()
            },
        },
        Quest {
            id: "secret_of_the_deep",
            title: "The Secret of the Depths",
            giver: "kuranes",
            zone: "celephais",
            objective: Objective::Explore("zak_catacombs"),
            reward: Reward {
                xp: 150,
                item: Some("sonic_quartz"),
                spell: Some(Spell::InvokeNodens),
                ..Reward::default()
            },
        },
        Quest {
            id: "offering_to_nodens",
            title: "The Offering to Nodens",
            giver: "sea_hermit",
            zone: "oriab_sea",
            objective: Objective::UseAt {
                item: "nodens_statue",
                zone: "oriab_sea",
            },
            reward: Reward {
                xp: 200,
                flag: Some(StoryFlag::NodensBlessed),
                skill: Some(Skill::MistForm),
                ..Reward::default()
            },
        },
    ]
}

impl Player {
    pub fn quest_state(&self, id: &str) -> QuestState {
        if self.completed_quests.iter().any(|q| *q == id) {
            QuestState::Completed
        } else if self.active_quests.iter().any(|q| *q == id) {
            QuestState::Active
        } else {
            QuestState::Inactive
        }
    }

    /// Activates an inactive quest. Returns false for any other state.
    pub fn accept_quest(&mut self, quest: &Quest) -> bool {
        if self.quest_state(quest.id) != QuestState::Inactive {
            return false;
        }
        self.active_quests.push(quest.id);
        log::info!("Quest accepted: {}", quest.id);
        true
    }

    pub fn objective_met(&self, quest: &Quest) -> bool {
        match quest.objective {
            Objective::Possess(item) | Objective::Deliver(item) => self.has_item(item),
            Objective::Explore(zone) => self.has_visited(zone),
            Objective::UseAt { item, zone } => self.zone == zone && self.has_item(item),
        }
    }

    /// Completes an active quest whose objective is met and grants its reward.
    ///
    /// Changes nothing when the quest is not ready, or when the reward item
    /// would not fit in the inventory. The quest then stays active.
    pub fn complete_quest(
        &mut self,
        quest: &Quest,
        registry: &Registry,
        rng: &mut impl Rng,
    ) -> Result<(), ActionError> {
        if self.quest_state(quest.id) != QuestState::Active || !self.objective_met(quest) {
            return Err(ActionError::QuestNotReady);
        }
        let frees_slot = matches!(
            quest.objective,
            Objective::Deliver(_) | Objective::UseAt { .. }
        );
        let needs_slot = quest.reward.item.is_some_and(|id| id != MAP_FRAGMENT);
        if needs_slot && !frees_slot && self.inventory_full() {
            return Err(ActionError::InventoryFull);
        }

        match quest.objective {
            Objective::Deliver(item) | Objective::UseAt { item, .. } => {
                self.remove_item(item);
            }
            Objective::Possess(_) | Objective::Explore(_) => {}
        }
        self.active_quests.retain(|q| *q != quest.id);
        self.completed_quests.push(quest.id);

        let reward = &quest.reward;
        if reward.gold != 0 {
            self.modify_stat(Stat::Gold, reward.gold, rng);
        }
        self.gain_experience(reward.xp);
        if let Some(item) = reward.item.and_then(|id| registry.item(id)) {
            self.add_item(item.clone());
        }
        if let Some(flag) = reward.clears {
            self.clear_flag(flag);
        }
        if let Some(flag) = reward.flag {
            self.set_flag(flag);
        }
        if let Some(skill) = reward.skill {
            self.learn_skill(skill);
        }
        if let Some(spell) = reward.spell {
            self.learn_spell(spell);
        }
        self.decisions.push(format!("completed:{}", quest.id));
        log::info!("Quest completed: {}", quest.id);
        Ok(())
    }

    /// Active quests that would complete by using `item` here.
    pub fn quest_for_use(&self, registry: &Registry, item: &str) -> Option<&'static str> {
        self.active_quests.iter().copied().find(|id| {
            registry.quest(id).is_some_and(|q| {
                matches!(q.objective, Objective::UseAt { item: i, zone } if i == item && zone == self.zone)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup() -> (Registry, Player, ChaCha8Rng) {
        let registry = Registry::standard();
        let player = Player::new(&registry);
        (registry, player, ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn test_quest_lifecycle() {
        let (registry, mut player, mut rng) = setup();
        let quest = registry.quest("cats_favor").unwrap().clone();
        assert_eq!(player.quest_state(quest.id), QuestState::Inactive);

        // Cannot complete before accepting
        player.add_item(registry.item("dream_kitten").unwrap().clone());
        assert_eq!(
            player.complete_quest(&quest, &registry, &mut rng),
            Err(ActionError::QuestNotReady)
        );

        assert!(player.accept_quest(&quest));
        assert!(!player.accept_quest(&quest));
        assert_eq!(player.quest_state(quest.id), QuestState::Active);

        assert_eq!(player.complete_quest(&quest, &registry, &mut rng), Ok(()));
        assert_eq!(player.quest_state(quest.id), QuestState::Completed);
        assert_eq!(player.gold, 70);
        assert_eq!(player.experience, 80);
        assert!(player.has_flag(StoryFlag::CatsAllied));
        // Possess keeps the item
        assert!(player.has_item("dream_kitten"));

        // No regression and no double reward
        assert!(!player.accept_quest(&quest));
        assert_eq!(
            player.complete_quest(&quest, &registry, &mut rng),
            Err(ActionError::QuestNotReady)
        );
        assert_eq!(player.gold, 70);
    }

    #[test]
    fn test_objective_not_met_changes_nothing() {
        let (registry, mut player, mut rng) = setup();
        let quest = registry.quest("dylath_debt").unwrap().clone();
        player.accept_quest(&quest);
        let before = player.clone();
        assert_eq!(
            player.complete_quest(&quest, &registry, &mut rng),
            Err(ActionError::QuestNotReady)
        );
        assert_eq!(player, before);
    }

    #[test]
    fn test_deliver_consumes_item_and_betrays_cats() {
        let (registry, mut player, mut rng) = setup();
        let quest = registry.quest("zoog_bargain").unwrap().clone();
        player.set_flag(StoryFlag::CatsAllied);
        player.add_item(registry.item("dream_kitten").unwrap().clone());
        player.accept_quest(&quest);
        assert_eq!(player.complete_quest(&quest, &registry, &mut rng), Ok(()));
        assert!(!player.has_item("dream_kitten"));
        assert_eq!(player.map_fragments, 1);
        assert!(player.has_flag(StoryFlag::CatsHostile));
        assert!(!player.has_flag(StoryFlag::CatsAllied));
    }

    #[test]
    fn test_explore_objective() {
        let (registry, mut player, mut rng) = setup();
        let quest = registry.quest("secret_of_the_deep").unwrap().clone();
        player.accept_quest(&quest);
        assert!(!player.objective_met(&quest));
        player.visited_zones.push("zak_catacombs");
        assert_eq!(player.complete_quest(&quest, &registry, &mut rng), Ok(()));
        assert!(player.has_item("sonic_quartz"));
        assert!(player.knows_spell(Spell::InvokeNodens));
    }

    #[test]
    fn test_reward_item_with_full_inventory_keeps_quest_open() {
        let (registry, mut player, mut rng) = setup();
        let quest = registry.quest("secret_of_the_deep").unwrap().clone();
        player.accept_quest(&quest);
        player.visited_zones.push("zak_catacombs");
        let stone = registry.item("common_stone").unwrap().clone();
        while player.add_item(stone.clone()) {}
        let before = player.clone();

        assert_eq!(
            player.complete_quest(&quest, &registry, &mut rng),
            Err(ActionError::InventoryFull)
        );
        assert_eq!(player, before);
        assert_eq!(player.quest_state(quest.id), QuestState::Active);

        player.inventory.pop();
        assert_eq!(player.complete_quest(&quest, &registry, &mut rng), Ok(()));
        assert!(player.has_item("sonic_quartz"));
    }

    #[test]
    fn test_map_fragment_reward_needs_no_room() {
        let (registry, mut player, mut rng) = setup();
        let quest = registry.quest("zoog_bargain").unwrap().clone();
        player.accept_quest(&quest);
        let stone = registry.item("common_stone").unwrap().clone();
        while player.add_item(stone.clone()) {}
        player.inventory.pop();
        player.add_item(registry.item("dream_kitten").unwrap().clone());
        assert!(player.inventory_full());
        assert_eq!(player.complete_quest(&quest, &registry, &mut rng), Ok(()));
        assert_eq!(player.map_fragments, 1);
    }

    #[test]
    fn test_use_at_requires_zone() {
        let (registry, mut player, mut rng) = setup();
        let quest = registry.quest("offering_to_nodens").unwrap().clone();
        player.accept_quest(&quest);
        player.add_item(registry.item("nodens_statue").unwrap().clone());
        assert_eq!(player.quest_for_use(&registry, "nodens_statue"), None);
        assert_eq!(
            player.complete_quest(&quest, &registry, &mut rng),
            Err(ActionError::QuestNotReady)
        );

        player.zone = "oriab_sea";
        assert_eq!(
            player.quest_for_use(&registry, "nodens_statue"),
            Some("offering_to_nodens")
        );
        assert_eq!(player.complete_quest(&quest, &registry, &mut rng), Ok(()));
        assert!(player.has_skill(Skill::MistForm));
        assert!(!player.has_item("nodens_statue"));
    }
}
