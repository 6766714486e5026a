//! The player character: resources, progression, quests and persistence.

pub mod disorders;
pub mod flags;
pub mod manager;
pub mod player;
pub mod progression;
pub mod quests;
pub mod save;
pub mod spells;

pub use disorders::Disorder;
pub use flags::StoryFlag;
pub use manager::{MemoryStore, SaveManager, SaveStore, Slot, SlotStatus};
pub use player::{DayCycle, LunarPhase, Player, Stat, Status};
pub use progression::{Skill, Upgrade};
pub use quests::{Objective, Quest, QuestState};
pub use spells::Spell;
