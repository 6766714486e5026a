//! Achievement system module.
//!
//! Achievements live on the player and travel with the save; New Game+
//! carries them into the next cycle.

pub mod data;
pub mod types;

pub use data::{get_achievement_def, AchievementDef, ALL_ACHIEVEMENTS};
pub use types::{check_progress, AchievementCategory, AchievementId};
