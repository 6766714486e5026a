//! Error taxonomy for the engine.
//!
//! `ActionError` rejects a player action before anything is mutated,
//! `LoadError` reports an unusable snapshot, and `Fault` marks a broken
//! internal invariant during a state transition.

use thiserror::Error;

use crate::core::game_state::GameMode;

/// A player action rejected because a precondition does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Not enough gold: {cost} needed, {available} held")]
    InsufficientGold { cost: i32, available: i32 },

    #[error("Inventory is full")]
    InventoryFull,

    #[error("No usable item")]
    NoUsableItem,

    #[error("Not enough willpower: {cost} needed, {available} held")]
    InsufficientWillpower { cost: i32, available: i32 },

    #[error("You have not learned {0}")]
    MissingSkill(&'static str),

    #[error("You cannot lead more than {0} allies")]
    AllyLimit(usize),

    #[error("Invalid selection")]
    InvalidSelection,

    #[error("{0} cannot be discarded")]
    NotDiscardable(&'static str),

    #[error("{0} cannot be equipped")]
    NotEquippable(&'static str),

    #[error("Cannot rest: {0}")]
    CannotRest(&'static str),

    #[error("There is no shop here")]
    NoShop,

    #[error("Nobody here wants to talk")]
    NoOneToTalkTo,

    #[error("That task is not finished")]
    QuestNotReady,

    #[error("You do not know {0}")]
    UnknownSpell(&'static str),

    #[error("You remember no other place to reach")]
    NoDestination,
}

/// A snapshot that could not be turned back into a player.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Slot {0} is empty")]
    EmptySlot(String),

    #[error("Could not read save: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Save is malformed: {0}")]
    Invalid(String),
}

/// An unexpected internal error raised while handling a transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Internal fault in {mode:?}: {reason}")]
pub struct Fault {
    pub mode: GameMode,
    pub reason: String,
}

impl Fault {
    pub fn new(mode: GameMode, reason: impl Into<String>) -> Self {
        Self {
            mode,
            reason: reason.into(),
        }
    }
}
