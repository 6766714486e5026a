//! Core game state, input mapping and the world loop.

#![allow(unused_imports)]

pub mod constants;
pub mod ending;
pub mod game_logic;
pub mod game_state;
pub mod input;

pub use constants::*;
pub use ending::{ending_for, Ending, RunSummary};
pub use game_state::{GameMode, GameStateMachine};
pub use input::{map_key, Command, InventoryAction, Prompt};
