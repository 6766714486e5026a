//! Kadath - a turn-based journey through the Dreamlands.
//!
//! The engine behind the terminal game: the state machine, combat, the
//! player's resources, exploration outcomes and save slots. Exposed as a
//! library for testing; the terminal front end lives in the binary.

pub mod achievements;
pub mod character;
pub mod combat;
pub mod config;
pub mod core;
pub mod error;
pub mod items;
pub mod registry;
pub mod zones;
