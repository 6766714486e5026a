//! Combat: the bestiary and the round-based engine.

#![allow(unused_imports)]

pub mod bestiary;
pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
