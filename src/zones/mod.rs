//! The Dreamlands: zone graph, exploration outcomes and dreams.

pub mod data;
pub mod dreams;
pub mod encounter;

#[allow(unused_imports)]
pub use data::*;
#[allow(unused_imports)]
pub use dreams::{dream_chance, maybe_dream, Dream, DreamKind};
#[allow(unused_imports)]
pub use encounter::{resolve, resolve_entity, Encounter};
