//! Item system: item templates, the catalog and shop stock.

pub mod data;
pub mod shops;
pub mod types;

pub use data::*;
pub use shops::*;
pub use types::*;
