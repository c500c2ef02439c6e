//! Domain Layer
//!
//! Contains the item entity and core abstractions.
//! This layer has no storage dependencies (except serde for serialization).

mod entity;
mod item;

pub use entity::{Entity, DomainError, DomainResult};
pub use item::{Item, ItemId, ItemPatch};
