//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! Implementations can sit on localStorage, files, memory, etc.

use async_trait::async_trait;

use crate::config::ListOrder;
use crate::domain::{DomainResult, Entity, Item, ItemId, ItemPatch};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity; the repository assigns its id
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace an existing entity; `NotFound` if its id is absent
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Delete entity by ID; deleting an absent id succeeds
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}

/// Item-specific operations on top of CRUD
#[async_trait]
pub trait ItemStore: Repository<Item> {
    /// Update only the fields the patch carries
    async fn patch(&self, id: ItemId, patch: &ItemPatch) -> DomainResult<Item>;

    /// Flip `checked` on one item
    async fn toggle(&self, id: ItemId) -> DomainResult<Item>;

    /// Discard whatever is persisted, readable or not
    async fn reset(&self) -> DomainResult<()>;

    /// Where newly created items are placed
    fn order(&self) -> ListOrder;
}
