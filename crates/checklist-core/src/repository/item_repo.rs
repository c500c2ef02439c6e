//! Item Repository
//!
//! Keeps the whole collection as one JSON blob under a single storage key.
//! Every operation re-reads the blob, so the returned data always reflects
//! what is durably stored; mutations are read-modify-write cycles serialized
//! by the id allocator lock, and the blob is only replaced once the new
//! collection has been fully built and encoded.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::{ListOrder, StoreConfig};
use crate::domain::{DomainError, DomainResult, Item, ItemId, ItemPatch};
use super::id::IdAllocator;
use super::payload::{self, Decoded};
use super::storage::KeyValueStorage;
use super::traits::{ItemStore, Repository};

/// Item repository over a key-value storage backend
pub struct ItemRepository<S> {
    storage: S,
    config: StoreConfig,
    ids: Mutex<IdAllocator>,
}

impl<S: KeyValueStorage> ItemRepository<S> {
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    pub fn with_config(storage: S, config: StoreConfig) -> Self {
        let ids = Mutex::new(IdAllocator::new(config.id_strategy));
        Self { storage, config, ids }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn key(&self) -> &str {
        &self.config.storage_key
    }

    fn read(&self) -> DomainResult<Decoded> {
        match self.storage.get_item(self.key())? {
            Some(raw) => payload::decode(&raw),
            None => Ok(Decoded::empty()),
        }
    }

    /// Collection a write starts from
    ///
    /// An unreadable payload counts as empty here: the caller is about to
    /// replace it explicitly.
    fn read_for_write(&self) -> DomainResult<Vec<Item>> {
        match self.read() {
            Ok(decoded) => Ok(decoded.items),
            Err(DomainError::CorruptState(reason)) => {
                log::warn!("Overwriting unreadable payload under '{}': {}", self.key(), reason);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn write(&self, items: &[Item]) -> DomainResult<()> {
        let raw = payload::encode(items)?;
        self.storage.set_item(self.key(), &raw)?;
        Ok(())
    }

    /// Replace the item with `id` by `f(item)` and persist
    async fn modify<F>(&self, id: ItemId, f: F) -> DomainResult<Item>
    where
        F: FnOnce(&mut Item) + Send,
    {
        let _guard = self.ids.lock().await;
        let mut items = self.read_for_write()?;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("item {}", id)))?;
        f(item);
        let updated = item.clone();
        self.write(&items)?;
        Ok(updated)
    }
}

#[async_trait]
impl<S: KeyValueStorage> Repository<Item> for ItemRepository<S> {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let mut ids = self.ids.lock().await;
        let mut items = self.read_for_write()?;

        let item = Item {
            id: ids.next(items.iter().map(|item| item.id))?,
            text: entity.text.clone(),
            checked: entity.checked,
        };
        match self.config.order {
            ListOrder::NewestFirst => items.insert(0, item.clone()),
            ListOrder::InsertionOrder => items.push(item.clone()),
        }

        self.write(&items)?;
        log::debug!("Created item {}", item.id);
        Ok(item)
    }

    async fn find_by_id(&self, id: ItemId) -> DomainResult<Option<Item>> {
        Ok(self.read()?.items.into_iter().find(|item| item.id == id))
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let _guard = self.ids.lock().await;
        let decoded = self.read()?;

        if decoded.format.needs_migration() {
            match self.write(&decoded.items) {
                Ok(()) => log::info!(
                    "Migrated {} items under '{}' from {:?} format",
                    decoded.items.len(),
                    self.key(),
                    decoded.format
                ),
                // The old payload is still intact; the next load migrates again.
                Err(e) => log::warn!("Could not save migrated items under '{}': {}", self.key(), e),
            }
        }

        Ok(decoded.items)
    }

    async fn update(&self, entity: &Item) -> DomainResult<Item> {
        let replacement = entity.clone();
        let updated = self.modify(entity.id, move |item| *item = replacement).await?;
        log::debug!("Updated item {}", updated.id);
        Ok(updated)
    }

    async fn delete(&self, id: ItemId) -> DomainResult<()> {
        let _guard = self.ids.lock().await;
        let mut items = self.read_for_write()?;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(());
        }
        self.write(&items)?;
        log::debug!("Deleted item {}", id);
        Ok(())
    }
}

#[async_trait]
impl<S: KeyValueStorage> ItemStore for ItemRepository<S> {
    async fn patch(&self, id: ItemId, patch: &ItemPatch) -> DomainResult<Item> {
        let patch = patch.clone();
        self.modify(id, move |item| item.apply(&patch)).await
    }

    async fn toggle(&self, id: ItemId) -> DomainResult<Item> {
        self.modify(id, |item| item.checked = !item.checked).await
    }

    async fn reset(&self) -> DomainResult<()> {
        let _guard = self.ids.lock().await;
        self.storage.remove_item(self.key())?;
        log::info!("Discarded stored items under '{}'", self.key());
        Ok(())
    }

    fn order(&self) -> ListOrder {
        self.config.order
    }
}
