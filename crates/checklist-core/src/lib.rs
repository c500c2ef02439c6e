//! Checklist Core
//!
//! Layered architecture:
//! - domain: the item entity and error taxonomy
//! - repository: durable item storage with format migration
//! - reconciler: intent handling and the snapshot the UI renders
//! - config: store and view settings

pub mod config;
pub mod domain;
pub mod reconciler;
pub mod repository;

pub use config::{ChecklistConfig, IdStrategy, ListOrder, RefreshStrategy, StoreConfig, ViewConfig};
pub use domain::{DomainError, DomainResult, Entity, Item, ItemId, ItemPatch};
pub use reconciler::{EditTarget, Editor, IntentKind, Phase, ViewReconciler, ViewState};
pub use repository::{
    BrowserStorage, ItemRepository, ItemStore, KeyValueStorage, MemoryStorage, Repository, StorageError,
};
