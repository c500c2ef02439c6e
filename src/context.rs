//! Application Context
//!
//! Hands the view reconciler to components and mirrors its state into the
//! app store after every intent.

use std::future::Future;
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use checklist_core::{BrowserStorage, DomainResult, Item, ItemRepository, ViewReconciler};

use crate::store::{store_set_draft, store_sync_view, AppStateStoreFields, AppStore};

pub type Reconciler = ViewReconciler<ItemRepository<BrowserStorage>>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    reconciler: StoredValue<Arc<Reconciler>>,
    store: AppStore,
}

impl AppContext {
    pub fn new(reconciler: Arc<Reconciler>, store: AppStore) -> Self {
        Self {
            reconciler: StoredValue::new(reconciler),
            store,
        }
    }

    /// Push the reconciler's current view into the store
    pub fn refresh(&self) {
        let view = self.reconciler.with_value(|r| r.view());
        store_sync_view(&self.store, view);
    }

    /// Run a synchronous intent (dialogs, confirmation), then refresh
    pub fn apply<T>(&self, intent: impl FnOnce(&Reconciler) -> DomainResult<T>) {
        if let Err(e) = self.reconciler.with_value(|r| intent(r)) {
            log::warn!("Intent rejected: {}", e);
        }
        self.refresh();
    }

    /// Run a store-backed intent in the background, refreshing when it settles
    pub fn dispatch<F, Fut>(&self, intent: F)
    where
        F: FnOnce(Arc<Reconciler>) -> Fut + 'static,
        Fut: Future<Output = DomainResult<Vec<Item>>> + 'static,
    {
        let reconciler = self.reconciler.get_value();
        let ctx = *self;
        *self.store.pending().write() = true;
        spawn_local(async move {
            if let Err(e) = intent(reconciler).await {
                log::warn!("Intent failed: {}", e);
            }
            ctx.refresh();
        });
    }

    /// Update the editor draft without re-rendering the list
    pub fn set_draft(&self, draft: String) {
        self.reconciler.with_value(|r| r.set_draft(draft.clone()));
        store_set_draft(&self.store, draft);
    }

    pub fn allow_edit_checked(&self) -> bool {
        self.reconciler.with_value(|r| r.config().allow_edit_checked)
    }
}
