//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The store is a
//! render mirror of the reconciler's view state; the reconciler stays the
//! source of truth.

use leptos::prelude::*;
use reactive_stores::Store;
use checklist_core::{DomainError, Editor, Item, ItemId, ViewState};

/// Render state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Items in display order
    pub items: Vec<Item>,
    /// Open add/edit dialog
    pub editor: Option<Editor>,
    /// Item awaiting delete confirmation
    pub pending_delete: Option<ItemId>,
    /// A store call is in flight; controls are disabled meanwhile
    pub pending: bool,
    pub error: Option<DomainError>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Copy a reconciler view into the store
pub fn store_sync_view(store: &AppStore, view: ViewState) {
    let pending = view.is_pending();
    *store.items().write() = view.items;
    *store.editor().write() = view.editor;
    *store.pending_delete().write() = view.pending_delete;
    *store.pending().write() = pending;
    *store.error().write() = view.last_error;
}

/// Replace only the editor draft, leaving the list untouched
pub fn store_set_draft(store: &AppStore, draft: String) {
    if let Some(editor) = store.editor().write().as_mut() {
        editor.draft = draft;
    }
}
