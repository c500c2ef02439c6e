//! Checklist Frontend App
//!
//! Main application component: header, list, and the two dialogs.

use std::sync::Arc;

use leptos::prelude::*;
use reactive_stores::Store;
use checklist_core::{BrowserStorage, ChecklistConfig, ItemRepository, ViewReconciler};

use crate::components::{DeleteConfirmDialog, ErrorBanner, ItemDialog, ItemList};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let storage = BrowserStorage::new();
    let config = ChecklistConfig::load(&storage);
    let repo = ItemRepository::with_config(storage, config.store);
    let reconciler = Arc::new(ViewReconciler::new(Arc::new(repo), config.view));

    // State
    let store = Store::new(AppState::default());
    provide_context(store);
    let ctx = AppContext::new(reconciler, store);
    provide_context(ctx);

    // Load items on mount
    Effect::new(move |_| {
        ctx.dispatch(|r| async move { r.load().await });
    });

    // Only the banner's discard button may replace unreadable data
    let unreadable = move || store.error().with(|err| err.as_ref().is_some_and(|e| e.is_corrupt_state()));

    let item_count = move || {
        let items = store.items().get();
        let done = items.iter().filter(|item| item.checked).count();
        format!("{} items, {} done", items.len(), done)
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Todo List"</h1>
                <button
                    class="add-btn"
                    disabled=move || store.pending().get() || unreadable()
                    on:click=move |_| ctx.apply(|r| r.open_create())
                >
                    "Add Todo"
                </button>
            </header>

            <ErrorBanner />

            <main class="main-content">
                <ItemList />
                <p class="item-count">{item_count}</p>
            </main>

            <ItemDialog />
            <DeleteConfirmDialog />
        </div>
    }
}
