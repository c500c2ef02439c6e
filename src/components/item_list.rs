//! Item List Component

use leptos::prelude::*;

use crate::components::ItemRow;
use crate::store::{use_app_store, AppStateStoreFields};

/// All items, in store order
#[component]
pub fn ItemList() -> impl IntoView {
    let store = use_app_store();

    view! {
        <ul class="item-list">
            <For
                each=move || store.items().get()
                // Key on every mutable field so edits and toggles re-render the row
                key=|item| (item.id, item.text.clone(), item.checked)
                children=move |item| view! { <ItemRow item=item /> }
            />
        </ul>
        <Show when=move || store.items().with(|items| items.is_empty())>
            <p class="empty-hint">"Nothing to do yet."</p>
        </Show>
    }
}
