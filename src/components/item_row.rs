//! Item Row Component
//!
//! Checkbox, text, and edit/delete actions for one item.

use leptos::prelude::*;
use checklist_core::Item;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ItemRow(item: Item) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let id = item.id;
    let checked = item.checked;
    let edit_locked = checked && !ctx.allow_edit_checked();
    let pending = move || store.pending().get();

    view! {
        <li class=if checked { "item-row checked" } else { "item-row" }>
            <input
                type="checkbox"
                checked=checked
                disabled=pending
                on:change=move |_| ctx.dispatch(move |r| async move { r.toggle(id).await })
            />
            <span class="item-text">{item.text}</span>
            <button
                class="edit-btn"
                aria-label="Edit"
                disabled=move || edit_locked || pending()
                on:click=move |_| ctx.apply(|r| r.open_edit(id))
            >
                "Edit"
            </button>
            <button
                class="delete-btn"
                aria-label="Delete"
                disabled=pending
                on:click=move |_| ctx.apply(|r| r.request_delete(id))
            >
                "Delete"
            </button>
        </li>
    }
}
